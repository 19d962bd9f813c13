//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup, &mut Router):
//!     (method, pattern, handler)
//!     → matcher.rs (compile + validate pattern, fail fast)
//!     → router.rs (append to method's list, derive HEAD from GET)
//!
//! Dispatch (per request, shared &Router):
//!     (method, path)
//!     → trailing slash? → 301
//!     → router.rs (scan method's routes in registration order)
//!     → matcher.rs (segment match, extract params)
//!     → params.rs (attach to request extensions)
//!     → handler.rs (invoke) or not-found
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable while serving
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)
//!
//! A trie keyed by literal segments would make lookup sublinear, but it must
//! keep first-registered-wins for overlapping patterns; the linear scan is
//! fine at typical table sizes.

pub mod error;
pub mod handler;
pub mod matcher;
pub mod params;
pub mod router;

pub use error::RouteError;
pub use handler::{BoxHandler, Handler};
pub use matcher::{Pattern, Segment};
pub use params::{PathParams, RequestParamsExt};
pub use router::{derived_methods, Resolution, Route, Router};
