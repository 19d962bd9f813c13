//! Registration errors.

use thiserror::Error;

/// A route pattern that cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("pattern {0:?} must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern {0:?} ends with '/' and would always be redirected")]
    TrailingSlash(String),

    #[error("pattern {0:?} has a ':' segment without a parameter name")]
    EmptyParamName(String),

    #[error("pattern {0:?} has a '*' segment that is not the last segment")]
    WildcardNotLast(String),

    #[error("pattern {pattern:?} binds parameter {name:?} more than once")]
    DuplicateParam { pattern: String, name: String },
}
