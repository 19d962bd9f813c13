//! Request-scoped path parameters.
//!
//! A successful match produces a [`PathParams`] value which the router
//! inserts into the request's extensions right before the handler runs.
//! The set is dropped together with the request, so nothing outlives the
//! handler invocation and concurrent requests never share state.

use axum::http::Request;

/// Parameters extracted from the request path by the matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    named: Vec<(String, String)>,
    wildcard: Option<String>,
}

impl PathParams {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            named: Vec::with_capacity(capacity),
            wildcard: None,
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: &str) {
        self.named.push((name.to_string(), value.to_string()));
    }

    pub(crate) fn set_wildcard(&mut self, tail: &str) {
        self.wildcard = Some(tail.to_string());
    }

    /// Value bound to `:name`, if the pattern had such a segment.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remainder of the path captured by a trailing `*`.
    ///
    /// Not a named parameter: `get("*")` never returns it.
    pub fn wildcard(&self) -> Option<&str> {
        self.wildcard.as_deref()
    }

    /// Named parameters in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of named parameters.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }
}

/// Parameter lookup for requests dispatched by the router.
pub trait RequestParamsExt {
    /// The full parameter set, present only inside a matched handler.
    fn path_params(&self) -> Option<&PathParams>;

    /// Value bound to `:name` for this request.
    fn param(&self, name: &str) -> Option<&str> {
        self.path_params().and_then(|p| p.get(name))
    }

    /// Wildcard tail for this request.
    fn wildcard(&self) -> Option<&str> {
        self.path_params().and_then(|p| p.wildcard())
    }
}

impl<B> RequestParamsExt for Request<B> {
    fn path_params(&self) -> Option<&PathParams> {
        self.extensions().get::<PathParams>()
    }
}
