//! Route table and route name rules.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::http::service::SharedService;

/// Why a route name cannot become a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteNameError {
    #[error("route name is empty")]
    Empty,

    #[error("route name has an empty segment")]
    EmptySegment,

    #[error("route name contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Turn a route name into the path it is served under.
///
/// Names are `/`-separated segments of ASCII letters, digits, `-`, `_`, `.`
/// and `~`. A single leading `/` is tolerated.
pub fn route_path(name: &str) -> Result<String, RouteNameError> {
    let trimmed = name.strip_prefix('/').unwrap_or(name);
    if trimmed.is_empty() {
        return Err(RouteNameError::Empty);
    }
    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(RouteNameError::EmptySegment);
        }
        if let Some(bad) = segment
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')))
        {
            return Err(RouteNameError::InvalidChar(bad));
        }
    }
    Ok(format!("/{trimmed}"))
}

/// Route name → service.
#[derive(Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, SharedService>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, returning the service it replaced.
    pub fn insert(&mut self, name: impl Into<String>, service: SharedService) -> Option<SharedService> {
        self.routes.insert(name.into(), service)
    }

    pub fn get(&self, name: &str) -> Option<&SharedService> {
        self.routes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedService)> {
        self.routes.iter().map(|(name, service)| (name.as_str(), service))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
