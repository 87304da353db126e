//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route names must be unique and usable as paths
//! - The address must carry a port
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FileConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::FileConfig;
use crate::routing::{route_path, RouteNameError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("address is empty")]
    EmptyAddress,

    #[error("address {0:?} has no valid port")]
    InvalidPort(String),

    #[error("no routes configured")]
    NoRoutes,

    #[error("route {0:?} is defined more than once")]
    DuplicateRoute(String),

    #[error("route {name:?}: {source}")]
    InvalidRouteName {
        name: String,
        #[source]
        source: RouteNameError,
    },
}

pub fn validate_config(config: &FileConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.addr.is_empty() {
        errors.push(ValidationError::EmptyAddress);
    } else {
        let port = config.addr.rsplit_once(':').map(|(_, port)| port);
        if port.and_then(|p| p.parse::<u16>().ok()).is_none() {
            errors.push(ValidationError::InvalidPort(config.addr.clone()));
        }
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    // Duplicates are judged by served path, so "echo" and "/echo" collide.
    let mut seen = HashSet::new();
    for route in &config.routes {
        match route_path(&route.name) {
            Ok(path) => {
                if !seen.insert(path) {
                    errors.push(ValidationError::DuplicateRoute(route.name.clone()));
                }
            }
            Err(source) => errors.push(ValidationError::InvalidRouteName {
                name: route.name.clone(),
                source,
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{HandlerKind, RouteEntry};

    fn route(name: &str) -> RouteEntry {
        RouteEntry {
            name: name.to_string(),
            handler: HandlerKind::Echo,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = FileConfig {
            addr: ":8080".into(),
            routes: vec![route("echo"), route("api/echo")],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_reports_every_problem() {
        let config = FileConfig {
            addr: "localhost".into(),
            routes: vec![route("echo"), route("echo"), route("{bad}")],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidPort("localhost".into()),
                ValidationError::DuplicateRoute("echo".into()),
                ValidationError::InvalidRouteName {
                    name: "{bad}".into(),
                    source: RouteNameError::InvalidChar('{'),
                },
            ]
        );
    }

    #[test]
    fn test_leading_slash_duplicates_plain_name() {
        let config = FileConfig {
            addr: ":8080".into(),
            routes: vec![route("echo"), route("/echo")],
        };
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::DuplicateRoute("/echo".into())]
        );
    }

    #[test]
    fn test_empty_config() {
        let config = FileConfig {
            addr: String::new(),
            routes: Vec::new(),
        };
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::EmptyAddress, ValidationError::NoRoutes]
        );
    }
}
