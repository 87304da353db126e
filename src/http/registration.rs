//! Bind phase: attach every route's service to the shared router.
//!
//! # Responsibilities
//! - Validate each route name into a path
//! - Give each service the chance to refuse registration
//! - Mount the resulting bindings on one axum router
//!
//! # Design Decisions
//! - One task per route, joined through `TaskGroup`
//! - Any refusal aborts the whole phase; nothing is mounted

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use thiserror::Error;
use tokio::task::JoinError;

use crate::failure::BoxError;
use crate::http::service::SharedService;
use crate::observability::metrics;
use crate::routing::{route_path, RouteNameError, RouteTable};
use crate::task::TaskGroup;

/// Why a route could not be attached.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("route {name:?} has an invalid name")]
    InvalidName {
        name: String,
        #[source]
        source: RouteNameError,
    },

    #[error("route {name:?} was rejected by its service")]
    Rejected {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("routes {first:?} and {second:?} both map to {path}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("registration task did not complete")]
    Join(#[from] JoinError),
}

/// A route ready to be mounted.
pub struct Binding {
    pub name: Arc<str>,
    pub path: String,
    pub service: SharedService,
}

/// Register every route concurrently and wait for all of them.
pub async fn register_all(routes: &RouteTable) -> Result<Vec<Binding>, RegistrationError> {
    let mut group = TaskGroup::new();
    for (name, service) in routes.iter() {
        group.spawn(register(name.to_string(), service.clone()));
    }
    let bindings = group.wait().await?;
    ensure_unique_paths(&bindings)?;
    Ok(bindings)
}

/// Names that differ only by a leading `/` share a path; the router
/// cannot hold both.
fn ensure_unique_paths(bindings: &[Binding]) -> Result<(), RegistrationError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for binding in bindings {
        if let Some(first) = seen.insert(binding.path.as_str(), &*binding.name) {
            return Err(RegistrationError::DuplicatePath {
                path: binding.path.clone(),
                first: first.to_string(),
                second: binding.name.to_string(),
            });
        }
    }
    Ok(())
}

async fn register(name: String, service: SharedService) -> Result<Binding, RegistrationError> {
    let path = route_path(&name).map_err(|source| RegistrationError::InvalidName {
        name: name.clone(),
        source,
    })?;

    service
        .register(&path)
        .await
        .map_err(|source| RegistrationError::Rejected {
            name: name.clone(),
            source,
        })?;

    tracing::debug!(route = %name, path = %path, "Route registered");
    Ok(Binding {
        name: name.into(),
        path,
        service,
    })
}

/// Mount bindings on a router, any method per route.
pub fn mount(bindings: Vec<Binding>) -> Router {
    bindings
        .into_iter()
        .fold(Router::new(), |router, binding| {
            let Binding { name, path, service } = binding;
            router.route(
                &path,
                any(move |request: Request<Body>| dispatch(name.clone(), service.clone(), request)),
            )
        })
}

async fn dispatch(route: Arc<str>, service: SharedService, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();

    let response = service.call(request).await;

    tracing::debug!(
        route = %route,
        method = %method,
        status = response.status().as_u16(),
        "Request dispatched"
    );
    metrics::record_request(&route, method.as_str(), response.status().as_u16(), start_time);
    response
}
