//! Handler objects served under a route name.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::{self, BoxFuture, FutureExt};

use crate::failure::BoxError;

/// Something that turns one request into one response.
pub trait Service: Send + Sync + 'static {
    /// Handle one request.
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response>;

    /// Called once during the bind phase with the path the service will be
    /// mounted on. An error aborts the whole bind phase.
    fn register<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<(), BoxError>> {
        let _ = path;
        future::ready(Ok(())).boxed()
    }
}

pub type SharedService = Arc<dyn Service>;
