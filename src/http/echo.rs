//! Echo handler: the response body is the request body.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

use crate::http::service::Service;

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoService;

impl Service for EchoService {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        async move {
            match axum::body::to_bytes(request.into_body(), usize::MAX).await {
                Ok(body) => (StatusCode::OK, body).into_response(),
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to read request body");
                    (StatusCode::BAD_REQUEST, "failed to read request body").into_response()
                }
            }
        }
        .boxed()
    }
}
