//! HTML forms can only send GET and POST. This layer rewrites `POST ...?_method=DELETE`
//! (or PUT/PATCH) into the named method. It must wrap the router, not be added with
//! `Router::layer`, because routing happens before route layers run.

use axum::http::{Method, Request};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Query parameter naming the intended method.
pub const METHOD_OVERRIDE_PARAM: &str = "_method";

#[derive(Clone, Copy, Debug, Default)]
pub struct MethodOverrideLayer;

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

#[derive(Clone, Debug)]
pub struct MethodOverride<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for MethodOverride<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if let Some(method) = overridden_method(req.method(), req.uri().query()) {
            tracing::trace!(from = %req.method(), to = %method, "method override");
            *req.method_mut() = method;
        }
        self.inner.call(req)
    }
}

/// The method a POST asks to be treated as, if any.
pub fn overridden_method(method: &Method, query: Option<&str>) -> Option<Method> {
    if method != Method::POST {
        return None;
    }
    let value = query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == METHOD_OVERRIDE_PARAM).then_some(value)
    })?;
    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
