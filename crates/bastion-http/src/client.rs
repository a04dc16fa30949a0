//! Tower layer that runs the client interceptor on outbound `http::Request`s.

use std::task::{Context, Poll};

use bastion_auth::{AuthError, BasicAuthClient};
use futures_util::future::{Either, Ready, ready};
use http::Request;
use http::header::AUTHORIZATION;
use tower::{Layer, Service};

/// Applies [`BasicAuthClient`] to every request sent through the wrapped service.
#[derive(Clone)]
pub struct BasicAuthLayer {
    auth: BasicAuthClient,
}

impl BasicAuthLayer {
    pub fn new(auth: BasicAuthClient) -> Self {
        Self { auth }
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuthService {
            auth: self.auth.clone(),
            inner,
        }
    }
}

/// Service produced by [`BasicAuthLayer`].
#[derive(Clone)]
pub struct BasicAuthService<S> {
    auth: BasicAuthClient,
    inner: S,
}

impl<S, B> Service<Request<B>> for BasicAuthService<S>
where
    S: Service<Request<B>>,
    S::Error: From<AuthError>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Either<Ready<Result<S::Response, S::Error>>, S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        match self.auth.authorization() {
            Ok(value) => {
                req.headers_mut().insert(AUTHORIZATION, value.clone());
                Either::Right(self.inner.call(req))
            }
            Err(err) => Either::Left(ready(Err(err.into()))),
        }
    }
}
