//! Minimal "handler wraps handler" pipeline the interceptors plug into.

use crate::transport::Context;

/// A step of the request pipeline: `(context, request) -> Result<response, error>`.
pub trait Handler<Req> {
    type Response;
    type Error;

    fn handle(&self, ctx: &mut Context, req: Req) -> Result<Self::Response, Self::Error>;
}

/// Wraps a handler, producing a new handler that runs before (and around) it.
pub trait Middleware<H> {
    type Handler;

    fn wrap(&self, inner: H) -> Self::Handler;
}

/// Handler built from a closure. See [`handler_fn`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F> {
    f: F,
}

/// Turns a closure into a [`Handler`].
///
/// The explicit `Fn` bound lets closures be written without annotating the
/// context parameter.
pub fn handler_fn<F, Req, Resp, E>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut Context, Req) -> Result<Resp, E>,
{
    HandlerFn { f }
}

impl<F, Req, Resp, E> Handler<Req> for HandlerFn<F>
where
    F: Fn(&mut Context, Req) -> Result<Resp, E>,
{
    type Response = Resp;
    type Error = E;

    fn handle(&self, ctx: &mut Context, req: Req) -> Result<Resp, E> {
        (self.f)(ctx, req)
    }
}

impl<H, Req> Handler<Req> for &H
where
    H: Handler<Req> + ?Sized,
{
    type Response = H::Response;
    type Error = H::Error;

    fn handle(&self, ctx: &mut Context, req: Req) -> Result<Self::Response, Self::Error> {
        (**self).handle(ctx, req)
    }
}

impl<H, Req> Handler<Req> for std::sync::Arc<H>
where
    H: Handler<Req> + ?Sized,
{
    type Response = H::Response;
    type Error = H::Error;

    fn handle(&self, ctx: &mut Context, req: Req) -> Result<Self::Response, Self::Error> {
        (**self).handle(ctx, req)
    }
}
