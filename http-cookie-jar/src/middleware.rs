//! middleware driving [CookieJar] lifecycle for each request.

use std::sync::Arc;

use http::{Request, Response};
use xitca_service::Service;

use crate::{CookieConfig, CookieJar, error::CookieServiceError};

/// builder for cookie jar middleware.
///
/// For every request a [CookieJar] is constructed from request headers and lent to inner service
/// through [CookieContext]. After inner service produced a response the jar is finished into the
/// response headers.
///
/// # Examples
/// ```rust
/// # use std::convert::Infallible;
/// # use http::{Request, Response};
/// # use http_cookie_jar::middleware::{CookieContext, CookieMiddleware};
/// # use xitca_service::{fn_service, Service, ServiceExt};
/// async fn handler(mut ctx: CookieContext<'_, Request<()>>) -> Result<Response<()>, Infallible> {
///     let visits = ctx.jar().get("visits").and_then(|v| v.parse::<u32>().ok()).unwrap_or(0);
///     ctx.jar_mut().set("visits", (visits + 1).to_string());
///     Ok(Response::new(()))
/// }
///
/// # async fn middleware() {
/// let service = fn_service(handler)
///     .enclosed(CookieMiddleware::new())
///     .call(())
///     .await
///     .unwrap();
///
/// let res = service.call(Request::new(())).await.unwrap();
/// assert_eq!(res.headers().get(http::header::SET_COOKIE).unwrap(), "visits=1");
/// # }
/// ```
#[derive(Clone)]
pub struct CookieMiddleware {
    config: Arc<CookieConfig>,
}

impl Default for CookieMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieMiddleware {
    /// construct middleware emitting `Set-Cookie` headers without default attributes.
    pub fn new() -> Self {
        Self::with_config(CookieConfig::new())
    }

    /// construct middleware with given default attributes for emitted `Set-Cookie` headers.
    pub fn with_config(config: CookieConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S, E> Service<Result<S, E>> for CookieMiddleware {
    type Response = service::CookieService<S>;
    type Error = E;

    async fn call(&self, res: Result<S, E>) -> Result<Self::Response, Self::Error> {
        res.map(|service| service::CookieService {
            service,
            config: self.config.clone(),
        })
    }
}

/// request type passed to inner service of [CookieMiddleware]. carries the parent request and a
/// mutable reference to request's [CookieJar].
pub struct CookieContext<'a, Req> {
    req: Req,
    jar: &'a mut CookieJar,
}

impl<'a, Req> CookieContext<'a, Req> {
    #[inline]
    pub fn req(&self) -> &Req {
        &self.req
    }

    #[inline]
    pub fn req_mut(&mut self) -> &mut Req {
        &mut self.req
    }

    #[inline]
    pub fn jar(&self) -> &CookieJar {
        &*self.jar
    }

    #[inline]
    pub fn jar_mut(&mut self) -> &mut CookieJar {
        &mut *self.jar
    }

    /// Destruct context into a tuple of (parent_request, &mut jar).
    #[inline]
    pub fn into_parts(self) -> (Req, &'a mut CookieJar) {
        (self.req, self.jar)
    }
}

pub use self::service::CookieService;

mod service {
    use xitca_service::ready::ReadyService;

    use super::*;

    pub struct CookieService<S> {
        pub(super) service: S,
        pub(super) config: Arc<CookieConfig>,
    }

    impl<B, S, ResB, Err> Service<Request<B>> for CookieService<S>
    where
        S: for<'j> Service<CookieContext<'j, Request<B>>, Response = Response<ResB>, Error = Err>,
    {
        type Response = Response<ResB>;
        type Error = CookieServiceError<Err>;

        async fn call(&self, mut req: Request<B>) -> Result<Self::Response, Self::Error> {
            let mut jar = CookieJar::from_request(&mut req).with_config(self.config.clone());

            let mut res = self
                .service
                .call(CookieContext { req, jar: &mut jar })
                .await
                .map_err(CookieServiceError::Service)?;

            jar.finish(res.headers_mut())?;

            Ok(res)
        }
    }

    impl<S> ReadyService for CookieService<S>
    where
        S: ReadyService,
    {
        type Ready = S::Ready;

        #[inline]
        async fn ready(&self) -> Self::Ready {
            self.service.ready().await
        }
    }
}
