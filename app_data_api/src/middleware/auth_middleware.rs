use crate::middleware::Authenticator;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ok};
use log::debug;
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

/// 解析调用方身份并写入请求扩展，身份无效时直接返回 401
pub struct AuthMiddleware {
    authenticator: Arc<dyn Authenticator>,
}

impl AuthMiddleware {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService { service: Rc::new(service), authenticator: self.authenticator.clone() })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.authenticator.authenticate(req.headers()) {
            Ok(user) => {
                debug!("request {} {} as {:?}", req.method(), req.path(), user.id);
                req.extensions_mut().insert(user);
                let srv = Rc::clone(&self.service);
                Box::pin(async move {
                    let res = srv.call(req).await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                let response = e.error_response().map_into_right_body();
                Box::pin(async move { Ok(req.into_response(response)) })
            }
        }
    }
}
