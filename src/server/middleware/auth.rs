//! Authentication middleware

use crate::auth::AuthMethod;
use crate::server::middleware::helpers::{extract_auth_method, is_public_route};
use crate::server::state::AppState;
use crate::utils::error::AdminError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

/// Resolves `Authorization: Bearer` tokens into an [`Identity`](crate::auth::Identity)
/// stored in the request extensions. Protected routes without a valid token
/// are answered with 401; paths matching no route are left to the 404 handler.
pub struct Authenticate;

impl<S, B> Transform<S, ServiceRequest> for Authenticate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthenticateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticateService { service }))
    }
}

/// Service implementation for [`Authenticate`]
pub struct AuthenticateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // unmatched paths fall through to the 404 default service
        let unrouted = req.match_pattern().is_none();
        if unrouted || is_public_route(req.path()) || req.method() == Method::OPTIONS {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
            let err = AdminError::internal("Application state is not configured");
            return Box::pin(async move { Ok(req.error_response(err).map_into_right_body()) });
        };

        let identity = match extract_auth_method(req.headers()) {
            AuthMethod::Jwt(token) => state.jwt.authenticate(&token),
            AuthMethod::None => {
                debug!("No credentials for {} {}", req.method(), req.path());
                Err(AdminError::unauthorized("Unauthenticated"))
            }
        };

        match identity {
            Ok(identity) => {
                debug!("Authenticated {} for {}", identity.subject, req.path());
                req.extensions_mut().insert(identity);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(err) => {
                warn!("Authentication failed for {}: {}", req.path(), err);
                Box::pin(async move { Ok(req.error_response(err).map_into_right_body()) })
            }
        }
    }
}
