//! Authorization middleware

use crate::auth::Identity;
use crate::server::state::AppState;
use crate::utils::error::AdminError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};

/// Guards a scope with `enforce(role, resource, method)`.
///
/// The request must already carry an [`Identity`]. A denied request never
/// reaches the wrapped service.
#[derive(Debug, Clone)]
pub struct Authorize {
    resource: Cow<'static, str>,
}

impl Authorize {
    pub fn resource<R: Into<Cow<'static, str>>>(resource: R) -> Self {
        Self {
            resource: resource.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Authorize
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AuthorizeService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorizeService {
            service: Rc::new(service),
            resource: self.resource.clone(),
        }))
    }
}

/// Service implementation for [`Authorize`]
pub struct AuthorizeService<S> {
    service: Rc<S>,
    resource: Cow<'static, str>,
}

impl<S, B> Service<ServiceRequest> for AuthorizeService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let resource = self.resource.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AdminError::internal("Application state is not configured");
                return Ok(req.error_response(err).map_into_right_body());
            };

            if !state.config.auth.rbac.enabled {
                return Ok(service.call(req).await?.map_into_left_body());
            }

            let identity = req.extensions().get::<Identity>().cloned();
            let Some(identity) = identity else {
                return Ok(req
                    .error_response(AdminError::unauthorized("Unauthenticated"))
                    .map_into_right_body());
            };

            let action = req.method().as_str().to_string();
            let allowed = match identity.role() {
                Some(role) => state.enforcer.enforce(role, &resource, &action).await?,
                None => false,
            };

            if !allowed {
                warn!(
                    "Access denied: {} ({:?}) {} {}",
                    identity.subject,
                    identity.role(),
                    action,
                    resource
                );
                return Ok(req
                    .error_response(AdminError::AccessDenied)
                    .map_into_right_body());
            }

            debug!("Access granted: {} {} {}", identity.subject, action, resource);
            Ok(service.call(req).await?.map_into_left_body())
        })
    }
}
