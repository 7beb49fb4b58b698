use crate::domain::{BlogError, CurrentUser, Permission};
use crate::infrastructure::jwt::JwtService;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{Error, HttpMessage, HttpRequest};
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

/// Trait to add authentication methods to HttpRequest
pub trait AuthRequest {
    fn current_user(&self) -> Option<CurrentUser>;
}

impl AuthRequest for HttpRequest {
    fn current_user(&self) -> Option<CurrentUser> {
        self.extensions().get::<CurrentUser>().cloned()
    }
}

/// Gate for routes that require an authenticated caller. An anonymous
/// caller (no token, or a token that failed verification) is rejected
/// with the authorization error.
pub fn require_login(req: &HttpRequest) -> Result<CurrentUser, BlogError> {
    req.current_user().ok_or(BlogError::Forbidden)
}

pub fn require_permission(user: &CurrentUser, permission: Permission) -> Result<(), BlogError> {
    if user.can(permission) {
        Ok(())
    } else {
        tracing::warn!(
            "User {} (id={}) lacks permission {:#04x}",
            user.username,
            user.id,
            permission.0
        );
        Err(BlogError::Forbidden)
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(|t| t.trim().to_string())
}

// Bearer-token middleware. Decodes the token when one is present and
// stores the caller in request extensions; anonymous requests pass
// through. Handlers gate themselves with require_login and
// require_permission.
pub struct AuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service = req.app_data::<Data<Arc<JwtService>>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            if let Some(jwt_service) = jwt_service {
                if let Some(token) = bearer_token(&req) {
                    match jwt_service.verify_token(&token) {
                        Ok(user) => {
                            req.extensions_mut().insert(user);
                        }
                        Err(e) => {
                            tracing::debug!("Rejected bearer token: {}", e);
                        }
                    }
                }
            }

            service.call(req).await
        })
    }
}
