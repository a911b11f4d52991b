use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;

use crate::config::{AuthMode, AuthPolicy};
use crate::services::auth_service::TokenSigner;
use crate::utils::AppError;

pub use crate::services::auth_service::Claims;

/// Name of the cookie carrying the token in cookie mode.
pub const TOKEN_COOKIE: &str = "token";

/// Routes that hand out or clear tokens are always reachable.
const TOKEN_ROUTES: [&str; 2] = ["/jwt", "/logout"];

/// Decides whether a request needs a verified token under `policy`.
pub fn requires_token(policy: AuthPolicy, method: &Method, path: &str) -> bool {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    if TOKEN_ROUTES.contains(&path) {
        return false;
    }

    match policy {
        AuthPolicy::Writes => matches!(
            *method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        ),
        AuthPolicy::Payments => *method == Method::POST && path == "/payments",
    }
}

/// Pulls the raw token from the cookie or the `Authorization` header,
/// depending on the configured mode.
fn extract_token(req: &ServiceRequest, mode: AuthMode) -> Option<String> {
    match mode {
        AuthMode::Cookie => req
            .cookie(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty()),
        AuthMode::Bearer => req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()),
    }
}

/// Verifies the access token on every route the policy protects and
/// exposes the decoded `Claims` to handlers via request extensions.
#[derive(Clone)]
pub struct AuthMiddleware {
    signer: Arc<TokenSigner>,
    mode: AuthMode,
    policy: AuthPolicy,
}

impl AuthMiddleware {
    pub fn new(signer: Arc<TokenSigner>, mode: AuthMode, policy: AuthPolicy) -> Self {
        Self { signer, mode, policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            signer: self.signer.clone(),
            mode: self.mode,
            policy: self.policy,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    signer: Arc<TokenSigner>,
    mode: AuthMode,
    policy: AuthPolicy,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Decoded path, the one the router matches on.
        let path = req.match_info().as_str().to_string();
        if !requires_token(self.policy, req.method(), &path) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await });
        }

        let verified = match extract_token(&req, self.mode) {
            Some(token) => self.signer.verify(&token),
            None => {
                log::warn!("🔒 {} {} - missing token", req.method(), path);
                Err(AppError::Unauthorized)
            }
        };

        match verified {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await })
            }
            Err(e) => Box::pin(async move { Err(e.into()) }),
        }
    }
}
