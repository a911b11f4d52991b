use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    web, HttpResponse,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    config::{AppConfig, AuthMode},
    middleware::auth::TOKEN_COOKIE,
    services::auth_service::TokenSigner,
    utils::AppError,
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

fn token_cookie<'c>(value: String, config: &AppConfig) -> Cookie<'c> {
    Cookie::build(TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(config.production)
        .same_site(SameSite::None)
        .finish()
}

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body(content = Object, description = "Identity payload to embed in the token"),
    responses(
        (status = 200, description = "Token issued (cookie mode: Set-Cookie + success flag; bearer mode: token in body)", body = TokenResponse),
        (status = 400, description = "Payload is not a JSON object")
    )
)]
pub async fn issue_token(
    signer: web::Data<TokenSigner>,
    config: web::Data<AppConfig>,
    identity: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let who = identity
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or("anonymous")
        .to_string();
    log::info!("🔐 POST /jwt - issuing token for {}", who);

    let token = signer.issue(identity.into_inner())?;

    match config.auth_mode {
        AuthMode::Cookie => {
            let mut cookie = token_cookie(token, &config);
            cookie.set_max_age(CookieDuration::seconds(signer.ttl().num_seconds()));
            Ok(HttpResponse::Ok()
                .cookie(cookie)
                .json(SuccessResponse { success: true }))
        }
        AuthMode::Bearer => Ok(HttpResponse::Ok().json(TokenResponse { token })),
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Token cookie cleared", body = SuccessResponse)
    )
)]
pub async fn logout(config: web::Data<AppConfig>) -> HttpResponse {
    log::info!("👋 POST /logout");

    match config.auth_mode {
        AuthMode::Cookie => {
            let mut cookie = token_cookie(String::new(), &config);
            cookie.make_removal();
            HttpResponse::Ok()
                .cookie(cookie)
                .json(SuccessResponse { success: true })
        }
        AuthMode::Bearer => HttpResponse::Ok().json(SuccessResponse { success: true }),
    }
}
