use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR3 Management API",
        version = "1.0.0",
        description = "Asset and personnel records for HR3 Management.\n\n**Authentication:** `POST /jwt` issues a token, delivered as the `token` cookie or as a bearer token depending on `AUTH_MODE`. Write routes require it.\n\n**Collections:** users, hrs, unemployed, assigned, teams, payments, assets, requests, pending.",
        contact(
            name = "HR3 Management Team"
        )
    ),
    paths(
        // Auth
        crate::api::auth::issue_token,
        crate::api::auth::logout,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // People & assets
        crate::api::people::update_hr_package,
        crate::api::assets::update_asset_quantity,
        crate::api::assets::upsert_asset,

        // Requests
        crate::api::requests::approve_request,
        crate::api::requests::reject_request,

        // Reports
        crate::api::reports::monthly_requests,
        crate::api::reports::request_chart,
        crate::api::reports::top_requested,
    ),
    components(
        schemas(
            crate::api::auth::SuccessResponse,
            crate::api::auth::TokenResponse,
            crate::api::health::HealthResponse,

            crate::models::InsertOutcome,
            crate::models::UpdateOutcome,
            crate::models::DeleteOutcome,
            crate::models::ResolveOutcome,
            crate::models::PackageUpdateBody,
            crate::models::QuantityUpdateBody,
            crate::models::ResolveRequestBody,
            crate::models::RequestStatus,
            crate::models::RequestType,
            crate::models::ChartEntry,
            crate::models::TopRequestedAsset,
        )
    ),
    tags(
        (name = "Auth", description = "Token issuance and logout."),
        (name = "Health", description = "Health check and request counters."),
        (name = "People", description = "Users, HR accounts, unemployed pool, assigned employees, teams and payments."),
        (name = "Assets", description = "Asset catalogue owned by HR accounts."),
        (name = "Requests", description = "Asset requests and their pending mirrors."),
        (name = "Reports", description = "Monthly requests, per-type chart and most requested assets."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt (AUTH_MODE=bearer)"))
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}
