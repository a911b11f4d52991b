use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::{
    database::{CollectionName, MongoDB},
    models::{QueryParam, ResolveOutcome, ResolveRequestBody},
    services::request_service::{self, Resolution},
    utils::{json::documents_to_json, AppError},
};

use super::people::create_in;

// ==================== REQUESTS ====================

/// GET /asset/requests/{email} - everything an employee asked for
pub async fn list_requests(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /asset/requests/{}", email);
    let docs = request_service::list_requested_by(&db, &email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /asset/request/search/{email}?query=
pub async fn search_requests(
    db: web::Data<MongoDB>,
    email: web::Path<String>,
    query: web::Query<QueryParam>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /asset/request/search/{} - '{}'", email, query.query);
    let docs = request_service::search_requested(&db, &email, &query.query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// POST /requests
pub async fn create_request(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Requests, body.into_inner()).await
}

#[utoipa::path(
    patch,
    path = "/request/approve/{asset_id}",
    tag = "Requests",
    params(("asset_id" = String, Path, description = "Asset the pending request refers to")),
    request_body(content = ResolveRequestBody, description = "Optional approval date"),
    responses(
        (status = 200, description = "Update result plus the number of pending mirrors removed", body = ResolveOutcome),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
pub async fn approve_request(
    db: web::Data<MongoDB>,
    asset_id: web::Path<String>,
    body: Option<web::Json<ResolveRequestBody>>,
) -> Result<HttpResponse, AppError> {
    log::info!("✅ PATCH /request/approve/{}", asset_id);
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let outcome = request_service::resolve(&db, &asset_id, Resolution::Approve, body.approve_date.as_deref()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    patch,
    path = "/request/reject",
    tag = "Requests",
    params(QueryParam),
    responses(
        (status = 200, description = "Update result plus the number of pending mirrors removed", body = ResolveOutcome),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
pub async fn reject_request(
    db: web::Data<MongoDB>,
    query: web::Query<QueryParam>,
    body: Option<web::Json<ResolveRequestBody>>,
) -> Result<HttpResponse, AppError> {
    log::info!("❌ PATCH /request/reject - asset {}", query.query);
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    let outcome = request_service::resolve(&db, &query.query, Resolution::Reject, body.approve_date.as_deref()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /request/delete?query={assetId} - withdraws a still-pending request
pub async fn cancel_request(db: web::Data<MongoDB>, query: web::Query<QueryParam>) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /request/delete - asset {}", query.query);
    let outcome = request_service::cancel_pending_request(&db, &query.query).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /request/return/delete?query={id}
pub async fn delete_returned_request(db: web::Data<MongoDB>, query: web::Query<QueryParam>) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /request/return/delete - {}", query.query);
    let outcome = request_service::delete_returned(&db, &query.query).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

// ==================== PENDING ====================

/// GET /pending/{email} - an employee's latest pending requests
pub async fn list_pending_by_employee(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("⏳ GET /pending/{}", email);
    let docs = request_service::recent_pending_by(&db, &email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /pending/hr/{email}
pub async fn list_pending_for_hr(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("⏳ GET /pending/hr/{}", email);
    let docs = request_service::pending_for(&db, &email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /pending/recent/{email}
pub async fn list_recent_pending(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("⏳ GET /pending/recent/{}", email);
    let docs = request_service::recent_pending_for(&db, &email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /pending/search/{email}?query= - by asset name
pub async fn search_pending(
    db: web::Data<MongoDB>,
    email: web::Path<String>,
    query: web::Query<QueryParam>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /pending/search/{} - '{}'", email, query.query);
    let docs = request_service::search_pending(&db, &email, &query.query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /pending/request/search/{email}?query= - by requester name or email
pub async fn search_pending_requesters(
    db: web::Data<MongoDB>,
    email: web::Path<String>,
    query: web::Query<QueryParam>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /pending/request/search/{} - '{}'", email, query.query);
    let docs = request_service::search_pending_requesters(&db, &email, &query.query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// POST /pending
pub async fn create_pending(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Pending, body.into_inner()).await
}

/// DELETE /pending/delete?query={assetId}
pub async fn delete_pending_for_asset(db: web::Data<MongoDB>, query: web::Query<QueryParam>) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /pending/delete - asset {}", query.query);
    let outcome = request_service::delete_pending_for_asset(&db, &query.query).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /pending/delete/{id}
pub async fn delete_pending(db: web::Data<MongoDB>, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /pending/delete/{}", id);
    let outcome = request_service::delete_pending(&db, &id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
