use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::{
    database::{CollectionName, MongoDB},
    models::{QuantityUpdateBody, QueryParam, UpdateOutcome},
    services::asset_service,
    utils::{
        json::{document_to_json, documents_to_json, json_to_document},
        AppError,
    },
};

use super::people::create_in;

/// GET /assets/all/{email}
pub async fn list_assets(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /assets/all/{}", email);
    let docs = asset_service::list_owned(&db, &email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /assets/quantity/{email} - lowest stock first
pub async fn list_assets_by_quantity(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /assets/quantity/{}", email);
    let docs = asset_service::list_owned_by_quantity(&db, &email).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /assets/limited?query={owner}
pub async fn list_limited_assets(db: web::Data<MongoDB>, query: web::Query<QueryParam>) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /assets/limited - owner {}", query.query);
    let docs = asset_service::list_limited(&db, &query.query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /asset/search/{email}?query=
pub async fn search_assets(
    db: web::Data<MongoDB>,
    email: web::Path<String>,
    query: web::Query<QueryParam>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 GET /asset/search/{} - '{}'", email, query.query);
    let docs = asset_service::search(&db, &email, &query.query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /asset/{id}
pub async fn get_asset(db: web::Data<MongoDB>, id: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("📦 GET /asset/{}", id);
    let found = asset_service::get(&db, &id).await?;
    Ok(HttpResponse::Ok().json(found.map(document_to_json)))
}

/// POST /assets
pub async fn create_asset(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Assets, body.into_inner()).await
}

#[utoipa::path(
    patch,
    path = "/quantity/update/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset ObjectId (hex)")),
    request_body = QuantityUpdateBody,
    responses(
        (status = 200, description = "Update result", body = UpdateOutcome),
        (status = 400, description = "Malformed ObjectId"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
pub async fn update_asset_quantity(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    body: web::Json<QuantityUpdateBody>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔢 PATCH /quantity/update/{} -> {}", id, body.quantity);
    let outcome = asset_service::update_quantity(&db, &id, body.quantity).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    put,
    path = "/update/asset/{id}",
    tag = "Assets",
    params(("id" = String, Path, description = "Asset ObjectId (hex)")),
    request_body(content = Object, description = "Fields to set; `_id` is ignored"),
    responses(
        (status = 200, description = "Update result, with upsertedId when the asset was created", body = UpdateOutcome),
        (status = 400, description = "Invalid asset ID format"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
pub async fn upsert_asset(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    log::info!("✏️  PUT /update/asset/{}", id);
    let fields = json_to_document(body.into_inner())?;
    let outcome = asset_service::upsert(&db, &id, fields).await.map_err(|e| {
        log::warn!("⚠️ Asset upsert rejected: {}", e);
        e
    })?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /asset/delete?query={id}
pub async fn delete_asset(db: web::Data<MongoDB>, query: web::Query<QueryParam>) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /asset/delete - {}", query.query);
    let outcome = asset_service::delete(&db, &query.query).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
