use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::{Map, Value};

use crate::{
    database::{CollectionName, MongoDB},
    middleware::auth::Claims,
    models::PackageUpdateBody,
    services::{
        document_service::{self, FindSpec},
        people_service,
    },
    utils::{
        json::{document_to_json, documents_to_json, json_to_document},
        AppError,
    },
};

// ==================== SHARED HANDLER BODIES ====================

pub(crate) async fn list_all(db: &MongoDB, collection: CollectionName) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /{} - listing all", collection.as_str());
    let docs = document_service::find_many(db, collection, doc! {}, FindSpec::default()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

pub(crate) async fn find_by_email(
    db: &MongoDB,
    collection: CollectionName,
    email: &str,
) -> Result<HttpResponse, AppError> {
    log::info!("🔎 {} by email {}", collection.as_str(), email);
    let found = document_service::find_one(db, collection, people_service::by_email(email)).await?;
    Ok(HttpResponse::Ok().json(found.map(document_to_json)))
}

pub(crate) async fn create_in(
    db: &MongoDB,
    collection: CollectionName,
    body: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    let outcome = document_service::insert(db, collection, json_to_document(body)?).await?;
    log::info!("📝 Inserted into {}: {}", collection.as_str(), outcome.inserted_id);
    Ok(HttpResponse::Ok().json(outcome))
}

async fn delete_by_email(db: &MongoDB, collection: CollectionName, email: &str) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE {} {}", collection.as_str(), email);
    let outcome = document_service::delete_one(db, collection, people_service::by_email(email)).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

// ==================== USERS ====================

/// GET /users
pub async fn list_users(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_all(&db, CollectionName::Users).await
}

/// GET /user/{email}
pub async fn get_user(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    find_by_email(&db, CollectionName::Users, &email).await
}

/// POST /users
pub async fn create_user(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Users, body.into_inner()).await
}

// ==================== HR ACCOUNTS ====================

/// GET /hrs
pub async fn list_hrs(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_all(&db, CollectionName::Hrs).await
}

/// GET /hr/{email}
pub async fn get_hr(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    find_by_email(&db, CollectionName::Hrs, &email).await
}

/// POST /hrs
pub async fn create_hr(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Hrs, body.into_inner()).await
}

/// PATCH /hr/{email} - marks the HR account as paid
pub async fn mark_hr_paid(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("💳 PATCH /hr/{} - payment status", email);
    let result = people_service::mark_hr_paid(&db, &email).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": result.message() })))
}

#[utoipa::path(
    patch,
    path = "/hr/limit/{email}",
    tag = "People",
    params(("email" = String, Path, description = "HR email")),
    request_body = PackageUpdateBody,
    responses(
        (status = 200, description = "`Payment successful.` or `No changes applied.`"),
        (status = 404, description = "No HR account with this email"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
pub async fn update_hr_package(
    db: web::Data<MongoDB>,
    email: web::Path<String>,
    body: web::Json<PackageUpdateBody>,
) -> Result<HttpResponse, AppError> {
    log::info!("📦 PATCH /hr/limit/{} - package {}", email, body.package_name);
    let result = people_service::set_hr_package(&db, &email, &body.package_name).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": result.message() })))
}

// ==================== UNEMPLOYED / ASSIGNED ====================

/// GET /unemployed
pub async fn list_unemployed(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_all(&db, CollectionName::Unemployed).await
}

/// POST /unemployed
pub async fn create_unemployed(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Unemployed, body.into_inner()).await
}

/// DELETE /unemployed/{email}
pub async fn delete_unemployed(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    delete_by_email(&db, CollectionName::Unemployed, &email).await
}

/// GET /assigned
pub async fn list_assigned(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_all(&db, CollectionName::Assigned).await
}

/// GET /employee/{email}
pub async fn get_employee(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    find_by_email(&db, CollectionName::Assigned, &email).await
}

/// POST /assigned
pub async fn create_assigned(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Assigned, body.into_inner()).await
}

/// DELETE /assigned/{email}
pub async fn delete_assigned(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    delete_by_email(&db, CollectionName::Assigned, &email).await
}

// ==================== TEAMS ====================

/// GET /team/{email} - everyone hired by this HR
pub async fn get_team(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("👥 GET /team/{}", email);
    let docs = document_service::find_many(
        &db,
        CollectionName::Teams,
        people_service::hired_by(&email),
        FindSpec::default(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

/// GET /team/member/{email}
pub async fn get_team_member(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    find_by_email(&db, CollectionName::Teams, &email).await
}

/// POST /team
pub async fn add_team_member(db: web::Data<MongoDB>, body: web::Json<Map<String, Value>>) -> Result<HttpResponse, AppError> {
    create_in(&db, CollectionName::Teams, body.into_inner()).await
}

/// DELETE /team/{email}
pub async fn remove_team_member(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    delete_by_email(&db, CollectionName::Teams, &email).await
}

// ==================== PAYMENTS ====================

/// GET /payments
pub async fn list_payments(db: web::Data<MongoDB>) -> Result<HttpResponse, AppError> {
    list_all(&db, CollectionName::Payments).await
}

/// POST /payments - always behind the auth middleware
pub async fn create_payment(
    user: Option<web::ReqData<Claims>>,
    db: web::Data<MongoDB>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, AppError> {
    let payer = user
        .as_ref()
        .and_then(|claims| claims.identity.get("email").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());
    log::info!("💰 POST /payments - by {}", payer);
    create_in(&db, CollectionName::Payments, body.into_inner()).await
}
