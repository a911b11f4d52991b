use actix_web::{web, HttpResponse};

use crate::{
    database::MongoDB,
    models::{ChartEntry, TopRequestedAsset},
    services::report_service,
    utils::{json::documents_to_json, AppError},
};

#[utoipa::path(
    get,
    path = "/monthly/requests/{email}",
    tag = "Reports",
    params(("email" = String, Path, description = "Requester email")),
    responses(
        (status = 200, description = "Requests filed by this employee during the current calendar month", body = [Object])
    )
)]
pub async fn monthly_requests(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("📅 GET /monthly/requests/{}", email);
    let today = chrono::Local::now().date_naive();
    let docs = report_service::monthly_requests(&db, &email, today).await?;
    log::debug!("   {} request(s) this month", docs.len());
    Ok(HttpResponse::Ok().json(documents_to_json(docs)))
}

#[utoipa::path(
    get,
    path = "/hr/chart/{email}",
    tag = "Reports",
    params(("email" = String, Path, description = "HR email")),
    responses(
        (status = 200, description = "Request counts per request type", body = [ChartEntry])
    )
)]
pub async fn request_chart(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("📊 GET /hr/chart/{}", email);
    let chart = report_service::request_chart(&db, &email).await?;
    Ok(HttpResponse::Ok().json(chart))
}

#[utoipa::path(
    get,
    path = "/top/requested/{email}",
    tag = "Reports",
    params(("email" = String, Path, description = "HR email")),
    responses(
        (status = 200, description = "Most requested assets, highest count first", body = [TopRequestedAsset])
    )
)]
pub async fn top_requested(db: web::Data<MongoDB>, email: web::Path<String>) -> Result<HttpResponse, AppError> {
    log::info!("🏆 GET /top/requested/{}", email);
    let top = report_service::top_requested(&db, &email).await?;
    Ok(HttpResponse::Ok().json(top))
}
