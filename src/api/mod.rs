pub mod assets;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod people;
pub mod reports;
pub mod requests;
pub mod swagger;

use actix_web::web;

/// Registers every HTTP route. Paths with more specific literal segments go
/// before the `{param}` ones that share a prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Banner, health check and metrics
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Token
        .route("/jwt", web::post().to(auth::issue_token))
        .route("/logout", web::post().to(auth::logout))
        // ==================== PEOPLE ====================
        .route("/users", web::get().to(people::list_users))
        .route("/users", web::post().to(people::create_user))
        .route("/user/{email}", web::get().to(people::get_user))
        .route("/hrs", web::get().to(people::list_hrs))
        .route("/hrs", web::post().to(people::create_hr))
        .route("/hr/chart/{email}", web::get().to(reports::request_chart))
        .route("/hr/limit/{email}", web::patch().to(people::update_hr_package))
        .route("/hr/{email}", web::get().to(people::get_hr))
        .route("/hr/{email}", web::patch().to(people::mark_hr_paid))
        .route("/unemployed", web::get().to(people::list_unemployed))
        .route("/unemployed", web::post().to(people::create_unemployed))
        .route("/unemployed/{email}", web::delete().to(people::delete_unemployed))
        .route("/assigned", web::get().to(people::list_assigned))
        .route("/assigned", web::post().to(people::create_assigned))
        .route("/assigned/{email}", web::delete().to(people::delete_assigned))
        .route("/employee/{email}", web::get().to(people::get_employee))
        .route("/team", web::post().to(people::add_team_member))
        .route("/team/member/{email}", web::get().to(people::get_team_member))
        .route("/team/{email}", web::get().to(people::get_team))
        .route("/team/{email}", web::delete().to(people::remove_team_member))
        .route("/payments", web::get().to(people::list_payments))
        .route("/payments", web::post().to(people::create_payment))
        // ==================== ASSETS ====================
        .route("/assets", web::post().to(assets::create_asset))
        .route("/assets/all/{email}", web::get().to(assets::list_assets))
        .route("/assets/quantity/{email}", web::get().to(assets::list_assets_by_quantity))
        .route("/assets/limited", web::get().to(assets::list_limited_assets))
        .route("/asset/search/{email}", web::get().to(assets::search_assets))
        .route("/asset/request/search/{email}", web::get().to(requests::search_requests))
        .route("/asset/requests/{email}", web::get().to(requests::list_requests))
        .route("/asset/delete", web::delete().to(assets::delete_asset))
        .route("/asset/{id}", web::get().to(assets::get_asset))
        .route("/quantity/update/{id}", web::patch().to(assets::update_asset_quantity))
        .route("/update/asset/{id}", web::put().to(assets::upsert_asset))
        // ==================== REQUESTS ====================
        .route("/requests", web::post().to(requests::create_request))
        .route("/request/approve/{id}", web::patch().to(requests::approve_request))
        .route("/request/reject", web::patch().to(requests::reject_request))
        .route("/request/return/delete", web::delete().to(requests::delete_returned_request))
        .route("/request/delete", web::delete().to(requests::cancel_request))
        // ==================== PENDING ====================
        .route("/pending", web::post().to(requests::create_pending))
        .route("/pending/hr/{email}", web::get().to(requests::list_pending_for_hr))
        .route("/pending/recent/{email}", web::get().to(requests::list_recent_pending))
        .route("/pending/search/{email}", web::get().to(requests::search_pending))
        .route("/pending/request/search/{email}", web::get().to(requests::search_pending_requesters))
        .route("/pending/delete/{id}", web::delete().to(requests::delete_pending))
        .route("/pending/delete", web::delete().to(requests::delete_pending_for_asset))
        .route("/pending/{email}", web::get().to(requests::list_pending_by_employee))
        // ==================== REPORTS ====================
        .route("/monthly/requests/{email}", web::get().to(reports::monthly_requests))
        .route("/top/requested/{email}", web::get().to(reports::top_requested));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{AppConfig, AuthMode, AuthPolicy},
        middleware::auth::AuthMiddleware,
        services::{auth_service::TokenSigner, test_support::scratch_db},
    };
    use actix_web::{http::StatusCode, test, App};
    use chrono::Duration;
    use serde_json::json;
    use std::sync::Arc;

    fn config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            mongodb_uri: "mongodb://localhost:27017".to_string(),
            database_name: "unused".to_string(),
            token_secret: "routes-secret".to_string(),
            token_ttl_secs: 3600,
            auth_mode: AuthMode::Bearer,
            auth_policy: AuthPolicy::Writes,
            production: false,
            cors_origins: vec![],
        }
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn approve_flow_over_http() {
        let db = scratch_db().await;
        let signer = Arc::new(TokenSigner::new("routes-secret", Duration::hours(1)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .app_data(web::Data::from(signer.clone()))
                .app_data(web::Data::new(config()))
                .wrap(AuthMiddleware::new(signer.clone(), AuthMode::Bearer, AuthPolicy::Writes))
                .configure(configure),
        )
        .await;

        let unauthenticated = test::TestRequest::post()
            .uri("/requests")
            .set_json(json!({ "assetId": "a-1" }))
            .to_request();
        let err = test::try_call_service(&app, unauthenticated).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);

        let issued: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/jwt")
                .set_json(json!({ "email": "hr@corp.io" }))
                .to_request(),
        )
        .await;
        let bearer = format!("Bearer {}", issued["token"].as_str().unwrap());

        let request = json!({
            "assetId": "a-1",
            "name": "Laptop",
            "type": "returnable",
            "status": "pending",
            "requestByEmail": "e@corp.io",
            "requestFor": "hr@corp.io",
        });
        for path in ["/requests", "/pending"] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri(path)
                    .insert_header(("Authorization", bearer.clone()))
                    .set_json(&request)
                    .to_request(),
            )
            .await;
            assert!(res.status().is_success());
        }

        let approved: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::patch()
                .uri("/request/approve/a-1")
                .insert_header(("Authorization", bearer.clone()))
                .set_json(json!({ "approveDate": "01-02-2026 10:00am" }))
                .to_request(),
        )
        .await;
        assert_eq!(approved["modifiedCount"], 1);
        assert_eq!(approved["pendingDeletedCount"], 1);

        let pending: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/pending/hr/hr@corp.io").to_request(),
        )
        .await;
        assert_eq!(pending, json!([]));

        let requests: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/asset/requests/e@corp.io").to_request(),
        )
        .await;
        assert_eq!(requests[0]["status"], "approved");
        assert_eq!(requests[0]["approveDate"], "01-02-2026 10:00am");

        db.database().drop().await.unwrap();
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn missing_single_document_is_null() {
        let db = scratch_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .configure(configure),
        )
        .await;

        let body: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/user/nobody@corp.io").to_request(),
        )
        .await;
        assert!(body.is_null());

        let res = test::call_service(&app, test::TestRequest::get().uri("/asset/not-an-id").to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        db.database().drop().await.unwrap();
    }
}
