// ==================== HR / EMPLOYEE REPORTS ====================

use crate::{
    database::{CollectionName, MongoDB},
    models::{ChartEntry, RequestType, TopRequestedAsset},
    services::{document_service::{self, FindSpec}, request_service::{requested_by, requested_for}},
    utils::{dates, AppError},
};
use chrono::NaiveDate;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};

/// Rows in the "top requested assets" widget.
pub const TOP_REQUESTED_LIMIT: i64 = 4;

/// Groups an HR's incoming requests by (name, type), most requested first.
/// Equal counts are ordered by name then type so the output is stable.
pub fn top_requested_pipeline(hr_email: &str, limit: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "requestFor": hr_email } },
        doc! {
            "$group": {
                "_id": { "name": "$name", "type": "$type" },
                "count": { "$sum": 1 },
            }
        },
        doc! { "$sort": { "count": -1, "_id.name": 1, "_id.type": 1 } },
        doc! { "$limit": limit },
        doc! {
            "$project": {
                "_id": 0,
                "name": "$_id.name",
                "type": "$_id.type",
                "count": 1,
            }
        },
    ]
}

pub async fn top_requested(db: &MongoDB, hr_email: &str) -> Result<Vec<TopRequestedAsset>, AppError> {
    let cursor = db
        .collection::<Document>(CollectionName::Requests)
        .aggregate(top_requested_pipeline(hr_email, TOP_REQUESTED_LIMIT))
        .await?;
    let rows: Vec<Document> = cursor.try_collect().await?;

    rows.into_iter()
        .map(|row| {
            mongodb::bson::from_document::<TopRequestedAsset>(row)
                .map_err(|e| AppError::DatabaseError(format!("Malformed aggregation row: {}", e)))
        })
        .collect()
}

/// Requests of an employee dated in `today`'s month. The store pre-selects
/// by date prefix; the parse check drops anything the pattern let through.
pub async fn monthly_requests(db: &MongoDB, email: &str, today: NaiveDate) -> Result<Vec<Document>, AppError> {
    let mut filter = requested_by(email);
    filter.insert(
        "requestDate",
        doc! { "$regex": dates::month_prefix_pattern(today) },
    );

    let candidates = document_service::find_many(db, CollectionName::Requests, filter, FindSpec::default()).await?;
    Ok(dates::retain_current_month(candidates, today))
}

/// Returnable vs. non-returnable request counts for an HR.
pub async fn request_chart(db: &MongoDB, hr_email: &str) -> Result<Vec<ChartEntry>, AppError> {
    let mut chart = Vec::with_capacity(RequestType::ALL.len());
    for kind in RequestType::ALL {
        let mut filter = requested_for(hr_email);
        filter.insert("type", kind.as_str());
        let quantity = document_service::count(db, CollectionName::Requests, filter).await?;
        chart.push(ChartEntry { reqs_type: kind, quantity });
    }
    Ok(chart)
}
