// ==================== ASSET REQUESTS ====================
// Employee requests for HR-owned assets, and their pending mirrors.

use crate::{
    database::{CollectionName, MongoDB},
    models::{DeleteOutcome, RequestStatus, ResolveOutcome},
    services::document_service::{self, by_id, contains_ignore_case, FindSpec},
    utils::AppError,
};
use mongodb::bson::{doc, Document};

/// Employee dashboard shows at most this many of their pending requests.
pub const RECENT_PENDING: i64 = 4;

/// How an HR answers a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    pub fn status(&self) -> RequestStatus {
        match self {
            Resolution::Approve => RequestStatus::Approved,
            Resolution::Reject => RequestStatus::Rejected,
        }
    }
}

pub fn requested_by(email: &str) -> Document {
    doc! { "requestByEmail": email }
}

pub fn requested_for(hr_email: &str) -> Document {
    doc! { "requestFor": hr_email }
}

/// The still-unanswered request for an asset. Documents already approved or
/// rejected never match.
pub fn still_pending(asset_id: &str) -> Document {
    doc! { "assetId": asset_id, "status": RequestStatus::Pending.as_str() }
}

pub fn search_requested_by(email: &str, query: &str) -> Document {
    doc! { "requestByEmail": email, "name": contains_ignore_case(query) }
}

pub fn search_pending_by_name(hr_email: &str, query: &str) -> Document {
    doc! { "name": contains_ignore_case(query), "requestFor": hr_email }
}

pub fn search_pending_by_requester(hr_email: &str, query: &str) -> Document {
    let pattern = contains_ignore_case(query);
    doc! {
        "requestFor": hr_email,
        "$or": [
            { "requestByName": pattern.clone() },
            { "requestByEmail": pattern },
        ],
    }
}

pub fn resolution_update(resolution: Resolution, approve_date: Option<&str>) -> Document {
    let mut set = doc! { "status": resolution.status().as_str() };
    if let Some(date) = approve_date {
        set.insert("approveDate", date);
    }
    doc! { "$set": set }
}

// ---------- requests collection ----------

pub async fn list_requested_by(db: &MongoDB, email: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Requests, requested_by(email), FindSpec::default()).await
}

pub async fn search_requested(db: &MongoDB, email: &str, query: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(
        db,
        CollectionName::Requests,
        search_requested_by(email, query),
        FindSpec::default(),
    )
    .await
}

/// Answers the pending request for `asset_id` and removes its pending
/// mirror. Only a request still in `pending` is touched, so a repeated or
/// concurrent answer for the same asset is a no-op.
pub async fn resolve(
    db: &MongoDB,
    asset_id: &str,
    resolution: Resolution,
    approve_date: Option<&str>,
) -> Result<ResolveOutcome, AppError> {
    let update = document_service::update_one(
        db,
        CollectionName::Requests,
        still_pending(asset_id),
        resolution_update(resolution, approve_date),
        false,
    )
    .await?;

    if update.matched_count == 0 {
        log::warn!("⚠️ No pending request for asset {} ({:?})", asset_id, resolution);
        return Ok(ResolveOutcome { update, pending_deleted_count: 0 });
    }

    let removed = document_service::delete_one(db, CollectionName::Pending, still_pending(asset_id)).await?;

    log::info!(
        "✅ Request for asset {} {} (pending removed: {})",
        asset_id,
        resolution.status().as_str(),
        removed.deleted_count
    );

    Ok(ResolveOutcome { update, pending_deleted_count: removed.deleted_count })
}

/// Withdraws the employee's still-pending request for an asset.
pub async fn cancel_pending_request(db: &MongoDB, asset_id: &str) -> Result<DeleteOutcome, AppError> {
    document_service::delete_one(db, CollectionName::Requests, still_pending(asset_id)).await
}

/// Removes a request by id once its asset is returned.
pub async fn delete_returned(db: &MongoDB, id: &str) -> Result<DeleteOutcome, AppError> {
    document_service::delete_one(db, CollectionName::Requests, by_id(id)?).await
}

// ---------- pending collection ----------

pub async fn recent_pending_by(db: &MongoDB, email: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Pending, requested_by(email), FindSpec::limited(RECENT_PENDING)).await
}

pub async fn pending_for(db: &MongoDB, hr_email: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Pending, requested_for(hr_email), FindSpec::default()).await
}

pub async fn recent_pending_for(db: &MongoDB, hr_email: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Pending, requested_for(hr_email), FindSpec::limited(RECENT_PENDING)).await
}

pub async fn search_pending(db: &MongoDB, hr_email: &str, query: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(
        db,
        CollectionName::Pending,
        search_pending_by_name(hr_email, query),
        FindSpec::default(),
    )
    .await
}

pub async fn search_pending_requesters(db: &MongoDB, hr_email: &str, query: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(
        db,
        CollectionName::Pending,
        search_pending_by_requester(hr_email, query),
        FindSpec::default(),
    )
    .await
}

pub async fn delete_pending_for_asset(db: &MongoDB, asset_id: &str) -> Result<DeleteOutcome, AppError> {
    document_service::delete_one(db, CollectionName::Pending, still_pending(asset_id)).await
}

pub async fn delete_pending(db: &MongoDB, id: &str) -> Result<DeleteOutcome, AppError> {
    document_service::delete_one(db, CollectionName::Pending, by_id(id)?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_filter_is_status_scoped() {
        assert_eq!(still_pending("a1"), doc! { "assetId": "a1", "status": "pending" });
    }

    #[test]
    fn resolution_sets_status_and_optional_date() {
        assert_eq!(
            resolution_update(Resolution::Approve, Some("18-10-2026 10:00am")),
            doc! { "$set": { "status": "approved", "approveDate": "18-10-2026 10:00am" } }
        );
        assert_eq!(
            resolution_update(Resolution::Reject, None),
            doc! { "$set": { "status": "rejected" } }
        );
    }

    #[test]
    fn requester_search_matches_name_or_email() {
        let filter = search_pending_by_requester("hr@corp.io", "ann");
        assert_eq!(filter.get_str("requestFor").unwrap(), "hr@corp.io");

        let alternatives = filter.get_array("$or").unwrap();
        assert_eq!(alternatives.len(), 2);
        assert!(alternatives[0].as_document().unwrap().contains_key("requestByName"));
        assert!(alternatives[1].as_document().unwrap().contains_key("requestByEmail"));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_resolve_touches_only_pending_documents() {
        let db = crate::services::test_support::scratch_db().await;
        let requests = db.collection::<Document>(CollectionName::Requests);
        requests
            .insert_many(vec![
                doc! { "assetId": "a1", "status": "approved", "approveDate": "01-10-2026 09:00am" },
                doc! { "assetId": "a1", "status": "rejected", "approveDate": "02-10-2026 09:00am" },
                doc! { "assetId": "a1", "status": "pending" },
            ])
            .await
            .unwrap();
        document_service::insert(&db, CollectionName::Pending, doc! { "assetId": "a1", "status": "pending" })
            .await
            .unwrap();

        let outcome = resolve(&db, "a1", Resolution::Approve, Some("18-10-2026 10:00am")).await.unwrap();
        assert_eq!(outcome.update.modified_count, 1);
        assert_eq!(outcome.pending_deleted_count, 1);

        let approved = requests.count_documents(doc! { "status": "approved" }).await.unwrap();
        let rejected = requests.count_documents(doc! { "status": "rejected" }).await.unwrap();
        assert_eq!((approved, rejected), (2, 1));
        let untouched = requests
            .find_one(doc! { "status": "rejected" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.get_str("approveDate").unwrap(), "02-10-2026 09:00am");

        // A second answer finds nothing left to resolve.
        let again = resolve(&db, "a1", Resolution::Reject, None).await.unwrap();
        assert_eq!(again.update.matched_count, 0);
        assert_eq!(again.pending_deleted_count, 0);

        db.database().drop().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_cancel_skips_answered_requests() {
        let db = crate::services::test_support::scratch_db().await;
        let requests = db.collection::<Document>(CollectionName::Requests);
        requests
            .insert_many(vec![
                doc! { "assetId": "a2", "status": "approved" },
                doc! { "assetId": "a2", "status": "pending" },
            ])
            .await
            .unwrap();

        assert_eq!(cancel_pending_request(&db, "a2").await.unwrap().deleted_count, 1);
        assert_eq!(cancel_pending_request(&db, "a2").await.unwrap().deleted_count, 0);
        assert_eq!(requests.count_documents(doc! { "assetId": "a2" }).await.unwrap(), 1);

        db.database().drop().await.unwrap();
    }
}
