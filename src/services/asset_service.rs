use crate::{
    database::{CollectionName, MongoDB},
    models::{DeleteOutcome, UpdateOutcome},
    services::document_service::{self, by_id, contains_ignore_case, FindSpec},
    utils::AppError,
};
use mongodb::bson::{doc, Document};

/// Page size of the HR dashboard's "limited stock" widget.
pub const LIMITED_ASSETS: i64 = 8;

pub fn owned_by(owner: &str) -> Document {
    doc! { "owner": owner }
}

pub fn search_owned(owner: &str, query: &str) -> Document {
    doc! { "name": contains_ignore_case(query), "owner": owner }
}

pub fn by_quantity() -> FindSpec {
    FindSpec::sorted(doc! { "quantity": 1 })
}

pub async fn list_owned(db: &MongoDB, owner: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Assets, owned_by(owner), FindSpec::default()).await
}

pub async fn list_owned_by_quantity(db: &MongoDB, owner: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Assets, owned_by(owner), by_quantity()).await
}

/// Lowest-stock assets of an owner.
pub async fn list_limited(db: &MongoDB, owner: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(
        db,
        CollectionName::Assets,
        owned_by(owner),
        by_quantity().limit(LIMITED_ASSETS),
    )
    .await
}

pub async fn search(db: &MongoDB, owner: &str, query: &str) -> Result<Vec<Document>, AppError> {
    document_service::find_many(db, CollectionName::Assets, search_owned(owner, query), FindSpec::default()).await
}

pub async fn get(db: &MongoDB, id: &str) -> Result<Option<Document>, AppError> {
    document_service::find_one(db, CollectionName::Assets, by_id(id)?).await
}

pub async fn update_quantity(db: &MongoDB, id: &str, quantity: i64) -> Result<UpdateOutcome, AppError> {
    document_service::update_one(
        db,
        CollectionName::Assets,
        by_id(id)?,
        doc! { "$set": { "quantity": quantity } },
        false,
    )
    .await
}

/// Builds the `$set` for a full asset edit. `_id` is immutable and is
/// dropped from the body.
pub fn asset_edit(mut fields: Document) -> Result<Document, AppError> {
    fields.remove("_id");
    if fields.is_empty() {
        return Err(AppError::InvalidRequest("No asset fields to update".to_string()));
    }
    Ok(doc! { "$set": fields })
}

/// Replaces the given fields of an asset, creating it when the id is unknown.
pub async fn upsert(db: &MongoDB, id: &str, fields: Document) -> Result<UpdateOutcome, AppError> {
    let filter = by_id(id)
        .map_err(|_| AppError::InvalidRequest("Invalid asset ID format".to_string()))?;
    document_service::update_one(db, CollectionName::Assets, filter, asset_edit(fields)?, true).await
}

pub async fn delete(db: &MongoDB, id: &str) -> Result<DeleteOutcome, AppError> {
    document_service::delete_one(db, CollectionName::Assets, by_id(id)?).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::json::document_to_json;

    #[test]
    fn search_filter_is_owner_scoped() {
        let filter = search_owned("hr@corp.io", "lap");
        assert_eq!(filter.get_str("owner").unwrap(), "hr@corp.io");
        assert_eq!(
            filter.get_document("name").unwrap(),
            &doc! { "$regex": "lap", "$options": "i" }
        );
    }

    #[test]
    fn asset_edit_drops_id() {
        let update = asset_edit(doc! { "_id": "abc", "name": "Desk", "quantity": 2 }).unwrap();
        assert_eq!(update, doc! { "$set": { "name": "Desk", "quantity": 2 } });

        assert!(matches!(asset_edit(doc! { "_id": "abc" }), Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_insert_fetch_delete_round_trip() {
        let db = crate::services::test_support::scratch_db().await;
        let asset = doc! { "name": "Monitor", "owner": "hr@corp.io", "quantity": 3_i64, "type": "returnable" };

        let inserted = document_service::insert(&db, CollectionName::Assets, asset.clone()).await.unwrap();
        let id = inserted.inserted_id.as_str().unwrap().to_string();

        let mut fetched = get(&db, &id).await.unwrap().unwrap();
        assert_eq!(document_to_json(fetched.clone())["_id"], serde_json::json!(id));
        fetched.remove("_id");
        assert_eq!(fetched, asset);

        assert_eq!(delete(&db, &id).await.unwrap().deleted_count, 1);
        assert!(get(&db, &id).await.unwrap().is_none());

        db.database().drop().await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_limited_returns_lowest_stock_first() {
        let db = crate::services::test_support::scratch_db().await;
        for quantity in [9_i64, 1, 5, 3, 7, 2, 8, 4, 6, 10] {
            document_service::insert(&db, CollectionName::Assets, doc! { "owner": "hr@corp.io", "quantity": quantity })
                .await
                .unwrap();
        }

        let limited = list_limited(&db, "hr@corp.io").await.unwrap();
        let quantities: Vec<i64> = limited.iter().map(|d| d.get_i64("quantity").unwrap()).collect();
        assert_eq!(quantities, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        db.database().drop().await.unwrap();
    }
}
