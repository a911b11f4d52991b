// ==================== DOCUMENT PRIMITIVES ====================
// One driver call per function; write results come back in the client's
// wire shape.

use crate::{
    database::{CollectionName, MongoDB},
    models::{DeleteOutcome, InsertOutcome, UpdateOutcome},
    utils::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

/// Sort and limit applied to a `find`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FindSpec {
    pub sort: Option<Document>,
    pub limit: Option<i64>,
}

impl FindSpec {
    pub fn sorted(sort: Document) -> Self {
        Self { sort: Some(sort), limit: None }
    }

    pub fn limited(limit: i64) -> Self {
        Self { sort: None, limit: Some(limit) }
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub async fn find_many(
    db: &MongoDB,
    collection: CollectionName,
    filter: Document,
    spec: FindSpec,
) -> Result<Vec<Document>, AppError> {
    let coll = db.collection::<Document>(collection);
    let mut find = coll.find(filter);
    if let Some(sort) = spec.sort {
        find = find.sort(sort);
    }
    if let Some(limit) = spec.limit {
        find = find.limit(limit);
    }

    let cursor = find.await?;
    let docs: Vec<Document> = cursor.try_collect().await?;
    log::debug!("📄 {} -> {} documents", collection.as_str(), docs.len());
    Ok(docs)
}

pub async fn find_one(
    db: &MongoDB,
    collection: CollectionName,
    filter: Document,
) -> Result<Option<Document>, AppError> {
    Ok(db.collection::<Document>(collection).find_one(filter).await?)
}

pub async fn insert(
    db: &MongoDB,
    collection: CollectionName,
    document: Document,
) -> Result<InsertOutcome, AppError> {
    let result = db.collection::<Document>(collection).insert_one(document).await?;
    Ok(InsertOutcome::from(result))
}

pub async fn update_one(
    db: &MongoDB,
    collection: CollectionName,
    filter: Document,
    update: Document,
    upsert: bool,
) -> Result<UpdateOutcome, AppError> {
    let result = db
        .collection::<Document>(collection)
        .update_one(filter, update)
        .upsert(upsert)
        .await?;
    Ok(UpdateOutcome::from(result))
}

pub async fn delete_one(
    db: &MongoDB,
    collection: CollectionName,
    filter: Document,
) -> Result<DeleteOutcome, AppError> {
    let result = db.collection::<Document>(collection).delete_one(filter).await?;
    Ok(DeleteOutcome::from(result))
}

pub async fn count(
    db: &MongoDB,
    collection: CollectionName,
    filter: Document,
) -> Result<u64, AppError> {
    Ok(db.collection::<Document>(collection).count_documents(filter).await?)
}

// ==================== FILTER HELPERS ====================

/// Parses a 24-char hex document id.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim())
        .map_err(|_| AppError::InvalidRequest(format!("Invalid document id '{}'", raw)))
}

pub fn by_id(raw: &str) -> Result<Document, AppError> {
    Ok(doc! { "_id": parse_object_id(raw)? })
}

/// Case-insensitive substring match. The user's text is matched literally,
/// regex metacharacters included.
pub fn contains_ignore_case(query: &str) -> Document {
    doc! { "$regex": regex::escape(query.trim()), "$options": "i" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_ids_must_be_hex() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
        assert_eq!(by_id(&format!(" {} ", oid.to_hex())).unwrap(), doc! { "_id": oid });

        for raw in ["", "123", "zzzzzzzzzzzzzzzzzzzzzzzz", "laptop-01"] {
            assert!(matches!(parse_object_id(raw), Err(AppError::InvalidRequest(_))), "{raw}");
        }
    }

    #[test]
    fn search_text_is_escaped() {
        assert_eq!(
            contains_ignore_case("mac (pro)"),
            doc! { "$regex": r"mac \(pro\)", "$options": "i" }
        );
        assert_eq!(contains_ignore_case(" desk "), doc! { "$regex": "desk", "$options": "i" });
    }

    #[test]
    fn find_spec_builders() {
        let spec = FindSpec::sorted(doc! { "quantity": 1 }).limit(8);
        assert_eq!(spec.sort, Some(doc! { "quantity": 1 }));
        assert_eq!(spec.limit, Some(8));
        assert_eq!(FindSpec::limited(4).sort, None);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn find_many_applies_sort_and_limit() {
        let db = crate::services::test_support::scratch_db().await;
        for quantity in [5, 1, 3] {
            insert(&db, CollectionName::Assets, doc! { "owner": "hr@corp.io", "quantity": quantity })
                .await
                .unwrap();
        }

        let docs = find_many(
            &db,
            CollectionName::Assets,
            doc! { "owner": "hr@corp.io" },
            FindSpec::sorted(doc! { "quantity": 1 }).limit(2),
        )
        .await
        .unwrap();
        let quantities: Vec<i32> = docs.iter().map(|d| d.get_i32("quantity").unwrap()).collect();
        assert_eq!(quantities, vec![1, 3]);

        db.database().drop().await.unwrap();
    }
}
