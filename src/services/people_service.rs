// ==================== PEOPLE ====================
// Users, HR accounts, unemployed / assigned employees and teams.
// All keyed by email.

use crate::{
    database::{CollectionName, MongoDB},
    models::{UpdateOutcome, PAYMENT_STATUS_PAID},
    services::document_service,
    utils::AppError,
};
use mongodb::bson::{doc, Document};

pub fn by_email(email: &str) -> Document {
    doc! { "email": email }
}

/// Members hired by the given HR account.
pub fn hired_by(hr_email: &str) -> Document {
    doc! { "hiredBy": hr_email }
}

/// Result of an HR account update, as told to the client.
#[derive(Debug, PartialEq)]
pub enum HrUpdate {
    Modified,
    Unchanged,
}

impl HrUpdate {
    fn from_outcome(email: &str, outcome: UpdateOutcome) -> Result<Self, AppError> {
        if outcome.matched_count == 0 {
            return Err(AppError::NotFound(format!("No HR account for {}", email)));
        }
        if outcome.modified_count > 0 {
            Ok(HrUpdate::Modified)
        } else {
            Ok(HrUpdate::Unchanged)
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            HrUpdate::Modified => "Payment successful.",
            HrUpdate::Unchanged => "No changes applied.",
        }
    }
}

/// Marks the HR account as paid.
pub async fn mark_hr_paid(db: &MongoDB, email: &str) -> Result<HrUpdate, AppError> {
    let outcome = document_service::update_one(
        db,
        CollectionName::Hrs,
        by_email(email),
        doc! { "$set": { "paymentStatus": PAYMENT_STATUS_PAID } },
        false,
    )
    .await?;
    HrUpdate::from_outcome(email, outcome)
}

/// Switches the HR account to another package (seat limit tier).
pub async fn set_hr_package(db: &MongoDB, email: &str, package_name: &str) -> Result<HrUpdate, AppError> {
    let outcome = document_service::update_one(
        db,
        CollectionName::Hrs,
        by_email(email),
        doc! { "$set": { "packageName": package_name } },
        false,
    )
    .await?;
    HrUpdate::from_outcome(email, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(matched: u64, modified: u64) -> UpdateOutcome {
        UpdateOutcome {
            acknowledged: true,
            matched_count: matched,
            modified_count: modified,
            upserted_count: 0,
            upserted_id: None,
        }
    }

    #[test]
    fn hr_update_outcomes() {
        assert_eq!(HrUpdate::from_outcome("a@b.c", outcome(1, 1)).unwrap(), HrUpdate::Modified);
        assert_eq!(HrUpdate::from_outcome("a@b.c", outcome(1, 0)).unwrap(), HrUpdate::Unchanged);
        assert!(matches!(
            HrUpdate::from_outcome("a@b.c", outcome(0, 0)),
            Err(AppError::NotFound(_))
        ));
        assert_eq!(HrUpdate::Modified.message(), "Payment successful.");
    }

    #[test]
    fn filters() {
        assert_eq!(by_email("x@y.z"), doc! { "email": "x@y.z" });
        assert_eq!(hired_by("hr@y.z"), doc! { "hiredBy": "hr@y.z" });
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mark_hr_paid_reports_each_case() {
        let db = crate::services::test_support::scratch_db().await;
        document_service::insert(&db, CollectionName::Hrs, doc! { "email": "hr@corp.io", "paymentStatus": "unpaid" })
            .await
            .unwrap();

        assert_eq!(mark_hr_paid(&db, "hr@corp.io").await.unwrap(), HrUpdate::Modified);
        assert_eq!(mark_hr_paid(&db, "hr@corp.io").await.unwrap(), HrUpdate::Unchanged);
        assert!(matches!(mark_hr_paid(&db, "ghost@corp.io").await, Err(AppError::NotFound(_))));

        db.database().drop().await.unwrap();
    }
}
