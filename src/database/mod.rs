use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

/// The nine collections the service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionName {
    Users,
    Hrs,
    Unemployed,
    Assigned,
    Teams,
    Payments,
    Assets,
    Requests,
    Pending,
}

impl CollectionName {
    pub const ALL: [CollectionName; 9] = [
        CollectionName::Users,
        CollectionName::Hrs,
        CollectionName::Unemployed,
        CollectionName::Assigned,
        CollectionName::Teams,
        CollectionName::Payments,
        CollectionName::Assets,
        CollectionName::Requests,
        CollectionName::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::Hrs => "hrs",
            CollectionName::Unemployed => "unemployed",
            CollectionName::Assigned => "assigned",
            CollectionName::Teams => "teams",
            CollectionName::Payments => "payments",
            CollectionName::Assets => "assets",
            CollectionName::Requests => "requests",
            CollectionName::Pending => "pending",
        }
    }

    /// Secondary indexes backing the equality filters the routes use.
    fn index_keys(&self) -> Vec<Document> {
        match self {
            CollectionName::Users
            | CollectionName::Hrs
            | CollectionName::Unemployed
            | CollectionName::Assigned => vec![doc! { "email": 1 }],
            CollectionName::Teams => vec![doc! { "email": 1 }, doc! { "hiredBy": 1 }],
            CollectionName::Payments => vec![],
            CollectionName::Assets => vec![doc! { "owner": 1, "quantity": 1 }],
            CollectionName::Requests => vec![
                doc! { "requestByEmail": 1 },
                doc! { "requestFor": 1, "type": 1 },
                doc! { "assetId": 1, "status": 1 },
            ],
            CollectionName::Pending => vec![
                doc! { "requestByEmail": 1 },
                doc! { "requestFor": 1 },
                doc! { "assetId": 1, "status": 1 },
            ],
        }
    }
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("hr-asset-service".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the lookup indexes. Failures are only logged.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        for name in CollectionName::ALL {
            let collection = self.collection::<Document>(name);
            for keys in name.index_keys() {
                let label = format!("{}({})", name.as_str(), keys.keys().cloned().collect::<Vec<_>>().join(", "));
                let index = IndexModel::builder().keys(keys).build();
                match collection.create_index(index).await {
                    Ok(_) => log::info!("   ✅ Index ready: {}", label),
                    Err(e) => log::warn!("   ⚠️  Could not create index {}: {}", label, e),
                }
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: CollectionName) -> Collection<T> {
        self.db.collection(name.as_str())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Round-trips a `ping` to the server.
    pub async fn ping(&self) -> bool {
        self.db.run_command(doc! { "ping": 1 }).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_unique() {
        let mut names: Vec<&str> = CollectionName::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn status_scoped_filters_are_indexed() {
        for name in [CollectionName::Requests, CollectionName::Pending] {
            assert!(name
                .index_keys()
                .iter()
                .any(|keys| keys.contains_key("assetId") && keys.contains_key("status")));
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri, "hr3_management_test").await.unwrap();
        assert!(db.ping().await);
    }
}
