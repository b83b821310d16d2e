//! MongoDB integration for GameTracker: client factory, health ping,
//! index creation and identifier parsing.

use anyhow::Context;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client, Database, IndexModel,
};
use thiserror::Error;

use gametracker_kernel::{settings::DatabaseSettings, IndexSpec};

pub use mongodb::bson::oid::ObjectId;

/// Raised when a path or body identifier is not a 24 character hex ObjectId.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{raw}' is not a valid identifier")]
pub struct InvalidId {
    pub raw: String,
}

/// Parse a client supplied identifier.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, InvalidId> {
    ObjectId::parse_str(raw.trim()).map_err(|_| InvalidId {
        raw: raw.to_string(),
    })
}

/// Connect to MongoDB and verify the deployment answers a ping.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&settings.uri)
        .await
        .with_context(|| "failed to parse MongoDB connection string")?;

    let database = client.database(&settings.name);
    ping(&database).await?;

    tracing::info!(
        target: "gametracker-db",
        database = %settings.name,
        "MongoDB connected"
    );

    Ok(database)
}

/// Round-trip a `ping` command.
pub async fn ping(database: &Database) -> anyhow::Result<()> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .with_context(|| format!("MongoDB ping failed for database '{}'", database.name()))?;
    Ok(())
}

/// Create the indexes requested by modules. Existing indexes are left untouched.
pub async fn ensure_indexes(database: &Database, indexes: &[IndexSpec]) -> anyhow::Result<()> {
    for spec in indexes {
        let mut keys = Document::new();
        keys.insert(spec.field, 1);

        let model = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(spec.unique).build())
            .build();

        database
            .collection::<Document>(spec.collection)
            .create_index(model)
            .await
            .with_context(|| {
                format!(
                    "failed to create index on {}.{}",
                    spec.collection, spec.field
                )
            })?;

        tracing::info!(
            target: "gametracker-db",
            collection = spec.collection,
            field = spec.field,
            unique = spec.unique,
            "index ensured"
        );
    }

    Ok(())
}
