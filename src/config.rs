use anyhow::Context;
use serde::Deserialize;

/// How `schema::migrate` treats a database that is behind the target
/// revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaUpgrade {
    /// Apply the pending versioned steps in order. Existing rows are kept.
    Additive,
    /// Drop every table and recreate the target schema. All existing data
    /// is discarded; must be selected explicitly.
    Recreate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub upgrade: SchemaUpgrade,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let upgrade = match std::env::var("SCHEMA_UPGRADE").ok().as_deref() {
            None | Some("additive") => SchemaUpgrade::Additive,
            Some("recreate") => SchemaUpgrade::Recreate,
            Some(other) => anyhow::bail!("unknown SCHEMA_UPGRADE value: {other}"),
        };
        Ok(Self {
            database_url,
            upgrade,
        })
    }
}
