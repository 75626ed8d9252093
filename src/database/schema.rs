use super::PropertyStore;
use crate::Result;

impl PropertyStore {
    /// Create the `properties` table and its price index if absent
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS properties (
                unique_property_id TEXT PRIMARY KEY NOT NULL,
                project_name TEXT,
                location TEXT,
                price INTEGER,
                area TEXT,
                property_type TEXT,
                pincode TEXT,
                landmark TEXT,
                amenities TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_properties_price ON properties (price)")
            .execute(&self.pool)
            .await?;

        tracing::debug!("Property schema ensured");
        Ok(())
    }

    /// Check whether the `properties` table exists
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'properties'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists > 0)
    }

    /// Verify the schema or return a helpful error
    pub async fn verify_schema_or_error(&self) -> Result<()> {
        if self.is_schema_initialized().await? {
            Ok(())
        } else {
            Err(crate::EstateRagError::ServiceUnavailable(
                "property database has no `properties` table; run `estate-rag init-db` \
                 and load the prepared data"
                    .to_string(),
            ))
        }
    }
}
