use anyhow::Result;
use async_trait::async_trait;
use sqlx::Row;

use crate::domain::models::denomination::Denomination;
use crate::storage::connection::DbConnection;
use crate::storage::traits::DenominationStorage;

/// Repository for the read-only denomination catalog
#[derive(Clone)]
pub struct DenominationRepository {
    db: DbConnection,
}

impl DenominationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DenominationStorage for DenominationRepository {
    async fn list_denominations(&self) -> Result<Vec<Denomination>> {
        let rows = sqlx::query(
            r#"
            SELECT id, value
            FROM denomination_master
            ORDER BY value DESC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let denominations = rows
            .iter()
            .map(|row| Denomination {
                id: row.get("id"),
                value: row.get("value"),
            })
            .collect();

        Ok(denominations)
    }

    async fn get_denomination(&self, denomination_id: i64) -> Result<Option<Denomination>> {
        let row = sqlx::query("SELECT id, value FROM denomination_master WHERE id = ?")
            .bind(denomination_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| Denomination {
            id: r.get("id"),
            value: r.get("value"),
        }))
    }
}
