use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::breakdown_repository;
use crate::domain::models::statement::{
    BreakdownLine, NewBreakdownLine, Statement, StatementFields, StatementWithLines,
};
use crate::storage::connection::DbConnection;
use crate::storage::traits::StatementStorage;

/// Repository for statement headers and the lines they own
#[derive(Clone)]
pub struct StatementRepository {
    db: DbConnection,
}

impl StatementRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn statement_from_row(row: &SqliteRow) -> Statement {
        Statement {
            id: row.get("id"),
            owner_id: row.get("owner_id"),
            store_name: row.get("store_name"),
            date: row.get::<NaiveDate, _>("date"),
            total_amount: row.get("total_amount"),
            notes: row.get("notes"),
        }
    }

    /// Fold joined rows (sorted by statement) into one entry per header.
    /// A header whose join produced no line contributes an empty `lines` list.
    fn group_joined_rows(rows: &[SqliteRow]) -> Vec<StatementWithLines> {
        let mut grouped: Vec<StatementWithLines> = Vec::new();

        for row in rows {
            let statement_id: i64 = row.get("id");
            let starts_new = grouped
                .last()
                .map_or(true, |current| current.statement.id != statement_id);
            if starts_new {
                grouped.push(StatementWithLines {
                    statement: Self::statement_from_row(row),
                    lines: Vec::new(),
                });
            }

            let denomination_id: Option<i64> = row.get("denomination_id");
            if let (Some(denomination_id), Some(current)) = (denomination_id, grouped.last_mut()) {
                current.lines.push(BreakdownLine {
                    denomination_id,
                    value: row.get::<Option<f64>, _>("value").unwrap_or_default(),
                    quantity: row.get::<Option<i64>, _>("quantity").unwrap_or_default() as u32,
                    line_total: row.get::<Option<f64>, _>("line_total").unwrap_or_default(),
                });
            }
        }

        grouped
    }
}

#[async_trait]
impl StatementStorage for StatementRepository {
    async fn create_statement(
        &self,
        owner_id: i64,
        fields: &StatementFields,
        lines: &[NewBreakdownLine],
    ) -> Result<i64> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO statements (owner_id, store_name, date, total_amount, notes)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner_id)
        .bind(&fields.store_name)
        .bind(fields.date)
        .bind(fields.total_amount)
        .bind(&fields.notes)
        .execute(&mut *tx)
        .await?;
        let statement_id = result.last_insert_rowid();

        // Dropping `tx` on an early return rolls the header back with the lines.
        breakdown_repository::insert_lines(&mut tx, statement_id, lines).await?;

        tx.commit().await?;
        Ok(statement_id)
    }

    async fn get_statement(&self, statement_id: i64) -> Result<Option<Statement>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, store_name, date, total_amount, notes
            FROM statements
            WHERE id = ?
            "#,
        )
        .bind(statement_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::statement_from_row))
    }

    async fn get_statement_with_lines(&self, statement_id: i64) -> Result<Option<StatementWithLines>> {
        let mut conn = self.db.pool().acquire().await?;

        let row = sqlx::query(
            r#"
            SELECT id, owner_id, store_name, date, total_amount, notes
            FROM statements
            WHERE id = ?
            "#,
        )
        .bind(statement_id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let statement = Self::statement_from_row(&row);
        let lines = breakdown_repository::list_lines(&mut conn, statement_id).await?;

        Ok(Some(StatementWithLines { statement, lines }))
    }

    async fn list_statements_with_lines(&self, owner_id: i64) -> Result<Vec<StatementWithLines>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.owner_id, s.store_name, s.date, s.total_amount, s.notes,
                   sd.denomination_id, d.value, sd.quantity, sd.line_total
            FROM statements s
            LEFT JOIN statement_denominations sd ON sd.statement_id = s.id
            LEFT JOIN denomination_master d ON d.id = sd.denomination_id
            WHERE s.owner_id = ?
            ORDER BY s.date DESC, s.id DESC, d.value DESC, sd.id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(Self::group_joined_rows(&rows))
    }

    async fn replace_statement(
        &self,
        statement_id: i64,
        owner_id: i64,
        fields: &StatementFields,
        lines: &[NewBreakdownLine],
    ) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE statements
            SET store_name = ?, date = ?, total_amount = ?, notes = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ? AND owner_id = ?
            "#,
        )
        .bind(&fields.store_name)
        .bind(fields.date)
        .bind(fields.total_amount)
        .bind(&fields.notes)
        .bind(statement_id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        breakdown_repository::delete_lines(&mut tx, statement_id).await?;
        breakdown_repository::insert_lines(&mut tx, statement_id, lines).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_statement(&self, statement_id: i64, owner_id: i64) -> Result<Option<Statement>> {
        // A single autocommit statement takes the write lock up front, so
        // concurrent deletes wait on the busy timeout instead of failing.
        // statement_denominations rows go with it via ON DELETE CASCADE.
        let row = sqlx::query(
            r#"
            DELETE FROM statements
            WHERE id = ? AND owner_id = ?
            RETURNING id, owner_id, store_name, date, total_amount, notes
            "#,
        )
        .bind(statement_id)
        .bind(owner_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::statement_from_row))
    }
}
