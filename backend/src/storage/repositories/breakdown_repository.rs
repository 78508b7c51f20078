//! Breakdown line store.
//!
//! Lines never exist on their own: every write here runs on a connection that
//! the statement repository has already placed inside a transaction, so these
//! helpers take a bare `SqliteConnection` instead of the pool.

use anyhow::Result;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::statement::{BreakdownLine, NewBreakdownLine};

pub async fn insert_lines(
    conn: &mut SqliteConnection,
    statement_id: i64,
    lines: &[NewBreakdownLine],
) -> Result<()> {
    for line in lines {
        sqlx::query(
            r#"
            INSERT INTO statement_denominations (statement_id, denomination_id, quantity, line_total)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(statement_id)
        .bind(line.denomination_id)
        .bind(line.quantity as i64)
        .bind(line.line_total)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Remove every line of a statement; returns how many were removed
pub async fn delete_lines(conn: &mut SqliteConnection, statement_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM statement_denominations WHERE statement_id = ?")
        .bind(statement_id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Lines of one statement joined with their face value, value descending
pub async fn list_lines(conn: &mut SqliteConnection, statement_id: i64) -> Result<Vec<BreakdownLine>> {
    let rows = sqlx::query(
        r#"
        SELECT sd.denomination_id, d.value, sd.quantity, sd.line_total
        FROM statement_denominations sd
        JOIN denomination_master d ON d.id = sd.denomination_id
        WHERE sd.statement_id = ?
        ORDER BY d.value DESC, sd.id ASC
        "#,
    )
    .bind(statement_id)
    .fetch_all(&mut *conn)
    .await?;

    let lines = rows
        .iter()
        .map(|row| BreakdownLine {
            denomination_id: row.get("denomination_id"),
            value: row.get("value"),
            quantity: row.get::<i64, _>("quantity") as u32,
            line_total: row.get("line_total"),
        })
        .collect();

    Ok(lines)
}
