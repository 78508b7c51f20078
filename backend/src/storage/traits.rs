//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::denomination::Denomination;
use crate::domain::models::statement::{
    NewBreakdownLine, Statement, StatementFields, StatementWithLines,
};
use crate::domain::models::user::{NewUser, Session, User};

/// Read-only access to the denomination reference catalog
#[async_trait]
pub trait DenominationStorage: Send + Sync {
    /// All denominations ordered by value descending
    async fn list_denominations(&self) -> Result<Vec<Denomination>>;

    async fn get_denomination(&self, denomination_id: i64) -> Result<Option<Denomination>>;
}

/// Statement headers together with the breakdown lines they own.
///
/// Every method that mutates more than one row must do so atomically:
/// either the header and all of its lines are written, or nothing is.
#[async_trait]
pub trait StatementStorage: Send + Sync {
    /// Insert a header and its lines; returns the new statement id
    async fn create_statement(
        &self,
        owner_id: i64,
        fields: &StatementFields,
        lines: &[NewBreakdownLine],
    ) -> Result<i64>;

    async fn get_statement(&self, statement_id: i64) -> Result<Option<Statement>>;

    async fn get_statement_with_lines(&self, statement_id: i64) -> Result<Option<StatementWithLines>>;

    /// All statements of one owner, date descending, each with its lines nested
    async fn list_statements_with_lines(&self, owner_id: i64) -> Result<Vec<StatementWithLines>>;

    /// Overwrite the header and fully replace its lines.
    /// Returns false (and writes nothing) if no statement with that id belongs to `owner_id`.
    async fn replace_statement(
        &self,
        statement_id: i64,
        owner_id: i64,
        fields: &StatementFields,
        lines: &[NewBreakdownLine],
    ) -> Result<bool>;

    /// Delete a header owned by `owner_id` and, by cascade, its lines.
    /// Returns the header as it was, or None if no such statement belongs to `owner_id`.
    async fn delete_statement(&self, statement_id: i64, owner_id: i64) -> Result<Option<Statement>>;
}

/// Users and their login sessions
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Insert a user; returns None if the email is already registered
    async fn insert_user(&self, user: &NewUser) -> Result<Option<i64>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn store_session(&self, token_hash: &str, user_id: i64, expires_at: i64) -> Result<()>;

    /// Look up a session that has not expired as of `now` (epoch seconds)
    async fn find_session(&self, token_hash: &str, now: i64) -> Result<Option<Session>>;

    /// Returns true if the session existed
    async fn delete_session(&self, token_hash: &str) -> Result<bool>;

    /// Returns the number of sessions removed
    async fn delete_expired_sessions(&self, now: i64) -> Result<u64>;
}

/// Trait defining the interface for storage connections
///
/// Abstracts away the specific connection type and provides factory methods
/// for creating repositories, so services can be handed any backend.
pub trait Connection: Send + Sync + Clone {
    type StatementRepository: StatementStorage + Clone;
    type DenominationRepository: DenominationStorage + Clone;
    type UserRepository: UserStorage + Clone;

    fn create_statement_repository(&self) -> Self::StatementRepository;

    fn create_denomination_repository(&self) -> Self::DenominationRepository;

    fn create_user_repository(&self) -> Self::UserRepository;
}
