//! Statement service: keeps a statement's header, its breakdown lines and the
//! denomination catalog consistent across create, read, update and delete.
//!
//! Line totals are always `quantity × value` from a single catalog snapshot.
//! Each multi-row write is handed to storage as one atomic unit, so a rejected
//! or failed request never leaves a header with a partial set of lines.
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::statements::{
    CreateStatementCommand, CreateStatementResult, DeleteStatementCommand, DeleteStatementResult,
    DenominationQuantity, UpdateStatementCommand, ValueQuantity,
};
use crate::domain::denomination_service::DenominationService;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::denomination::{DenominationCatalog, VALUE_EPSILON};
use crate::domain::models::statement::{NewBreakdownLine, StatementFields, StatementWithLines};
use crate::storage::{Connection, StatementStorage};

const ACCESS_DENIED: &str = "Statement not found or access denied";

#[derive(Clone)]
pub struct StatementService<C: Connection> {
    statement_repository: C::StatementRepository,
    denomination_service: DenominationService<C>,
}

impl<C: Connection> StatementService<C> {
    pub fn new(connection: Arc<C>, denomination_service: DenominationService<C>) -> Self {
        Self {
            statement_repository: connection.create_statement_repository(),
            denomination_service,
        }
    }

    pub async fn create_statement(&self, command: CreateStatementCommand) -> DomainResult<CreateStatementResult> {
        validate_fields(&command.fields)?;

        let catalog = self.denomination_service.load_catalog().await?;
        let lines = price_by_id(&catalog, &command.denomination_details)?;

        let statement_id = self
            .statement_repository
            .create_statement(command.owner_id, &command.fields, &lines)
            .await?;

        info!(
            "Created statement {} for user {} with {} lines",
            statement_id,
            command.owner_id,
            lines.len()
        );
        Ok(CreateStatementResult { statement_id })
    }

    /// The caller's statements, date descending, each with its lines
    pub async fn list_statements(&self, owner_id: i64) -> DomainResult<Vec<StatementWithLines>> {
        let statements = self.statement_repository.list_statements_with_lines(owner_id).await?;
        info!("Listing {} statements for user {}", statements.len(), owner_id);
        Ok(statements)
    }

    pub async fn get_statement(&self, owner_id: i64, statement_id: i64) -> DomainResult<StatementWithLines> {
        let found = self
            .statement_repository
            .get_statement_with_lines(statement_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Statement {} not found", statement_id)))?;

        if found.statement.owner_id != owner_id {
            warn!("User {} denied read of statement {}", owner_id, statement_id);
            return Err(DomainError::Forbidden(ACCESS_DENIED.to_string()));
        }
        Ok(found)
    }

    pub async fn update_statement(&self, command: UpdateStatementCommand) -> DomainResult<()> {
        let existing = self.statement_repository.get_statement(command.statement_id).await?;
        match existing {
            Some(statement) if statement.owner_id == command.owner_id => {}
            _ => {
                warn!(
                    "User {} denied update of statement {}",
                    command.owner_id, command.statement_id
                );
                return Err(DomainError::Forbidden(ACCESS_DENIED.to_string()));
            }
        }

        validate_fields(&command.fields)?;
        let catalog = self.denomination_service.load_catalog().await?;
        let lines = price_by_value(&catalog, &command.denominations)?;

        // The write re-checks ownership, so a concurrent delete surfaces here.
        let replaced = self
            .statement_repository
            .replace_statement(command.statement_id, command.owner_id, &command.fields, &lines)
            .await?;
        if !replaced {
            return Err(DomainError::Forbidden(ACCESS_DENIED.to_string()));
        }

        info!(
            "Updated statement {} with {} lines",
            command.statement_id,
            lines.len()
        );
        Ok(())
    }

    pub async fn delete_statement(&self, command: DeleteStatementCommand) -> DomainResult<DeleteStatementResult> {
        let existing = self
            .statement_repository
            .get_statement(command.statement_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Statement {} not found", command.statement_id)))?;

        if existing.owner_id != command.owner_id {
            warn!(
                "User {} denied delete of statement {}",
                command.owner_id, command.statement_id
            );
            return Err(DomainError::Forbidden(ACCESS_DENIED.to_string()));
        }

        // The delete re-checks ownership; a concurrent delete surfaces as not found.
        let statement = self
            .statement_repository
            .delete_statement(command.statement_id, command.owner_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Statement {} not found", command.statement_id)))?;

        info!("Deleted statement {}", statement.id);
        Ok(DeleteStatementResult {
            statement,
            success_message: "Statement deleted successfully".to_string(),
        })
    }
}

fn validate_fields(fields: &StatementFields) -> DomainResult<()> {
    if !fields.total_amount.is_finite() || fields.total_amount < 0.0 {
        return Err(DomainError::Validation(
            "Total amount must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Price create-style entries. Any unknown id rejects the whole request.
fn price_by_id(
    catalog: &DenominationCatalog,
    details: &[DenominationQuantity],
) -> DomainResult<Vec<NewBreakdownLine>> {
    details
        .iter()
        .map(|detail| {
            let value = catalog.value_of(detail.denomination_id).ok_or_else(|| {
                DomainError::Validation(format!("Invalid denomination ID: {}", detail.denomination_id))
            })?;
            Ok(NewBreakdownLine {
                denomination_id: detail.denomination_id,
                quantity: detail.quantity,
                line_total: f64::from(detail.quantity) * value,
            })
        })
        .collect()
}

/// Price update-style entries keyed by face value, with the same strictness as create.
fn price_by_value(
    catalog: &DenominationCatalog,
    entries: &[ValueQuantity],
) -> DomainResult<Vec<NewBreakdownLine>> {
    entries
        .iter()
        .map(|entry| {
            let denomination_id = catalog.id_for_value(entry.value).ok_or_else(|| {
                DomainError::Validation(format!("Invalid denomination value: {}", entry.value))
            })?;
            let line_total = f64::from(entry.quantity) * entry.value;
            if let Some(client_total) = entry.client_total {
                if (client_total - line_total).abs() > VALUE_EPSILON {
                    warn!(
                        "Ignoring client total {} for {} x {}; using {}",
                        client_total, entry.quantity, entry.value, line_total
                    );
                }
            }
            Ok(NewBreakdownLine {
                denomination_id,
                quantity: entry.quantity,
                line_total,
            })
        })
        .collect()
}
