//! Read access to the denomination reference catalog.
use std::sync::Arc;
use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::denomination::{Denomination, DenominationCatalog};
use crate::storage::{Connection, DenominationStorage};

#[derive(Clone)]
pub struct DenominationService<C: Connection> {
    denomination_repository: C::DenominationRepository,
}

impl<C: Connection> DenominationService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            denomination_repository: connection.create_denomination_repository(),
        }
    }

    /// Every denomination, highest value first
    pub async fn list_denominations(&self) -> DomainResult<Vec<Denomination>> {
        let denominations = self.denomination_repository.list_denominations().await?;
        info!("Loaded {} denominations", denominations.len());
        Ok(denominations)
    }

    /// A single denomination by id
    pub async fn lookup(&self, denomination_id: i64) -> DomainResult<Denomination> {
        self.denomination_repository
            .get_denomination(denomination_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Denomination {} not found", denomination_id)))
    }

    /// One consistent snapshot of the whole catalog
    pub async fn load_catalog(&self) -> DomainResult<DenominationCatalog> {
        let denominations = self.denomination_repository.list_denominations().await?;
        Ok(DenominationCatalog::from_denominations(&denominations))
    }
}
