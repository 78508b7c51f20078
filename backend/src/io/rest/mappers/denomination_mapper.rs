use crate::domain::models::denomination::Denomination as DomainDenomination;
use shared::Denomination as SharedDenomination;

pub struct DenominationMapper;

impl DenominationMapper {
    pub fn to_dto(domain: DomainDenomination) -> SharedDenomination {
        SharedDenomination {
            id: domain.id,
            value: domain.value,
        }
    }
}
