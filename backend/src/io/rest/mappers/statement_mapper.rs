use crate::domain::commands::statements::{
    CreateStatementCommand, DenominationQuantity, UpdateStatementCommand, ValueQuantity,
};
use crate::domain::models::statement::{
    BreakdownLine as DomainBreakdownLine, Statement as DomainStatement, StatementFields,
    StatementWithLines,
};
use shared::{
    BreakdownLine as SharedBreakdownLine, CreateStatementRequest, StatementHeader, StatementView,
    UpdateStatementRequest,
};

pub struct StatementMapper;

impl StatementMapper {
    pub fn to_create_command(owner_id: i64, dto: CreateStatementRequest) -> CreateStatementCommand {
        CreateStatementCommand {
            owner_id,
            fields: StatementFields {
                store_name: dto.store_name,
                date: dto.date,
                total_amount: dto.total_amount,
                notes: dto.notes,
            },
            denomination_details: dto
                .denomination_details
                .into_iter()
                .map(|d| DenominationQuantity {
                    denomination_id: d.denomination_id,
                    quantity: d.quantity,
                })
                .collect(),
        }
    }

    pub fn to_update_command(
        owner_id: i64,
        statement_id: i64,
        dto: UpdateStatementRequest,
    ) -> UpdateStatementCommand {
        UpdateStatementCommand {
            owner_id,
            statement_id,
            fields: StatementFields {
                store_name: dto.store_name,
                date: dto.date,
                total_amount: dto.total_amount,
                notes: dto.notes,
            },
            denominations: dto
                .denominations
                .into_iter()
                .map(|e| ValueQuantity {
                    value: e.value,
                    quantity: e.quantity,
                    client_total: e.total,
                })
                .collect(),
        }
    }

    pub fn to_header_dto(domain: DomainStatement) -> StatementHeader {
        StatementHeader {
            id: domain.id,
            owner_id: domain.owner_id,
            store_name: domain.store_name,
            date: domain.date,
            total_amount: domain.total_amount,
            notes: domain.notes,
        }
    }

    pub fn to_view_dto(domain: StatementWithLines) -> StatementView {
        let StatementWithLines { statement, lines } = domain;
        StatementView {
            id: statement.id,
            owner_id: statement.owner_id,
            store_name: statement.store_name,
            date: statement.date,
            total_amount: statement.total_amount,
            notes: statement.notes,
            denominations: lines.into_iter().map(Self::to_line_dto).collect(),
        }
    }

    fn to_line_dto(domain: DomainBreakdownLine) -> SharedBreakdownLine {
        SharedBreakdownLine {
            denomination_id: domain.denomination_id,
            value: domain.value,
            quantity: domain.quantity,
            total: domain.line_total,
        }
    }
}
