//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod statements {
    use crate::domain::models::statement::{Statement, StatementFields};

    /// Requested (denomination id, quantity) pair for a new statement.
    #[derive(Debug, Clone, PartialEq)]
    pub struct DenominationQuantity {
        pub denomination_id: i64,
        pub quantity: u32,
    }

    /// Requested (face value, quantity) pair for an updated statement.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ValueQuantity {
        pub value: f64,
        pub quantity: u32,
        /// Client-computed total; only compared against the recomputed one
        pub client_total: Option<f64>,
    }

    #[derive(Debug, Clone)]
    pub struct CreateStatementCommand {
        pub owner_id: i64,
        pub fields: StatementFields,
        pub denomination_details: Vec<DenominationQuantity>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateStatementCommand {
        pub owner_id: i64,
        pub statement_id: i64,
        pub fields: StatementFields,
        pub denominations: Vec<ValueQuantity>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteStatementCommand {
        pub owner_id: i64,
        pub statement_id: i64,
    }

    #[derive(Debug, Clone)]
    pub struct CreateStatementResult {
        pub statement_id: i64,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteStatementResult {
        pub statement: Statement,
        pub success_message: String,
    }
}

pub mod auth {
    /// Input for registering a new account.
    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub email: String,
        pub password: String,
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub email: String,
        pub password: String,
    }

    /// Result of a successful login.
    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub token: String,
        pub user_id: i64,
        pub name: String,
    }
}
