// Repository modules
pub mod breakdown_repository;
pub mod denomination_repository;
pub mod statement_repository;
pub mod user_repository;

// Re-export repository types
pub use denomination_repository::DenominationRepository;
pub use statement_repository::StatementRepository;
pub use user_repository::UserRepository;
