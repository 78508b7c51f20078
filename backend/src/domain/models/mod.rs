pub mod denomination;
pub mod statement;
pub mod user;
