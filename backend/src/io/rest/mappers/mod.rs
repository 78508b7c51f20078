pub mod denomination_mapper;
pub mod statement_mapper;
