//! Domain models for registered users and their sessions.

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub salt: String,
}

/// A live session resolved from a bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: i64,
}
