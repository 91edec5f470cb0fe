//! Service layer for the users API.
//! - `storage` holds the generic in-memory map store.
//! - `users` holds the domain types, validation rules and the user store.
//! - Errors are shared through `errors::ServiceError`.

pub mod errors;
pub mod storage;
pub mod users;
