//! Users module: domain types, validation rules, repository trait and the
//! in-memory store backing it.

pub mod domain;
pub mod repository;
pub mod store;
pub mod validation;

pub use domain::{User, UserInput};
pub use repository::UserRepository;
pub use store::UserStore;
