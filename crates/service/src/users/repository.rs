use std::collections::HashMap;

use async_trait::async_trait;

use super::domain::User;
use crate::errors::ServiceError;

/// Storage seam for user records, keyed by an opaque string id.
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert under a freshly generated id and return that id.
    async fn create(&self, user: User) -> String;
    async fn list(&self) -> HashMap<String, User>;
    async fn get_by_id(&self, id: &str) -> Result<User, ServiceError>;
    /// Replace every field of an existing record and return the new state.
    async fn update(&self, id: &str, user: User) -> Result<User, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
