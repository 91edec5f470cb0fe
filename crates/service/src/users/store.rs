use std::collections::{hash_map::Entry, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::domain::User;
use super::repository::UserRepository;
use crate::errors::ServiceError;
use crate::storage::memory_map_store::MemoryMapStore;

/// In-memory user store; contents are lost when the process exits.
#[derive(Default)]
pub struct UserStore {
    store: MemoryMapStore<String, User>,
}

impl UserStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: User) -> String {
        let id = self
            .store
            .update_map(|map| loop {
                // v4 collisions are practically impossible, but never overwrite a live record
                if let Entry::Vacant(slot) = map.entry(Uuid::new_v4().to_string()) {
                    let id = slot.key().clone();
                    slot.insert(user);
                    return id;
                }
            })
            .await;
        debug!(%id, "user created");
        id
    }

    async fn list(&self) -> HashMap<String, User> {
        self.store.list().await
    }

    async fn get_by_id(&self, id: &str) -> Result<User, ServiceError> {
        self.store
            .get(&id.to_string())
            .await
            .ok_or_else(|| ServiceError::not_found(id))
    }

    async fn update(&self, id: &str, user: User) -> Result<User, ServiceError> {
        self.store
            .update_map(|map| match map.get_mut(id) {
                Some(existing) => {
                    *existing = user;
                    Ok(existing.clone())
                }
                None => Err(ServiceError::not_found(id)),
            })
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store
            .remove(&id.to_string())
            .await
            .map(|_| ())
            .ok_or_else(|| ServiceError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn user(first: &str, last: &str) -> User {
        User {
            first_name: first.into(),
            last_name: last.into(),
            biography: "x".repeat(20),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() -> Result<(), anyhow::Error> {
        let store = UserStore::new();
        let id = store.create(user("Al", "Bo")).await;
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(&id).is_ok());

        let found = store.get_by_id(&id).await?;
        assert_eq!(found, user("Al", "Bo"));
        Ok(())
    }

    #[tokio::test]
    async fn list_after_n_creates_has_n_entries() {
        let store = UserStore::new();
        let mut ids = HashSet::new();
        for i in 0..5 {
            ids.insert(store.create(user(&format!("First{i}"), "Last")).await);
        }
        assert_eq!(ids.len(), 5);

        let listed = store.list().await;
        let listed_ids: HashSet<String> = listed.keys().cloned().collect();
        assert_eq!(listed_ids, ids);
    }

    #[tokio::test]
    async fn update_replaces_all_fields() -> Result<(), anyhow::Error> {
        let store = UserStore::new();
        let id = store.create(user("Al", "Bo")).await;

        let replacement = User {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            biography: "y".repeat(30),
        };
        let updated = store.update(&id, replacement.clone()).await?;
        assert_eq!(updated, replacement);
        assert_eq!(store.get_by_id(&id).await?, replacement);
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_id_does_not_insert() {
        let store = UserStore::new();
        store.create(user("Al", "Bo")).await;

        let err = store.update("missing", user("Cy", "Di")).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound("missing".into()));

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert!(!listed.contains_key("missing"));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> Result<(), anyhow::Error> {
        let store = UserStore::new();
        let id = store.create(user("Al", "Bo")).await;

        store.delete(&id).await?;
        assert!(matches!(store.get_by_id(&id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete(&id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn not_found_message_names_the_id() {
        let store = UserStore::new();
        let err = store.get_by_id("abc").await.unwrap_err();
        assert_eq!(err.to_string(), "user with id abc not found");
    }
}
