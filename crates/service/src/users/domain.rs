use serde::{Deserialize, Serialize};

use super::validation::validate_user;
use crate::errors::ServiceError;

/// Stored user record. The id lives in the store key, not in the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

/// Create/update payload. Missing fields decode as empty strings so the
/// validator reports them instead of the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

impl UserInput {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_user(&self.first_name, &self.last_name, &self.biography)
    }

    /// Validate and turn the payload into a record.
    pub fn into_user(self) -> Result<User, ServiceError> {
        self.validate()?;
        Ok(User {
            first_name: self.first_name,
            last_name: self.last_name,
            biography: self.biography,
        })
    }
}
