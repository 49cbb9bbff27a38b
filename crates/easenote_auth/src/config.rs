//! Sign-in client configuration

use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};

/// Configuration handed to the identity provider when the gate is created
///
/// The web client id identifies this app to the federated sign-in service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignInConfig {
    pub web_client_id: String,
}

impl SignInConfig {
    pub fn new(web_client_id: impl Into<String>) -> Self {
        Self {
            web_client_id: web_client_id.into(),
        }
    }

    /// Reject a blank client id
    pub fn validate(&self) -> Result<()> {
        if self.web_client_id.trim().is_empty() {
            return Err(AuthError::Config("web_client_id is empty".to_string()));
        }
        Ok(())
    }
}
