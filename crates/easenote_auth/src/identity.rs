//! Identity payloads
//!
//! [`UserRecord`] is what arrives on the auth-state stream, exactly as the
//! identity service sent it. [`Identity`] is the checked form the gate keeps.

use crate::error::{AuthError, Result};
use serde::{Deserialize, Serialize};

/// Raw user record from the identity service
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserRecord {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Decode a record from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A signed-in user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    uid: String,
    email: Option<String>,
    display_name: Option<String>,
}

impl Identity {
    /// Check a raw record
    ///
    /// A record whose uid is blank does not identify anyone and is rejected
    /// with [`AuthError::MalformedIdentity`].
    pub fn from_record(record: UserRecord) -> Result<Self> {
        let uid = record.uid.trim();
        if uid.is_empty() {
            return Err(AuthError::MalformedIdentity("missing uid".to_string()));
        }
        Ok(Self {
            uid: uid.to_string(),
            email: record.email.filter(|e| !e.trim().is_empty()),
            display_name: record.display_name.filter(|n| !n.trim().is_empty()),
        })
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
