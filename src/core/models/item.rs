//! Item resource model

use crate::utils::error::{Result, ServiceError};
use crate::utils::is_valid_email;
use serde::{Deserialize, Serialize};

/// Status assigned to freshly created items
pub const STATUS_NEW: &str = "NEW";

/// Status written by the batch processor
pub const STATUS_PROCESSED: &str = "Processed";

/// A persisted (or about to be persisted) item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, `None` until the store assigns one
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Lifecycle status, e.g. "NEW" or "Processed"
    pub status: String,
    /// Contact email
    pub email: String,
}

impl Item {
    /// Create a new, unsaved item with status "NEW"
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            status: STATUS_NEW.to_string(),
            email: email.into(),
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Mark the item as processed
    pub fn mark_processed(&mut self) {
        self.status = STATUS_PROCESSED.to_string();
    }

    /// Whether the item carries the processed status
    pub fn is_processed(&self) -> bool {
        self.status == STATUS_PROCESSED
    }
}

fn default_status() -> String {
    STATUS_NEW.to_string()
}

/// Request body for creating or replacing an item
///
/// Any `id` in the body is ignored; the store or the request path decides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub email: String,
}

impl ItemPayload {
    /// Check required fields and the email format
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("name must not be blank"));
        }
        if self.status.trim().is_empty() {
            return Err(ServiceError::validation("status must not be blank"));
        }
        if !is_valid_email(&self.email) {
            return Err(ServiceError::validation(format!(
                "invalid email: {}",
                self.email
            )));
        }
        Ok(())
    }

    /// Convert into an item with the given identifier
    pub fn into_item(self, id: Option<i64>) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            email: self.email,
        }
    }
}

impl From<Item> for ItemPayload {
    fn from(item: Item) -> Self {
        Self {
            name: item.name,
            description: item.description,
            status: item.status,
            email: item.email,
        }
    }
}
