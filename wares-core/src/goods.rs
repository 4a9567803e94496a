//! Goods entities and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog item scoped to a project.
///
/// The (id, project_id) pair is assigned by the store on insert and is
/// immutable for the row's lifetime. `removed` is a soft-delete flag:
/// once set, the row stays in the table but is invisible to plain reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goods {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub priority: i32,
    pub removed: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a goods row.
///
/// Priority and the removed flag are store-assigned and not settable
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoods {
    pub name: String,
}

/// Payload for updating a goods row.
///
/// Absent fields leave the stored value unchanged (COALESCE merge); a
/// present-but-empty description still overwrites. `priority` and
/// `removed` are accepted for wire compatibility but are not
/// client-writable in this version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoods {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub removed: Option<bool>,
}

impl UpdateGoods {
    /// True when at least one client-writable field is present.
    pub fn has_writable_fields(&self) -> bool {
        self.name.is_some() || self.description.is_some()
    }
}
