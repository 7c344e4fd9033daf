//! Patient record types
//!
//! A [`PatientRecord`] is the unit shared by the remote collection, the
//! local store and the favorites list. Its JSON shape matches the remote
//! API: `id`, `name`, `description`, `website`, `avatar`, `createdAt`.

use super::ids::PatientId;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of the initials shown in avatar fallbacks
pub const INITIALS_LENGTH: usize = 2;

/// A single patient's data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Identity across local and remote origins
    pub id: PatientId,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Patient website URL
    #[serde(default)]
    pub website: String,

    /// Avatar image URL (may be empty)
    #[serde(default)]
    pub avatar: String,

    /// Creation time as an ISO-8601 string; absent means decoded now
    #[serde(default = "now_timestamp")]
    pub created_at: String,
}

impl PatientRecord {
    /// Builds a record from a draft with an explicit id and creation time
    pub fn from_draft(id: PatientId, draft: PatientDraft, created_at: impl Into<String>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            website: draft.website,
            avatar: draft.avatar,
            created_at: created_at.into(),
        }
    }

    /// Builds a record for `id` from whatever fields `patch` carries
    ///
    /// Absent text fields become empty strings; an absent `created_at`
    /// defaults to now.
    pub fn synthesize(id: PatientId, patch: PatientPatch) -> Self {
        Self {
            id,
            name: patch.name.unwrap_or_default(),
            description: patch.description.unwrap_or_default(),
            website: patch.website.unwrap_or_default(),
            avatar: patch.avatar.unwrap_or_default(),
            created_at: patch.created_at.unwrap_or_else(now_timestamp),
        }
    }

    /// Overrides every field present in `patch`; the id never changes
    pub fn apply_patch(&mut self, patch: PatientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(website) = patch.website {
            self.website = website;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(created_at) = patch.created_at {
            self.created_at = created_at;
        }
    }

    /// The editable fields of this record
    pub fn to_draft(&self) -> PatientDraft {
        PatientDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            avatar: self.avatar.clone(),
        }
    }

    /// Initials for the avatar fallback, e.g. "Ada Lovelace" -> "AL"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(INITIALS_LENGTH)
            .collect()
    }
}

/// Input to record creation: a record without `id` and `created_at`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub description: String,
    pub website: String,
    #[serde(default)]
    pub avatar: String,
}

/// Partial record update
///
/// Every field except `id` is optional; present fields override the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<String>,
    pub created_at: Option<String>,
}

impl PatientPatch {
    /// Sets the name override
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description override
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the website override
    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    /// Sets the avatar override
    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the creation time override
    pub fn created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// Whether the patch carries no field at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.website.is_none()
            && self.avatar.is_none()
            && self.created_at.is_none()
    }
}

impl From<PatientDraft> for PatientPatch {
    fn from(draft: PatientDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            website: Some(draft.website),
            avatar: Some(draft.avatar),
            created_at: None,
        }
    }
}

/// Current time in the stored `createdAt` format (RFC 3339, millis, `Z`)
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
