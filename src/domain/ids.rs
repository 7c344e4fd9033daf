//! Domain identifier types with validation
//!
//! Newtype wrappers for patient identities and page continuation tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use uuid::Uuid;

/// Patient identifier newtype wrapper
///
/// The identity of a record across both the local store and the remote
/// collection. Remote ids are short numeric strings; locally created
/// records get a UUID.
///
/// # Examples
///
/// ```
/// use caredesk::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let id = PatientId::from_str("42").unwrap();
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    ///
    /// # Returns
    ///
    /// Returns `Ok(PatientId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh identity for a locally created record
    ///
    /// Backed by a random UUID, so two calls never collide regardless of
    /// how close together they happen.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PatientId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Continuation token for the aggregated patient list
///
/// Wraps the 1-based remote page number. Page 1 is the only page that
/// carries local records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageToken(NonZeroU32);

impl PageToken {
    /// The first page of the aggregated list
    pub const FIRST: PageToken = PageToken(NonZeroU32::MIN);

    /// Creates a token for a 1-based page number
    pub fn new(page: u32) -> Result<Self, String> {
        NonZeroU32::new(page)
            .map(Self)
            .ok_or_else(|| "Page numbers start at 1".to_string())
    }

    /// The remote page number this token refers to
    pub fn page(&self) -> u32 {
        self.0.get()
    }

    /// Whether this token denotes the first page
    pub fn is_first(&self) -> bool {
        *self == Self::FIRST
    }

    /// The token of the following page
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for PageToken {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_valid() {
        let id = PatientId::new("5").unwrap();
        assert_eq!(id.as_str(), "5");
        assert_eq!(id.to_string(), "5");
    }

    #[test]
    fn test_patient_id_empty() {
        assert!(PatientId::new("").is_err());
        assert!(PatientId::new("   ").is_err());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: std::collections::HashSet<PatientId> =
            (0..1000).map(|_| PatientId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_patient_id_serializes_as_plain_string() {
        let id = PatientId::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let back: PatientId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_patient_id_rejects_empty_on_decode() {
        assert!(serde_json::from_str::<PatientId>("\"\"").is_err());
        assert!(serde_json::from_str::<PatientId>("\"  \"").is_err());
    }

    #[test]
    fn test_page_token() {
        assert!(PageToken::FIRST.is_first());
        assert_eq!(PageToken::FIRST.page(), 1);
        assert_eq!(PageToken::FIRST.next().page(), 2);
        assert!(!PageToken::FIRST.next().is_first());
        assert!(PageToken::new(0).is_err());
        assert_eq!(PageToken::new(7).unwrap().page(), 7);
    }
}
