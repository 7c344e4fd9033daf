//! Search filters over patient lists

use super::patient::PatientRecord;

/// Criteria for narrowing a patient list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    /// Case-insensitive substring matched against name and description
    pub query: Option<String>,

    /// Keep only favorited records
    pub favorites_only: bool,
}

impl PatientFilter {
    /// Filter matching on a search query
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            favorites_only: false,
        }
    }

    /// Restrict the filter to favorites
    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    /// Whether `record` passes the filter
    pub fn matches(&self, record: &PatientRecord, is_favorite: bool) -> bool {
        if self.favorites_only && !is_favorite {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let needle = query.to_lowercase();
                record.name.to_lowercase().contains(&needle)
                    || record.description.to_lowercase().contains(&needle)
            }
        }
    }
}
