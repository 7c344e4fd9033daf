//! Aggregated page model

use crate::domain::{PageToken, PatientRecord};
use serde::{Deserialize, Serialize};

/// One fetched and merged batch of the patient list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatePage {
    /// Records in display order
    pub records: Vec<PatientRecord>,

    /// Token of the following page, `None` once the remote source is exhausted
    pub next_page_token: Option<PageToken>,
}

impl AggregatePage {
    /// Whether another page can be requested after this one
    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}
