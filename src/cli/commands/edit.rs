//! Edit command implementation
//!
//! Remote patients can be edited too: saving one stores a local override
//! that shadows the remote copy on page 1 from then on.

use super::{build_service, format_patient, parse_id, print_validation_issues};
use crate::config::CaredeskConfig;
use crate::domain::{CaredeskError, PatientDraft, PatientRecord};
use clap::Args;

/// Arguments for the edit command
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Patient id
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New website URL
    #[arg(long)]
    pub website: Option<String>,

    /// New avatar URL (empty string clears it)
    #[arg(long)]
    pub avatar: Option<String>,

    /// Remote pages searched for the patient
    #[arg(short, long, default_value_t = 1)]
    pub pages: u32,
}

impl EditArgs {
    /// The existing record's fields with the given overrides applied
    fn merged_draft(&self, existing: &PatientRecord) -> PatientDraft {
        let mut draft = existing.to_draft();
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(website) = &self.website {
            draft.website = website.clone();
        }
        if let Some(avatar) = &self.avatar {
            draft.avatar = avatar.clone();
        }
        draft
    }

    /// Execute the edit command
    pub async fn execute(&self, config: &CaredeskConfig) -> anyhow::Result<i32> {
        let Some(id) = parse_id(&self.id) else {
            return Ok(3); // Validation error exit code
        };
        tracing::info!(id = %id, "Editing patient");

        let service = match build_service(config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to initialize patient service");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let existing = match service
            .find_patient(&id, config.api.page_size, self.pages)
            .await
        {
            Ok(Some(record)) => record,
            Ok(None) => {
                println!("❌ {}", CaredeskError::NotFound(id.to_string()));
                return Ok(4); // Not found exit code
            }
            Err(e) => {
                println!("❌ Failed to look up patient");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        let draft = self.merged_draft(&existing);
        let issues = draft.issues();
        if !issues.is_empty() {
            print_validation_issues(&issues);
            return Ok(3); // Validation error exit code
        }

        match service.save_patient(draft, Some(&existing)) {
            Some(saved) => {
                println!("✅ Patient updated");
                println!(
                    "{}",
                    format_patient(&saved, service.favorites().is_favorite(&saved.id))
                );
                Ok(0)
            }
            None => {
                println!("❌ Patient update could not be saved");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
