//! Add command implementation

use super::{build_service, format_patient, print_validation_issues};
use crate::config::CaredeskConfig;
use crate::domain::PatientDraft;
use clap::Args;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Patient name
    #[arg(long)]
    pub name: String,

    /// Free-text description (at least 10 characters)
    #[arg(long)]
    pub description: String,

    /// Website URL (http or https)
    #[arg(long)]
    pub website: String,

    /// Avatar image URL
    #[arg(long, default_value = "")]
    pub avatar: String,
}

impl AddArgs {
    fn draft(&self) -> PatientDraft {
        PatientDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            avatar: self.avatar.clone(),
        }
    }

    /// Execute the add command
    pub async fn execute(&self, config: &CaredeskConfig) -> anyhow::Result<i32> {
        let draft = self.draft();
        let issues = draft.issues();
        if !issues.is_empty() {
            print_validation_issues(&issues);
            return Ok(3); // Validation error exit code
        }

        let service = match build_service(config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to initialize patient service");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let record = service.create_patient(draft);
        if !service.local().has(&record.id) {
            println!("❌ Patient was created but could not be saved");
            return Ok(5); // Fatal error exit code
        }

        println!("✅ Patient created");
        println!("{}", format_patient(&record, false));
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageKind;

    fn memory_config() -> CaredeskConfig {
        let mut config = CaredeskConfig::default();
        config.storage.backend = StorageKind::Memory;
        config
    }

    #[tokio::test]
    async fn test_invalid_draft_exits_with_validation_code() {
        let args = AddArgs {
            name: String::new(),
            description: "short".to_string(),
            website: "nope".to_string(),
            avatar: String::new(),
        };
        assert_eq!(args.execute(&memory_config()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_valid_draft_succeeds() {
        let args = AddArgs {
            name: "Ada Lovelace".to_string(),
            description: "Analytical engine check-up".to_string(),
            website: "https://example.com".to_string(),
            avatar: String::new(),
        };
        assert_eq!(args.execute(&memory_config()).await.unwrap(), 0);
    }
}
