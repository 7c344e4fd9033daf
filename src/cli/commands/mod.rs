//! CLI command implementations
//!
//! Commands return their process exit code: 0 success, 2 configuration
//! error, 3 validation error, 4 not found, 5 fatal.

pub mod add;
pub mod edit;
pub mod favorite;
pub mod favorites;
pub mod init;
pub mod list;
pub mod validate;

use crate::adapters::api::PatientApiClient;
use crate::adapters::storage::create_storage_backend;
use crate::config::CaredeskConfig;
use crate::core::aggregate::PatientService;
use crate::domain::{PatientId, PatientRecord, Result};
use std::sync::Arc;

/// Wire the storage backend and remote client described by `config`
pub fn build_service(config: &CaredeskConfig) -> Result<PatientService> {
    let backend = create_storage_backend(&config.storage);
    let client = PatientApiClient::new(config.api.clone())?;
    Ok(PatientService::from_backend(backend, Arc::new(client)))
}

/// Parse a command-line id, printing the problem when it is rejected
fn parse_id(raw: &str) -> Option<PatientId> {
    match PatientId::new(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            println!("❌ Invalid patient id");
            println!("   Error: {e}");
            None
        }
    }
}

/// One display line for a patient
pub fn format_patient(record: &PatientRecord, is_favorite: bool) -> String {
    let marker = if is_favorite { "★" } else { " " };
    let mut line = format!(
        "{marker} [{:<2}] {} ({})",
        record.initials(),
        record.name,
        record.id
    );
    if !record.website.is_empty() {
        line.push_str(" - ");
        line.push_str(&record.website);
    }
    line
}

fn print_validation_issues(issues: &[String]) {
    println!("❌ Patient data is invalid");
    for issue in issues {
        println!("   - {issue}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PatientPatch;

    #[test]
    fn test_format_patient() {
        let record = PatientRecord::synthesize(
            PatientId::new("12").unwrap(),
            PatientPatch::default()
                .name("Grace Hopper")
                .website("https://example.com"),
        );
        assert_eq!(
            format_patient(&record, true),
            "★ [GH] Grace Hopper (12) - https://example.com"
        );

        let bare = PatientRecord::synthesize(
            PatientId::new("3").unwrap(),
            PatientPatch::default().name("Plato"),
        );
        assert_eq!(format_patient(&bare, false), "  [P ] Plato (3)");
    }

    #[test]
    fn test_parse_id_rejects_empty() {
        assert!(parse_id("").is_none());
        assert_eq!(parse_id("x").unwrap().as_str(), "x");
    }

    #[test]
    fn test_build_service_with_memory_storage() {
        let mut config = CaredeskConfig::default();
        config.storage.backend = crate::config::StorageKind::Memory;
        let service = build_service(&config).unwrap();
        assert!(service.local().list().is_empty());
    }
}
