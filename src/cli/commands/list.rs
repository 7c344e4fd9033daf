//! List command implementation
//!
//! Loads pages through the list cache, the same way a scrolling view
//! would, and prints the flattened result.

use super::{build_service, format_patient};
use crate::config::CaredeskConfig;
use crate::core::aggregate::{LoadOutcome, PatientListCache};
use crate::domain::{PatientFilter, PatientId};
use clap::Args;
use std::collections::HashSet;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Number of pages to load
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,

    /// Case-insensitive filter on name or description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show favorites
    #[arg(long)]
    pub favorites_only: bool,
}

impl ListArgs {
    fn filter(&self) -> PatientFilter {
        let filter = match &self.search {
            Some(query) => PatientFilter::search(query.as_str()),
            None => PatientFilter::default(),
        };
        if self.favorites_only {
            filter.favorites_only()
        } else {
            filter
        }
    }

    /// Execute the list command
    pub async fn execute(&self, config: &CaredeskConfig) -> anyhow::Result<i32> {
        tracing::info!(pages = self.pages, "Listing patients");

        let service = match build_service(config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to initialize patient service");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let cache = PatientListCache::new(service, config.api.page_size);
        while cache.pages_loaded() < self.pages && cache.has_more() {
            if let LoadOutcome::Failed(message) = cache.load_next().await {
                println!("❌ Failed to load patients");
                println!("   Error: {message}");
                return Ok(5); // Fatal error exit code
            }
        }

        let favorite_ids: HashSet<PatientId> = cache
            .service()
            .favorites()
            .list()
            .into_iter()
            .map(|p| p.id)
            .collect();
        let filter = self.filter();

        let records: Vec<_> = cache
            .flattened_records()
            .into_iter()
            .filter(|r| filter.matches(r, favorite_ids.contains(&r.id)))
            .collect();

        println!("📋 Patients");
        println!();
        if records.is_empty() {
            println!("   No patients found");
        }
        for record in &records {
            println!("{}", format_patient(record, favorite_ids.contains(&record.id)));
        }
        println!();
        println!(
            "{} shown, {} page(s) loaded{}",
            records.len(),
            cache.pages_loaded(),
            if cache.has_more() {
                ", more available"
            } else {
                ""
            }
        );

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_args() {
        let args = ListArgs {
            pages: 1,
            search: Some("ada".to_string()),
            favorites_only: true,
        };
        assert_eq!(args.filter(), PatientFilter::search("ada").favorites_only());
    }
}
