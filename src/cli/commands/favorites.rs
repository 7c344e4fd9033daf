//! Favorites command implementation

use super::format_patient;
use crate::adapters::storage::create_storage_backend;
use crate::config::CaredeskConfig;
use crate::core::store::FavoritesStore;
use crate::domain::PatientFilter;
use clap::Args;

/// Arguments for the favorites command
#[derive(Args, Debug)]
pub struct FavoritesArgs {
    /// Case-insensitive filter on name or description
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FavoritesArgs {
    /// Execute the favorites command
    ///
    /// Reads storage only; the remote API is not contacted.
    pub async fn execute(&self, config: &CaredeskConfig) -> anyhow::Result<i32> {
        let favorites = FavoritesStore::new(create_storage_backend(&config.storage));
        let filter = match &self.search {
            Some(query) => PatientFilter::search(query.as_str()),
            None => PatientFilter::default(),
        };

        let records = favorites.search(&filter);

        println!("⭐ Favorites");
        println!();
        if records.is_empty() {
            println!("   No favorites yet");
        }
        for record in &records {
            println!("{}", format_patient(record, true));
        }
        println!();
        println!("{} favorite(s)", records.len());
        Ok(0)
    }
}
