//! Favorite command implementation

use super::{build_service, parse_id};
use crate::config::CaredeskConfig;
use crate::domain::CaredeskError;
use clap::Args;

/// Arguments for the favorite command
#[derive(Args, Debug)]
pub struct FavoriteArgs {
    /// Patient id
    pub id: String,

    /// Remote pages searched for the patient
    #[arg(short, long, default_value_t = 1)]
    pub pages: u32,
}

impl FavoriteArgs {
    /// Execute the favorite command
    pub async fn execute(&self, config: &CaredeskConfig) -> anyhow::Result<i32> {
        let Some(id) = parse_id(&self.id) else {
            return Ok(3); // Validation error exit code
        };

        let service = match build_service(config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to initialize patient service");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // A favorite can be removed without the remote record being reachable
        let record = match service.favorites().list().into_iter().find(|p| p.id == id) {
            Some(record) => record,
            None => match service
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
            },
        };

        let name = record.name.clone();
        let was_favorite = service.favorites().is_favorite(&record.id);
        let is_favorite = service.toggle_favorite(record);
        if is_favorite == was_favorite {
            println!("❌ Favorite change for {name} could not be saved");
            return Ok(5); // Fatal error exit code
        }

        if is_favorite {
            println!("⭐ Added {name} to favorites");
        } else {
            println!("☆ Removed {name} from favorites");
        }
        Ok(0)
    }
}
