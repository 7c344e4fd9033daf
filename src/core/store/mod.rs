//! Persisted patient collections
//!
//! Two independent resources on the same storage substrate, each under its
//! own key. There is no transaction spanning both.

pub mod favorites;
pub mod local;

pub use favorites::FavoritesStore;
pub use local::LocalRecordStore;

/// Storage key of the local record list
pub const LOCAL_PATIENTS_KEY: &str = "localPatients";

/// Storage key of the favorites list
pub const FAVORITES_KEY: &str = "favoritePatients";
