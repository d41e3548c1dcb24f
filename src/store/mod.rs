pub mod bookmarks;
pub mod settings;
pub mod storage;

use crate::app::error::Result;

pub use bookmarks::{BookmarkSort, BookmarkStore};
pub use settings::SettingsStore;
pub use storage::SqliteStorage;

/// Storage key for the settings record.
pub const SETTINGS_KEY: &str = "gazette.settings";
/// Storage key for the bookmark list.
pub const BOOKMARKS_KEY: &str = "gazette.bookmarks";
/// Storage key for the most recently fetched result list.
pub const LAST_RESULTS_KEY: &str = "gazette.last_results";

/// Device-local key-value primitive. Values are opaque strings; the
/// stores above it serialize whole JSON records into single keys.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}
