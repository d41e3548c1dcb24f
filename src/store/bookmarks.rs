use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::Article;
use crate::store::{Storage, BOOKMARKS_KEY};

/// Presentation-time ordering for the bookmark list. Never persisted:
/// the stored array keeps insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookmarkSort {
    #[default]
    Newest,
    Oldest,
    Title,
}

impl FromStr for BookmarkSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(BookmarkSort::Newest),
            "oldest" => Ok(BookmarkSort::Oldest),
            "title" => Ok(BookmarkSort::Title),
            other => Err(format!(
                "unknown sort '{other}' (expected newest, oldest or title)"
            )),
        }
    }
}

/// Owner of the process-wide bookmark list.
///
/// Membership is by article `url`. Every mutation updates the
/// in-memory list first and then persists the entire array; a write
/// failure is logged and swallowed, leaving the persisted copy stale
/// until the next successful write.
pub struct BookmarkStore {
    storage: Arc<dyn Storage>,
    bookmarks: Vec<Article>,
}

impl BookmarkStore {
    /// Read the persisted array. Read or parse failures fall back to an
    /// empty list and are logged, never surfaced.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let bookmarks = match storage.get_item(BOOKMARKS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(bookmarks) => bookmarks,
                Err(e) => {
                    tracing::error!(error = %e, "malformed bookmark record, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load bookmarks, starting empty");
                Vec::new()
            }
        };

        Self { storage, bookmarks }
    }

    pub fn bookmarks(&self) -> &[Article] {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, article: &Article) -> bool {
        self.bookmarks.iter().any(|b| b.url == article.url)
    }

    /// Stamp the article with the current time and store it. No-op when
    /// an article with the same url is already present.
    pub fn add(&mut self, article: &Article) {
        if self.is_bookmarked(article) {
            return;
        }
        let mut saved = article.clone();
        saved.bookmarked_at = Some(Utc::now().to_rfc3339());
        self.bookmarks.push(saved);
        self.persist();
    }

    pub fn remove(&mut self, article: &Article) {
        self.bookmarks.retain(|b| b.url != article.url);
        self.persist();
    }

    pub fn toggle(&mut self, article: &Article) {
        if self.is_bookmarked(article) {
            self.remove(article);
        } else {
            self.add(article);
        }
    }

    pub fn clear(&mut self) {
        self.bookmarks.clear();
        self.persist();
    }

    /// Sorted copy for display.
    pub fn sorted(&self, sort: BookmarkSort) -> Vec<Article> {
        let mut list = self.bookmarks.clone();
        match sort {
            BookmarkSort::Newest => {
                list.sort_by(|a, b| b.saved_at().cmp(a.saved_at()));
            }
            BookmarkSort::Oldest => {
                list.sort_by(|a, b| a.saved_at().cmp(b.saved_at()));
            }
            BookmarkSort::Title => {
                list.sort_by_key(|a| a.title.to_lowercase());
            }
        }
        list
    }

    fn persist(&self) {
        match serde_json::to_string(&self.bookmarks) {
            Ok(raw) => {
                if let Err(e) = self.storage.set_item(BOOKMARKS_KEY, &raw) {
                    tracing::error!(error = %e, "failed to persist bookmarks");
                }
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize bookmarks"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::ArticleSource;
    use crate::store::SqliteStorage;

    fn storage() -> Arc<dyn Storage> {
        Arc::new(SqliteStorage::in_memory().unwrap())
    }

    fn article(url: &str, title: &str, published_at: &str) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "Example".into(),
            },
            author: None,
            title: title.into(),
            description: None,
            url: url.into(),
            url_to_image: None,
            published_at: published_at.into(),
            content: None,
            bookmarked_at: None,
        }
    }

    #[test]
    fn add_stamps_bookmarked_at() {
        let mut store = BookmarkStore::load(storage());
        store.add(&article("https://example.com/1", "One", "2024-03-15T09:00:00Z"));

        assert_eq!(store.bookmarks().len(), 1);
        assert!(store.bookmarks()[0].bookmarked_at.is_some());
    }

    #[test]
    fn add_is_idempotent_by_url() {
        let mut store = BookmarkStore::load(storage());
        let a = article("https://example.com/1", "One", "2024-03-15T09:00:00Z");
        let mut same_url = a.clone();
        same_url.title = "Retitled".into();

        store.add(&a);
        store.add(&same_url);

        assert_eq!(store.bookmarks().len(), 1);
        assert_eq!(store.bookmarks()[0].title, "One");
    }

    #[test]
    fn remove_filters_by_url() {
        let mut store = BookmarkStore::load(storage());
        let a = article("https://example.com/1", "One", "2024-03-15T09:00:00Z");
        let b = article("https://example.com/2", "Two", "2024-03-15T08:00:00Z");
        store.add(&a);
        store.add(&b);

        store.remove(&a);
        assert_eq!(store.bookmarks().len(), 1);
        assert_eq!(store.bookmarks()[0].url, "https://example.com/2");
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut store = BookmarkStore::load(storage());
        let a = article("https://example.com/1", "One", "2024-03-15T09:00:00Z");

        assert!(!store.is_bookmarked(&a));
        store.toggle(&a);
        assert!(store.is_bookmarked(&a));
        store.toggle(&a);
        assert!(!store.is_bookmarked(&a));
    }

    #[test]
    fn mutations_persist_across_reload() {
        let storage = storage();

        let mut store = BookmarkStore::load(storage.clone());
        store.add(&article("https://example.com/1", "One", "2024-03-15T09:00:00Z"));
        store.add(&article("https://example.com/2", "Two", "2024-03-15T08:00:00Z"));

        let reloaded = BookmarkStore::load(storage);
        assert_eq!(reloaded.bookmarks().len(), 2);
        assert!(reloaded.bookmarks()[0].bookmarked_at.is_some());
    }

    #[test]
    fn clear_empties_list_and_storage() {
        let storage = storage();

        let mut store = BookmarkStore::load(storage.clone());
        store.add(&article("https://example.com/1", "One", "2024-03-15T09:00:00Z"));
        store.clear();
        assert!(store.bookmarks().is_empty());

        let reloaded = BookmarkStore::load(storage);
        assert!(reloaded.bookmarks().is_empty());
    }

    #[test]
    fn sorted_orders_without_mutating_stored_order() {
        let mut store = BookmarkStore::load(storage());

        let mut older = article("https://example.com/b", "Beta", "2024-03-10T00:00:00Z");
        older.bookmarked_at = Some("2024-03-11T00:00:00Z".into());
        let mut newer = article("https://example.com/a", "Alpha", "2024-03-14T00:00:00Z");
        newer.bookmarked_at = Some("2024-03-15T00:00:00Z".into());

        // Bypass add() to control the stamps.
        store.bookmarks = vec![older.clone(), newer.clone()];

        let newest = store.sorted(BookmarkSort::Newest);
        assert_eq!(newest[0].url, "https://example.com/a");

        let oldest = store.sorted(BookmarkSort::Oldest);
        assert_eq!(oldest[0].url, "https://example.com/b");

        let by_title = store.sorted(BookmarkSort::Title);
        assert_eq!(by_title[0].title, "Alpha");

        // Insertion order untouched.
        assert_eq!(store.bookmarks()[0].url, "https://example.com/b");
    }

    #[test]
    fn sort_falls_back_to_published_at() {
        let mut store = BookmarkStore::load(storage());
        let unstamped = article("https://example.com/u", "U", "2024-03-20T00:00:00Z");
        let mut stamped = article("https://example.com/s", "S", "2024-03-01T00:00:00Z");
        stamped.bookmarked_at = Some("2024-03-10T00:00:00Z".into());

        store.bookmarks = vec![stamped, unstamped];

        let newest = store.sorted(BookmarkSort::Newest);
        assert_eq!(newest[0].url, "https://example.com/u");
    }
}
