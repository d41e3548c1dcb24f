use serde::{Deserialize, Serialize};

/// The provider a story came from. `id` is the provider's slug
/// (e.g. `bbc-news`) and is absent for long-tail outlets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub id: Option<String>,
    pub name: String,
}

/// One news item as returned by the upstream provider.
///
/// Field names serialize in camelCase to match both the provider wire
/// format and the persisted bookmark blobs. The canonical `url` is the
/// article's identity: equality and bookmark membership compare nothing
/// else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: String,
    pub content: Option<String>,
    /// Set when the article is saved as a bookmark, absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarked_at: Option<String>,
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for Article {}

impl Article {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Body text for display, with the provider's `[+N chars]`
    /// truncation suffix stripped. Falls back to the description when
    /// there is no content.
    pub fn display_content(&self) -> &str {
        let body = self
            .content
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("");
        strip_truncation_marker(body)
    }

    /// Best timestamp for "when was this saved" ordering: the bookmark
    /// stamp when present, otherwise the publication time.
    pub fn saved_at(&self) -> &str {
        self.bookmarked_at.as_deref().unwrap_or(&self.published_at)
    }
}

/// Remove a trailing `[+N chars]` marker, if any, and trim.
fn strip_truncation_marker(body: &str) -> &str {
    let trimmed = body.trim();
    if let Some(stem) = trimmed.strip_suffix(" chars]") {
        if let Some(open) = stem.rfind("[+") {
            let digits = &stem[open + 2..];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return trimmed[..open].trim_end();
            }
        }
    }
    trimmed
}
