//! # Gazette
//!
//! A news-reading core: headlines and full-text search fetched from a
//! single upstream provider, with user settings and bookmarks persisted
//! locally.
//!
//! ## Architecture
//!
//! ```text
//! CLI → NewsService → use case → NewsRepository → Fetcher → HTTP
//!                                      settings/bookmark stores → kv storage
//! ```
//!
//! - [`fetcher`]: HTTP client for the provider's two GET endpoints
//! - [`repository`]: typed params → query mapping → article lists
//! - [`service`]: use-case composition and the date-range helper
//! - [`store`]: key-value persistence for settings and bookmarks
//!
//! Transport failures reach the user as one opaque message; everything
//! else degrades to an empty or default value and is only logged.

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires storage, stores, client,
/// repository and service together by explicit construction.
pub mod app;

/// Command-line interface using clap.
///
/// Subcommands: `headlines`, `search`, `read`, `bookmarks`, `settings`.
pub mod cli;

/// Remote client configuration: base URL, API key, defaults.
///
/// Loaded from `~/.config/gazette/config.toml`; the API key can also
/// come from `GAZETTE_API_KEY`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): one news item, keyed by its URL
/// - [`TopHeadlinesParams`](domain::TopHeadlinesParams) /
///   [`SearchParams`](domain::SearchParams): typed request parameters
/// - [`UserSettings`](domain::UserSettings): the persisted preferences record
pub mod domain;

/// HTTP fetching against the provider API.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait returning decoded JSON
/// - [`NewsApiClient`](fetcher::NewsApiClient): reqwest-based implementation
pub mod fetcher;

/// Query-mapping repository normalizing responses into article lists.
pub mod repository;

/// Use cases, the [`NewsService`](service::NewsService) facade and the
/// pure [`DateRange`](service::DateRange) filter helper.
pub mod service;

/// Local persistence.
///
/// - [`Storage`](store::Storage): device-local key-value primitive
/// - [`SqliteStorage`](store::SqliteStorage): sqlite-backed implementation
/// - [`SettingsStore`](store::SettingsStore) /
///   [`BookmarkStore`](store::BookmarkStore): record owners
pub mod store;
