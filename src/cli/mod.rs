pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette", version, about = "Read headlines, search news and keep local bookmarks")]
pub struct Cli {
    /// Override the local storage database path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch top headlines
    Headlines {
        /// Two-letter country code (defaults to your settings)
        #[arg(long)]
        country: Option<String>,
        /// Category such as business, sports, technology
        #[arg(long)]
        category: Option<String>,
        /// Restrict to a provider source id, e.g. bbc-news
        #[arg(long)]
        source: Option<String>,
        /// Date range: today, yesterday, week, month or all
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Search all articles by free text
    Search {
        query: String,
        /// Sort order: relevancy, popularity or publishedAt
        #[arg(long)]
        sort_by: Option<String>,
        /// Comma-separated provider source ids
        #[arg(long)]
        sources: Option<String>,
        /// Date range: today, yesterday, week, month or all
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Print one article from the last fetched list, by its number
    Read { index: usize },
    /// Manage locally saved articles
    Bookmarks {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Show or change user settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub enum BookmarkCommands {
    /// List saved articles
    List {
        /// Ordering: newest, oldest or title
        #[arg(long)]
        sort: Option<String>,
    },
    /// Save an article from the last fetched list, by its number
    Add { index: usize },
    /// Remove a saved article, by its number as shown by `bookmarks list`
    Remove {
        index: usize,
        /// Ordering the number refers to: newest, oldest or title
        #[arg(long)]
        sort: Option<String>,
    },
    /// Toggle an article from the last fetched list, by its number
    Toggle { index: usize },
    /// Remove all saved articles
    Clear,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print the current settings record
    Show,
    /// Change one setting, e.g. `settings set defaultCountry gb`
    Set { key: String, value: String },
    /// Restore the hardcoded defaults
    Reset,
}
