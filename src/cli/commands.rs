use chrono::Local;

use crate::app::{AppContext, GazetteError, Result};
use crate::cli::{BookmarkCommands, SettingsCommands};
use crate::domain::{Article, SearchParams, SortBy, TopHeadlinesParams, UserSettings};
use crate::service::DateRange;
use crate::store::{BookmarkSort, LAST_RESULTS_KEY};

pub struct HeadlinesArgs {
    pub country: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub range: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub struct SearchArgs {
    pub query: String,
    pub sort_by: Option<String>,
    pub sources: Option<String>,
    pub range: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn headlines(ctx: &mut AppContext, args: HeadlinesArgs) -> Result<()> {
    let defaults = ctx.settings.settings().clone();
    let filter = parse_range(args.range.as_deref());

    let params = TopHeadlinesParams {
        country: args.country.or(Some(defaults.default_country)),
        category: args.category.or(Some(defaults.default_category)),
        source: args.source,
        from: filter.from,
        to: filter.to,
        page_size: args.page_size.or(Some(defaults.articles_per_page)),
        page: args.page,
    };

    let articles = ctx.service.top_headlines(&params).await?;
    print_articles(ctx, &articles);
    save_last_results(ctx, &articles);
    Ok(())
}

pub async fn search(ctx: &mut AppContext, args: SearchArgs) -> Result<()> {
    if args.query.trim().is_empty() {
        return Err(GazetteError::Other("search query must not be empty".into()));
    }

    let defaults = ctx.settings.settings().clone();
    let filter = parse_range(args.range.as_deref());

    let sort_by = match args.sort_by.as_deref() {
        Some(raw) => Some(raw.parse::<SortBy>().map_err(GazetteError::Other)?),
        None => Some(defaults.default_sort_by),
    };

    let params = SearchParams {
        query: args.query,
        sources: args.sources,
        from: filter.from,
        to: filter.to,
        sort_by,
        page_size: args.page_size.or(Some(defaults.articles_per_page)),
        page: args.page,
    };

    let articles = ctx.service.search(&params).await?;
    print_articles(ctx, &articles);
    save_last_results(ctx, &articles);
    Ok(())
}

pub fn read(ctx: &AppContext, index: usize) -> Result<()> {
    let article = nth_last_result(ctx, index)?;

    println!("{}", article.display_title());
    println!("{}", article.source.name);
    if let Some(author) = &article.author {
        println!("By {author}");
    }
    println!("{}", article.published_at);
    println!();
    let body = article.display_content();
    if body.is_empty() {
        println!("(No content available)");
    } else {
        println!("{body}");
    }
    println!();
    println!("{}", article.url);
    Ok(())
}

pub fn bookmarks(ctx: &mut AppContext, command: BookmarkCommands) -> Result<()> {
    match command {
        BookmarkCommands::List { sort } => {
            let sort = match sort.as_deref() {
                Some(raw) => raw.parse::<BookmarkSort>().map_err(GazetteError::Other)?,
                None => BookmarkSort::default(),
            };
            let list = ctx.bookmarks.sorted(sort);
            if list.is_empty() {
                println!("No bookmarks");
                return Ok(());
            }
            for (i, article) in list.iter().enumerate() {
                println!("{:3}. {} - {}", i + 1, article.display_title(), article.source.name);
                if let Some(at) = &article.bookmarked_at {
                    println!("     saved {at}");
                }
            }
        }
        BookmarkCommands::Add { index } => {
            let article = nth_last_result(ctx, index)?;
            if ctx.bookmarks.is_bookmarked(&article) {
                println!("Already bookmarked: {}", article.display_title());
            } else {
                ctx.bookmarks.add(&article);
                println!("Bookmarked: {}", article.display_title());
            }
        }
        BookmarkCommands::Remove { index, sort } => {
            // Numbers refer to the same sorted view `list` prints.
            let sort = match sort.as_deref() {
                Some(raw) => raw.parse::<BookmarkSort>().map_err(GazetteError::Other)?,
                None => BookmarkSort::default(),
            };
            let list = ctx.bookmarks.sorted(sort);
            let article = index
                .checked_sub(1)
                .and_then(|i| list.get(i))
                .cloned()
                .ok_or_else(|| GazetteError::Other(format!("no bookmark number {index}")))?;
            ctx.bookmarks.remove(&article);
            println!("Removed: {}", article.display_title());
        }
        BookmarkCommands::Toggle { index } => {
            let article = nth_last_result(ctx, index)?;
            ctx.bookmarks.toggle(&article);
            if ctx.bookmarks.is_bookmarked(&article) {
                println!("Bookmarked: {}", article.display_title());
            } else {
                println!("Removed: {}", article.display_title());
            }
        }
        BookmarkCommands::Clear => {
            ctx.bookmarks.clear();
            println!("Cleared all bookmarks");
        }
    }
    Ok(())
}

pub fn settings(ctx: &mut AppContext, command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show => {
            let json = serde_json::to_string_pretty(ctx.settings.settings())?;
            println!("{json}");
        }
        SettingsCommands::Set { key, value } => {
            apply_setting(ctx, &key, &value)?;
            println!("Set {key} = {value}");
        }
        SettingsCommands::Reset => {
            ctx.settings.reset();
            println!("Settings restored to defaults");
        }
    }
    Ok(())
}

/// Map one `settings set` key/value pair onto the typed record. Keys
/// use their persisted camelCase names.
fn apply_setting(ctx: &mut AppContext, key: &str, value: &str) -> Result<()> {
    fn bad(err: impl ToString) -> GazetteError {
        GazetteError::Other(err.to_string())
    }

    let value = value.to_string();
    let update: Box<dyn FnOnce(&mut UserSettings)> = match key {
        "defaultCountry" => Box::new(move |s| s.default_country = value),
        "defaultCategory" => Box::new(move |s| s.default_category = value),
        "defaultSortBy" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.default_sort_by = parsed)
        }
        "articlesPerPage" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.articles_per_page = parsed)
        }
        "autoRefresh" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.auto_refresh = parsed)
        }
        "refreshInterval" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.refresh_interval = parsed)
        }
        "imageQuality" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.image_quality = parsed)
        }
        "showImages" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.show_images = parsed)
        }
        "compactView" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.compact_view = parsed)
        }
        "darkMode" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.dark_mode = parsed)
        }
        "notifications" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.notifications = parsed)
        }
        "offlineReading" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.offline_reading = parsed)
        }
        "fontSize" => {
            let parsed = value.parse().map_err(bad)?;
            Box::new(move |s| s.font_size = parsed)
        }
        "language" => Box::new(move |s| s.language = value),
        other => {
            return Err(GazetteError::Other(format!(
                "unknown setting '{other}'; see `gazette settings show` for valid keys"
            )))
        }
    };

    ctx.settings.update(update);
    Ok(())
}

fn parse_range(raw: Option<&str>) -> crate::service::DateFilter {
    let range: DateRange = raw.unwrap_or("all").parse().unwrap_or_default();
    range.to_filter(Local::now())
}

fn print_articles(ctx: &AppContext, articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles found");
        return;
    }

    let compact = ctx.settings.settings().compact_view;
    for (i, article) in articles.iter().enumerate() {
        println!("{:3}. {} - {}", i + 1, article.display_title(), article.source.name);
        if !compact {
            if let Some(description) = &article.description {
                println!("     {description}");
            }
            println!("     {} | {}", article.published_at, article.url);
        }
    }
}

/// Keep the fetched list around so bookmark/read commands can refer to
/// articles by number. Same swallow-and-log policy as the stores.
fn save_last_results(ctx: &AppContext, articles: &[Article]) {
    match serde_json::to_string(articles) {
        Ok(raw) => {
            if let Err(e) = ctx.storage.set_item(LAST_RESULTS_KEY, &raw) {
                tracing::error!(error = %e, "failed to persist last results");
            }
        }
        Err(e) => tracing::error!(error = %e, "failed to serialize last results"),
    }
}

fn nth_last_result(ctx: &AppContext, index: usize) -> Result<Article> {
    let raw = ctx
        .storage
        .get_item(LAST_RESULTS_KEY)?
        .ok_or_else(|| {
            GazetteError::Other("no fetched articles; run `headlines` or `search` first".into())
        })?;
    let articles: Vec<Article> = serde_json::from_str(&raw)?;

    index
        .checked_sub(1)
        .and_then(|i| articles.get(i))
        .cloned()
        .ok_or_else(|| {
            GazetteError::Other(format!(
                "no article number {index} (last fetch returned {})",
                articles.len()
            ))
        })
}
