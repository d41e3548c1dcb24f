//! Use cases and the application-level facade.
//!
//! The use cases are single-operation wrappers; validation is purely
//! structural. [`NewsService`] exposes both behind one name and hosts
//! the pure date-range helper used to derive `from`/`to` filters.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Months, NaiveDateTime};

use crate::app::error::Result;
use crate::domain::{Article, SearchParams, TopHeadlinesParams};
use crate::repository::NewsRepository;

pub struct GetTopHeadlines {
    repository: Arc<NewsRepository>,
}

impl GetTopHeadlines {
    pub fn new(repository: Arc<NewsRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, params: &TopHeadlinesParams) -> Result<Vec<Article>> {
        self.repository.top_headlines(params).await
    }
}

pub struct SearchArticles {
    repository: Arc<NewsRepository>,
}

impl SearchArticles {
    pub fn new(repository: Arc<NewsRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, params: &SearchParams) -> Result<Vec<Article>> {
        self.repository.search(params).await
    }
}

/// Uniform facade over the two fetch use cases.
pub struct NewsService {
    get_top_headlines: GetTopHeadlines,
    search_articles: SearchArticles,
}

impl NewsService {
    pub fn new(repository: Arc<NewsRepository>) -> Self {
        Self {
            get_top_headlines: GetTopHeadlines::new(repository.clone()),
            search_articles: SearchArticles::new(repository),
        }
    }

    pub async fn top_headlines(&self, params: &TopHeadlinesParams) -> Result<Vec<Article>> {
        self.get_top_headlines.execute(params).await
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Article>> {
        self.search_articles.execute(params).await
    }
}

/// Symbolic date-range tag selectable in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    Today,
    Yesterday,
    Week,
    Month,
    #[default]
    All,
}

/// A derived `{from, to}` interval. Empty means no date filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FromStr for DateRange {
    type Err = std::convert::Infallible;

    // Unknown tags mean "no filtering", so parsing never fails.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "today" => DateRange::Today,
            "yesterday" => DateRange::Yesterday,
            "week" => DateRange::Week,
            "month" => DateRange::Month,
            _ => DateRange::All,
        })
    }
}

impl DateRange {
    /// Derive the `{from, to}` interval for this tag against an
    /// explicit `now`. Boundaries are local midnights; `Month` uses
    /// calendar subtraction so year/month roll back correctly rather
    /// than a fixed 30-day offset.
    pub fn to_filter(self, now: DateTime<Local>) -> DateFilter {
        let midnight = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time");

        match self {
            DateRange::Today => DateFilter {
                from: Some(format_local(midnight)),
                to: None,
            },
            DateRange::Yesterday => DateFilter {
                from: Some(format_local(midnight - Duration::days(1))),
                to: Some(format_local(midnight)),
            },
            DateRange::Week => DateFilter {
                from: Some(format_local(midnight - Duration::days(7))),
                to: None,
            },
            DateRange::Month => DateFilter {
                from: Some(format_local(
                    midnight
                        .checked_sub_months(Months::new(1))
                        .unwrap_or(midnight),
                )),
                to: None,
            },
            DateRange::All => DateFilter::default(),
        }
    }
}

fn format_local(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn fake_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn today_starts_at_local_midnight() {
        let filter = DateRange::Today.to_filter(fake_now());
        assert_eq!(filter.from.as_deref(), Some("2024-03-15T00:00:00"));
        assert_eq!(filter.to, None);
    }

    #[test]
    fn yesterday_spans_one_local_day() {
        let filter = DateRange::Yesterday.to_filter(fake_now());
        assert_eq!(filter.from.as_deref(), Some("2024-03-14T00:00:00"));
        assert_eq!(filter.to.as_deref(), Some("2024-03-15T00:00:00"));
    }

    #[test]
    fn week_is_seven_days_before_midnight() {
        let filter = DateRange::Week.to_filter(fake_now());
        assert_eq!(filter.from.as_deref(), Some("2024-03-08T00:00:00"));
        assert_eq!(filter.to, None);
    }

    #[test]
    fn month_uses_calendar_subtraction() {
        let filter = DateRange::Month.to_filter(fake_now());
        assert_eq!(filter.from.as_deref(), Some("2024-02-15T00:00:00"));
        assert_eq!(filter.to, None);
    }

    #[test]
    fn month_rolls_back_across_the_year_boundary() {
        let now = Local.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap();
        let filter = DateRange::Month.to_filter(now);
        assert_eq!(filter.from.as_deref(), Some("2023-12-10T00:00:00"));
    }

    #[test]
    fn month_clamps_to_shorter_months() {
        let now = Local.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let filter = DateRange::Month.to_filter(now);
        // February 2024 has 29 days.
        assert_eq!(filter.from.as_deref(), Some("2024-02-29T00:00:00"));
    }

    #[test]
    fn all_and_unknown_tags_mean_no_filter() {
        assert_eq!(DateRange::All.to_filter(fake_now()), DateFilter::default());
        let parsed: DateRange = "last-fortnight".parse().unwrap();
        assert_eq!(parsed, DateRange::All);
    }

    #[test]
    fn known_tags_parse() {
        assert_eq!("today".parse::<DateRange>().unwrap(), DateRange::Today);
        assert_eq!(
            "yesterday".parse::<DateRange>().unwrap(),
            DateRange::Yesterday
        );
        assert_eq!("week".parse::<DateRange>().unwrap(), DateRange::Week);
        assert_eq!("month".parse::<DateRange>().unwrap(), DateRange::Month);
        assert_eq!("all".parse::<DateRange>().unwrap(), DateRange::All);
    }
}
