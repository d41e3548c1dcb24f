use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "relevancy")]
    Relevancy,
    #[serde(rename = "popularity")]
    Popularity,
    #[default]
    #[serde(rename = "publishedAt")]
    PublishedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevancy" => Ok(SortBy::Relevancy),
            "popularity" => Ok(SortBy::Popularity),
            "publishedAt" => Ok(SortBy::PublishedAt),
            other => Err(format!(
                "unknown sort order '{other}' (expected relevancy, popularity or publishedAt)"
            )),
        }
    }
}

/// Request parameters for the top-headlines endpoint.
///
/// Absent fields are omitted from the outgoing query entirely, never
/// sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopHeadlinesParams {
    pub country: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl TopHeadlinesParams {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_opt(&mut pairs, "country", self.country.as_deref());
        push_opt(&mut pairs, "category", self.category.as_deref());
        push_opt(&mut pairs, "sources", self.source.as_deref());
        push_opt(&mut pairs, "from", self.from.as_deref());
        push_opt(&mut pairs, "to", self.to.as_deref());
        push_num(&mut pairs, "pageSize", self.page_size);
        push_num(&mut pairs, "page", self.page);
        pairs
    }
}

/// Request parameters for the everything/search endpoint. The free-text
/// query is the only required field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub sources: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort_by: Option<SortBy>,
    pub page_size: Option<u32>,
    pub page: Option<u32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sources: None,
            from: None,
            to: None,
            sort_by: None,
            page_size: None,
            page: None,
        }
    }

    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("q".to_string(), self.query.clone())];
        push_opt(&mut pairs, "sources", self.sources.as_deref());
        push_opt(&mut pairs, "from", self.from.as_deref());
        push_opt(&mut pairs, "to", self.to.as_deref());
        push_opt(&mut pairs, "sortBy", self.sort_by.map(|s| s.as_str()));
        push_num(&mut pairs, "pageSize", self.page_size);
        push_num(&mut pairs, "page", self.page);
        pairs
    }
}

fn push_opt(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
}

fn push_num(pairs: &mut Vec<(String, String)>, key: &str, value: Option<u32>) {
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headlines_with_only_country_emits_exactly_one_pair() {
        let params = TopHeadlinesParams {
            country: Some("us".into()),
            ..Default::default()
        };
        assert_eq!(
            params.query_pairs(),
            vec![("country".to_string(), "us".to_string())]
        );
    }

    #[test]
    fn headlines_absent_fields_are_omitted_not_empty() {
        let params = TopHeadlinesParams::default();
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn headlines_numbers_serialize_as_decimal_strings() {
        let params = TopHeadlinesParams {
            category: Some("sports".into()),
            page_size: Some(50),
            page: Some(3),
            ..Default::default()
        };
        let pairs = params.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("category".to_string(), "sports".to_string()),
                ("pageSize".to_string(), "50".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn search_always_includes_q() {
        let params = SearchParams::new("rust");
        assert_eq!(
            params.query_pairs(),
            vec![("q".to_string(), "rust".to_string())]
        );
    }

    #[test]
    fn search_sort_by_uses_wire_names() {
        let mut params = SearchParams::new("rust");
        params.sort_by = Some(SortBy::Relevancy);
        let pairs = params.query_pairs();
        assert!(pairs.contains(&("sortBy".to_string(), "relevancy".to_string())));
    }

    #[test]
    fn sort_by_round_trips_through_from_str() {
        for s in ["relevancy", "popularity", "publishedAt"] {
            assert_eq!(s.parse::<SortBy>().unwrap().as_str(), s);
        }
        assert!("newest".parse::<SortBy>().is_err());
    }
}
