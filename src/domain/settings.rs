use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::params::SortBy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageQuality::Low => "low",
            ImageQuality::Medium => "medium",
            ImageQuality::High => "high",
        };
        f.write_str(s)
    }
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ImageQuality::Low),
            "medium" => Ok(ImageQuality::Medium),
            "high" => Ok(ImageQuality::High),
            other => Err(format!(
                "unknown image quality '{other}' (expected low, medium or high)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        };
        f.write_str(s)
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            other => Err(format!(
                "unknown font size '{other}' (expected small, medium or large)"
            )),
        }
    }
}

/// The single persisted record holding all user preferences.
///
/// `#[serde(default)]` on the struct gives the load-time merge its
/// self-healing property: a persisted blob missing a key (written by an
/// older build) deserializes with that key at its hardcoded default,
/// while every key it does carry is preserved. The merge is shallow and
/// per top-level key only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub default_country: String,
    pub default_category: String,
    pub default_sort_by: SortBy,
    pub articles_per_page: u32,
    pub auto_refresh: bool,
    /// Minutes between automatic refreshes when `auto_refresh` is on.
    pub refresh_interval: u32,
    pub image_quality: ImageQuality,
    pub show_images: bool,
    pub compact_view: bool,
    pub dark_mode: bool,
    /// Persisted but currently inert; there is no notification delivery.
    pub notifications: bool,
    pub offline_reading: bool,
    pub font_size: FontSize,
    pub language: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            default_country: "us".into(),
            default_category: "general".into(),
            default_sort_by: SortBy::PublishedAt,
            articles_per_page: 20,
            auto_refresh: false,
            refresh_interval: 30,
            image_quality: ImageQuality::Medium,
            show_images: true,
            compact_view: false,
            dark_mode: false,
            notifications: true,
            offline_reading: false,
            font_size: FontSize::Medium,
            language: "en".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_hardcoded_record() {
        let s = UserSettings::default();
        assert_eq!(s.default_country, "us");
        assert_eq!(s.default_category, "general");
        assert_eq!(s.default_sort_by, SortBy::PublishedAt);
        assert_eq!(s.articles_per_page, 20);
        assert!(!s.auto_refresh);
        assert_eq!(s.refresh_interval, 30);
        assert_eq!(s.image_quality, ImageQuality::Medium);
        assert!(s.show_images);
        assert!(!s.compact_view);
        assert!(!s.dark_mode);
        assert!(s.notifications);
        assert!(!s.offline_reading);
        assert_eq!(s.font_size, FontSize::Medium);
        assert_eq!(s.language, "en");
    }

    #[test]
    fn missing_keys_heal_to_defaults_on_load() {
        // A blob from a build that predates fontSize and darkMode.
        let blob = r#"{"defaultCountry":"gb","articlesPerPage":50,"compactView":true}"#;
        let s: UserSettings = serde_json::from_str(blob).unwrap();
        assert_eq!(s.default_country, "gb");
        assert_eq!(s.articles_per_page, 50);
        assert!(s.compact_view);
        assert_eq!(s.font_size, FontSize::Medium);
        assert!(!s.dark_mode);
    }

    #[test]
    fn persists_camel_case_keys() {
        let json = serde_json::to_value(UserSettings::default()).unwrap();
        for key in [
            "defaultCountry",
            "defaultCategory",
            "defaultSortBy",
            "articlesPerPage",
            "autoRefresh",
            "refreshInterval",
            "imageQuality",
            "showImages",
            "compactView",
            "darkMode",
            "notifications",
            "offlineReading",
            "fontSize",
            "language",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn enum_wire_names_are_lowercase() {
        let json = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(json["imageQuality"], "medium");
        assert_eq!(json["fontSize"], "medium");
        assert_eq!(json["defaultSortBy"], "publishedAt");
    }
}
