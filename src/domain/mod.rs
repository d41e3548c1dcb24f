pub mod article;
pub mod params;
pub mod settings;

pub use article::{Article, ArticleSource};
pub use params::{SearchParams, SortBy, TopHeadlinesParams};
pub use settings::{FontSize, ImageQuality, UserSettings};
