pub mod gnews;
pub mod google_rss;

pub use gnews::{GNewsProvider, GNewsQuery};
pub use google_rss::GoogleNewsRssProvider;
