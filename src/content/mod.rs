//! Content module - line-delimited data sets and the list fragments built from them

mod fetch;
mod fragments;
mod jsonl;
pub mod loader;

pub use fetch::{Fetcher, FsFetcher, MemoryFetcher};
pub use fragments::{
    error_html, glossary_html, loading_html, portfolio_html, services_html, stories_html,
    Service, SERVICES,
};
pub use jsonl::parse_jsonl;
pub use loader::ContentLoader;
