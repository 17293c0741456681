//! Content loader - lazily fetched, memoized data sets

use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use super::fragments::{
    glossary_html, loading_html, portfolio_html, services_html, stories_html,
};
use super::{parse_jsonl, Fetcher};
use crate::config::{DataPaths, Labels, SiteConfig};
use crate::error::LoadError;
use crate::model::{GlossaryTerm, StoryDigest};
use crate::surface::Surface;

/// Loads glossary terms and story digests on demand
///
/// Each data set is fetched at most once after a successful load. A failed
/// load is logged, reported as an empty list and retried on the next call.
pub struct ContentLoader<F> {
    fetcher: F,
    paths: DataPaths,
    labels: Labels,
    locale: String,
    kb_limit: usize,
    stories_limit: usize,
    glossary: OnceCell<Vec<GlossaryTerm>>,
    stories: OnceCell<Vec<StoryDigest>>,
}

impl<F: Fetcher> ContentLoader<F> {
    /// Create a new content loader
    pub fn new(fetcher: F, config: &SiteConfig) -> Self {
        Self {
            fetcher,
            paths: config.data.clone(),
            labels: config.labels.clone(),
            locale: config.locale.clone(),
            kb_limit: config.kb_limit,
            stories_limit: config.stories_limit,
            glossary: OnceCell::new(),
            stories: OnceCell::new(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn kb_limit(&self) -> usize {
        self.kb_limit
    }

    pub fn stories_limit(&self) -> usize {
        self.stories_limit
    }

    /// Glossary terms, fetched on first use
    pub async fn load_glossary(&self) -> &[GlossaryTerm] {
        let result = self
            .glossary
            .get_or_try_init(|| fetch_records(&self.fetcher, &self.paths.glossary))
            .await;
        match result {
            Ok(terms) => terms,
            Err(e) => {
                tracing::error!("Failed to load glossary from {}: {}", self.paths.glossary, e);
                &[]
            }
        }
    }

    /// Story digests, fetched on first use
    pub async fn load_stories(&self) -> &[StoryDigest] {
        let result = self
            .stories
            .get_or_try_init(|| fetch_records(&self.fetcher, &self.paths.stories))
            .await;
        match result {
            Ok(stories) => stories,
            Err(e) => {
                tracing::error!("Failed to load stories from {}: {}", self.paths.stories, e);
                &[]
            }
        }
    }

    pub async fn glossary_fragment(&self, limit: usize) -> String {
        glossary_html(self.load_glossary().await, limit, &self.labels)
    }

    pub async fn stories_fragment(&self, limit: usize) -> String {
        stories_html(self.load_stories().await, limit, &self.labels, &self.locale)
    }

    pub fn services_fragment(&self) -> String {
        services_html(&self.labels)
    }

    pub fn portfolio_fragment(&self) -> String {
        portfolio_html(&self.labels)
    }

    /// Render the glossary list into `container` (default limit 20)
    pub async fn render_kb_list<S: Surface>(
        &self,
        surface: &mut S,
        container: &str,
        limit: Option<usize>,
    ) {
        if !surface.has_container(container) {
            return;
        }
        surface.replace(container, loading_html(&self.labels));

        let html = self.glossary_fragment(limit.unwrap_or(self.kb_limit)).await;
        surface.replace(container, html);
    }

    /// Render the stories list into `container` (default limit 10)
    pub async fn render_stories_list<S: Surface>(
        &self,
        surface: &mut S,
        container: &str,
        limit: Option<usize>,
    ) {
        if !surface.has_container(container) {
            return;
        }
        surface.replace(container, loading_html(&self.labels));

        let html = self.stories_fragment(limit.unwrap_or(self.stories_limit)).await;
        surface.replace(container, html);
    }

    pub async fn render_services_preview<S: Surface>(&self, surface: &mut S, container: &str) {
        surface.replace(container, self.services_fragment());
    }

    pub async fn render_portfolio_preview<S: Surface>(&self, surface: &mut S, container: &str) {
        surface.replace(container, self.portfolio_fragment());
    }
}

async fn fetch_records<F, T>(fetcher: &F, path: &str) -> Result<Vec<T>, LoadError>
where
    F: Fetcher,
    T: DeserializeOwned,
{
    let text = fetcher.fetch_text(path).await?;
    let records = parse_jsonl(&text)?;
    tracing::debug!("Loaded {} records from {}", records.len(), path);
    Ok(records)
}
