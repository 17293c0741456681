//! Site configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    /// Locale used for dates rendered in content lists
    pub locale: String,

    // Directory
    pub data_dir: String,
    pub dist_dir: String,
    pub layouts_dir: String,
    pub styles_dir: String,
    pub core_dir: String,
    pub config_dir: String,
    pub structure_file: String,

    // Import
    /// Directory name of the sibling core repository
    pub core_repo: String,
    /// Explicit core repository location (overrides discovery)
    pub core_path: Option<String>,

    // Build
    /// Browser scripts copied from `core_dir`
    pub core_files: Vec<String>,
    /// Files copied from `data_dir` into the output `data/` directory
    pub data_files: Vec<String>,
    /// Files that must exist before a build
    pub required_files: Vec<String>,

    // Runtime
    #[serde(default)]
    pub data: DataPaths,
    #[serde(default)]
    pub nav: NavConfig,
    pub kb_limit: usize,
    pub stories_limit: usize,
    /// Reject site structures with dangling menu entries
    pub strict: bool,
    #[serde(default)]
    pub labels: Labels,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Vova & Petrova".to_string(),
            description: String::new(),
            language: "en".to_string(),
            locale: "en-US".to_string(),

            data_dir: "data".to_string(),
            dist_dir: "dist".to_string(),
            layouts_dir: "src/layouts".to_string(),
            styles_dir: "src/styles".to_string(),
            core_dir: "src/core".to_string(),
            config_dir: "src/config".to_string(),
            structure_file: "site-structure.json".to_string(),

            core_repo: "vovaipetrova-core".to_string(),
            core_path: None,

            core_files: vec![
                "router.js".to_string(),
                "navigation.js".to_string(),
                "site-router.js".to_string(),
                "site-navigation.js".to_string(),
                "content-loader.js".to_string(),
            ],
            data_files: vec![
                "kb_glossary_lite.jsonl".to_string(),
                "stories_digests.jsonl".to_string(),
                "routes.json".to_string(),
                "tokens.json".to_string(),
            ],
            required_files: vec!["routes.json".to_string(), "tokens.json".to_string()],

            data: DataPaths::default(),
            nav: NavConfig::default(),
            kb_limit: 20,
            stories_limit: 10,
            strict: false,
            labels: Labels::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.dist_dir.trim().is_empty() {
            return Err(ConfigError::Validation("dist_dir must not be empty".into()));
        }
        if self.kb_limit == 0 || self.stories_limit == 0 {
            return Err(ConfigError::Validation(
                "kb_limit and stories_limit must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Relative paths fetched at runtime for the content lists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub glossary: String,
    pub stories: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            glossary: "./data/kb_glossary_lite.jsonl".to_string(),
            stories: "./data/stories_digests.jsonl".to_string(),
        }
    }
}

/// Allow-lists for the route-table navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub main: Vec<String>,
    pub quick: Vec<String>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            main: ["/", "/kb", "/portfolio", "/think-tank", "/nav"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quick: ["/kb", "/portfolio", "/think-tank"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Interface strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub home: String,
    pub loading: String,
    pub go_to: String,
    pub read_more: String,
    pub kb_not_found: String,
    pub stories_not_found: String,
    pub episodes: String,
    pub services_heading: String,
    pub portfolio_heading: String,
    pub portfolio_placeholder: String,
    pub portfolio_link: String,
    pub quick_nav_heading: String,
    pub hero_tagline: String,
    pub kb_heading: String,
    pub portfolio_page_heading: String,
    pub portfolio_page_body: String,
    pub content_placeholder: String,
    pub subsection_placeholder: String,
    pub service_placeholder: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            home: "Home".to_string(),
            loading: "Loading...".to_string(),
            go_to: "Open →".to_string(),
            read_more: "Learn more →".to_string(),
            kb_not_found: "No terms found".to_string(),
            stories_not_found: "No stories found".to_string(),
            episodes: "Episodes".to_string(),
            services_heading: "Our services".to_string(),
            portfolio_heading: "Portfolio".to_string(),
            portfolio_placeholder: "Our work and case studies will appear here".to_string(),
            portfolio_link: "View portfolio →".to_string(),
            quick_nav_heading: "Quick navigation".to_string(),
            hero_tagline: "Knowledge base and project stories".to_string(),
            kb_heading: "Knowledge base".to_string(),
            portfolio_page_heading: "Portfolio and services".to_string(),
            portfolio_page_body: "Case studies and services will appear here".to_string(),
            content_placeholder: "Page content will be loaded here".to_string(),
            subsection_placeholder: "Subsection content will appear here".to_string(),
            service_placeholder: "Service description will appear here".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.dist_dir, "dist");
        assert_eq!(config.kb_limit, 20);
        assert_eq!(config.stories_limit, 10);
        assert_eq!(config.data.glossary, "./data/kb_glossary_lite.jsonl");
        assert!(config.required_files.contains(&"routes.json".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Studio
locale: ru-RU
kb_limit: 5
nav:
  quick: ["/kb"]
labels:
  home: Главная
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Studio");
        assert_eq!(config.locale, "ru-RU");
        assert_eq!(config.kb_limit, 5);
        assert_eq!(config.nav.quick, vec!["/kb".to_string()]);
        assert_eq!(config.nav.main.len(), 5);
        assert_eq!(config.labels.home, "Главная");
        assert_eq!(config.labels.loading, "Loading...");
    }

    #[test]
    fn test_load_rejects_zero_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "kb_limit: 0\n").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = SiteConfig::load("/nonexistent/_config.yml").unwrap_err();
        assert!(err.to_string().contains("_config.yml"));
    }
}
