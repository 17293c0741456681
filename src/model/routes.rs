//! Route table (routes.json)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Open Graph fields of a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OgMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A top-level navigable path with SEO metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_in_sitemap")]
    pub in_sitemap: bool,
    #[serde(default)]
    pub og: OgMeta,
}

fn default_in_sitemap() -> bool {
    true
}

impl Route {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            in_sitemap: true,
            og: OgMeta::default(),
        }
    }

    /// Content pages live under `/page/` and never appear in menus
    pub fn is_content_page(&self) -> bool {
        self.path.starts_with("/page/")
    }
}

/// Flat list of routes, loaded once
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteTable {
    pub routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Load the route table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Find a route by exact path
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Routes listed in `allow`, in table order, excluding those kept out
    /// of the sitemap and content pages
    pub fn menu_routes<'a>(&'a self, allow: &'a [String]) -> impl Iterator<Item = &'a Route> {
        self.routes
            .iter()
            .filter(move |r| r.in_sitemap && !r.is_content_page() && allow.contains(&r.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_table() {
        let json = r#"{
            "version": 2,
            "routes": [
                {"path": "/", "title": "Home"},
                {"path": "/kb", "title": "KB", "og": {"description": "Terms"}},
                {"path": "/draft", "title": "Draft", "in_sitemap": false}
            ]
        }"#;
        let table = RouteTable::from_json(json).unwrap();
        assert_eq!(table.routes.len(), 3);
        assert!(table.get("/").unwrap().in_sitemap);
        assert_eq!(
            table.get("/kb").unwrap().og.description.as_deref(),
            Some("Terms")
        );
        assert!(!table.get("/draft").unwrap().in_sitemap);
        assert!(table.get("/missing").is_none());
    }

    #[test]
    fn test_menu_routes_filters() {
        let mut hidden = Route::new("/nav", "Nav");
        hidden.in_sitemap = false;
        let table = RouteTable::new(vec![
            Route::new("/", "Home"),
            Route::new("/kb", "KB"),
            Route::new("/page/about", "About"),
            Route::new("/other", "Other"),
            hidden,
        ]);
        let allow: Vec<String> = ["/", "/kb", "/page/about", "/nav"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let paths: Vec<_> = table.menu_routes(&allow).map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/kb"]);
    }
}
