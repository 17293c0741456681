//! hashsite: a static showcase site with a hash-fragment router
//!
//! The library holds the routing, navigation and content-loading logic as
//! pure view functions over a small UI-surface adapter. The binary wraps it
//! with build, import, render and serve commands.

pub mod app;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod model;
pub mod navigation;
pub mod router;
pub mod server;
pub mod surface;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use model::{RouteTable, SiteStructure};

/// The main site application
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Imported data (routes, tokens, JSONL content)
    pub data_dir: PathBuf,
    /// Build output directory
    pub dist_dir: PathBuf,
    /// HTML layouts
    pub layouts_dir: PathBuf,
    /// Stylesheets
    pub styles_dir: PathBuf,
    /// Browser scripts copied verbatim into the output
    pub core_dir: PathBuf,
    /// Site structure configuration
    pub config_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        Self {
            data_dir: base_dir.join(&config.data_dir),
            dist_dir: base_dir.join(&config.dist_dir),
            layouts_dir: base_dir.join(&config.layouts_dir),
            styles_dir: base_dir.join(&config.styles_dir),
            core_dir: base_dir.join(&config.core_dir),
            config_dir: base_dir.join(&config.config_dir),
            config,
            base_dir,
        }
    }

    /// Path of the site structure file
    pub fn structure_path(&self) -> PathBuf {
        self.config_dir.join(&self.config.structure_file)
    }

    /// Path of the imported route table
    pub fn routes_path(&self) -> PathBuf {
        self.data_dir.join("routes.json")
    }

    /// Load the site structure tree, validating menu references
    pub fn load_structure(&self) -> Result<SiteStructure> {
        let path = self.structure_path();
        let structure = SiteStructure::load(&path)
            .with_context(|| format!("Failed to load site structure from {:?}", path))?;

        let issues = structure.validate();
        for issue in &issues {
            tracing::warn!("{}", issue);
        }
        if self.config.strict && !issues.is_empty() {
            anyhow::bail!(
                "Site structure has {} inconsistent entries (strict mode)",
                issues.len()
            );
        }

        Ok(structure)
    }

    /// Load the route table
    pub fn load_routes(&self) -> Result<RouteTable> {
        let path = self.routes_path();
        RouteTable::load(&path).with_context(|| format!("Failed to load routes from {:?}", path))
    }

    /// Build the static output
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Remove the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
