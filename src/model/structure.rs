//! Site structure tree (site-structure.json)
//!
//! The structure has two parts: a two-level menu and a page map keyed by
//! path. Menu entries reference pages by path, but nothing forces them to
//! exist; [`SiteStructure::validate`] reports the mismatches.

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use super::ROOT;

/// Root document of site-structure.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteStructure {
    pub site: SiteInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    pub name: String,
    pub menu: Vec<MenuItem>,
    pub pages: IndexMap<String, SitePage>,
}

/// Menu entry; only two levels are rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submenu: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            submenu: Vec::new(),
        }
    }

    pub fn with_submenu(mut self, submenu: Vec<MenuItem>) -> Self {
        self.submenu = submenu;
        self
    }
}

/// Page type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PageType {
    Home,
    Section,
    Subsection,
    Service,
    /// Any other tag, rendered with the generic renderer
    Other(String),
}

impl From<String> for PageType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "home" => PageType::Home,
            "section" => PageType::Section,
            "subsection" => PageType::Subsection,
            "service" => PageType::Service,
            _ => PageType::Other(s),
        }
    }
}

impl From<PageType> for String {
    fn from(t: PageType) -> Self {
        match t {
            PageType::Home => "home".to_string(),
            PageType::Section => "section".to_string(),
            PageType::Subsection => "subsection".to_string(),
            PageType::Service => "service".to_string(),
            PageType::Other(s) => s,
        }
    }
}

impl Default for PageType {
    fn default() -> Self {
        PageType::Other(String::new())
    }
}

/// A block of the home page (hero, etc.)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSection {
    #[serde(rename = "type")]
    pub section_type: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

/// Page definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitePage {
    pub title: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub sections: Vec<PageSection>,
}

impl SitePage {
    pub fn new(title: impl Into<String>, page_type: PageType) -> Self {
        Self {
            title: title.into(),
            page_type,
            ..Default::default()
        }
    }

    /// First section of the given type
    pub fn section(&self, section_type: &str) -> Option<&PageSection> {
        self.sections.iter().find(|s| s.section_type == section_type)
    }
}

/// Inconsistency between the menu and the page map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureIssue {
    /// A menu or submenu entry points at a path with no page definition
    DanglingMenuEntry { path: String, title: String },
    /// A page names a parent that has no page definition
    DanglingParent { page: String, parent: String },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::DanglingMenuEntry { path, title } => {
                write!(f, "menu entry {:?} ({}) has no page definition", title, path)
            }
            StructureIssue::DanglingParent { page, parent } => {
                write!(f, "page {} names unknown parent {}", page, parent)
            }
        }
    }
}

impl SiteStructure {
    /// Load the structure from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn name(&self) -> &str {
        &self.site.name
    }

    pub fn page(&self, path: &str) -> Option<&SitePage> {
        self.site.pages.get(path)
    }

    pub fn has_root(&self) -> bool {
        self.site.pages.contains_key(ROOT)
    }

    /// Top-level menu item with exactly this path
    pub fn menu_item(&self, path: &str) -> Option<&MenuItem> {
        self.site.menu.iter().find(|m| m.path == path)
    }

    /// Report menu entries and parents that do not resolve to a page
    pub fn validate(&self) -> Vec<StructureIssue> {
        let mut issues = Vec::new();

        for item in &self.site.menu {
            for entry in std::iter::once(item).chain(item.submenu.iter()) {
                if !self.site.pages.contains_key(&entry.path) {
                    issues.push(StructureIssue::DanglingMenuEntry {
                        path: entry.path.clone(),
                        title: entry.title.clone(),
                    });
                }
            }
        }

        for (path, page) in &self.site.pages {
            if let Some(parent) = &page.parent {
                if !self.site.pages.contains_key(parent) {
                    issues.push(StructureIssue::DanglingParent {
                        page: path.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        issues
    }
}
