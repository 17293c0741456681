//! In-memory surface used by the render command and in tests

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

use super::Surface;

lazy_static! {
    static ref ID_ATTR: Regex = Regex::new(r#"\sid="([^"]+)""#).unwrap();
}

#[derive(Debug, Clone, Default)]
struct Container {
    html: String,
    /// Container whose markup declared this one; `None` for top-level slots
    parent: Option<String>,
}

/// Surface that keeps containers as strings
///
/// Markup written into a container is scanned for `id="..."` attributes and
/// every id found becomes a child container. Replacing a container drops all
/// of its descendants, so writes aimed at a page that has since been
/// replaced find nothing to write to.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    title: String,
    containers: IndexMap<String, Container>,
}

impl MemorySurface {
    /// Create a surface with the given top-level containers
    pub fn new(ids: &[&str]) -> Self {
        let containers = ids
            .iter()
            .map(|id| (id.to_string(), Container::default()))
            .collect();
        Self {
            title: String::new(),
            containers,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Raw markup of a container, without its children filled in
    pub fn content(&self, id: &str) -> Option<&str> {
        self.containers.get(id).map(|c| c.html.as_str())
    }

    /// Ids of all live containers, in creation order
    pub fn container_ids(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }

    /// Markup of a container with every child container's content inserted
    /// right after the child's opening tag
    pub fn compose(&self, id: &str) -> Option<String> {
        let mut html = self.containers.get(id)?.html.clone();

        for child in self.children_of(id) {
            let Some(inner) = self.compose(&child) else {
                continue;
            };
            if inner.is_empty() {
                continue;
            }
            let pattern = format!(r#"\sid="{}"[^>]*>"#, regex::escape(&child));
            let Ok(open_tag) = Regex::new(&pattern) else {
                continue;
            };
            if let Some(m) = open_tag.find(&html) {
                html.insert_str(m.end(), &inner);
            }
        }

        Some(html)
    }

    fn children_of(&self, id: &str) -> Vec<String> {
        self.containers
            .iter()
            .filter(|(_, c)| c.parent.as_deref() == Some(id))
            .map(|(k, _)| k.clone())
            .collect()
    }

    fn remove_descendants(&mut self, id: &str) {
        let mut stack = self.children_of(id);
        while let Some(child) = stack.pop() {
            stack.extend(self.children_of(&child));
            self.containers.shift_remove(&child);
        }
    }
}

impl Surface for MemorySurface {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn has_container(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    fn replace(&mut self, id: &str, html: String) -> bool {
        if !self.containers.contains_key(id) {
            tracing::trace!("Container {:?} not present, skipping write", id);
            return false;
        }

        self.remove_descendants(id);

        let declared: Vec<String> = ID_ATTR
            .captures_iter(&html)
            .map(|c| c[1].to_string())
            .filter(|child| child != id)
            .collect();

        if let Some(container) = self.containers.get_mut(id) {
            container.html = html;
        }

        for child in declared {
            if self.containers.contains_key(&child) {
                continue;
            }
            self.containers.insert(
                child,
                Container {
                    html: String::new(),
                    parent: Some(id.to_string()),
                },
            );
        }

        true
    }
}
