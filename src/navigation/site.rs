//! Navigation driven by the site structure tree

use super::{breadcrumbs_html, href_fragment, Crumb, Menus, NavLink, MAIN_MENU, SIDEBAR};
use crate::config::Labels;
use crate::helpers::{html_escape, is_route_active};
use crate::model::{MenuItem, SiteStructure, ROOT};
use crate::surface::Surface;

/// Top-level menu entry with its submenu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub link: NavLink,
    pub submenu: Vec<NavLink>,
}

/// Sidebar for the section containing the current route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub title: String,
    pub links: Vec<NavLink>,
}

/// Classic menu with sections and subsections
#[derive(Debug, Clone)]
pub struct SiteNavigation {
    structure: SiteStructure,
    labels: Labels,
}

impl SiteNavigation {
    pub fn new(structure: SiteStructure, labels: &Labels) -> Self {
        Self {
            structure,
            labels: labels.clone(),
        }
    }

    pub fn main_menu(&self, current: &str) -> Vec<MenuEntry> {
        self.structure
            .site
            .menu
            .iter()
            .map(|item| MenuEntry {
                link: NavLink::new(&item.path, &item.title, is_route_active(current, &item.path)),
                submenu: item
                    .submenu
                    .iter()
                    .map(|sub| NavLink::new(&sub.path, &sub.title, current == sub.path))
                    .collect(),
            })
            .collect()
    }

    pub fn main_menu_html(&self, current: &str) -> String {
        self.main_menu(current)
            .iter()
            .map(|entry| {
                let mut html = format!(
                    r#"<div class="menu-item{}" data-path="{}"><a href="{}" class="menu-link">{}</a>"#,
                    if entry.link.active { " active" } else { "" },
                    html_escape(&entry.link.path),
                    html_escape(&entry.link.href),
                    html_escape(&entry.link.title)
                );

                if !entry.submenu.is_empty() {
                    html.push_str(r#"<div class="submenu">"#);
                    for sub in &entry.submenu {
                        html.push_str(&format!(
                            r#"<a href="{}" class="submenu-link">{}</a>"#,
                            html_escape(&sub.href),
                            html_escape(&sub.title)
                        ));
                    }
                    html.push_str("</div>");
                }

                html.push_str("</div>");
                html
            })
            .collect()
    }

    pub fn render_main_menu<S: Surface>(&self, surface: &mut S, container: &str, current: &str) {
        surface.replace(container, self.main_menu_html(current));
    }

    /// First non-root menu section containing `current` that has a submenu
    pub fn sidebar(&self, current: &str) -> Option<Sidebar> {
        let item: &MenuItem = self
            .structure
            .site
            .menu
            .iter()
            .find(|m| m.path != ROOT && current.starts_with(&m.path))?;

        if item.submenu.is_empty() {
            return None;
        }

        Some(Sidebar {
            title: item.title.clone(),
            links: item
                .submenu
                .iter()
                .map(|sub| NavLink::new(&sub.path, &sub.title, current == sub.path))
                .collect(),
        })
    }

    pub fn sidebar_html(&self, current: &str) -> String {
        let Some(sidebar) = self.sidebar(current) else {
            return String::new();
        };

        let items: String = sidebar
            .links
            .iter()
            .map(|link| {
                format!(
                    r#"<li class="sidebar-item{}"><a href="{}" class="sidebar-link">{}</a></li>"#,
                    if link.active { " active" } else { "" },
                    html_escape(&link.href),
                    html_escape(&link.title)
                )
            })
            .collect();

        format!(
            r#"<nav class="sidebar"><h3 class="sidebar-title">{}</h3><ul class="sidebar-menu">{}</ul></nav>"#,
            html_escape(&sidebar.title),
            items
        )
    }

    pub fn render_sidebar<S: Surface>(&self, surface: &mut S, container: &str, current: &str) {
        surface.replace(container, self.sidebar_html(current));
    }

    /// Root, the parent page when it exists, then the page itself
    ///
    /// Empty for the root and for routes without a page definition.
    pub fn breadcrumbs(&self, route: &str) -> Vec<Crumb> {
        breadcrumb_trail(&self.structure, route, &self.labels.home)
    }
}

/// Breadcrumb trail for a page of the site structure
pub fn breadcrumb_trail(structure: &SiteStructure, route: &str, home: &str) -> Vec<Crumb> {
    let Some(page) = structure.page(route) else {
        return Vec::new();
    };
    if route == ROOT {
        return Vec::new();
    }

    let mut crumbs = vec![Crumb::new(ROOT, home)];
    if let Some(parent_path) = &page.parent {
        if let Some(parent) = structure.page(parent_path) {
            crumbs.push(Crumb::new(parent_path, &parent.title));
        }
    }
    crumbs.push(Crumb::new(route, &page.title));
    crumbs
}

/// Breadcrumb markup for a page of the site structure
pub fn breadcrumb_trail_html(structure: &SiteStructure, route: &str, home: &str) -> String {
    breadcrumbs_html(&breadcrumb_trail(structure, route, home))
}

impl Menus for SiteNavigation {
    fn render_menus<S: Surface>(&self, surface: &mut S, current: &str) {
        self.render_main_menu(surface, MAIN_MENU, current);
        self.render_sidebar(surface, SIDEBAR, current);
    }

    /// A bare `#` is ignored
    fn click_target(&self, href: &str) -> Option<String> {
        let fragment = href_fragment(href);
        if fragment.is_empty() {
            None
        } else {
            Some(fragment.to_string())
        }
    }
}
