//! Navigation driven by the flat route table

use super::{breadcrumbs_html, href_fragment, Crumb, Menus, NavLink, BREADCRUMBS, MAIN_NAV};
use crate::config::{Labels, NavConfig};
use crate::helpers::{fragment_href, html_escape, is_route_active};
use crate::model::{RouteTable, ROOT};
use crate::surface::Surface;

/// Quick-navigation card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavCard {
    pub path: String,
    pub href: String,
    pub title: String,
    pub description: String,
}

/// Main menu, quick-navigation cards and breadcrumbs from the route table
#[derive(Debug, Clone)]
pub struct Navigation {
    table: RouteTable,
    main: Vec<String>,
    quick: Vec<String>,
    labels: Labels,
}

impl Navigation {
    pub fn new(table: RouteTable, nav: &NavConfig, labels: &Labels) -> Self {
        Self {
            table,
            main: nav.main.clone(),
            quick: nav.quick.clone(),
            labels: labels.clone(),
        }
    }

    /// Main menu links; the one matching `current` is active
    pub fn main_nav(&self, current: &str) -> Vec<NavLink> {
        self.table
            .menu_routes(&self.main)
            .map(|r| NavLink::new(&r.path, &r.title, is_route_active(current, &r.path)))
            .collect()
    }

    pub fn main_nav_html(&self, current: &str) -> String {
        self.main_nav(current)
            .iter()
            .map(|link| {
                format!(
                    r#"<a href="{}" class="nav-link{}" data-route="{}">{}</a>"#,
                    html_escape(&link.href),
                    if link.active { " active" } else { "" },
                    html_escape(&link.path),
                    html_escape(&link.title)
                )
            })
            .collect()
    }

    pub fn render_main_nav<S: Surface>(&self, surface: &mut S, container: &str, current: &str) {
        surface.replace(container, self.main_nav_html(current));
    }

    /// Cards for the quick-navigation allow-list
    pub fn quick_nav(&self) -> Vec<NavCard> {
        self.table
            .menu_routes(&self.quick)
            .map(|r| NavCard {
                path: r.path.clone(),
                href: fragment_href(&r.path),
                title: r.title.clone(),
                description: r.og.description.clone().unwrap_or_default(),
            })
            .collect()
    }

    pub fn quick_nav_html(&self) -> String {
        self.quick_nav()
            .iter()
            .map(|card| {
                format!(
                    concat!(
                        r#"<div class="nav-card" data-route="{}">"#,
                        "<h3>{}</h3>",
                        "<p>{}</p>",
                        r#"<a href="{}" class="nav-card-link">{}</a>"#,
                        "</div>"
                    ),
                    html_escape(&card.path),
                    html_escape(&card.title),
                    html_escape(&card.description),
                    html_escape(&card.href),
                    html_escape(&self.labels.go_to)
                )
            })
            .collect()
    }

    pub fn render_quick_nav<S: Surface>(&self, surface: &mut S, container: &str) {
        surface.replace(container, self.quick_nav_html());
    }

    /// Root then the current route; empty on the root or an unknown route
    pub fn breadcrumbs(&self, current: &str) -> Vec<Crumb> {
        match self.table.get(current) {
            Some(route) if current != ROOT => vec![
                Crumb::new(ROOT, &self.labels.home),
                Crumb::new(current, &route.title),
            ],
            _ => Vec::new(),
        }
    }

    pub fn render_breadcrumbs<S: Surface>(&self, surface: &mut S, container: &str, current: &str) {
        surface.replace(container, breadcrumbs_html(&self.breadcrumbs(current)));
    }
}

impl Menus for Navigation {
    fn render_menus<S: Surface>(&self, surface: &mut S, current: &str) {
        self.render_main_nav(surface, MAIN_NAV, current);
        self.render_breadcrumbs(surface, BREADCRUMBS, current);
    }

    /// A bare `#` goes back to the root, which is an empty fragment
    fn click_target(&self, href: &str) -> Option<String> {
        let fragment = href_fragment(href);
        if fragment == ROOT {
            Some(String::new())
        } else {
            Some(fragment.to_string())
        }
    }
}
