//! Menus, quick-navigation cards and breadcrumbs

pub mod routes;
pub mod site;

pub use routes::Navigation;
pub use site::SiteNavigation;

use crate::helpers::{fragment_href, html_escape};
use crate::surface::Surface;

/// Container of the route-table main menu
pub const MAIN_NAV: &str = "main-nav";
/// Container of the quick-navigation cards on the home page
pub const QUICK_NAV: &str = "quick-nav-grid";
/// Container of the route-table breadcrumbs
pub const BREADCRUMBS: &str = "breadcrumbs";
/// Container of the site-structure main menu
pub const MAIN_MENU: &str = "main-menu";
/// Container of the site-structure sidebar
pub const SIDEBAR: &str = "sidebar";

/// A rendered link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub path: String,
    pub href: String,
    pub title: String,
    pub active: bool,
}

impl NavLink {
    pub fn new(path: &str, title: &str, active: bool) -> Self {
        Self {
            path: path.to_string(),
            href: fragment_href(path),
            title: title.to_string(),
            active,
        }
    }
}

/// One breadcrumb segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub path: String,
    pub title: String,
}

impl Crumb {
    pub fn new(path: &str, title: &str) -> Self {
        Self {
            path: path.to_string(),
            title: title.to_string(),
        }
    }
}

/// Breadcrumb trail markup; the last segment is plain text
pub fn breadcrumbs_html(crumbs: &[Crumb]) -> String {
    if crumbs.is_empty() {
        return String::new();
    }

    let last = crumbs.len() - 1;
    let inner: String = crumbs
        .iter()
        .enumerate()
        .map(|(i, crumb)| {
            if i == last {
                format!(
                    r#"<span class="breadcrumb-current">{}</span>"#,
                    html_escape(&crumb.title)
                )
            } else {
                format!(
                    r#"<a href="{}" class="breadcrumb-link">{}</a><span class="breadcrumb-separator"> › </span>"#,
                    html_escape(&fragment_href(&crumb.path)),
                    html_escape(&crumb.title)
                )
            }
        })
        .collect();

    format!(r#"<nav class="breadcrumbs">{}</nav>"#, inner)
}

/// Fragment a click on `href` should set, with `#` stripped
pub(crate) fn href_fragment(href: &str) -> &str {
    href.strip_prefix('#').unwrap_or(href)
}

/// Menus rendered alongside the page, refreshed on every navigation
pub trait Menus {
    /// Re-render every menu container against the current route
    fn render_menus<S: Surface>(&self, surface: &mut S, current: &str);

    /// Fragment a click on a link with this href navigates to; `None`
    /// leaves the location untouched
    fn click_target(&self, href: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumbs_last_segment_is_text() {
        let html = breadcrumbs_html(&[
            Crumb::new("/", "Home"),
            Crumb::new("/kb", "KB"),
            Crumb::new("/kb/x", "Term X"),
        ]);
        assert!(html.starts_with(r#"<nav class="breadcrumbs">"#));
        assert!(html.contains(r##"<a href="#" class="breadcrumb-link">Home</a>"##));
        assert!(html.contains(r##"<a href="#/kb" class="breadcrumb-link">KB</a>"##));
        assert!(html.ends_with(r#"<span class="breadcrumb-current">Term X</span></nav>"#));
        assert_eq!(html.matches("breadcrumb-link").count(), 2);
    }

    #[test]
    fn test_breadcrumbs_empty() {
        assert_eq!(breadcrumbs_html(&[]), "");
    }
}
