//! HTML helper functions

use crate::model::ROOT;

/// Escape HTML special characters
///
/// Every piece of content-derived text goes through this before it is
/// interpolated into markup, attributes included.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Href for a route: the root maps to a bare `#`
///
/// # Examples
/// ```
/// use hashsite::helpers::fragment_href;
/// assert_eq!(fragment_href("/"), "#");
/// assert_eq!(fragment_href("/kb"), "#/kb");
/// ```
pub fn fragment_href(path: &str) -> String {
    if path == ROOT {
        "#".to_string()
    } else {
        format!("#{}", path)
    }
}

/// Whether `path` should be highlighted while `current` is shown
///
/// Exact matches count, and so do descendants of hierarchical routes
/// (`/kb/terms` activates `/kb`). The root only matches itself.
pub fn is_route_active(current: &str, path: &str) -> bool {
    current == path || (path != ROOT && current.starts_with(&format!("{}/", path)))
}

/// Optional paragraph; omitted entirely when there is no text
pub fn paragraph(class: Option<&str>, text: Option<&str>) -> String {
    match text {
        Some(t) if !t.is_empty() => match class {
            Some(c) => format!(r#"<p class="{}">{}</p>"#, c, html_escape(t)),
            None => format!("<p>{}</p>", html_escape(t)),
        },
        _ => String::new(),
    }
}
