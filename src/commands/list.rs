//! List site information

use anyhow::Result;
use std::fmt::Write;

use crate::model::{RouteTable, SiteStructure};
use crate::Site;

/// List site information by type
pub fn run(site: &Site, list_type: &str) -> Result<()> {
    let out = match list_type {
        "route" | "routes" => format_routes(&site.load_routes()?)?,
        "page" | "pages" => format_pages(&site.load_structure()?)?,
        "menu" => format_menu(&site.load_structure()?)?,
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: routes, pages, menu",
                list_type
            );
        }
    };
    print!("{}", out);
    Ok(())
}

fn format_routes(table: &RouteTable) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Routes ({}):", table.routes.len())?;
    for route in &table.routes {
        let mut flags = Vec::new();
        if !route.in_sitemap {
            flags.push("hidden");
        }
        if route.is_content_page() {
            flags.push("content");
        }
        write!(out, "  {} - {}", route.path, route.title)?;
        if !flags.is_empty() {
            write!(out, " [{}]", flags.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

fn format_pages(structure: &SiteStructure) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Pages ({}):", structure.site.pages.len())?;
    for (path, page) in &structure.site.pages {
        let page_type: String = page.page_type.clone().into();
        write!(out, "  {} - {} [{}]", path, page.title, page_type)?;
        if let Some(parent) = &page.parent {
            write!(out, " (parent {})", parent)?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

fn format_menu(structure: &SiteStructure) -> Result<String> {
    let mark = |path: &str| {
        if structure.page(path).is_some() {
            ""
        } else {
            " (no page)"
        }
    };

    let mut out = String::new();
    writeln!(out, "Menu ({}):", structure.site.menu.len())?;
    for item in &structure.site.menu {
        writeln!(out, "  {} - {}{}", item.path, item.title, mark(&item.path))?;
        for sub in &item.submenu {
            writeln!(out, "    {} - {}{}", sub.path, sub.title, mark(&sub.path))?;
        }
    }
    Ok(out)
}
