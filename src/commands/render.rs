//! Render a route the way the browser would, without a browser

use anyhow::Result;
use std::fmt::Write;

use crate::app::{App, RouteApp, SiteApp};
use crate::content::FsFetcher;
use crate::navigation::{Menus, BREADCRUMBS, MAIN_MENU, MAIN_NAV, SIDEBAR};
use crate::router::PageRouter;
use crate::surface::{MemorySurface, MAIN};
use crate::Site;

/// Render `fragment` and return the composed page as text
///
/// Content is fetched from the build output when it exists, otherwise from
/// the site directory itself.
pub async fn run(site: &Site, fragment: &str, use_routes: bool) -> Result<String> {
    let root = if site.dist_dir.is_dir() {
        site.dist_dir.clone()
    } else {
        tracing::debug!("No build output, fetching content from {:?}", site.base_dir);
        site.base_dir.clone()
    };
    let fetcher = FsFetcher::new(root);

    if use_routes {
        let mut app = RouteApp::for_routes(site.load_routes()?, &site.config, fetcher)?;
        render(&mut app, fragment, &[MAIN_NAV, BREADCRUMBS]).await
    } else {
        let mut app = SiteApp::for_structure(site.load_structure()?, &site.config, fetcher)?;
        render(&mut app, fragment, &[MAIN_MENU, SIDEBAR]).await
    }
}

async fn render<R, N>(
    app: &mut App<R, N, FsFetcher>,
    fragment: &str,
    menus: &[&str],
) -> Result<String>
where
    R: PageRouter,
    N: Menus,
{
    let mut ids = vec![MAIN];
    ids.extend_from_slice(menus);
    let mut surface = MemorySurface::new(&ids);

    app.navigate(fragment, &mut surface).await?;

    let mut out = String::new();
    writeln!(out, "title: {}", surface.title())?;
    writeln!(out, "route: {}", app.current_route())?;
    for id in menus {
        writeln!(out, "\n[{}]", id)?;
        writeln!(out, "{}", surface.content(id).unwrap_or_default())?;
    }
    writeln!(out, "\n[{}]", MAIN)?;
    writeln!(out, "{}", surface.compose(MAIN).unwrap_or_default())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const STRUCTURE: &str = r#"{
        "site": {
            "name": "Studio",
            "menu": [{"path": "/", "title": "Home"}, {"path": "/kb", "title": "KB"}],
            "pages": {
                "/": {"title": "Home", "type": "home"},
                "/kb": {"title": "KB", "type": "section"}
            }
        }
    }"#;

    #[tokio::test]
    async fn test_render_structure_kb() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write(&site.structure_path(), STRUCTURE);
        write(
            &site.data_dir.join("kb_glossary_lite.jsonl"),
            r#"{"slug":"api","title":"API & co","lite_summary":"Interface"}"#,
        );

        let out = run(&site, "#/kb", false).await.unwrap();
        assert!(out.starts_with("title: KB — Studio\n"));
        assert!(out.contains("route: /kb"));
        assert!(out.contains("API &amp; co"));
        assert!(!out.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_render_routes_unknown_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write(
            &site.routes_path(),
            r#"{"routes":[{"path":"/","title":"Home"},{"path":"/kb","title":"KB"}]}"#,
        );

        let out = run(&site, "#/missing", true).await.unwrap();
        assert!(out.contains("title: Home\n"));
        assert!(out.contains("route: /\n"));
        assert!(out.contains("[main-nav]"));
    }

    #[tokio::test]
    async fn test_render_without_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        write(&site.routes_path(), r#"{"routes":[{"path":"/kb","title":"KB"}]}"#);

        let err = run(&site, "#/kb", true).await.unwrap_err();
        assert!(err.to_string().contains("root"));
    }
}
