//! Router over the flat route table

use super::{normalize_fragment, show_loading, PageRouter, RouteState, Slot, SlotKind, Ticket};
use crate::config::{Labels, SiteConfig};
use crate::content::loading_html;
use crate::error::RouterError;
use crate::helpers::{html_escape, paragraph};
use crate::model::{Route, RouteTable, ROOT};
use crate::navigation::{Navigation, QUICK_NAV};
use crate::surface::{Surface, MAIN};

/// Container of the glossary list on the knowledge-base page
pub const KB_LIST: &str = "kb-list";

/// Routes a fragment to a page of the route table
pub struct Router {
    table: RouteTable,
    navigation: Navigation,
    site_name: String,
    labels: Labels,
    kb_limit: usize,
    state: RouteState,
}

impl Router {
    /// Fails when the table has no root route to fall back on
    pub fn new(table: RouteTable, config: &SiteConfig) -> Result<Self, RouterError> {
        if !table.contains(ROOT) {
            return Err(RouterError::MissingRoot);
        }

        Ok(Self {
            navigation: Navigation::new(table.clone(), &config.nav, &config.labels),
            table,
            site_name: config.title.clone(),
            labels: config.labels.clone(),
            kb_limit: config.kb_limit,
            state: RouteState::default(),
        })
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Exact match, else the root route
    pub fn resolve(&self, route: &str) -> Result<&Route, RouterError> {
        self.table
            .get(route)
            .or_else(|| self.table.get(ROOT))
            .ok_or(RouterError::MissingRoot)
    }

    /// `og.title`, else the route title, else the site name
    pub fn page_title(&self, route: &Route) -> String {
        route
            .og
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| Some(route.title.as_str()).filter(|t| !t.is_empty()))
            .unwrap_or(self.site_name.as_str())
            .to_string()
    }

    /// Skeleton markup for a route and the slots it declares
    pub fn render_page(&self, route: &Route) -> (String, Vec<Slot>) {
        match route.path.as_str() {
            ROOT => (self.render_home(), Vec::new()),
            "/kb" => (
                self.render_kb(),
                vec![Slot::new(KB_LIST, SlotKind::Glossary { limit: self.kb_limit })],
            ),
            "/portfolio" => (self.render_portfolio(), Vec::new()),
            _ if route.is_content_page() => (self.render_content_page(route), Vec::new()),
            _ => (self.render_generic(route), Vec::new()),
        }
    }

    fn render_home(&self) -> String {
        format!(
            concat!(
                r#"<section class="hero"><h1>{}</h1><p>{}</p></section>"#,
                r#"<section class="quick-nav"><h2>{}</h2>"#,
                r#"<div class="nav-grid" id="{}"></div></section>"#
            ),
            html_escape(&self.site_name),
            html_escape(&self.labels.hero_tagline),
            html_escape(&self.labels.quick_nav_heading),
            QUICK_NAV
        )
    }

    fn render_kb(&self) -> String {
        format!(
            r#"<section class="kb-page"><h1>{}</h1><div class="kb-list" id="{}"></div></section>"#,
            html_escape(&self.labels.kb_heading),
            KB_LIST
        )
    }

    fn render_portfolio(&self) -> String {
        format!(
            r#"<section class="portfolio-page"><h1>{}</h1><p>{}</p></section>"#,
            html_escape(&self.labels.portfolio_page_heading),
            html_escape(&self.labels.portfolio_page_body)
        )
    }

    fn render_content_page(&self, route: &Route) -> String {
        format!(
            concat!(
                r#"<article class="content-page"><h1>{}</h1>"#,
                r#"<p class="description">{}</p>"#,
                r#"<div class="content"><p>{}</p></div></article>"#
            ),
            html_escape(&route.title),
            html_escape(route.og.description.as_deref().unwrap_or_default()),
            html_escape(&self.labels.content_placeholder)
        )
    }

    fn render_generic(&self, route: &Route) -> String {
        format!(
            r#"<section class="generic-page"><h1>{}</h1>{}</section>"#,
            html_escape(&route.title),
            paragraph(Some("description"), route.og.description.as_deref())
        )
    }
}

impl PageRouter for Router {
    fn state(&self) -> &RouteState {
        &self.state
    }

    fn begin_navigation<S: Surface>(
        &mut self,
        fragment: &str,
        surface: &mut S,
    ) -> Result<Ticket, RouterError> {
        let requested = normalize_fragment(fragment);
        let route = self.resolve(&requested)?.clone();
        if route.path != requested {
            tracing::debug!("No route for {}, showing {}", requested, route.path);
        }

        let generation = self.state.advance(route.path.clone());

        surface.set_title(&self.page_title(&route));
        let (html, slots) = self.render_page(&route);
        surface.replace(MAIN, html);

        if route.path == ROOT {
            self.navigation.render_quick_nav(surface, QUICK_NAV);
        }
        show_loading(surface, &slots, &loading_html(&self.labels));

        Ok(Ticket {
            generation,
            route: route.path,
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLoader, MemoryFetcher};
    use crate::router::populate;
    use crate::surface::MemorySurface;

    fn table() -> RouteTable {
        let mut kb = Route::new("/kb", "KB");
        kb.og.description = Some("Glossary".to_string());
        let mut about = Route::new("/page/about", "About <us>");
        about.og.title = Some("About us | Studio".to_string());
        about.og.description = Some("Who & why".to_string());
        RouteTable::new(vec![
            Route::new("/", "Home"),
            kb,
            Route::new("/portfolio", "Portfolio"),
            about,
            Route::new("/contacts", ""),
        ])
    }

    fn router() -> Router {
        Router::new(table(), &SiteConfig::default()).unwrap()
    }

    fn surface() -> MemorySurface {
        MemorySurface::new(&[MAIN])
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let table = RouteTable::new(vec![Route::new("/kb", "KB")]);
        let err = Router::new(table, &SiteConfig::default()).err();
        assert_eq!(err, Some(RouterError::MissingRoot));
    }

    #[test]
    fn test_unknown_route_renders_like_root() {
        let mut router = router();
        let mut unknown = surface();
        let ticket = router.begin_navigation("#/nope", &mut unknown).unwrap();
        assert_eq!(ticket.route, "/");
        assert_eq!(router.current_route(), "/");

        let mut root = surface();
        router.begin_navigation("#/", &mut root).unwrap();

        assert_eq!(unknown.compose(MAIN), root.compose(MAIN));
        assert_eq!(unknown.title(), root.title());
    }

    #[test]
    fn test_home_fills_quick_nav() {
        let mut router = router();
        let mut surface = surface();
        router.begin_navigation("", &mut surface).unwrap();
        let quick = surface.content(QUICK_NAV).unwrap();
        assert!(quick.contains(r##"href="#/kb""##));
        assert!(quick.contains("Glossary"));
        assert_eq!(surface.title(), "Home");
    }

    #[test]
    fn test_titles() {
        let router = router();
        assert_eq!(router.page_title(router.resolve("/kb").unwrap()), "KB");
        assert_eq!(
            router.page_title(router.resolve("/page/about").unwrap()),
            "About us | Studio"
        );
        assert_eq!(
            router.page_title(router.resolve("/contacts").unwrap()),
            SiteConfig::default().title
        );
    }

    #[test]
    fn test_content_page_escapes() {
        let mut router = router();
        let mut surface = surface();
        router.begin_navigation("#/page/about", &mut surface).unwrap();
        let html = surface.content(MAIN).unwrap();
        assert!(html.contains(r#"<article class="content-page"><h1>About &lt;us&gt;</h1>"#));
        assert!(html.contains("Who &amp; why"));
    }

    #[tokio::test]
    async fn test_kb_scenario() {
        let lines = (0..30)
            .map(|i| format!(r#"{{"slug":"t{i}","title":"T{i}","lite_summary":"s"}}"#))
            .collect::<Vec<_>>()
            .join("\n");
        let fetcher = MemoryFetcher::new().with_file("./data/kb_glossary_lite.jsonl", lines);
        let loader = ContentLoader::new(fetcher, &SiteConfig::default());
        let mut router = router();
        let mut surface = surface();

        let ticket = router.begin_navigation("kb", &mut surface).unwrap();
        assert_eq!(surface.title(), "KB");
        assert_eq!(router.current_route(), "/kb");
        assert_eq!(
            surface.content(KB_LIST),
            Some(r#"<p class="loading">Loading...</p>"#)
        );
        assert_eq!(loader.fetcher().requests(), 0);

        let written = populate(router.state(), &ticket, &mut surface, &loader).await;
        assert_eq!(written, 1);
        assert_eq!(surface.content(KB_LIST).unwrap().matches("kb-item").count(), 20);
    }
}
