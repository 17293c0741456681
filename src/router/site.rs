//! Router over the site structure tree

use super::{normalize_fragment, show_loading, PageRouter, RouteState, Slot, SlotKind, Ticket};
use crate::config::{Labels, SiteConfig};
use crate::content::loading_html;
use crate::error::RouterError;
use crate::helpers::{fragment_href, html_escape, paragraph};
use crate::model::{PageType, SitePage, SiteStructure, ROOT};
use crate::navigation::site::breadcrumb_trail_html;
use crate::surface::{Surface, MAIN};

pub const KB_LIST: &str = "kb-list";
pub const STORIES_LIST: &str = "stories-list";
pub const SERVICES_GRID: &str = "services-grid";
pub const PORTFOLIO_GRID: &str = "portfolio-grid";

/// Routes a fragment to a page definition of the site structure
pub struct SiteRouter {
    structure: SiteStructure,
    labels: Labels,
    kb_limit: usize,
    stories_limit: usize,
    state: RouteState,
}

impl SiteRouter {
    /// Fails when the page map has no root page to fall back on
    pub fn new(structure: SiteStructure, config: &SiteConfig) -> Result<Self, RouterError> {
        if !structure.has_root() {
            return Err(RouterError::MissingRoot);
        }

        Ok(Self {
            structure,
            labels: config.labels.clone(),
            kb_limit: config.kb_limit,
            stories_limit: config.stories_limit,
            state: RouteState::default(),
        })
    }

    pub fn structure(&self) -> &SiteStructure {
        &self.structure
    }

    /// Path and page for a route, falling back to the root page
    pub fn resolve<'a>(&'a self, route: &'a str) -> Result<(&'a str, &'a SitePage), RouterError> {
        if let Some(page) = self.structure.page(route) {
            return Ok((route, page));
        }
        self.structure
            .page(ROOT)
            .map(|page| (ROOT, page))
            .ok_or(RouterError::MissingRoot)
    }

    pub fn page_title(&self, page: &SitePage) -> String {
        format!("{} — {}", page.title, self.structure.name())
    }

    /// Breadcrumbs followed by the body for the page type
    pub fn render_page(&self, route: &str, page: &SitePage) -> (String, Vec<Slot>) {
        let mut html = breadcrumb_trail_html(&self.structure, route, &self.labels.home);

        let (body, slots) = match &page.page_type {
            PageType::Home => (
                self.render_home(page),
                vec![
                    Slot::new(SERVICES_GRID, SlotKind::Services),
                    Slot::new(PORTFOLIO_GRID, SlotKind::Portfolio),
                ],
            ),
            PageType::Section if route == "/kb" => (
                self.render_list_page("kb-page", "kb-list", KB_LIST, page),
                vec![Slot::new(KB_LIST, SlotKind::Glossary { limit: self.kb_limit })],
            ),
            PageType::Section if route == "/stories" => (
                self.render_list_page("stories-page", "stories-list", STORIES_LIST, page),
                vec![Slot::new(
                    STORIES_LIST,
                    SlotKind::Stories {
                        limit: self.stories_limit,
                    },
                )],
            ),
            PageType::Section => (self.render_section(route, page), Vec::new()),
            PageType::Subsection => (
                self.render_placeholder("subsection-page", page, &self.labels.subsection_placeholder),
                Vec::new(),
            ),
            PageType::Service => (
                self.render_placeholder("service-page", page, &self.labels.service_placeholder),
                Vec::new(),
            ),
            PageType::Other(_) => (self.render_generic(page), Vec::new()),
        };

        html.push_str(&body);
        (html, slots)
    }

    fn render_home(&self, page: &SitePage) -> String {
        let hero = page.section("hero");
        let title = hero
            .and_then(|s| s.title.as_deref())
            .unwrap_or(self.structure.name());
        let subtitle = hero.and_then(|s| s.subtitle.as_deref()).unwrap_or_default();

        format!(
            concat!(
                r#"<section class="hero"><h1>{}</h1><p class="hero-subtitle">{}</p></section>"#,
                r#"<section class="services-preview"><h2>{}</h2><div class="services-grid" id="{}"></div></section>"#,
                r#"<section class="portfolio-preview"><h2>{}</h2><div class="portfolio-grid" id="{}"></div></section>"#
            ),
            html_escape(title),
            html_escape(subtitle),
            html_escape(&self.labels.services_heading),
            SERVICES_GRID,
            html_escape(&self.labels.portfolio_heading),
            PORTFOLIO_GRID
        )
    }

    /// Section page whose list is filled after the fetch
    fn render_list_page(&self, class: &str, list_class: &str, id: &str, page: &SitePage) -> String {
        format!(
            r#"<section class="{}"><h1>{}</h1>{}<div class="{}" id="{}"></div></section>"#,
            class,
            html_escape(&page.title),
            paragraph(Some("section-description"), page.description.as_deref()),
            list_class,
            id
        )
    }

    /// Section page with a card per submenu entry of its menu item
    fn render_section(&self, route: &str, page: &SitePage) -> String {
        let mut html = format!(
            r#"<section class="section-page"><h1>{}</h1>{}"#,
            html_escape(&page.title),
            paragraph(Some("section-description"), page.description.as_deref())
        );

        let submenu = self
            .structure
            .menu_item(route)
            .map(|m| m.submenu.as_slice())
            .unwrap_or_default();

        if !submenu.is_empty() {
            html.push_str(r#"<div class="subsections-grid">"#);
            for sub in submenu {
                html.push_str(&format!(
                    concat!(
                        r#"<div class="subsection-card" data-route="{}">"#,
                        "<h3>{}</h3>",
                        r#"<a href="{}" class="subsection-link">{}</a>"#,
                        "</div>"
                    ),
                    html_escape(&sub.path),
                    html_escape(&sub.title),
                    html_escape(&fragment_href(&sub.path)),
                    html_escape(&self.labels.go_to)
                ));
            }
            html.push_str("</div>");
        }

        html.push_str("</section>");
        html
    }

    fn render_placeholder(&self, class: &str, page: &SitePage, text: &str) -> String {
        format!(
            r#"<section class="{}"><h1>{}</h1><p>{}</p></section>"#,
            class,
            html_escape(&page.title),
            html_escape(text)
        )
    }

    fn render_generic(&self, page: &SitePage) -> String {
        format!(
            r#"<section class="generic-page"><h1>{}</h1>{}</section>"#,
            html_escape(&page.title),
            paragraph(None, page.description.as_deref())
        )
    }
}

impl PageRouter for SiteRouter {
    fn state(&self) -> &RouteState {
        &self.state
    }

    fn begin_navigation<S: Surface>(
        &mut self,
        fragment: &str,
        surface: &mut S,
    ) -> Result<Ticket, RouterError> {
        let requested = normalize_fragment(fragment);
        let (route, page) = self.resolve(&requested)?;
        if route != requested {
            tracing::debug!("No page for {}, showing {}", requested, route);
        }

        let route = route.to_string();
        let title = self.page_title(page);
        let (html, slots) = self.render_page(&route, page);

        let generation = self.state.advance(route.clone());

        surface.set_title(&title);
        surface.replace(MAIN, html);
        show_loading(surface, &slots, &loading_html(&self.labels));

        Ok(Ticket {
            generation,
            route,
            slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentLoader, MemoryFetcher};
    use crate::model::{MenuItem, PageSection};
    use crate::router::populate;
    use crate::surface::MemorySurface;

    fn structure() -> SiteStructure {
        let mut structure = SiteStructure::default();
        structure.site.name = "Studio".to_string();
        structure.site.menu = vec![
            MenuItem::new("/", "Home"),
            MenuItem::new("/services", "Services").with_submenu(vec![
                MenuItem::new("/services/video", "Video"),
                MenuItem::new("/services/ghost", "Ghost"),
            ]),
            MenuItem::new("/kb", "KB"),
        ];

        let mut home = SitePage::new("Home", PageType::Home);
        home.sections.push(PageSection {
            section_type: "hero".to_string(),
            title: Some("We <build>".to_string()),
            subtitle: Some("Things & stuff".to_string()),
        });
        let mut kb = SitePage::new("KB", PageType::Section);
        kb.description = Some("All the terms".to_string());
        let mut video = SitePage::new("Video", PageType::Service);
        video.parent = Some("/services".to_string());

        let pages = &mut structure.site.pages;
        pages.insert("/".into(), home);
        pages.insert("/kb".into(), kb);
        pages.insert("/stories".into(), SitePage::new("Stories", PageType::Section));
        pages.insert("/services".into(), SitePage::new("Services", PageType::Section));
        pages.insert("/services/video".into(), video);
        pages.insert(
            "/about".into(),
            SitePage::new("About", PageType::Other("landing".to_string())),
        );
        structure
    }

    fn router() -> SiteRouter {
        SiteRouter::new(structure(), &SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let mut structure = structure();
        structure.site.pages.shift_remove("/");
        let err = SiteRouter::new(structure, &SiteConfig::default()).err();
        assert_eq!(err, Some(RouterError::MissingRoot));
    }

    #[test]
    fn test_unknown_route_renders_like_root() {
        let mut router = router();
        let mut unknown = MemorySurface::new(&[MAIN]);
        let mut root = MemorySurface::new(&[MAIN]);

        let a = router.begin_navigation("#/services/ghost", &mut unknown).unwrap();
        let b = router.begin_navigation("#/", &mut root).unwrap();

        assert_eq!(unknown.compose(MAIN), root.compose(MAIN));
        assert_eq!(unknown.title(), "Home — Studio");
        assert_eq!(a.slots, b.slots);
    }

    #[test]
    fn test_home_hero_is_escaped() {
        let router = router();
        let (route, page) = router.resolve("/").unwrap();
        let (html, slots) = router.render_page(route, page);
        assert!(html.contains("<h1>We &lt;build&gt;</h1>"));
        assert!(html.contains("Things &amp; stuff"));
        assert!(!html.contains("breadcrumbs"));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_home_hero_falls_back_to_site_name() {
        let mut structure = structure();
        structure.site.pages.get_mut("/").unwrap().sections.clear();
        let router = SiteRouter::new(structure, &SiteConfig::default()).unwrap();
        let (route, page) = router.resolve("/").unwrap();
        let (html, _) = router.render_page(route, page);
        assert!(html.contains("<h1>Studio</h1>"));
    }

    #[test]
    fn test_section_lists_submenu_cards() {
        let router = router();
        let (route, page) = router.resolve("/services").unwrap();
        let (html, slots) = router.render_page(route, page);
        assert!(slots.is_empty());
        assert_eq!(html.matches("subsection-card").count(), 2);
        assert!(html.contains(r##"href="#/services/ghost""##));
    }

    #[test]
    fn test_service_page_breadcrumbs() {
        let router = router();
        let (route, page) = router.resolve("/services/video").unwrap();
        let (html, _) = router.render_page(route, page);
        assert!(html.starts_with(r#"<nav class="breadcrumbs">"#));
        assert!(html.contains(r#"<span class="breadcrumb-current">Video</span>"#));
        assert!(html.contains(r#"<section class="service-page">"#));
    }

    #[test]
    fn test_generic_page() {
        let router = router();
        let (route, page) = router.resolve("/about").unwrap();
        let (html, _) = router.render_page(route, page);
        assert!(html.contains(r#"<section class="generic-page"><h1>About</h1></section>"#));
    }

    #[tokio::test]
    async fn test_kb_page_loads_after_skeleton() {
        let fetcher = MemoryFetcher::new().with_file(
            "./data/kb_glossary_lite.jsonl",
            r#"{"slug":"api","title":"API","lite_summary":"<i>x</i>"}"#,
        );
        let loader = ContentLoader::new(fetcher, &SiteConfig::default());
        let mut router = router();
        let mut surface = MemorySurface::new(&[MAIN]);

        let ticket = router.begin_navigation("#/kb", &mut surface).unwrap();
        assert_eq!(surface.title(), "KB — Studio");
        assert!(surface.content(KB_LIST).unwrap().contains("loading"));

        populate(router.state(), &ticket, &mut surface, &loader).await;
        let list = surface.content(KB_LIST).unwrap();
        assert!(list.contains("#/kb/articles/api"));
        assert!(list.contains("&lt;i&gt;x&lt;/i&gt;"));
    }

    #[tokio::test]
    async fn test_stale_results_are_discarded() {
        let fetcher = MemoryFetcher::new()
            .with_file("./data/kb_glossary_lite.jsonl", r#"{"slug":"a","title":"A"}"#)
            .with_file("./data/stories_digests.jsonl", r#"{"slug":"s","title":"S"}"#);
        let loader = ContentLoader::new(fetcher, &SiteConfig::default());
        let mut router = router();
        let mut surface = MemorySurface::new(&[MAIN]);

        let kb = router.begin_navigation("#/kb", &mut surface).unwrap();
        let stories = router.begin_navigation("#/stories", &mut surface).unwrap();

        assert_eq!(populate(router.state(), &kb, &mut surface, &loader).await, 0);
        assert!(!surface.has_container(KB_LIST));
        assert_eq!(
            surface.content(STORIES_LIST),
            Some(r#"<p class="loading">Loading...</p>"#)
        );

        assert_eq!(populate(router.state(), &stories, &mut surface, &loader).await, 1);
        assert!(surface.content(STORIES_LIST).unwrap().contains("story-item"));
    }

    #[tokio::test]
    async fn test_home_previews() {
        let loader = ContentLoader::new(MemoryFetcher::new(), &SiteConfig::default());
        let mut router = router();
        let mut surface = MemorySurface::new(&[MAIN]);

        let ticket = router.begin_navigation("", &mut surface).unwrap();
        assert_eq!(populate(router.state(), &ticket, &mut surface, &loader).await, 2);
        assert_eq!(
            surface.content(SERVICES_GRID).unwrap().matches("service-card").count(),
            4
        );
        assert!(surface.content(PORTFOLIO_GRID).unwrap().contains("#/portfolio"));
        assert_eq!(loader.fetcher().requests(), 0);
    }
}
