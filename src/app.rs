//! Page session: location, router, menus and content loader wired together
//!
//! The location fragment is the only navigation signal. Every change runs
//! the router (skeleton first, then content) and re-renders the menus
//! against the same current route.

use crate::config::SiteConfig;
use crate::content::{ContentLoader, Fetcher};
use crate::error::RouterError;
use crate::model::{RouteTable, SiteStructure};
use crate::navigation::{Menus, Navigation, SiteNavigation};
use crate::router::{populate, PageRouter, Router, SiteRouter};
use crate::surface::Surface;

/// Holder of the location hash
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    hash: String,
}

impl Location {
    pub fn new(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
        }
    }

    /// Current hash, `#` included when non-empty
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Set the fragment; an empty path clears the hash
    pub fn navigate(&mut self, path: &str) {
        let path = path.strip_prefix('#').unwrap_or(path);
        self.hash = if path.is_empty() {
            String::new()
        } else {
            format!("#{}", path)
        };
    }
}

/// A single page session
pub struct App<R, N, F> {
    router: R,
    menus: N,
    loader: ContentLoader<F>,
    location: Location,
}

/// Session driven by the site structure tree
pub type SiteApp<F> = App<SiteRouter, SiteNavigation, F>;

/// Session driven by the flat route table
pub type RouteApp<F> = App<Router, Navigation, F>;

impl<F: Fetcher> SiteApp<F> {
    pub fn for_structure(
        structure: SiteStructure,
        config: &SiteConfig,
        fetcher: F,
    ) -> Result<Self, RouterError> {
        let menus = SiteNavigation::new(structure.clone(), &config.labels);
        let router = SiteRouter::new(structure, config)?;
        Ok(App::new(router, menus, ContentLoader::new(fetcher, config)))
    }
}

impl<F: Fetcher> RouteApp<F> {
    pub fn for_routes(
        table: RouteTable,
        config: &SiteConfig,
        fetcher: F,
    ) -> Result<Self, RouterError> {
        let router = Router::new(table, config)?;
        let menus = router.navigation().clone();
        Ok(App::new(router, menus, ContentLoader::new(fetcher, config)))
    }
}

impl<R, N, F> App<R, N, F>
where
    R: PageRouter,
    N: Menus,
    F: Fetcher,
{
    pub fn new(router: R, menus: N, loader: ContentLoader<F>) -> Self {
        Self {
            router,
            menus,
            loader,
            location: Location::default(),
        }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn loader(&self) -> &ContentLoader<F> {
        &self.loader
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn current_route(&self) -> &str {
        self.router.current_route()
    }

    /// Handle the current location: skeleton, menus, then content
    pub async fn on_fragment_change<S: Surface>(&mut self, surface: &mut S) -> Result<(), RouterError> {
        let ticket = self.router.begin_navigation(self.location.hash(), surface)?;
        self.menus.render_menus(surface, self.router.current_route());

        let written = populate(self.router.state(), &ticket, surface, &self.loader).await;
        tracing::debug!(
            "Rendered {} ({} of {} slots filled)",
            ticket.route,
            written,
            ticket.slots.len()
        );
        Ok(())
    }

    /// Set the fragment and handle it
    pub async fn navigate<S: Surface>(&mut self, path: &str, surface: &mut S) -> Result<(), RouterError> {
        self.location.navigate(path);
        self.on_fragment_change(surface).await
    }

    /// Follow a link the way an intercepted click would; returns whether
    /// the location changed
    pub async fn click<S: Surface>(&mut self, href: &str, surface: &mut S) -> Result<bool, RouterError> {
        match self.menus.click_target(href) {
            Some(fragment) => {
                self.navigate(&fragment, surface).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
