//! Hash-fragment routers
//!
//! A navigation happens in two steps. [`PageRouter::begin_navigation`]
//! resolves the fragment, sets the title and writes the page skeleton,
//! including loading placeholders, synchronously. It returns a [`Ticket`]
//! listing the containers that still need data. [`populate`] then awaits the
//! content loader for each of them and writes the result only while the
//! ticket is still the latest navigation.

pub mod routes;
pub mod site;

pub use routes::Router;
pub use site::SiteRouter;

use crate::content::{ContentLoader, Fetcher};
use crate::error::RouterError;
use crate::model::ROOT;
use crate::surface::Surface;

/// Turn a location hash into a route path
///
/// # Examples
/// ```
/// use hashsite::router::normalize_fragment;
/// assert_eq!(normalize_fragment(""), "/");
/// assert_eq!(normalize_fragment("#"), "/");
/// assert_eq!(normalize_fragment("#/kb"), "/kb");
/// assert_eq!(normalize_fragment("kb"), "/kb");
/// ```
pub fn normalize_fragment(hash: &str) -> String {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);
    if fragment.is_empty() {
        ROOT.to_string()
    } else if fragment.starts_with('/') {
        fragment.to_string()
    } else {
        format!("/{}", fragment)
    }
}

/// What a placeholder container should be filled with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Glossary { limit: usize },
    Stories { limit: usize },
    Services,
    Portfolio,
}

impl SlotKind {
    /// Whether the slot waits on a fetch and shows a loading placeholder
    pub fn needs_fetch(&self) -> bool {
        matches!(self, SlotKind::Glossary { .. } | SlotKind::Stories { .. })
    }
}

/// A container declared by a page skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub container: String,
    pub kind: SlotKind,
}

impl Slot {
    pub fn new(container: &str, kind: SlotKind) -> Self {
        Self {
            container: container.to_string(),
            kind,
        }
    }
}

/// Outcome of the synchronous half of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub route: String,
    pub slots: Vec<Slot>,
}

/// The current route and a counter bumped by every navigation
#[derive(Debug, Clone)]
pub struct RouteState {
    current: String,
    generation: u64,
}

impl Default for RouteState {
    fn default() -> Self {
        Self {
            current: ROOT.to_string(),
            generation: 0,
        }
    }
}

impl RouteState {
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record a navigation and return its generation
    pub(crate) fn advance(&mut self, route: String) -> u64 {
        self.current = route;
        self.generation += 1;
        self.generation
    }

    /// Whether no navigation has happened since `ticket` was issued
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        ticket.generation == self.generation
    }
}

/// Shared interface of the route-table and site-structure routers
pub trait PageRouter {
    fn state(&self) -> &RouteState;

    fn current_route(&self) -> &str {
        self.state().current()
    }

    /// Handle a fragment change: resolve, set the title, write the skeleton
    fn begin_navigation<S: Surface>(
        &mut self,
        fragment: &str,
        surface: &mut S,
    ) -> Result<Ticket, RouterError>;
}

/// Fill the slots of `ticket`, discarding results that arrive after a newer
/// navigation. Returns the number of containers written.
pub async fn populate<S, F>(
    state: &RouteState,
    ticket: &Ticket,
    surface: &mut S,
    loader: &ContentLoader<F>,
) -> usize
where
    S: Surface,
    F: Fetcher,
{
    let mut written = 0;

    for slot in &ticket.slots {
        let html = match slot.kind {
            SlotKind::Glossary { limit } => loader.glossary_fragment(limit).await,
            SlotKind::Stories { limit } => loader.stories_fragment(limit).await,
            SlotKind::Services => loader.services_fragment(),
            SlotKind::Portfolio => loader.portfolio_fragment(),
        };

        if !state.is_current(ticket) {
            tracing::debug!(
                "Discarding content for {} from stale navigation to {}",
                slot.container,
                ticket.route
            );
            return written;
        }

        if surface.replace(&slot.container, html) {
            written += 1;
        }
    }

    written
}

/// Write loading placeholders into the slots that wait on a fetch
pub(crate) fn show_loading<S: Surface>(surface: &mut S, slots: &[Slot], loading: &str) {
    for slot in slots.iter().filter(|s| s.kind.needs_fetch()) {
        surface.replace(&slot.container, loading.to_string());
    }
}
