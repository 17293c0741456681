//! UI surface adapter
//!
//! Routers, navigation and the content loader build markup as plain strings
//! and hand it to a [`Surface`], which owns the named containers and the
//! document title. Writing to a container that does not exist is a no-op.

mod memory;

pub use memory::MemorySurface;

/// Container that holds the page content
pub const MAIN: &str = "main";

/// A place markup can be written to
pub trait Surface {
    /// Set the document title
    fn set_title(&mut self, title: &str);

    /// Whether a container with this id is currently present
    fn has_container(&self, id: &str) -> bool;

    /// Replace a container's markup; returns `false` if it does not exist
    fn replace(&mut self, id: &str, html: String) -> bool;
}
