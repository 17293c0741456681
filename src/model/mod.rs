//! Static site data: route table, site structure tree, content records

mod records;
mod routes;
mod structure;

pub use records::{GlossaryTerm, StoryDigest};
pub use routes::{OgMeta, Route, RouteTable};
pub use structure::{
    MenuItem, PageSection, PageType, SiteInfo, SitePage, SiteStructure, StructureIssue,
};

/// Path of the root page, the fallback for every unknown route
pub const ROOT: &str = "/";
