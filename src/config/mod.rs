//! Configuration module

mod site;

pub use site::DataPaths;
pub use site::Labels;
pub use site::NavConfig;
pub use site::SiteConfig;
