//! Markup helpers shared by the routers, navigation and content loader

mod date;
mod html;

pub use date::*;
pub use html::*;
