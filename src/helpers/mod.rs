//! Helper functions for rendering
//!
//! Date formatting, HTML escaping and URL building shared by the
//! template context builders.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
