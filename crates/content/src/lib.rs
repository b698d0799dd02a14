//! Content fetching, the aggregate load and its lifecycle.

pub mod aggregate;
pub mod source;
pub mod view;

pub use aggregate::{ContentFeed, load_all_content};
pub use source::{ContentSource, HttpContentSource, StaticContentSource};
pub use view::{ContentView, LoadState};
