//! Content model and the pure transformation layer: raw pipeline JSON in,
//! display-ready records out.

pub mod error;
pub mod image;
pub mod providers;
mod raw;
pub mod structured;
pub mod timeline;
pub mod trailer;
pub mod transform;
pub mod types;

pub use error::ContentError;
pub use types::{ContentKind, NormalizedRecord, RawId, SeasonDetails, StreamingProvider};
