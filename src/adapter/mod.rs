//! Container adapters.
//!
//! The ZIP format itself is handled by the `zip` crate. Adapters turn a
//! container into format-neutral entries and back into container bytes.

mod zip_adapter;
mod zip_sink;

pub use zip_adapter::ZipAdapter;
pub use zip_sink::{ZipSink, DEFLATE_LEVEL};
