//! CLI command implementations.
//!
//! - `crop` - crop a document's paths to the canvas boundary
//! - `inspect` - dry-run report of what cropping would do

pub mod common;
pub mod crop;
pub mod inspect;

pub use crop::cmd_crop;
pub use inspect::cmd_inspect;
