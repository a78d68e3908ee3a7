//! Scene-wide measurements of parsed geometry.

mod extents;
mod framing;

pub use extents::*;
pub use framing::*;
