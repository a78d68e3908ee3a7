//! Loader for ASCII OBJ geometry that produces renderer-ready vertex buffers.
//!
//! [`ObjParser::parse`] turns OBJ text into [`GeometryGroup`]s holding flat,
//! triangle-list attribute arrays. [`extents`] and [`SceneFraming`] then
//! describe where the parsed scene sits, so a camera can be placed to view it.

mod core;
mod geometries;
mod loaders;

pub use core::*;
pub use geometries::*;
pub use loaders::*;
