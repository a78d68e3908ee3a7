mod geometry_group;
mod vertex_layout;

pub use geometry_group::*;
