//! ASCII OBJ loading.

mod attribute_pools;
mod directive;
mod obj_parser;

pub use obj_parser::*;
