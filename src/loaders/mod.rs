mod obj;

pub use obj::*;
