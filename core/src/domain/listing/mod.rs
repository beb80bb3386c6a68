pub mod pipeline;
pub mod value_objects;

pub use pipeline::*;
pub use value_objects::*;
