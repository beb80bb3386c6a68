pub mod entities;
pub mod store;

pub use entities::*;
pub use store::*;
