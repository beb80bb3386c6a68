pub mod category;
pub mod errors;
pub mod price_range;
pub mod restaurant;

pub use category::*;
pub use errors::*;
pub use price_range::*;
pub use restaurant::*;
