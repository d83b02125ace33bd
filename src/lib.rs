pub use rowmap_core::*;
pub use rowmap_macros::*;
