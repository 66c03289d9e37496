mod classifier;
mod types;

pub use classifier::*;
pub use types::*;
