mod storage;
mod types;

pub use storage::*;
pub use types::*;
