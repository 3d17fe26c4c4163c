pub mod evaluation;
pub mod format;
pub mod prediction;

pub use evaluation::*;
pub use format::*;
pub use prediction::*;
