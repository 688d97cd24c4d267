pub mod banner;
pub mod format;
pub mod template;

pub use banner::*;
pub use format::*;
pub use template::*;
