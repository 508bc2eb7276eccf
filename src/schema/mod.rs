pub mod edit;
pub mod result;
pub mod workflow;

pub use edit::*;
pub use result::*;
pub use workflow::*;
