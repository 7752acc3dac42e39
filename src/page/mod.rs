pub mod banner;
pub mod bindings;

pub use banner::*;
pub use bindings::*;
