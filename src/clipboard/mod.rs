pub mod backend;
pub mod copy;

pub use backend::*;
pub use copy::*;
