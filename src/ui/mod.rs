pub mod app;
pub mod display;

pub use app::*;
pub use display::*;
