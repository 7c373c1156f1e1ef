pub mod error;
pub mod renderer;

pub use error::*;
pub use renderer::*;
