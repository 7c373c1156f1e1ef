pub mod play;
pub mod provisioner;
pub mod value;

pub use play::*;
pub use provisioner::*;
pub use value::*;
