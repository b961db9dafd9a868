pub mod env;
pub mod error;
pub mod interpreter;
pub mod stdlib;
pub mod values;

pub use env::{Environment, SharedInput, SharedOutput};
pub use error::RuntimeError;
pub use values::{MapKey, RuntimeValue};
