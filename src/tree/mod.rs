pub mod host;
pub mod memory;
pub mod selector;
pub mod types;

pub use host::*;
pub use memory::*;
pub use selector::*;
pub use types::*;
