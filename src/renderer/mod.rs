pub mod components;
pub mod config;
pub mod renderer;
pub mod state;
pub mod template;
pub mod traits;

pub use components::*;
pub use config::*;
pub use renderer::*;
pub use state::*;
pub use template::*;
pub use traits::*;
