pub mod app;
pub mod input;
pub mod layout;
pub mod render;
pub mod state;
pub mod terminal;

pub use app::Picker;
pub use input::Input;
pub use state::{Close, Focus, Phase, Session};
