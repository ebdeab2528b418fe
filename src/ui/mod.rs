// ui/mod.rs

pub mod constants;
mod draw;
pub mod game;
pub mod overlay;
pub mod spinner;
pub mod textarea;
pub mod utils;

pub use constants::{MIN_HEIGHT, MIN_WIDTH};
pub use draw::draw;
pub use textarea::new_textarea;
pub use utils::center_rect;
