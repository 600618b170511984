//! The components module contains all shared components for our app.

mod app;
mod audio_manager;
mod icons;
mod player;
mod topic_selector;

pub use app::*;
pub use audio_manager::*;
pub use icons::*;
pub use player::*;
pub use topic_selector::*;
