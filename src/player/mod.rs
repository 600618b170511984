//! Host-independent player core. Nothing in here touches the DOM; the
//! browser adapter lives in `components::audio_manager`.

mod controller;
mod dropdown;
mod format;
mod media;
mod source;
mod track;

pub use controller::*;
pub use dropdown::Dropdown;
pub use format::*;
pub use media::*;
pub use source::*;
pub use track::*;

#[cfg(test)]
mod tests;
