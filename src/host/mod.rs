//! Host abstraction layer
//!
//! Everything the simulation needs from its environment:
//! - Frame scheduling (`FrameScheduler`, driven by `FrameLoop`)
//! - Asset gate (no simulation until sprites are loaded)
//! - Input events (DOM key codes to `KeyEvent`s)

pub mod frame_loop;
pub mod input;

pub use frame_loop::{FrameLoop, FrameScheduler};
pub use input::{key_event, key_from_code};
