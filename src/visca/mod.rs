//! VISCA command codec.
//!
//! Builds the fixed-format command frames understood by the camera and
//! strips acknowledgment/completion codes from what it sends back.

mod frame;
mod response;
mod types;
mod zoom;


// Re-export public API
pub use frame::{Frame, Toggle};
pub use response::{clean, clean_bytes};
pub use types::{
    DEFAULT_ZOOM_STEP, MAX_ZOOM_LEVEL, MAX_ZOOM_MULTIPLIER, MIN_ZOOM_LEVEL, MIN_ZOOM_MULTIPLIER, TOGGLE_FRAME_LEN,
    ZOOM_FRAME_LEN,
};
pub use zoom::{ZoomDirection, level_to_multiplier, multiplier_to_level, step_level};
