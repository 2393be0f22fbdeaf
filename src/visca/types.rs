//! VISCA frame constants and zoom range limits.

pub(crate) const FRAME_TERMINATOR: u8 = 0xFF;

// Command prefixes (header + category + command)
pub(crate) const CMD_ZOOM_DIRECT: [u8; 4] = [0x81, 0x01, 0x04, 0x47];
pub(crate) const CMD_ICR: [u8; 4] = [0x81, 0x01, 0x04, 0x01];
pub(crate) const CMD_IR_CORRECTION: [u8; 4] = [0x81, 0x01, 0x04, 0x11];

// Toggle arguments
pub(crate) const ICR_ON: u8 = 0x02;
pub(crate) const ICR_OFF: u8 = 0x03;
pub(crate) const IR_CORRECTION_ON: u8 = 0x01;
pub(crate) const IR_CORRECTION_OFF: u8 = 0x00;

/// Length of a zoom-direct frame: prefix(4) + level(4) + terminator(1).
pub const ZOOM_FRAME_LEN: usize = 9;
/// Length of an ICR / IR correction frame.
pub const TOGGLE_FRAME_LEN: usize = 6;

/// Acknowledgment and completion codes for sockets 1 and 2, as uppercase hex.
pub(crate) const RESPONSE_CODES: [&str; 4] = ["9041FF", "9051FF", "9042FF", "9052FF"];

// Zoom scale
pub const MIN_ZOOM_LEVEL: u16 = 0;
pub const MAX_ZOOM_LEVEL: u16 = 0x4000;
pub const MIN_ZOOM_MULTIPLIER: f64 = 1.0;
pub const MAX_ZOOM_MULTIPLIER: f64 = 30.0;
pub const DEFAULT_ZOOM_STEP: u16 = 512;
