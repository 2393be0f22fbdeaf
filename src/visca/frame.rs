//! Command frame building.

use std::fmt;

use tracing::warn;

use super::types::{
    CMD_ICR, CMD_IR_CORRECTION, CMD_ZOOM_DIRECT, FRAME_TERMINATOR, ICR_OFF, ICR_ON, IR_CORRECTION_OFF,
    IR_CORRECTION_ON, MAX_ZOOM_LEVEL, TOGGLE_FRAME_LEN, ZOOM_FRAME_LEN,
};
use crate::error::Result;

/// On/off camera features addressed by a single-argument frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Infrared cut-off filter removal (night mode).
    Icr,
    /// Infrared focus correction.
    IrCorrection,
}

impl Toggle {
    /// Human readable label used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            Toggle::Icr => "ICR Mode",
            Toggle::IrCorrection => "IR Correction",
        }
    }
}

/// A complete command frame, stored as wire bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(Vec<u8>);

impl Frame {
    /// Zoom-direct frame: `81 01 04 47 0p 0q 0r 0s FF`.
    ///
    /// The codec does not enforce the device range. Levels above
    /// [`MAX_ZOOM_LEVEL`] are still encoded and only logged.
    pub fn zoom(level: u16) -> Self {
        if level > MAX_ZOOM_LEVEL {
            warn!("Zoom level {level} exceeds device maximum {MAX_ZOOM_LEVEL}");
        }

        let mut bytes = Vec::with_capacity(ZOOM_FRAME_LEN);
        bytes.extend_from_slice(&CMD_ZOOM_DIRECT);
        bytes.extend_from_slice(&encode_level(level));
        bytes.push(FRAME_TERMINATOR);
        Self(bytes)
    }

    /// Fixed ICR / IR correction on-off frame.
    pub fn toggle(kind: Toggle, enable: bool) -> Self {
        let (prefix, arg) = match (kind, enable) {
            (Toggle::Icr, true) => (CMD_ICR, ICR_ON),
            (Toggle::Icr, false) => (CMD_ICR, ICR_OFF),
            (Toggle::IrCorrection, true) => (CMD_IR_CORRECTION, IR_CORRECTION_ON),
            (Toggle::IrCorrection, false) => (CMD_IR_CORRECTION, IR_CORRECTION_OFF),
        };

        let mut bytes = Vec::with_capacity(TOGGLE_FRAME_LEN);
        bytes.extend_from_slice(&prefix);
        bytes.push(arg);
        bytes.push(FRAME_TERMINATOR);
        Self(bytes)
    }

    /// Frame from user-supplied hex text. Embedded spaces are ignored.
    ///
    /// # Errors
    /// Returns `AppError::MalformedHex` on odd length or non-hex characters.
    pub fn raw(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|&c| c != ' ').collect();
        Ok(Self(hex::decode(compact)?))
    }

    /// Frame sent right after the port is opened (zoom to wide end).
    pub fn init() -> Self {
        Self::zoom(0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Uppercase hex rendering without separators.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Spread the hex digits of `level` over four bytes, one digit per low nibble.
///
/// Matches the text form `'0' + digit` per digit, left-padded to 8 characters.
pub(crate) fn encode_level(level: u16) -> [u8; 4] {
    [
        ((level >> 12) & 0x0F) as u8,
        ((level >> 8) & 0x0F) as u8,
        ((level >> 4) & 0x0F) as u8,
        (level & 0x0F) as u8,
    ]
}
