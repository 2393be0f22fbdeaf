//! Transport seams between the dispatcher and the serial line.

use std::io;
use std::time::Duration;

use crate::error::Result;

/// An open connection to the camera.
pub trait Transport: Send {
    /// Device path this transport was opened on.
    fn name(&self) -> &str;

    /// Write a complete frame.
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Collect whatever the device sends back within `max_wait`.
    ///
    /// Returns early once bytes have arrived and the line has been quiet for `idle_gap`.
    fn read_response(&mut self, max_wait: Duration, idle_gap: Duration) -> io::Result<Vec<u8>>;
}

/// Opens transports by device path.
pub trait Connector: Send {
    fn open(&self, path: &str, baud_rate: u32) -> Result<Box<dyn Transport>>;
}
