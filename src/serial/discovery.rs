//! Serial device discovery.

use tracing::{error, info, warn};

use super::transport::{Connector, Transport};
use crate::error::{AppError, Result};

/// Device paths probed when no explicit port is configured.
pub const DEFAULT_PORTS: [&str; 3] = ["/dev/ttyUSB0", "/dev/ttyACM0", "/dev/ttyS0"];

/// Default line speed of the camera's control port.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Open the first candidate path that succeeds.
///
/// # Errors
/// Returns `AppError::TransportUnavailable` when every candidate fails.
pub fn open_first(connector: &dyn Connector, candidates: &[String], baud_rate: u32) -> Result<Box<dyn Transport>> {
    for path in candidates {
        match connector.open(path, baud_rate) {
            Ok(transport) => {
                info!("Serial port opened: {path}");
                return Ok(transport);
            }
            Err(e) => warn!("Failed to open port {path}: {e}"),
        }
    }

    error!("Failed to open any serial port");
    Err(AppError::TransportUnavailable)
}

/// Names of serial ports present on this machine.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
