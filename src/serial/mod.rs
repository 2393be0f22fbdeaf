//! Serial transport for the camera control port.
//!
//! Blocking I/O only; wrap calls in `spawn_blocking` for async usage.

mod discovery;
mod io;
mod transport;

#[cfg(test)]
pub(crate) mod mock;

// Re-export public API
pub use discovery::{DEFAULT_BAUD_RATE, DEFAULT_PORTS, available_ports, open_first};
pub use io::{SerialConnector, SerialTransport};
pub use transport::{Connector, Transport};
