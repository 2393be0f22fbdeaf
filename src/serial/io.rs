//! Serial port transport with bounded response reads.

use std::io::{self, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use serialport::{ClearBuffer, SerialPort};
use tracing::{debug, error, info};

use super::transport::{Connector, Transport};
use crate::error::Result;

/// Sleep between polls while waiting for response bytes.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Source of bytes that can report how many are pending without blocking.
pub(crate) trait PendingRead {
    fn pending(&mut self) -> io::Result<usize>;
    fn read_pending(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl PendingRead for Box<dyn SerialPort> {
    fn pending(&mut self) -> io::Result<usize> {
        Ok(self.bytes_to_read()? as usize)
    }

    fn read_pending(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }
}

/// Poll `source` until `max_wait` elapses or the line goes idle after data.
pub(crate) fn read_bounded<S: PendingRead>(source: &mut S, max_wait: Duration, idle_gap: Duration) -> io::Result<Vec<u8>> {
    let start = Instant::now();
    let mut response = Vec::new();
    let mut last_rx: Option<Instant> = None;

    loop {
        let elapsed = start.elapsed();
        if elapsed >= max_wait {
            break;
        }
        if last_rx.is_some_and(|t| t.elapsed() >= idle_gap) {
            break;
        }

        let pending = source.pending()?;
        if pending == 0 {
            thread::sleep(POLL_INTERVAL.min(max_wait - elapsed));
            continue;
        }

        let mut chunk = vec![0u8; pending];
        let n = source.read_pending(&mut chunk)?;
        response.extend_from_slice(&chunk[..n]);
        last_rx = Some(Instant::now());
    }

    debug!("RX ({} bytes) after {:?}", response.len(), start.elapsed());
    Ok(response)
}

/// Camera connection over a local serial device.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        debug!("TX ({} bytes): {:02X?}", bytes.len(), bytes);
        self.port.write_all(bytes).map_err(|e| {
            error!("Write to {} failed: {e}", self.name);
            e
        })?;
        self.port.flush()
    }

    fn read_response(&mut self, max_wait: Duration, idle_gap: Duration) -> io::Result<Vec<u8>> {
        read_bounded(&mut self.port, max_wait, idle_gap)
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        info!("Serial port closed: {}", self.name);
    }
}

/// Opens [`SerialTransport`]s with a fixed read timeout.
pub struct SerialConnector {
    timeout: Duration,
}

impl SerialConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Connector for SerialConnector {
    fn open(&self, path: &str, baud_rate: u32) -> Result<Box<dyn Transport>> {
        let port = serialport::new(path, baud_rate).timeout(self.timeout).open()?;
        port.clear(ClearBuffer::Input)?;
        Ok(Box::new(SerialTransport {
            port,
            name: path.to_string(),
        }))
    }
}
