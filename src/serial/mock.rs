//! In-memory transport for tests.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::transport::{Connector, Transport};
use crate::error::{AppError, Result};

#[derive(Default)]
struct LineState {
    /// Paths that open; `None` means every path opens.
    paths: Option<Vec<String>>,
    attempts: Vec<String>,
    written: Vec<Vec<u8>>,
    reply: Vec<u8>,
    reads: usize,
    fail_writes: bool,
    fail_reads: bool,
}

/// Shared handle onto a fake serial line. Clones observe the same state.
#[derive(Clone, Default)]
pub(crate) struct MockLine {
    state: Arc<Mutex<LineState>>,
}

impl MockLine {
    /// Every path opens.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Only the listed paths open.
    pub(crate) fn with_paths(paths: &[&str]) -> Self {
        let line = Self::new();
        line.state.lock().unwrap().paths = Some(paths.iter().map(|p| p.to_string()).collect());
        line
    }

    /// No path opens.
    pub(crate) fn unplugged() -> Self {
        Self::with_paths(&[])
    }

    /// Bytes returned by every response read.
    pub(crate) fn reply_with(&self, bytes: &[u8]) {
        self.state.lock().unwrap().reply = bytes.to_vec();
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    pub(crate) fn plug_in(&self) {
        self.state.lock().unwrap().paths = None;
    }

    pub(crate) fn attempts(&self) -> Vec<String> {
        self.state.lock().unwrap().attempts.clone()
    }

    /// Written frames as uppercase hex.
    pub(crate) fn written(&self) -> Vec<String> {
        self.state.lock().unwrap().written.iter().map(hex::encode_upper).collect()
    }

    pub(crate) fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }
}

impl Connector for MockLine {
    fn open(&self, path: &str, _baud_rate: u32) -> Result<Box<dyn Transport>> {
        let mut state = self.state.lock().unwrap();
        state.attempts.push(path.to_string());
        if let Some(paths) = &state.paths {
            if !paths.iter().any(|p| p == path) {
                return Err(AppError::Io(io::Error::new(io::ErrorKind::NotFound, "no such device")));
            }
        }
        Ok(Box::new(MockTransport {
            line: self.clone(),
            name: path.to_string(),
        }))
    }
}

struct MockTransport {
    line: MockLine,
    name: String,
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.line.state.lock().unwrap();
        if state.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        state.written.push(bytes.to_vec());
        Ok(())
    }

    fn read_response(&mut self, _max_wait: Duration, _idle_gap: Duration) -> io::Result<Vec<u8>> {
        let mut state = self.line.state.lock().unwrap();
        state.reads += 1;
        if state.fail_reads {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out"));
        }
        Ok(state.reply.clone())
    }
}
