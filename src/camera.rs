//! Camera command dispatcher.

use std::fmt;
use std::io;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::{AppError, Result};
use crate::serial::{Connector, Transport, open_first};
use crate::visca::{self, DEFAULT_ZOOM_STEP, Frame, Toggle, ZoomDirection};

/// What to do after a frame has been written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Write only; the HTTP service never reads replies.
    Ignore,
    /// Collect and clean the reply, waiting at most `max_wait`.
    Drain { max_wait: Duration, idle_gap: Duration },
}

/// Connection and behaviour settings for a [`Camera`].
#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Device paths probed in order.
    pub ports: Vec<String>,
    pub baud_rate: u32,
    pub response: ResponseMode,
    /// Level delta for stepped zoom.
    pub zoom_step: u16,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            ports: crate::serial::DEFAULT_PORTS.iter().map(|p| p.to_string()).collect(),
            baud_rate: crate::serial::DEFAULT_BAUD_RATE,
            response: ResponseMode::Ignore,
            zoom_step: DEFAULT_ZOOM_STEP,
        }
    }
}

/// Status line plus cleaned reply, as shown to a console user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub status: String,
    pub response: Option<String>,
}

impl CommandOutcome {
    /// Collapse a command result into a status line. Errors never escape.
    pub fn from_result(result: Result<Option<String>>) -> Self {
        match result {
            Ok(response) => Self {
                status: "Command sent successfully".to_string(),
                response,
            },
            Err(AppError::TransportUnavailable) => Self {
                status: AppError::TransportUnavailable.to_string(),
                response: None,
            },
            Err(e) => Self {
                status: format!("Error sending command: {e}"),
                response: None,
            },
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status: {}", self.status)?;
        if let Some(response) = self.response.as_deref().filter(|r| !r.is_empty()) {
            write!(f, "\nResponse: {response}")?;
        }
        Ok(())
    }
}

/// Owns the serial connection and the last zoom level sent.
///
/// The connection is opened lazily on the first command and dropped after a
/// write failure so the next command probes the ports again.
pub struct Camera {
    connector: Box<dyn Connector>,
    settings: CameraSettings,
    transport: Option<Box<dyn Transport>>,
    zoom_level: u16,
}

impl Camera {
    /// Create a dispatcher. No port is opened yet.
    pub fn new(connector: Box<dyn Connector>, settings: CameraSettings) -> Self {
        Self {
            connector,
            settings,
            transport: None,
            zoom_level: 0,
        }
    }

    /// Open the first available port and send the initialization frame.
    ///
    /// Does nothing when already connected.
    pub fn connect(&mut self) -> Result<()> {
        if self.transport.is_some() {
            return Ok(());
        }

        let mut remaining = self.settings.ports.clone();
        while !remaining.is_empty() {
            let mut transport = open_first(self.connector.as_ref(), &remaining, self.settings.baud_rate)?;
            let opened = transport.name().to_string();

            match Self::initialize(&mut *transport, self.settings.response) {
                Ok(()) => {
                    self.transport = Some(transport);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Failed to initialize port {opened}: {e}");
                    // candidates up to and including `opened` are spent
                    let pos = remaining.iter().position(|p| *p == opened).unwrap_or(0);
                    remaining.drain(..=pos);
                }
            }
        }

        error!("Failed to open any serial port");
        Err(AppError::TransportUnavailable)
    }

    /// Send the initialization frame and, in drain mode, consume its reply.
    fn initialize(transport: &mut dyn Transport, response: ResponseMode) -> io::Result<()> {
        let init = Frame::init();
        transport.write_frame(init.as_bytes())?;
        debug!("Sent init command: {init}");

        if let ResponseMode::Drain { max_wait, idle_gap } = response {
            let reply = transport.read_response(max_wait, idle_gap)?;
            debug!("Init reply: {}", visca::clean_bytes(&reply));
        }
        Ok(())
    }

    /// Close the connection if open.
    pub fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            debug!("Camera disconnected");
        }
    }

    /// Check if a serial connection is open.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Last zoom level successfully written.
    pub fn zoom_level(&self) -> u16 {
        self.zoom_level
    }

    /// Send user-supplied hex text as a frame.
    pub fn send_hex(&mut self, text: &str) -> Result<Option<String>> {
        self.connect()?;
        let frame = Frame::raw(text)?;
        self.send(&frame)
    }

    /// Zoom to an absolute device level.
    pub fn zoom_to_level(&mut self, level: u16) -> Result<Option<String>> {
        let response = self.send(&Frame::zoom(level))?;
        self.zoom_level = level;
        Ok(response)
    }

    /// Zoom to a multiplier. Returns the level that was sent.
    pub fn zoom_to_multiplier(&mut self, multiplier: f64) -> Result<(u16, Option<String>)> {
        let level = visca::multiplier_to_level(multiplier);
        let response = self.zoom_to_level(level)?;
        Ok((level, response))
    }

    /// Zoom one configured step in or out from the current level.
    pub fn zoom_step(&mut self, direction: ZoomDirection) -> Result<(u16, Option<String>)> {
        let level = visca::step_level(self.zoom_level, direction, self.settings.zoom_step);
        let response = self.zoom_to_level(level)?;
        Ok((level, response))
    }

    /// Switch ICR or IR correction on or off.
    pub fn set_toggle(&mut self, kind: Toggle, enable: bool) -> Result<Option<String>> {
        self.send(&Frame::toggle(kind, enable))
    }

    /// Write a frame and, in drain mode, return the cleaned reply.
    pub fn send(&mut self, frame: &Frame) -> Result<Option<String>> {
        self.connect()?;
        let response_mode = self.settings.response;

        let transport = self.transport.as_mut().ok_or(AppError::TransportUnavailable)?;

        info!("Sending command: {frame}");
        if let Err(e) = transport.write_frame(frame.as_bytes()) {
            error!("Error sending command {frame}: {e}");
            self.transport = None;
            return Err(AppError::write_failure(e.to_string()));
        }

        match response_mode {
            ResponseMode::Ignore => Ok(None),
            ResponseMode::Drain { max_wait, idle_gap } => {
                let reply = transport
                    .read_response(max_wait, idle_gap)
                    .map_err(|e| AppError::unexpected(e.to_string()))?;
                Ok(Some(visca::clean_bytes(&reply)))
            }
        }
    }
}
