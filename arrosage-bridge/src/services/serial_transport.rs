use std::io::{self, Read, Write};

use serialport::{available_ports, SerialPort};

use crate::configs::Embedded;
use crate::errors::TransportError;

/// Partial lines longer than this are dropped as line noise.
const MAX_PENDING_BYTES: usize = 1024;

/// Byte stream to the rig.
pub trait SerialLink: Read + Write + Send {
    /// Bytes already received and waiting to be read.
    fn bytes_available(&self) -> io::Result<usize>;
}

impl SerialLink for Box<dyn SerialPort> {
    fn bytes_available(&self) -> io::Result<usize> {
        Ok(self.bytes_to_read()? as usize)
    }
}

/// Line-oriented access to the serial link, or the reason it could not be opened.
pub enum SerialTransport {
    Connected {
        link: Box<dyn SerialLink>,
        pending: Vec<u8>,
        /// Set after an oversized line was dropped, until its terminator arrives.
        discarding: bool,
    },
    Unavailable {
        reason: String,
    },
}

impl SerialTransport {
    /// Never fails: an unopenable port yields a degraded transport.
    pub fn open(embedded: &Embedded) -> Self {
        match Self::open_port(embedded) {
            Ok((port_path, port)) => {
                tracing::info!("connected to {} at {} baud", port_path, embedded.baud_rate);
                Self::connected(Box::new(port))
            }
            Err(e) => {
                tracing::error!("serial port unavailable, running without the rig: {}", e);
                Self::unavailable(e.to_string())
            }
        }
    }

    fn open_port(embedded: &Embedded) -> Result<(String, Box<dyn SerialPort>), serialport::Error> {
        let port_path = match &embedded.port_path {
            Some(port_path) => port_path.clone(),
            None => available_ports()?
                .first()
                .map(|port| port.port_name.clone())
                .ok_or_else(|| {
                    serialport::Error::new(serialport::ErrorKind::NoDevice, "no serial port found")
                })?,
        };

        tracing::debug!("connect to port: {}", port_path);

        let port = serialport::new(&port_path, embedded.baud_rate)
            .timeout(embedded.read_timeout())
            .open()?;

        Ok((port_path, port))
    }

    pub fn connected(link: Box<dyn SerialLink>) -> Self {
        Self::Connected {
            link,
            pending: Vec::with_capacity(MAX_PENDING_BYTES),
            discarding: false,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns the next complete line without its terminator, or `None` when
    /// no full line has been received yet. Never waits for data.
    pub fn try_read_line(&mut self) -> Result<Option<String>, TransportError> {
        let (link, pending, discarding) = match self {
            Self::Connected { link, pending, discarding } => (link, pending, discarding),
            Self::Unavailable { .. } => return Ok(None),
        };

        if let Some(line) = next_line(pending, discarding) {
            return Ok(Some(line));
        }

        let available = link.bytes_available()?;
        if available > 0 {
            let mut chunk = vec![0; available];
            match link.read(&mut chunk) {
                Ok(read) => pending.extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(line) = next_line(pending, discarding) {
            return Ok(Some(line));
        }

        if pending.len() > MAX_PENDING_BYTES {
            tracing::warn!("discarding {} bytes received without line terminator", pending.len());
            pending.clear();
            *discarding = true;
        }

        Ok(None)
    }

    /// Writes `text` and a `\n` terminator, then flushes.
    pub fn write_line(&mut self, text: &str) -> Result<(), TransportError> {
        match self {
            Self::Connected { link, .. } => {
                let mut frame = Vec::with_capacity(text.len() + 1);
                frame.extend_from_slice(text.as_bytes());
                frame.push(b'\n');

                link.write_all(&frame)?;
                link.flush()?;

                Ok(())
            }
            Self::Unavailable { reason } => Err(TransportError::Unavailable(reason.clone())),
        }
    }
}

/// Skips the rest of a dropped line before handing out the next complete one.
fn next_line(pending: &mut Vec<u8>, discarding: &mut bool) -> Option<String> {
    if *discarding {
        match pending.iter().position(|&byte| byte == b'\n') {
            Some(end) => {
                pending.drain(..=end);
                *discarding = false;
            }
            None => {
                pending.clear();
                return None;
            }
        }
    }

    take_line(pending)
}

fn take_line(pending: &mut Vec<u8>) -> Option<String> {
    let end = pending.iter().position(|&byte| byte == b'\n')?;
    let raw: Vec<u8> = pending.drain(..=end).collect();
    let line = String::from_utf8_lossy(&raw[..end]);

    Some(line.trim_end_matches('\r').to_string())
}
