use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::services::SerialLink;

/// In-memory serial link: frames fed by the test are read by the bridge,
/// bytes written by the bridge are recorded.
#[derive(Debug, Clone, Default)]
pub struct MockLink {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    incoming: VecDeque<u8>,
    written: Vec<u8>,
    read_failure: Option<io::ErrorKind>,
    write_failure: Option<io::ErrorKind>,
}

impl MockLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&self, bytes: &[u8]) {
        self.state().incoming.extend(bytes);
    }

    pub fn feed_line(&self, line: &str) {
        let mut state = self.state();
        state.incoming.extend(line.as_bytes());
        state.incoming.push_back(b'\n');
    }

    pub fn written(&self) -> Vec<u8> {
        self.state().written.clone()
    }

    pub fn written_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.state().written)
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn fail_reads(&self, kind: Option<io::ErrorKind>) {
        self.state().read_failure = kind;
    }

    pub fn fail_writes(&self, kind: Option<io::ErrorKind>) {
        self.state().write_failure = kind;
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Read for MockLink {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state();

        if let Some(kind) = state.read_failure {
            return Err(kind.into());
        }

        if state.incoming.is_empty() {
            return Err(io::ErrorKind::TimedOut.into());
        }

        let count = buf.len().min(state.incoming.len());
        for (slot, byte) in buf.iter_mut().zip(state.incoming.drain(..count)) {
            *slot = byte;
        }

        Ok(count)
    }
}

impl Write for MockLink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state();

        if let Some(kind) = state.write_failure {
            return Err(kind.into());
        }

        state.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.state().write_failure {
            Some(kind) => Err(kind.into()),
            None => Ok(()),
        }
    }
}

impl SerialLink for MockLink {
    fn bytes_available(&self) -> io::Result<usize> {
        let state = self.state();

        match state.read_failure {
            Some(kind) => Err(kind.into()),
            None => Ok(state.incoming.len()),
        }
    }
}
