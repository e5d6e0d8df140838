//! Tracing subscriber that writes formatted events to the browser console.

use anyhow::Result;
use docboard_core::config::DEFAULT_LOG_LEVEL;
use gloo::console;
use std::io;
use tracing_subscriber::{EnvFilter, fmt};

/// Buffers one formatted event and emits it as a single console line.
#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
            console::log!(line);
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// Install the global subscriber with the given filter directive.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub(crate) fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))?;
    fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(ConsoleWriter::default)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;
    Ok(())
}
