//! Routes `tracing` output to the browser console.

use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Buffers one formatted event and hands it to `console.log` when dropped.
///
/// The fmt layer creates a fresh writer per event, so each drop is one line.
#[derive(Debug, Default)]
pub struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn take_line(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut self.buffer);
        let line = String::from_utf8_lossy(&bytes).trim_end().to_string();
        (!line.is_empty()).then_some(line)
    }
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(line) = self.take_line() {
            web_sys::console::log_1(&line.into());
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleWriter::default)
        .with_ansi(false)
        .without_time()
        .try_init();

    if installed.is_ok() {
        tracing::debug!(level, "console logging ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_until_taken() {
        let mut writer = ConsoleWriter::default();
        write!(writer, "INFO postboard: ").unwrap();
        writeln!(writer, "fetched posts").unwrap();
        assert_eq!(
            writer.take_line().as_deref(),
            Some("INFO postboard: fetched posts")
        );
        assert_eq!(writer.take_line(), None);
    }

    #[test]
    fn blank_output_is_not_a_line() {
        let mut writer = ConsoleWriter::default();
        writer.write_all(b"\n").unwrap();
        assert_eq!(writer.take_line(), None);
    }
}
