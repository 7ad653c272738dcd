//! `tracing` setup. In the browser, formatted lines go to the dev-tools
//! console; on the host (tests, tooling) they go to stderr.

use std::io;
use std::sync::Once;

use tracing_subscriber::fmt::MakeWriter;

use crate::config::AppSettings;

static TRACING_INIT: Once = Once::new();

pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        emit(line.trim_end());
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    eprintln!("{}", line);
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// Installs the global subscriber once, at the level stored in settings.
pub fn init(settings: &AppSettings) {
    let level = settings.level();
    TRACING_INIT.call_once(|| {
        let installed = tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .with_ansi(false)
            .with_target(false)
            .with_writer(ConsoleMakeWriter)
            .try_init();
        if installed.is_ok() {
            tracing::info!(%level, "tracing initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        let settings = AppSettings::default();
        init(&settings);
        init(&settings);
    }
}
