//! `tracing` output routed to the browser console.

use std::io;

use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

use crate::console::{ConsoleLevel, LineBuffer};

pub struct ConsoleWriter {
    level: ConsoleLevel,
    buffer: LineBuffer,
}

impl ConsoleWriter {
    fn new(level: ConsoleLevel) -> Self {
        Self {
            level,
            buffer: LineBuffer::default(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.push(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = self.buffer.take_line() else {
            return;
        };
        let line = JsValue::from_str(&line);
        match self.level {
            ConsoleLevel::Error => web_sys::console::error_1(&line),
            ConsoleLevel::Warn => web_sys::console::warn_1(&line),
            ConsoleLevel::Log => web_sys::console::log_1(&line),
        }
    }
}

pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::Log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(ConsoleLevel::for_level(meta.level()))
    }
}

/// No timestamps: the wasm target has no system clock.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_max_level(tracing::Level::INFO)
        .with_writer(ConsoleMakeWriter)
        .try_init();
}
