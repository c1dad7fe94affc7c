use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::{
    filter::LevelFilter, fmt::{format::Format, MakeWriter}, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};
use wasm_bindgen::JsValue;

/// Buffers one formatted event and hands it to the matching `console`
/// method when dropped.
pub(crate) struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if text.is_empty() { return }

        let message = JsValue::from_str(text);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&message),
            Level::WARN => web_sys::console::warn_1(&message),
            Level::INFO => web_sys::console::info_1(&message),
            _ => web_sys::console::debug_1(&message),
        }
    }
}

pub(crate) struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { level: Level::INFO, buf: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter { level: *meta.level(), buf: Vec::new() }
    }
}

/// Route `tracing` events at `info` and above to the browser console.
/// There is no wall clock on wasm32, so events carry no timestamp.
pub(crate) fn init_logging() {
    let layer = tracing_subscriber::fmt::layer()
        .event_format(Format::default().with_level(false).with_target(false).without_time())
        .with_writer(MakeConsoleWriter)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);
    let _ = tracing_subscriber::registry().with(layer).try_init();
}
