use tracing::warn;

use crate::error::Result;

pub const COPY_SUCCESS_MESSAGE: &str = "Address copied";

/// Something that can receive text (the async clipboard API, a legacy
/// `execCommand` path, a terminal).
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Which mechanism ended up holding the text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    /// Both failed; only logged.
    Failed,
}

/// Try `primary`, then `fallback`. Failures are logged and never surfaced.
pub fn copy_with_fallback(primary: &mut dyn Clipboard, fallback: &mut dyn Clipboard, text: &str) -> CopyOutcome {
    match primary.write_text(text) {
        Ok(()) => return CopyOutcome::Primary,
        Err(e) => warn!("clipboard write failed, trying fallback: {e}"),
    }
    match fallback.write_text(text) {
        Ok(()) => CopyOutcome::Fallback,
        Err(e) => {
            warn!("fallback copy failed: {e}");
            CopyOutcome::Failed
        }
    }
}
