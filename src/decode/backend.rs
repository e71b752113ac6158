use anyhow::Result;

use crate::decode::result::{Symbol, SymbolKind};
use crate::frame::Frame;

/// Decoder backend trait.
///
/// Implementations receive a read-only frame and report zero or more
/// detections. A frame with no symbols is not an error; backends return an
/// empty vector and the loop moves on. Errors are reserved for decode
/// machinery failures (corrupt buffers, library faults).
pub trait DecoderBackend: Send {
    /// Backend identifier, used for registry lookup and logging.
    fn name(&self) -> &'static str;

    /// Returns true when the backend can decode a symbology.
    fn supports(&self, kind: SymbolKind) -> bool;

    /// Decode all symbols in a frame.
    fn decode(&mut self, frame: &Frame) -> Result<Vec<Symbol>>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
