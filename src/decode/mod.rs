//! Barcode decoding backends.
//!
//! Decoding is delegated to pluggable backends behind a registry. The
//! original deployment ran two scanner variants built on different decoding
//! libraries; neither is canonical, so each library maps onto one
//! `DecoderBackend` and the loop stays agnostic. The shipped backends are:
//!
//! - `rqrr`: real QR decoding on the luma plane
//! - `stub`: scripted results (testing)

mod backend;
pub mod backends;
mod registry;
mod result;

pub use backend::DecoderBackend;
pub use backends::rqrr::RqrrBackend;
pub use backends::stub::StubBackend;
pub use registry::DecoderRegistry;
pub use result::{BoundingBox, Symbol, SymbolKind};
