use std::collections::VecDeque;

use anyhow::{anyhow, Result};

use crate::decode::backend::DecoderBackend;
use crate::decode::result::{Symbol, SymbolKind};
use crate::frame::Frame;

enum Scripted {
    Symbols(Vec<Symbol>),
    Error(String),
}

/// Scripted decoder backend for tests.
///
/// Returns queued results in order; once the script is exhausted every
/// frame decodes to nothing.
#[derive(Default)]
pub struct StubBackend {
    script: VecDeque<Scripted>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the symbols reported for the next frame.
    pub fn push_symbols(&mut self, symbols: Vec<Symbol>) {
        self.script.push_back(Scripted::Symbols(symbols));
    }

    /// Queue a decode failure for the next frame.
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.script.push_back(Scripted::Error(message.into()));
    }
}

impl DecoderBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn supports(&self, kind: SymbolKind) -> bool {
        matches!(kind, SymbolKind::QrCode)
    }

    fn decode(&mut self, _frame: &Frame) -> Result<Vec<Symbol>> {
        match self.script.pop_front() {
            Some(Scripted::Symbols(symbols)) => Ok(symbols),
            Some(Scripted::Error(message)) => Err(anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }
}
