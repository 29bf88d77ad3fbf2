//! Diagnostic side channel
//!
//! Non-fatal events the embedding editor may want to surface (configuration
//! fallbacks, mutations that could not be applied). Recording never affects
//! control flow; hosts that don't care can ignore the queue.

use std::collections::VecDeque;

use crate::dom::DomError;
use crate::options::ConfigWarning;

/// Maximum number of diagnostics kept while the host isn't draining them
pub const MAX_DIAGNOSTICS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A configured default was replaced by the global default
    Config(ConfigWarning),
    /// A wrap/unwrap was skipped because the document no longer matched
    Mutation(DomError),
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(warning) => write!(f, "config: {}", warning),
            Self::Mutation(err) => write!(f, "mutation skipped: {}", err),
        }
    }
}

/// Queue of diagnostics, drained by the host
///
/// Holds at most [`MAX_DIAGNOSTICS`]; the oldest entry goes first.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    events: VecDeque<Diagnostic>,
    dropped: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.events.len() >= MAX_DIAGNOSTICS {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Entries pushed out by newer ones since the last drain
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Take all pending diagnostics
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        self.dropped = 0;
        self.events.drain(..).collect()
    }
}
