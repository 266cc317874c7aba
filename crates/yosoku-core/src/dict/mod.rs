//! Dictionary lookup interface.
//!
//! The system and suffix dictionaries live outside this crate; prediction
//! talks to them through `Dictionary` and receives tokens through a
//! `LookupCallback` visitor, which can steer traversal per key.

pub mod connection;
mod connection_io;

pub use connection::{ConnectionMatrix, Connector};
pub use connection_io::MatrixError;

use bitflags::bitflags;

use crate::request::ConversionRequest;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TokenAttrs: u8 {
        const SPELLING_CORRECTION = 1 << 0;
        const USER_DICTIONARY = 1 << 1;
    }
}

/// One lexical entry as stored in a dictionary.
#[derive(Debug, Clone, Default)]
pub struct Token {
    pub key: String,
    pub value: String,
    /// Word cost on the -500*ln(prob) scale.
    pub cost: i32,
    pub lid: u16,
    pub rid: u16,
    pub attributes: TokenAttrs,
}

/// Traversal directive returned from callback events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traverse {
    /// Keep going.
    Continue,
    /// Skip the rest of the current key's tokens.
    NextKey,
    /// Skip the whole subtree under the current key.
    Cull,
    /// Stop the lookup.
    Done,
}

/// Visitor receiving lookup results. `on_key` fires once per distinct key,
/// `on_actual_key` reports the key actually matched (differing from `key`
/// under ambiguity expansion), `on_token` fires per entry.
pub trait LookupCallback {
    fn on_key(&mut self, _key: &str) -> Traverse {
        Traverse::Continue
    }

    fn on_actual_key(&mut self, _key: &str, _actual_key: &str, _is_expanded: bool) -> Traverse {
        Traverse::Continue
    }

    fn on_token(&mut self, key: &str, actual_key: &str, token: &Token) -> Traverse;
}

/// Read-only dictionary seam. Implementations must be re-entrant; the
/// predictor borrows them for the lifetime of the process.
pub trait Dictionary: Send + Sync {
    /// Enumerate entries whose key extends `key`.
    fn lookup_predictive(
        &self,
        key: &str,
        request: &ConversionRequest<'_>,
        callback: &mut dyn LookupCallback,
    );

    /// Enumerate entries whose key is a prefix of `key`.
    fn lookup_prefix(
        &self,
        key: &str,
        request: &ConversionRequest<'_>,
        callback: &mut dyn LookupCallback,
    );

    /// Enumerate entries whose key equals `key`.
    fn lookup_exact(
        &self,
        _key: &str,
        _request: &ConversionRequest<'_>,
        _callback: &mut dyn LookupCallback,
    ) {
    }

    /// Enumerate entries by value instead of key.
    fn lookup_reverse(
        &self,
        _value: &str,
        _request: &ConversionRequest<'_>,
        _callback: &mut dyn LookupCallback,
    ) {
    }

    fn has_key(&self, _key: &str) -> bool {
        false
    }

    fn has_value(&self, _value: &str) -> bool {
        false
    }
}
