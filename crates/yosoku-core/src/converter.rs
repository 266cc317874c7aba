//! Seams to the lattice-conversion side of the engine.
//!
//! Both converters write their candidates into the conversion segments of
//! the passed-in `Segments` and return whether they produced anything. The
//! predictor treats them as pure, re-entrant collaborators.

use crate::request::ConversionRequest;
use crate::segments::Segments;

/// The full converter, rewriters included. Used once per prediction call to
/// obtain the exact top conversion result.
pub trait Converter: Send + Sync {
    fn start_conversion_for_request(
        &self,
        request: &ConversionRequest<'_>,
        segments: &mut Segments,
    ) -> bool;
}

/// The rewriter-free lattice converter used for realtime candidates.
pub trait ImmutableConverter: Send + Sync {
    fn convert_for_request(&self, request: &ConversionRequest<'_>, segments: &mut Segments)
        -> bool;
}

/// Per-POS segmentation penalties.
pub trait Segmenter: Send + Sync {
    /// Penalty for ending a phrase with the given right ID.
    fn suffix_penalty(&self, rid: u16) -> i32;
}
