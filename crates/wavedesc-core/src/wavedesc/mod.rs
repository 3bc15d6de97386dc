//! WAVEDESC descriptor decoding.
//!
//! Follows the same layering as the other wire decoders:
//! - `layout`: byte offsets relative to the marker (source of truth)
//! - `reader`: marker search, byte order, bounds-checked primitive reads
//! - `parser`: descriptor fields into a typed [`WaveformHeader`]
//! - `tables`, `timebase`, `trigger`: enumerated and packed fields
//! - `error`: explicit, actionable errors
//!
//! The byte-order selector is the only field read before the order is known;
//! it is read little-endian, and a zero value reads the same either way.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod tables;
pub mod timebase;
pub mod trigger;

#[cfg(test)]
pub(crate) mod fixture;

pub use parser::{SampleWidth, WaveformHeader, parse_header};
pub use reader::{Endianness, locate_marker};
