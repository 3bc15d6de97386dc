//! Decoder for LeCroy-style WAVEDESC binary waveform captures.
//!
//! A capture is an opaque byte buffer holding a fixed-layout descriptor block
//! (found by its `WAVEDESC` marker), optional user text and trigger time
//! blocks, and a raw ADC sample array. Decoding runs strictly in sequence:
//! marker search, byte-order resolution, descriptor parsing (layout/reader/
//! parser), then sample scaling and time axis synthesis. Everything is pure
//! and synchronous; file access belongs to callers such as the CLI.
//!
//! Invariants:
//! - Every descriptor field lives at a fixed offset from the marker; only the
//!   four block lengths feed into where the sample payload starts.
//! - `time.len() == voltage.len() == header.sample_count`.
//! - Malformed input always surfaces as [`WaveError`]; nothing is clamped or
//!   defaulted.
//!
//! # Examples
//! ```no_run
//! use wavedesc_core::decode_waveform;
//!
//! let bytes = std::fs::read("C1--trace--00000.trc")?;
//! let waveform = decode_waveform(&bytes)?;
//! println!("{}", waveform.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use log::debug;

mod report;
mod samples;
mod time_axis;
pub mod wavedesc;

pub use report::{
    DescriptorSummary, InputInfo, Points, REPORT_VERSION, SampleSummary, ToolInfo,
    WaveformReport, make_report,
};
pub use samples::decode_samples;
pub use time_axis::build_time_axis;
pub use wavedesc::error::{FormatError, WaveError};
pub use wavedesc::tables::{
    BandwidthLimit, ProcessingKind, RecordType, VerticalCoupling, WaveSource,
};
pub use wavedesc::timebase::Timebase;
pub use wavedesc::trigger::TriggerTime;
pub use wavedesc::{Endianness, SampleWidth, WaveformHeader, locate_marker, parse_header};

/// A decoded capture: index-aligned time and voltage axes plus metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Byte position of the `WAVEDESC` marker in the source buffer.
    pub descriptor_offset: usize,
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
    pub header: WaveformHeader,
}

/// Decode a complete capture held in memory.
///
/// The buffer is only borrowed for the duration of the call.
///
/// # Errors
/// `WaveError::Format` when the buffer does not follow the WAVEDESC layout,
/// `WaveError::OutOfRange` when a required read runs past its end.
pub fn decode_waveform(buf: &[u8]) -> Result<Waveform, WaveError> {
    let descriptor_offset = locate_marker(buf)?;
    debug!("WAVEDESC marker at byte {descriptor_offset}");
    let header = parse_header(buf, descriptor_offset)?;

    let voltage = decode_samples(buf, descriptor_offset, &header)?;
    let count = header.point_count()?;
    if voltage.len() != count {
        return Err(FormatError::SampleCountMismatch {
            header: count,
            samples: voltage.len(),
        }
        .into());
    }
    let time = build_time_axis(
        count,
        f64::from(header.horiz_interval),
        header.horiz_offset,
    );

    Ok(Waveform {
        descriptor_offset,
        time,
        voltage,
        header,
    })
}

impl Waveform {
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }

    /// Multi-line, human-readable description for logs and diagnostics.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(f, "LeCroy Scope Data")?;
        writeln!(f, "Endianness: {}", h.endianness.label())?;
        writeln!(f, "Instrument: {}", report::display_text(&h.instrument_name))?;
        writeln!(f, "Instrument Number: {}", h.instrument_number)?;
        writeln!(f, "Template Name: {}", report::display_text(&h.template_name))?;
        writeln!(f, "Channel: {}", h.wave_source)?;
        writeln!(f, "Vertical Coupling: {}", h.vertical_coupling)?;
        writeln!(f, "Bandwidth Limit: {}", h.bandwidth_limit)?;
        writeln!(f, "Record Type: {}", h.record_type)?;
        writeln!(f, "Processing: {}", h.processing)?;
        writeln!(f, "TimeBase: {}", h.timebase)?;
        writeln!(f, "TriggerTime: {}", h.trigger_time)
    }
}
