use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::Waveform;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Serializable view of a decoded capture.
///
/// # Examples
/// ```no_run
/// use wavedesc_core::{decode_waveform, make_report};
///
/// let bytes = std::fs::read("C1--trace--00000.trc")?;
/// let waveform = decode_waveform(&bytes)?;
/// let report = make_report("C1--trace--00000.trc", bytes.len() as u64, &waveform, false);
/// println!("{}", serde_json::to_string_pretty(&report)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveformReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    pub descriptor: DescriptorSummary,
    pub samples: SampleSummary,
    /// Full time and voltage arrays, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Points>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided by the caller.
    pub path: String,
    pub bytes: u64,
}

/// Descriptor fields with enum labels resolved and text padding removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorSummary {
    /// Byte position of the `WAVEDESC` marker.
    pub offset: usize,
    /// `big` or `little`.
    pub endianness: String,
    pub template_name: String,
    pub sample_bits: u8,
    pub wave_descriptor_len: i32,
    pub user_text_len: i32,
    pub trig_time_array_len: i32,
    pub wave_array_len: i32,
    pub instrument_name: String,
    pub instrument_number: i32,
    pub sample_count: i32,
    pub vertical_gain: f64,
    pub vertical_offset: f64,
    pub nominal_bits: i16,
    pub horiz_interval: f64,
    pub horiz_offset: f64,
    /// `YYYY-MM-DD HH:MM:SS.ss` as stored by the instrument.
    pub trigger_time: String,
    /// RFC3339 trigger time, instrument clock read as UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_timestamp: Option<String>,
    pub record_type: String,
    pub processing: String,
    pub timebase: String,
    pub vertical_coupling: String,
    pub bandwidth_limit: String,
    pub wave_source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_end: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage_max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Points {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
}

/// Text field with trailing NUL padding and whitespace removed.
pub(crate) fn display_text(raw: &str) -> &str {
    raw.trim_end_matches('\0').trim_end()
}

/// Build a report for a decoded waveform.
pub fn make_report(
    input_path: &str,
    input_bytes: u64,
    waveform: &Waveform,
    include_points: bool,
) -> WaveformReport {
    let header = &waveform.header;
    let descriptor = DescriptorSummary {
        offset: waveform.descriptor_offset,
        endianness: header.endianness.label().to_string(),
        template_name: display_text(&header.template_name).to_string(),
        sample_bits: header.sample_width.bits(),
        wave_descriptor_len: header.wave_descriptor_len,
        user_text_len: header.user_text_len,
        trig_time_array_len: header.trig_time_array_len,
        wave_array_len: header.wave_array_len,
        instrument_name: display_text(&header.instrument_name).to_string(),
        instrument_number: header.instrument_number,
        sample_count: header.sample_count,
        vertical_gain: f64::from(header.vertical_gain),
        vertical_offset: f64::from(header.vertical_offset),
        nominal_bits: header.nominal_bits,
        horiz_interval: f64::from(header.horiz_interval),
        horiz_offset: header.horiz_offset,
        trigger_time: header.trigger_time.to_string(),
        trigger_timestamp: header
            .trigger_time
            .to_datetime()
            .and_then(|dt| dt.assume_utc().format(&Rfc3339).ok()),
        record_type: header.record_type.to_string(),
        processing: header.processing.to_string(),
        timebase: header.timebase.label(),
        vertical_coupling: header.vertical_coupling.to_string(),
        bandwidth_limit: header.bandwidth_limit.to_string(),
        wave_source: header.wave_source.to_string(),
    };

    let samples = SampleSummary {
        count: waveform.voltage.len() as u64,
        time_start: waveform.time.first().copied(),
        time_end: waveform.time.last().copied(),
        voltage_min: waveform.voltage.iter().copied().reduce(f64::min),
        voltage_max: waveform.voltage.iter().copied().reduce(f64::max),
    };

    WaveformReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "wavedesc".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        descriptor,
        samples,
        points: include_points.then(|| Points {
            time: waveform.time.clone(),
            voltage: waveform.voltage.clone(),
        }),
    }
}
