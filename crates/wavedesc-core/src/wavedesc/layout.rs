//! Byte offsets of the WAVEDESC descriptor block, relative to the marker.

pub const MARKER: &[u8; 8] = b"WAVEDESC";
/// The marker must start within this many leading bytes of the capture.
pub const MARKER_SEARCH_WINDOW: usize = 50;

pub const TEMPLATE_NAME_OFFSET: usize = 16;
pub const COMM_TYPE_OFFSET: usize = 32;
pub const COMM_ORDER_OFFSET: usize = 34;

pub const WAVE_DESCRIPTOR_LEN_OFFSET: usize = 36;
pub const USER_TEXT_LEN_OFFSET: usize = 40;
pub const TRIG_TIME_ARRAY_LEN_OFFSET: usize = 48;
pub const WAVE_ARRAY_1_LEN_OFFSET: usize = 60;

pub const INSTRUMENT_NAME_OFFSET: usize = 76;
pub const INSTRUMENT_NUMBER_OFFSET: usize = 92;
pub const WAVE_ARRAY_COUNT_OFFSET: usize = 116;

pub const VERTICAL_GAIN_OFFSET: usize = 156;
pub const VERTICAL_OFFSET_OFFSET: usize = 160;
pub const NOMINAL_BITS_OFFSET: usize = 172;
pub const HORIZ_INTERVAL_OFFSET: usize = 176;
pub const HORIZ_OFFSET_OFFSET: usize = 180;

pub const TRIGGER_TIME_OFFSET: usize = 296;
pub const RECORD_TYPE_OFFSET: usize = 316;
pub const PROCESSING_DONE_OFFSET: usize = 318;
pub const TIMEBASE_OFFSET: usize = 324;
pub const VERT_COUPLING_OFFSET: usize = 326;
pub const BANDWIDTH_LIMIT_OFFSET: usize = 334;
pub const WAVE_SOURCE_OFFSET: usize = 344;

pub const TEXT_FIELD_LEN: usize = 16;

pub const TRIGGER_SECONDS_OFFSET: usize = 0;
pub const TRIGGER_MINUTES_OFFSET: usize = 8;
pub const TRIGGER_HOURS_OFFSET: usize = 9;
pub const TRIGGER_DAYS_OFFSET: usize = 10;
pub const TRIGGER_MONTHS_OFFSET: usize = 11;
pub const TRIGGER_YEAR_OFFSET: usize = 12;

/// Smallest descriptor (relative to the marker) that holds every decoded field.
pub const MIN_LEN: usize = WAVE_SOURCE_OFFSET + 2;

/// Length of the descriptor block written by current instruments (`LECROY_2_3`).
pub const WAVE_DESCRIPTOR_LEN: usize = 346;
