use log::{debug, trace};

use super::error::{FormatError, WaveError};
use super::layout;
use super::reader::{Endianness, FieldReader};
use super::tables::{BandwidthLimit, ProcessingKind, RecordType, VerticalCoupling, WaveSource};
use super::timebase::Timebase;
use super::trigger::TriggerTime;

/// Element width of the raw sample array (`COMM_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    Byte,
    Word,
}

impl SampleWidth {
    pub fn from_selector(selector: u16) -> Self {
        if selector == 0 {
            SampleWidth::Byte
        } else {
            SampleWidth::Word
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            SampleWidth::Byte => 8,
            SampleWidth::Word => 16,
        }
    }
}

/// Decoded WAVEDESC metadata.
///
/// Text fields keep their on-disk padding; block lengths are the raw signed
/// values from the descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformHeader {
    pub endianness: Endianness,
    pub template_name: String,
    pub sample_width: SampleWidth,
    pub wave_descriptor_len: i32,
    pub user_text_len: i32,
    pub trig_time_array_len: i32,
    pub wave_array_len: i32,
    pub instrument_name: String,
    pub instrument_number: i32,
    pub sample_count: i32,
    pub vertical_gain: f32,
    pub vertical_offset: f32,
    pub nominal_bits: i16,
    pub horiz_interval: f32,
    pub horiz_offset: f64,
    pub trigger_time: TriggerTime,
    pub record_type: RecordType,
    pub processing: ProcessingKind,
    pub timebase: Timebase,
    pub vertical_coupling: VerticalCoupling,
    pub bandwidth_limit: BandwidthLimit,
    pub wave_source: WaveSource,
}

impl WaveformHeader {
    /// Offset of the sample payload relative to the marker: the descriptor,
    /// user text and trigger time array blocks precede it.
    ///
    /// Saturates; a saturated start never fits in a buffer and the
    /// bounds-checked read reports it.
    pub fn sample_start(&self) -> Result<usize, WaveError> {
        let descriptor = non_negative("descriptor block length", self.wave_descriptor_len)?;
        let user_text = non_negative("user text block length", self.user_text_len)?;
        let trig_time = non_negative("trigger time array length", self.trig_time_array_len)?;
        Ok(descriptor.saturating_add(user_text).saturating_add(trig_time))
    }

    pub fn sample_block_len(&self) -> Result<usize, WaveError> {
        Ok(non_negative("sample block length", self.wave_array_len)?)
    }

    pub fn point_count(&self) -> Result<usize, WaveError> {
        Ok(non_negative("sample count", self.sample_count)?)
    }
}

fn non_negative(field: &'static str, value: i32) -> Result<usize, FormatError> {
    usize::try_from(value).map_err(|_| FormatError::NegativeLength { field, value })
}

/// Decode every descriptor field of the capture whose marker sits at
/// `descriptor_offset`.
///
/// # Errors
/// `WaveError::OutOfRange` when the descriptor is truncated, and
/// `WaveError::Format` for an undefined enum index or timebase code.
pub fn parse_header(buf: &[u8], descriptor_offset: usize) -> Result<WaveformHeader, WaveError> {
    let selector_reader = FieldReader::new(buf, descriptor_offset, Endianness::Little);
    selector_reader.require_len(layout::MIN_LEN)?;

    let order = selector_reader.read_u16(layout::COMM_ORDER_OFFSET)?;
    let endianness = Endianness::from_selector(order);
    let reader = selector_reader.with_order(endianness);
    let sample_width = SampleWidth::from_selector(reader.read_u16(layout::COMM_TYPE_OFFSET)?);
    debug!(
        "descriptor at {descriptor_offset}: {}-endian, {}-bit samples",
        endianness.label(),
        sample_width.bits()
    );

    let header = WaveformHeader {
        endianness,
        template_name: reader.read_ascii(
            layout::TEMPLATE_NAME_OFFSET,
            layout::TEXT_FIELD_LEN,
            "template name",
        )?,
        sample_width,
        wave_descriptor_len: reader.read_i32(layout::WAVE_DESCRIPTOR_LEN_OFFSET)?,
        user_text_len: reader.read_i32(layout::USER_TEXT_LEN_OFFSET)?,
        trig_time_array_len: reader.read_i32(layout::TRIG_TIME_ARRAY_LEN_OFFSET)?,
        wave_array_len: reader.read_i32(layout::WAVE_ARRAY_1_LEN_OFFSET)?,
        instrument_name: reader.read_ascii(
            layout::INSTRUMENT_NAME_OFFSET,
            layout::TEXT_FIELD_LEN,
            "instrument name",
        )?,
        instrument_number: reader.read_i32(layout::INSTRUMENT_NUMBER_OFFSET)?,
        sample_count: reader.read_i32(layout::WAVE_ARRAY_COUNT_OFFSET)?,
        vertical_gain: reader.read_f32(layout::VERTICAL_GAIN_OFFSET)?,
        vertical_offset: reader.read_f32(layout::VERTICAL_OFFSET_OFFSET)?,
        nominal_bits: reader.read_i16(layout::NOMINAL_BITS_OFFSET)?,
        horiz_interval: reader.read_f32(layout::HORIZ_INTERVAL_OFFSET)?,
        horiz_offset: reader.read_f64(layout::HORIZ_OFFSET_OFFSET)?,
        trigger_time: read_trigger_time(&reader)?,
        record_type: RecordType::from_index(reader.read_u16(layout::RECORD_TYPE_OFFSET)?)?,
        processing: ProcessingKind::from_index(reader.read_u16(layout::PROCESSING_DONE_OFFSET)?)?,
        timebase: Timebase::from_code(reader.read_u16(layout::TIMEBASE_OFFSET)?)?,
        vertical_coupling: VerticalCoupling::from_index(
            reader.read_u16(layout::VERT_COUPLING_OFFSET)?,
        )?,
        bandwidth_limit: BandwidthLimit::from_index(
            reader.read_u16(layout::BANDWIDTH_LIMIT_OFFSET)?,
        )?,
        wave_source: WaveSource::from_index(reader.read_u16(layout::WAVE_SOURCE_OFFSET)?)?,
    };
    trace!("{header:?}");
    Ok(header)
}

fn read_trigger_time(reader: &FieldReader<'_>) -> Result<TriggerTime, WaveError> {
    let at = |field: usize| layout::TRIGGER_TIME_OFFSET + field;
    Ok(TriggerTime {
        seconds: reader.read_f64(at(layout::TRIGGER_SECONDS_OFFSET))?,
        minutes: reader.read_u8(at(layout::TRIGGER_MINUTES_OFFSET))?,
        hours: reader.read_u8(at(layout::TRIGGER_HOURS_OFFSET))?,
        days: reader.read_u8(at(layout::TRIGGER_DAYS_OFFSET))?,
        months: reader.read_u8(at(layout::TRIGGER_MONTHS_OFFSET))?,
        year: reader.read_i16(at(layout::TRIGGER_YEAR_OFFSET))?,
    })
}
