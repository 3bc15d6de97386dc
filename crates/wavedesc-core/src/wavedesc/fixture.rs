//! Synthetic WAVEDESC captures for unit tests.

use super::layout;
use super::reader::Endianness;

pub(crate) enum RawSamples {
    Byte(Vec<i8>),
    Word(Vec<i16>),
}

pub(crate) struct CaptureBuilder {
    pub prefix: Vec<u8>,
    pub order: Endianness,
    pub template_name: [u8; 16],
    pub instrument_name: [u8; 16],
    pub instrument_number: i32,
    pub user_text: Vec<u8>,
    pub trig_time_array: Vec<u8>,
    pub sample_count: Option<i32>,
    pub wave_array_len: Option<i32>,
    pub vertical_gain: f32,
    pub vertical_offset: f32,
    pub nominal_bits: i16,
    pub horiz_interval: f32,
    pub horiz_offset: f64,
    pub trigger_seconds: f64,
    pub trigger_fields: [u8; 4],
    pub trigger_year: i16,
    pub record_type: u16,
    pub processing: u16,
    pub timebase: u16,
    pub coupling: u16,
    pub bandwidth: u16,
    pub source: u16,
    pub samples: RawSamples,
}

fn text(value: &str) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..value.len()].copy_from_slice(value.as_bytes());
    out
}

impl CaptureBuilder {
    pub fn new() -> Self {
        Self {
            prefix: Vec::new(),
            order: Endianness::Little,
            template_name: text("LECROY_2_3"),
            instrument_name: text("LECROYWR104MXi"),
            instrument_number: 1042,
            user_text: Vec::new(),
            trig_time_array: Vec::new(),
            sample_count: None,
            wave_array_len: None,
            vertical_gain: 1.0,
            vertical_offset: 0.0,
            nominal_bits: 8,
            horiz_interval: 1.0,
            horiz_offset: 0.0,
            trigger_seconds: 12.5,
            trigger_fields: [30, 14, 21, 6],
            trigger_year: 2020,
            record_type: 0,
            processing: 0,
            timebase: 20,
            coupling: 2,
            bandwidth: 0,
            source: 0,
            samples: RawSamples::Word(Vec::new()),
        }
    }

    fn put<const N: usize>(buf: &mut [u8], base: usize, offset: usize, bytes: [u8; N]) {
        buf[base + offset..base + offset + N].copy_from_slice(&bytes);
    }

    pub fn build(&self) -> Vec<u8> {
        let big = self.order == Endianness::Big;
        let u16b = |v: u16| if big { v.to_be_bytes() } else { v.to_le_bytes() };
        let i16b = |v: i16| if big { v.to_be_bytes() } else { v.to_le_bytes() };
        let i32b = |v: i32| if big { v.to_be_bytes() } else { v.to_le_bytes() };
        let f32b = |v: f32| if big { v.to_be_bytes() } else { v.to_le_bytes() };
        let f64b = |v: f64| if big { v.to_be_bytes() } else { v.to_le_bytes() };

        let (comm_type, payload, count) = match &self.samples {
            RawSamples::Byte(values) => (
                0u16,
                values.iter().map(|&v| v as u8).collect::<Vec<_>>(),
                values.len(),
            ),
            RawSamples::Word(values) => (
                1u16,
                values.iter().flat_map(|&v| i16b(v)).collect::<Vec<_>>(),
                values.len(),
            ),
        };

        let base = self.prefix.len();
        let mut buf = self.prefix.clone();
        buf.resize(base + layout::WAVE_DESCRIPTOR_LEN, 0);
        buf[base..base + layout::MARKER.len()].copy_from_slice(layout::MARKER);

        Self::put(&mut buf, base, layout::TEMPLATE_NAME_OFFSET, self.template_name);
        Self::put(&mut buf, base, layout::COMM_TYPE_OFFSET, u16b(comm_type));
        Self::put(&mut buf, base, layout::COMM_ORDER_OFFSET, u16b(if big { 0 } else { 1 }));
        Self::put(
            &mut buf,
            base,
            layout::WAVE_DESCRIPTOR_LEN_OFFSET,
            i32b(layout::WAVE_DESCRIPTOR_LEN as i32),
        );
        Self::put(&mut buf, base, layout::USER_TEXT_LEN_OFFSET, i32b(self.user_text.len() as i32));
        Self::put(
            &mut buf,
            base,
            layout::TRIG_TIME_ARRAY_LEN_OFFSET,
            i32b(self.trig_time_array.len() as i32),
        );
        Self::put(
            &mut buf,
            base,
            layout::WAVE_ARRAY_1_LEN_OFFSET,
            i32b(self.wave_array_len.unwrap_or(payload.len() as i32)),
        );
        Self::put(&mut buf, base, layout::INSTRUMENT_NAME_OFFSET, self.instrument_name);
        Self::put(&mut buf, base, layout::INSTRUMENT_NUMBER_OFFSET, i32b(self.instrument_number));
        Self::put(
            &mut buf,
            base,
            layout::WAVE_ARRAY_COUNT_OFFSET,
            i32b(self.sample_count.unwrap_or(count as i32)),
        );
        Self::put(&mut buf, base, layout::VERTICAL_GAIN_OFFSET, f32b(self.vertical_gain));
        Self::put(&mut buf, base, layout::VERTICAL_OFFSET_OFFSET, f32b(self.vertical_offset));
        Self::put(&mut buf, base, layout::NOMINAL_BITS_OFFSET, i16b(self.nominal_bits));
        Self::put(&mut buf, base, layout::HORIZ_INTERVAL_OFFSET, f32b(self.horiz_interval));
        Self::put(&mut buf, base, layout::HORIZ_OFFSET_OFFSET, f64b(self.horiz_offset));

        let trigger = base + layout::TRIGGER_TIME_OFFSET;
        Self::put(&mut buf, trigger, layout::TRIGGER_SECONDS_OFFSET, f64b(self.trigger_seconds));
        Self::put(&mut buf, trigger, layout::TRIGGER_MINUTES_OFFSET, self.trigger_fields);
        Self::put(&mut buf, trigger, layout::TRIGGER_YEAR_OFFSET, i16b(self.trigger_year));

        Self::put(&mut buf, base, layout::RECORD_TYPE_OFFSET, u16b(self.record_type));
        Self::put(&mut buf, base, layout::PROCESSING_DONE_OFFSET, u16b(self.processing));
        Self::put(&mut buf, base, layout::TIMEBASE_OFFSET, u16b(self.timebase));
        Self::put(&mut buf, base, layout::VERT_COUPLING_OFFSET, u16b(self.coupling));
        Self::put(&mut buf, base, layout::BANDWIDTH_LIMIT_OFFSET, u16b(self.bandwidth));
        Self::put(&mut buf, base, layout::WAVE_SOURCE_OFFSET, u16b(self.source));

        buf.extend_from_slice(&self.user_text);
        buf.extend_from_slice(&self.trig_time_array);
        buf.extend_from_slice(&payload);
        buf
    }
}
