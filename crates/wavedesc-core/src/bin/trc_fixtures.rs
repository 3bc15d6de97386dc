use std::fs;
use std::path::{Path, PathBuf};

const MARKER: &[u8; 8] = b"WAVEDESC";
const WAVE_DESCRIPTOR_LEN: usize = 346;

const TEMPLATE_NAME_RANGE: std::ops::Range<usize> = 16..32;
const COMM_TYPE_OFFSET: usize = 32;
const COMM_ORDER_OFFSET: usize = 34;
const WAVE_DESCRIPTOR_LEN_OFFSET: usize = 36;
const USER_TEXT_LEN_OFFSET: usize = 40;
const TRIG_TIME_ARRAY_LEN_OFFSET: usize = 48;
const WAVE_ARRAY_1_LEN_OFFSET: usize = 60;
const INSTRUMENT_NAME_RANGE: std::ops::Range<usize> = 76..92;
const INSTRUMENT_NUMBER_OFFSET: usize = 92;
const WAVE_ARRAY_COUNT_OFFSET: usize = 116;
const VERTICAL_GAIN_OFFSET: usize = 156;
const VERTICAL_OFFSET_OFFSET: usize = 160;
const NOMINAL_BITS_OFFSET: usize = 172;
const HORIZ_INTERVAL_OFFSET: usize = 176;
const HORIZ_OFFSET_OFFSET: usize = 180;
const TRIGGER_TIME_OFFSET: usize = 296;
const RECORD_TYPE_OFFSET: usize = 316;
const PROCESSING_DONE_OFFSET: usize = 318;
const TIMEBASE_OFFSET: usize = 324;
const VERT_COUPLING_OFFSET: usize = 326;
const BANDWIDTH_LIMIT_OFFSET: usize = 334;
const WAVE_SOURCE_OFFSET: usize = 344;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    write_capture(&root.join("word_little_endian"), &word_little_endian())?;
    write_capture(&root.join("byte_big_endian"), &byte_big_endian())?;
    Ok(())
}

enum Samples {
    Byte(Vec<i8>),
    Word(Vec<i16>),
}

struct CaptureSpec {
    big_endian: bool,
    /// Prepend the `#9nnnnnnnnn` block header scopes emit over remote control.
    block_header: bool,
    template_name: &'static str,
    instrument_name: &'static str,
    instrument_number: i32,
    user_text: Vec<u8>,
    trig_time_array: Vec<u8>,
    samples: Samples,
    vertical_gain: f32,
    vertical_offset: f32,
    nominal_bits: i16,
    horiz_interval: f32,
    horiz_offset: f64,
    /// seconds, minutes, hours, days, months, year
    trigger: (f64, u8, u8, u8, u8, i16),
    record_type: u16,
    processing: u16,
    timebase: u16,
    coupling: u16,
    bandwidth: u16,
    source: u16,
}

fn word_little_endian() -> CaptureSpec {
    let mut trig_time_array = Vec::new();
    trig_time_array.extend_from_slice(&0.0f64.to_le_bytes());
    trig_time_array.extend_from_slice(&(-1.9073486328125e-06f64).to_le_bytes());
    CaptureSpec {
        big_endian: false,
        block_header: true,
        template_name: "LECROY_2_3",
        instrument_name: "LECROYWR104MXi",
        instrument_number: 10427,
        user_text: Vec::new(),
        trig_time_array,
        samples: Samples::Word(vec![-512, -256, 0, 256, 512, 1024, -1024, 7]),
        vertical_gain: 2f32.powi(-10),
        vertical_offset: 0.125,
        nominal_bits: 8,
        horiz_interval: 2f32.powi(-20),
        horiz_offset: -(2f64.powi(-19)),
        trigger: (9.0, 45, 16, 7, 11, 2023),
        record_type: 0,
        processing: 0,
        timebase: 5,
        coupling: 0,
        bandwidth: 0,
        source: 0,
    }
}

fn byte_big_endian() -> CaptureSpec {
    let mut user_text = b"scope note: atten 10x".to_vec();
    user_text.resize(40, b' ');
    CaptureSpec {
        big_endian: true,
        block_header: false,
        template_name: "LECROY_2_2",
        instrument_name: "LECROYLT344",
        instrument_number: 3441,
        user_text,
        trig_time_array: Vec::new(),
        samples: Samples::Byte(vec![-128, -64, 0, 32, 100, 127]),
        vertical_gain: 0.0625,
        vertical_offset: -0.25,
        nominal_bits: 8,
        horiz_interval: 2f32.powi(-10),
        horiz_offset: 0.0,
        trigger: (33.75, 2, 8, 29, 2, 2024),
        record_type: 9,
        processing: 2,
        timebase: 100,
        coupling: 4,
        bandwidth: 1,
        source: 3,
    }
}

struct Writer {
    buf: Vec<u8>,
    big_endian: bool,
}

impl Writer {
    fn put(&mut self, offset: usize, bytes: &[u8]) {
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn put_u16(&mut self, offset: usize, value: u16) {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.put(offset, &bytes);
    }

    fn put_i16(&mut self, offset: usize, value: i16) {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.put(offset, &bytes);
    }

    fn put_i32(&mut self, offset: usize, value: i32) {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.put(offset, &bytes);
    }

    fn put_f32(&mut self, offset: usize, value: f32) {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.put(offset, &bytes);
    }

    fn put_f64(&mut self, offset: usize, value: f64) {
        let bytes = if self.big_endian { value.to_be_bytes() } else { value.to_le_bytes() };
        self.put(offset, &bytes);
    }
}

fn build_capture(spec: &CaptureSpec) -> Vec<u8> {
    let (comm_type, payload, count) = match &spec.samples {
        Samples::Byte(values) => (0u16, values.iter().map(|&v| v as u8).collect::<Vec<_>>(), values.len()),
        Samples::Word(values) => {
            let payload = values
                .iter()
                .flat_map(|&v| if spec.big_endian { v.to_be_bytes() } else { v.to_le_bytes() })
                .collect::<Vec<_>>();
            (1u16, payload, values.len())
        }
    };

    let mut w = Writer {
        buf: vec![0u8; WAVE_DESCRIPTOR_LEN],
        big_endian: spec.big_endian,
    };
    w.put(0, MARKER);
    w.put(TEMPLATE_NAME_RANGE.start, &padded(spec.template_name));
    w.put_u16(COMM_TYPE_OFFSET, comm_type);
    w.put_u16(COMM_ORDER_OFFSET, if spec.big_endian { 0 } else { 1 });
    w.put_i32(WAVE_DESCRIPTOR_LEN_OFFSET, WAVE_DESCRIPTOR_LEN as i32);
    w.put_i32(USER_TEXT_LEN_OFFSET, spec.user_text.len() as i32);
    w.put_i32(TRIG_TIME_ARRAY_LEN_OFFSET, spec.trig_time_array.len() as i32);
    w.put_i32(WAVE_ARRAY_1_LEN_OFFSET, payload.len() as i32);
    w.put(INSTRUMENT_NAME_RANGE.start, &padded(spec.instrument_name));
    w.put_i32(INSTRUMENT_NUMBER_OFFSET, spec.instrument_number);
    w.put_i32(WAVE_ARRAY_COUNT_OFFSET, count as i32);
    w.put_f32(VERTICAL_GAIN_OFFSET, spec.vertical_gain);
    w.put_f32(VERTICAL_OFFSET_OFFSET, spec.vertical_offset);
    w.put_i16(NOMINAL_BITS_OFFSET, spec.nominal_bits);
    w.put_f32(HORIZ_INTERVAL_OFFSET, spec.horiz_interval);
    w.put_f64(HORIZ_OFFSET_OFFSET, spec.horiz_offset);

    let (seconds, minutes, hours, days, months, year) = spec.trigger;
    w.put_f64(TRIGGER_TIME_OFFSET, seconds);
    w.put(TRIGGER_TIME_OFFSET + 8, &[minutes, hours, days, months]);
    w.put_i16(TRIGGER_TIME_OFFSET + 12, year);

    w.put_u16(RECORD_TYPE_OFFSET, spec.record_type);
    w.put_u16(PROCESSING_DONE_OFFSET, spec.processing);
    w.put_u16(TIMEBASE_OFFSET, spec.timebase);
    w.put_u16(VERT_COUPLING_OFFSET, spec.coupling);
    w.put_u16(BANDWIDTH_LIMIT_OFFSET, spec.bandwidth);
    w.put_u16(WAVE_SOURCE_OFFSET, spec.source);

    let mut body = w.buf;
    body.extend_from_slice(&spec.user_text);
    body.extend_from_slice(&spec.trig_time_array);
    body.extend_from_slice(&payload);

    if !spec.block_header {
        return body;
    }
    let mut out = format!("#9{:09}", body.len()).into_bytes();
    out.extend_from_slice(&body);
    out
}

fn padded(text: &str) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..text.len()].copy_from_slice(text.as_bytes());
    out
}

fn write_capture(dir: &Path, spec: &CaptureSpec) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
    let path = dir.join("input.trc");
    fs::write(&path, build_capture(spec))
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))
}
