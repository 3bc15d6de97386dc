use log::debug;

use crate::wavedesc::error::{FormatError, WaveError};
use crate::wavedesc::reader::FieldReader;
use crate::wavedesc::{SampleWidth, WaveformHeader};

/// Read the raw ADC block and scale it to volts:
/// `voltage = vertical_gain * raw - vertical_offset`.
///
/// The header must already be fully parsed; its block lengths locate the
/// payload.
///
/// # Errors
/// `WaveError::OutOfRange` when the block runs past the buffer, and
/// `FormatError::OddSampleBlock` for an odd-length 16-bit block.
pub fn decode_samples(
    buf: &[u8],
    descriptor_offset: usize,
    header: &WaveformHeader,
) -> Result<Vec<f64>, WaveError> {
    let start = header.sample_start()?;
    let len = header.sample_block_len()?;
    if header.sample_width == SampleWidth::Word && len % 2 != 0 {
        return Err(FormatError::OddSampleBlock { length: len }.into());
    }
    debug!(
        "sample block at {} (+{len} bytes)",
        descriptor_offset.saturating_add(start)
    );

    let reader = FieldReader::new(buf, descriptor_offset, header.endianness);
    let block = reader.read_slice(start, len)?;
    let gain = f64::from(header.vertical_gain);
    let offset = f64::from(header.vertical_offset);
    let scale = |raw: f64| gain * raw - offset;

    let voltage: Vec<f64> = match header.sample_width {
        SampleWidth::Byte => block.iter().map(|&b| scale(f64::from(b as i8))).collect(),
        SampleWidth::Word => block
            .chunks_exact(2)
            .map(|pair| scale(f64::from(header.endianness.i16_from([pair[0], pair[1]]))))
            .collect(),
    };
    Ok(voltage)
}

#[cfg(test)]
mod tests {
    use super::decode_samples;
    use crate::wavedesc::error::{FormatError, WaveError};
    use crate::wavedesc::fixture::{CaptureBuilder, RawSamples};
    use crate::wavedesc::layout;
    use crate::wavedesc::parse_header;
    use crate::wavedesc::reader::Endianness;

    fn decode(builder: &CaptureBuilder) -> Result<Vec<f64>, WaveError> {
        let buf = builder.build();
        let base = builder.prefix.len();
        let header = parse_header(&buf, base)?;
        decode_samples(&buf, base, &header)
    }

    #[test]
    fn word_samples_are_scaled() {
        let mut builder = CaptureBuilder::new();
        builder.vertical_gain = 2.0;
        builder.vertical_offset = 0.5;
        builder.samples = RawSamples::Word(vec![10, -10, i16::MAX, i16::MIN]);
        let voltage = decode(&builder).unwrap();
        assert_eq!(
            voltage,
            vec![19.5, -20.5, 2.0 * 32767.0 - 0.5, 2.0 * -32768.0 - 0.5]
        );
    }

    #[test]
    fn byte_samples_are_signed() {
        let mut builder = CaptureBuilder::new();
        builder.order = Endianness::Big;
        builder.vertical_gain = 0.5;
        builder.samples = RawSamples::Byte(vec![0, 127, -128, -1]);
        let voltage = decode(&builder).unwrap();
        assert_eq!(voltage, vec![0.0, 63.5, -64.0, -0.5]);
    }

    #[test]
    fn big_endian_words() {
        let mut builder = CaptureBuilder::new();
        builder.order = Endianness::Big;
        builder.samples = RawSamples::Word(vec![0x0102, -300]);
        let voltage = decode(&builder).unwrap();
        assert_eq!(voltage, vec![258.0, -300.0]);
    }

    #[test]
    fn gain_matches_hand_computation() {
        let mut builder = CaptureBuilder::new();
        builder.vertical_gain = 3.1e-3;
        builder.vertical_offset = -0.07;
        builder.samples = RawSamples::Word(vec![-1234, 0, 4321]);
        let voltage = decode(&builder).unwrap();
        let gain = f64::from(3.1e-3f32);
        let offset = f64::from(-0.07f32);
        for (value, raw) in voltage.iter().zip([-1234.0, 0.0, 4321.0]) {
            assert_eq!(*value, gain * raw - offset);
        }
    }

    #[test]
    fn blocks_before_payload_are_skipped() {
        let mut builder = CaptureBuilder::new();
        builder.prefix = vec![b' '; 7];
        builder.user_text = b"bench note".to_vec();
        builder.trig_time_array = vec![0xaa; 16];
        builder.samples = RawSamples::Word(vec![5, 6]);
        assert_eq!(decode(&builder).unwrap(), vec![5.0, 6.0]);
    }

    #[test]
    fn odd_word_block_is_rejected() {
        let mut builder = CaptureBuilder::new();
        builder.samples = RawSamples::Word(vec![1, 2]);
        builder.wave_array_len = Some(3);
        let err = decode(&builder).unwrap_err();
        assert_eq!(err, WaveError::Format(FormatError::OddSampleBlock { length: 3 }));
    }

    #[test]
    fn oversized_block_lengths_report_buffer_len() {
        let mut builder = CaptureBuilder::new();
        builder.samples = RawSamples::Word(vec![1, 2]);
        let mut buf = builder.build();
        for at in [
            layout::USER_TEXT_LEN_OFFSET,
            layout::TRIG_TIME_ARRAY_LEN_OFFSET,
        ] {
            buf[at..at + 4].copy_from_slice(&i32::MAX.to_le_bytes());
        }
        let header = parse_header(&buf, 0).unwrap();
        let err = decode_samples(&buf, 0, &header).unwrap_err();
        match err {
            WaveError::OutOfRange { needed, actual } => {
                assert_eq!(actual, buf.len());
                assert!(needed > actual);
            }
            other => panic!("expected out of range, got {other:?}"),
        }
    }

    #[test]
    fn truncated_block_is_out_of_range() {
        let mut builder = CaptureBuilder::new();
        builder.samples = RawSamples::Word(vec![1, 2]);
        builder.wave_array_len = Some(8);
        let err = decode(&builder).unwrap_err();
        assert!(err.is_out_of_range());
    }
}
