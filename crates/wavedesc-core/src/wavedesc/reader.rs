use super::error::{FormatError, WaveError};
use super::layout;

/// Byte order of every multi-byte field after the order selector is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// `COMM_ORDER`: `0` is big-endian, anything else little-endian.
    pub fn from_selector(selector: u16) -> Self {
        if selector == 0 {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endianness::Big => "big",
            Endianness::Little => "little",
        }
    }

    pub(crate) fn u16_from(self, bytes: [u8; 2]) -> u16 {
        match self {
            Endianness::Big => u16::from_be_bytes(bytes),
            Endianness::Little => u16::from_le_bytes(bytes),
        }
    }

    pub(crate) fn i16_from(self, bytes: [u8; 2]) -> i16 {
        match self {
            Endianness::Big => i16::from_be_bytes(bytes),
            Endianness::Little => i16::from_le_bytes(bytes),
        }
    }

    pub(crate) fn i32_from(self, bytes: [u8; 4]) -> i32 {
        match self {
            Endianness::Big => i32::from_be_bytes(bytes),
            Endianness::Little => i32::from_le_bytes(bytes),
        }
    }

    pub(crate) fn f32_from(self, bytes: [u8; 4]) -> f32 {
        match self {
            Endianness::Big => f32::from_be_bytes(bytes),
            Endianness::Little => f32::from_le_bytes(bytes),
        }
    }

    pub(crate) fn f64_from(self, bytes: [u8; 8]) -> f64 {
        match self {
            Endianness::Big => f64::from_be_bytes(bytes),
            Endianness::Little => f64::from_le_bytes(bytes),
        }
    }
}

/// Find the start of the descriptor block.
///
/// The marker must lie entirely within the first
/// [`MARKER_SEARCH_WINDOW`](layout::MARKER_SEARCH_WINDOW) bytes.
///
/// # Errors
/// Returns `FormatError::MissingMarker` when no marker is present.
pub fn locate_marker(buf: &[u8]) -> Result<usize, FormatError> {
    let window = &buf[..buf.len().min(layout::MARKER_SEARCH_WINDOW)];
    window
        .windows(layout::MARKER.len())
        .position(|candidate| candidate == layout::MARKER)
        .ok_or(FormatError::MissingMarker {
            window: layout::MARKER_SEARCH_WINDOW,
        })
}

/// Bounds-checked field access relative to the descriptor marker.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    base: usize,
    order: Endianness,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a [u8], base: usize, order: Endianness) -> Self {
        Self { buf, base, order }
    }

    /// Reader over the same buffer with a resolved byte order.
    pub fn with_order(&self, order: Endianness) -> Self {
        Self {
            buf: self.buf,
            base: self.base,
            order,
        }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), WaveError> {
        self.read_slice(0, needed).map(|_| ())
    }

    pub fn read_slice(&self, offset: usize, len: usize) -> Result<&'a [u8], WaveError> {
        let start = self.base.checked_add(offset);
        let end = start.and_then(|start| start.checked_add(len));
        match (start, end) {
            (Some(start), Some(end)) if end <= self.buf.len() => Ok(&self.buf[start..end]),
            (_, end) => Err(WaveError::OutOfRange {
                needed: end.unwrap_or(usize::MAX),
                actual: self.buf.len(),
            }),
        }
    }

    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], WaveError> {
        let bytes = self.read_slice(offset, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, WaveError> {
        self.read_array::<1>(offset).map(|[b]| b)
    }

    pub fn read_u16(&self, offset: usize) -> Result<u16, WaveError> {
        Ok(self.order.u16_from(self.read_array(offset)?))
    }

    pub fn read_i16(&self, offset: usize) -> Result<i16, WaveError> {
        Ok(self.order.i16_from(self.read_array(offset)?))
    }

    pub fn read_i32(&self, offset: usize) -> Result<i32, WaveError> {
        Ok(self.order.i32_from(self.read_array(offset)?))
    }

    pub fn read_f32(&self, offset: usize) -> Result<f32, WaveError> {
        Ok(self.order.f32_from(self.read_array(offset)?))
    }

    pub fn read_f64(&self, offset: usize) -> Result<f64, WaveError> {
        Ok(self.order.f64_from(self.read_array(offset)?))
    }

    /// Fixed-length ASCII text. Padding is kept as stored.
    pub fn read_ascii(
        &self,
        offset: usize,
        len: usize,
        field: &'static str,
    ) -> Result<String, WaveError> {
        let bytes = self.read_slice(offset, len)?;
        if !bytes.is_ascii() {
            return Err(FormatError::NonAsciiText { field }.into());
        }
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{Endianness, FieldReader, locate_marker};
    use crate::wavedesc::error::{FormatError, WaveError};

    #[test]
    fn locate_marker_at_start() {
        let buf = b"WAVEDESC\0\0";
        assert_eq!(locate_marker(buf).unwrap(), 0);
    }

    #[test]
    fn locate_marker_after_prefix() {
        let mut buf = b"#9000000123".to_vec();
        buf.extend_from_slice(b"WAVEDESC");
        assert_eq!(locate_marker(&buf).unwrap(), 11);
    }

    #[test]
    fn locate_marker_outside_window() {
        let mut buf = vec![b' '; 45];
        buf.extend_from_slice(b"WAVEDESC");
        let err = locate_marker(&buf).unwrap_err();
        assert_eq!(err, FormatError::MissingMarker { window: 50 });
    }

    #[test]
    fn locate_marker_in_short_buffer() {
        assert!(locate_marker(b"WAVE").is_err());
        assert!(locate_marker(b"").is_err());
    }

    #[test]
    fn selector_zero_is_big_endian() {
        assert_eq!(Endianness::from_selector(0), Endianness::Big);
        assert_eq!(Endianness::from_selector(1), Endianness::Little);
        assert_eq!(Endianness::from_selector(0x0100), Endianness::Little);
    }

    #[test]
    fn reads_are_relative_to_base() {
        let buf = [0xff, 0xff, 0x12, 0x34];
        let big = FieldReader::new(&buf, 2, Endianness::Big);
        assert_eq!(big.read_u16(0).unwrap(), 0x1234);
        let little = big.with_order(Endianness::Little);
        assert_eq!(little.read_u16(0).unwrap(), 0x3412);
        assert_eq!(little.read_u8(1).unwrap(), 0x34);
    }

    #[test]
    fn signed_and_float_reads() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(-2i16).to_le_bytes());
        buf.extend_from_slice(&(-70_000i32).to_le_bytes());
        buf.extend_from_slice(&1.5f32.to_le_bytes());
        buf.extend_from_slice(&(-0.125f64).to_le_bytes());
        let reader = FieldReader::new(&buf, 0, Endianness::Little);
        assert_eq!(reader.read_i16(0).unwrap(), -2);
        assert_eq!(reader.read_i32(2).unwrap(), -70_000);
        assert_eq!(reader.read_f32(6).unwrap(), 1.5);
        assert_eq!(reader.read_f64(10).unwrap(), -0.125);
    }

    #[test]
    fn read_past_end_is_out_of_range() {
        let buf = [0u8; 10];
        let reader = FieldReader::new(&buf, 4, Endianness::Little);
        let err = reader.read_i32(3).unwrap_err();
        assert_eq!(
            err,
            WaveError::OutOfRange {
                needed: 11,
                actual: 10
            }
        );
        assert!(reader.read_i32(2).is_ok());
    }

    #[test]
    fn read_overflowing_offset_is_out_of_range() {
        let buf = [0u8; 4];
        let reader = FieldReader::new(&buf, 2, Endianness::Little);
        let err = reader.read_slice(usize::MAX - 1, 4).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn ascii_keeps_padding() {
        let buf = *b"LECROY_2_3\0\0\0\0\0\0";
        let reader = FieldReader::new(&buf, 0, Endianness::Big);
        let text = reader.read_ascii(0, 16, "template name").unwrap();
        assert_eq!(text.len(), 16);
        assert!(text.starts_with("LECROY_2_3"));
    }

    #[test]
    fn ascii_rejects_high_bytes() {
        let buf = [b'A', 0xe9, b'B'];
        let reader = FieldReader::new(&buf, 0, Endianness::Big);
        let err = reader.read_ascii(0, 3, "instrument name").unwrap_err();
        assert_eq!(
            err,
            WaveError::Format(FormatError::NonAsciiText {
                field: "instrument name"
            })
        );
    }
}
