use thiserror::Error;

/// Layout violations found while decoding a WAVEDESC capture.
///
/// # Examples
/// ```
/// use wavedesc_core::FormatError;
///
/// let err = FormatError::UndefinedTimebase { code: 75 };
/// assert!(err.to_string().contains("undefined timebase code"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("WAVEDESC marker not found in the first {window} bytes")]
    MissingMarker { window: usize },
    #[error("{field} index {index} out of range (table has {len} entries)")]
    EnumOutOfRange {
        field: &'static str,
        index: u16,
        len: usize,
    },
    #[error("undefined timebase code: {code}")]
    UndefinedTimebase { code: u16 },
    #[error("odd sample block length for 16-bit samples: {length}")]
    OddSampleBlock { length: usize },
    #[error("negative {field}: {value}")]
    NegativeLength { field: &'static str, value: i32 },
    #[error("{field} is not ASCII text")]
    NonAsciiText { field: &'static str },
    #[error("sample count mismatch: header declares {header}, block holds {samples}")]
    SampleCountMismatch { header: usize, samples: usize },
}

/// Error returned by [`decode_waveform`](crate::decode_waveform).
///
/// Both kinds are terminal: no partial waveform is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaveError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error("read out of range: need {needed} bytes, got {actual}")]
    OutOfRange { needed: usize, actual: usize },
}

impl WaveError {
    pub fn is_format(&self) -> bool {
        matches!(self, WaveError::Format(_))
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, WaveError::OutOfRange { .. })
    }
}
