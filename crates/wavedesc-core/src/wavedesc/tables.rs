//! Enumerated descriptor fields stored as 16-bit table indices.
//!
//! Labels are reproduced exactly as instruments document them, including the
//! two `GND` coupling entries and the `Unknown` wave source.

use std::fmt;

use super::error::FormatError;

macro_rules! indexed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn from_index(index: u16) -> Result<Self, FormatError> {
                Self::ALL
                    .get(index as usize)
                    .copied()
                    .ok_or(FormatError::EnumOutOfRange {
                        field: $field,
                        index,
                        len: Self::ALL.len(),
                    })
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

indexed_enum! {
    /// `RECORD_TYPE`.
    RecordType, "record type" {
        SingleSweep => "single_sweep",
        Interleaved => "interleaved",
        Histogram => "histogram",
        Graph => "graph",
        FilterCoefficient => "filter_coefficient",
        Complex => "complex",
        Extrema => "extrema",
        SequenceObsolete => "sequence_obsolete",
        CenteredRis => "centered_RIS",
        PeakDetect => "peak_detect",
    }
}

indexed_enum! {
    /// `PROCESSING_DONE`.
    ProcessingKind, "processing kind" {
        NoProcessing => "No Processing",
        FirFilter => "FIR Filter",
        Interpolated => "interpolated",
        Sparsed => "sparsed",
        Autoscaled => "autoscaled",
        NoResult => "no_result",
        Rolling => "rolling",
        Cumulative => "cumulative",
    }
}

indexed_enum! {
    /// `VERT_COUPLING`.
    VerticalCoupling, "vertical coupling" {
        Dc50 => "DC50",
        Ground => "GND",
        Dc1M => "DC1M",
        GroundAlt => "GND",
        Ac1M => "AC1M",
    }
}

indexed_enum! {
    /// `BANDWIDTH_LIMIT`.
    BandwidthLimit, "bandwidth limit" {
        Off => "off",
        On => "on",
    }
}

indexed_enum! {
    /// `WAVE_SOURCE`.
    WaveSource, "wave source" {
        Channel1 => "Channel 1",
        Channel2 => "Channel 2",
        Channel3 => "Channel 3",
        Channel4 => "Channel 4",
        Unknown => "Unknown",
    }
}
