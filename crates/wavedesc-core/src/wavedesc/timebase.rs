use std::fmt;

use super::error::FormatError;

const PREFIXES: [&str; 6] = ["p", "n", "u", "m", "", "k"];
const PREFIX_SCALE: [f64; 6] = [1e-12, 1e-9, 1e-6, 1e-3, 1.0, 1e3];
const MANTISSAS: [u16; 9] = [1, 2, 5, 10, 20, 50, 100, 200, 500];

/// The kilo tier stops at 5 ks/div.
const FIXED_CODES: u16 = 48;
const EXTERNAL_CODE: u16 = 100;

/// Horizontal setting decoded from the `TIMEBASE` code.
///
/// Codes `0..48` step through 1-2-5 decades from 1 ps/div to 5 ks/div;
/// `100` and above mean an external clock.
///
/// # Examples
/// ```
/// use wavedesc_core::Timebase;
///
/// assert_eq!(Timebase::from_code(9).unwrap().label(), "1 ns/div");
/// assert_eq!(Timebase::from_code(100).unwrap().label(), "EXTERNAL");
/// assert!(Timebase::from_code(75).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timebase {
    PerDivision { code: u16 },
    External { code: u16 },
}

impl Timebase {
    pub fn from_code(code: u16) -> Result<Self, FormatError> {
        if code < FIXED_CODES {
            Ok(Timebase::PerDivision { code })
        } else if code >= EXTERNAL_CODE {
            Ok(Timebase::External { code })
        } else {
            Err(FormatError::UndefinedTimebase { code })
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Timebase::PerDivision { code } | Timebase::External { code } => code,
        }
    }

    fn parts(code: u16) -> (usize, usize) {
        let code = code as usize;
        (code / MANTISSAS.len(), code % MANTISSAS.len())
    }

    pub fn label(self) -> String {
        match self {
            Timebase::PerDivision { code } => {
                let (group, mantissa) = Self::parts(code);
                format!("{} {}s/div", MANTISSAS[mantissa], PREFIXES[group])
            }
            Timebase::External { .. } => "EXTERNAL".to_string(),
        }
    }

    /// Time per division in seconds; `None` for an external clock.
    pub fn seconds_per_division(self) -> Option<f64> {
        match self {
            Timebase::PerDivision { code } => {
                let (group, mantissa) = Self::parts(code);
                Some(MANTISSAS[mantissa] as f64 * PREFIX_SCALE[group])
            }
            Timebase::External { .. } => None,
        }
    }
}

impl fmt::Display for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
