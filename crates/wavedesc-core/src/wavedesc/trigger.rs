use std::fmt;

use time::{Date, Month, PrimitiveDateTime, Time};

/// `TRIGGER_TIME` as stored: seconds with fraction plus calendar fields.
///
/// `Display` renders `YYYY-MM-DD HH:MM:SS.ss`.
///
/// # Examples
/// ```
/// use wavedesc_core::TriggerTime;
///
/// let ts = TriggerTime {
///     seconds: 7.5,
///     minutes: 4,
///     hours: 13,
///     days: 2,
///     months: 9,
///     year: 2021,
/// };
/// assert_eq!(ts.to_string(), "2021-09-02 13:04:7.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerTime {
    pub seconds: f64,
    pub minutes: u8,
    pub hours: u8,
    pub days: u8,
    pub months: u8,
    pub year: i16,
}

impl TriggerTime {
    /// Structured timestamp, or `None` when the stored fields are not a valid
    /// calendar date and time of day.
    pub fn to_datetime(&self) -> Option<PrimitiveDateTime> {
        if !self.seconds.is_finite() || self.seconds < 0.0 || self.seconds >= 60.0 {
            return None;
        }
        let whole = self.seconds.trunc();
        let nanos = ((self.seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
        let month = Month::try_from(self.months).ok()?;
        let date = Date::from_calendar_date(self.year as i32, month, self.days).ok()?;
        let time = Time::from_hms_nano(self.hours, self.minutes, whole as u8, nanos).ok()?;
        Some(PrimitiveDateTime::new(date, time))
    }
}

impl fmt::Display for TriggerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {:02}:{:02}:{:.2}",
            self.year, self.months, self.days, self.hours, self.minutes, self.seconds
        )
    }
}
