/// Evenly spaced time values from `0` to `count * interval` inclusive,
/// shifted by `offset`.
///
/// # Examples
/// ```
/// use wavedesc_core::build_time_axis;
///
/// assert_eq!(build_time_axis(3, 1.0, 10.0), vec![10.0, 11.5, 13.0]);
/// assert_eq!(build_time_axis(1, 1.0, 10.0), vec![10.0]);
/// assert!(build_time_axis(0, 1.0, 10.0).is_empty());
/// ```
pub fn build_time_axis(count: usize, interval: f64, offset: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![offset],
        _ => {
            let stop = count as f64 * interval;
            let step = stop / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let t = if i == count - 1 { stop } else { i as f64 * step };
                    t + offset
                })
                .collect()
        }
    }
}
