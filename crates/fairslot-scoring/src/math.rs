//! Population statistics over per-team arrays.

/// Sum of `values`.
pub fn sum<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    values.iter().map(|&v| v.into()).sum()
}

/// Arithmetic mean, or 0 for an empty slice.
pub fn average<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Population standard deviation (divides by the number of values).
///
/// # Example
///
/// ```
/// use fairslot_scoring::math::stdev;
///
/// assert_eq!(stdev(&[2u32, 4, 4, 4, 5, 5, 7, 9]), 2.0);
/// assert_eq!(stdev(&[3u32, 3, 3]), 0.0);
/// ```
pub fn stdev<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = average(values);
    let variance = values
        .iter()
        .map(|&v| {
            let d = v.into() - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
