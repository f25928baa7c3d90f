pub fn mean(data: &[f32]) -> f32 {
    data.iter().fold(0.0, |acc, x| acc + x) / (data.len() as f32)
}

/// Clips `value` into `[low, high]`, lower bound first.
///
/// Unlike `Ord::clamp` this does not panic when `low > high`: the
/// upper bound wins, so `clip(5, 0, -3) == -3`.
pub fn clip<T: PartialOrd>(value: T, low: T, high: T) -> T {
    let value = if value < low { low } else { value };
    if value > high {
        high
    } else {
        value
    }
}
