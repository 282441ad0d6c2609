//! Stimulus level vectors and their decimal rendering.

/// `count` evenly spaced values over `[start, stop]` (both ends inclusive).
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i + 1 == count {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Round to `decimals` places. Exact ties on the scaled value go to the even
/// neighbour (0.125 → 0.12, 0.375 → 0.38), matching numpy's `round`.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (x * scale).round_ties_even() / scale
}

pub fn luminance_levels(start: f64, stop: f64, count: usize, decimals: u32) -> Vec<f64> {
    linspace(start, stop, count)
        .into_iter()
        .map(|x| round_to(x, decimals))
        .collect()
}

/// Shortest round-trip decimal, always with a fractional part: 0.5 → "0.5",
/// 1.0 → "1.0", 0.33 → "0.33".
pub fn format_level(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

/// Context labels are written as floats ("0.0" / "1.0").
pub fn format_context(c: u8) -> String {
    format!("{c}.0")
}
