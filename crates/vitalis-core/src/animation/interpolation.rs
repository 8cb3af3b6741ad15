//! Piecewise-linear mapping from an animated value to a derived quantity.

/// Map `x` through the stops `input` → `output`, holding the endpoint
/// outputs outside the input range.
///
/// `input` must be non-decreasing. Extra stops on the longer slice are
/// ignored.
#[must_use]
pub fn interpolate(x: f64, input: &[f64], output: &[f64]) -> f64 {
    let n = input.len().min(output.len());
    match n {
        0 => return x,
        1 => return output[0],
        _ => {}
    }
    if x <= input[0] {
        return output[0];
    }
    if x >= input[n - 1] {
        return output[n - 1];
    }
    let seg = input[1..n - 1]
        .iter()
        .position(|&stop| x < stop)
        .unwrap_or(n - 2);
    let (x0, x1) = (input[seg], input[seg + 1]);
    let (y0, y1) = (output[seg], output[seg + 1]);
    if (x1 - x0).abs() <= f64::EPSILON {
        return y1;
    }
    (y1 - y0).mul_add((x - x0) / (x1 - x0), y0)
}
