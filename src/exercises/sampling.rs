//! Sample Generation Module
//! Evenly spaced sample points over fixed intervals (1-D and 2-D).

/// Evenly spaced samples over `[start, end]`, both endpoints included.
///
/// Matches NumPy's `linspace`: a single sample yields `[start]`, zero samples
/// yields an empty vector, and the last sample is exactly `end`.
pub fn linspace(start: f64, end: f64, samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Square sample grid over `[start, end]²`.
///
/// Returns the x axis, the y axis and the row-major values with
/// `values[j * xs.len() + i] == f(xs[i], ys[j])`.
pub fn meshgrid<F>(start: f64, end: f64, samples_per_axis: usize, f: F) -> (Vec<f64>, Vec<f64>, Vec<f64>)
where
    F: Fn(f64, f64) -> f64,
{
    let xs = linspace(start, end, samples_per_axis);
    let ys = xs.clone();

    let values = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();

    (xs, ys, values)
}
