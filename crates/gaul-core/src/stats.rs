/// Summary statistics over a set of fitness values, matching the library
/// surface named in the external-interfaces section (mean, stddev, median,
/// variance, kurtosis, skew). Computed over the live, evaluated entities'
/// fitness values only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitnessStats {
    pub mean: f64,
    pub variance: f64,
    pub stddev: f64,
    pub median: f64,
    pub skew: f64,
    pub kurtosis: f64,
}

/// Computes [`FitnessStats`] over `values`, or `None` if empty.
pub fn summarize(values: &[f64]) -> Option<FitnessStats> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if sorted.len() % 2 == 0 {
        let mid = sorted.len() / 2;
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    let (skew, kurtosis) = if stddev == 0.0 {
        (0.0, 0.0)
    } else {
        let skew = values
            .iter()
            .map(|v| ((v - mean) / stddev).powi(3))
            .sum::<f64>()
            / n;
        let kurtosis = values
            .iter()
            .map(|v| ((v - mean) / stddev).powi(4))
            .sum::<f64>()
            / n
            - 3.0;
        (skew, kurtosis)
    };

    Some(FitnessStats {
        mean,
        variance,
        stddev,
        median,
        skew,
        kurtosis,
    })
}
