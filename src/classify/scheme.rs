//! Named binning schemes.
//!
//! A scheme receives an ascending, non-empty numeric sample and a requested
//! bin count, and returns ascending upper bin edges with the final edge at
//! the sample maximum. Schemes only compute break points; bin assignment and
//! degenerate-edge handling live with the caller.

use once_cell::sync::Lazy;

/// A named algorithm partitioning a numeric sample into ordered bins
pub trait ClassificationScheme: Send + Sync {
    /// Registry name, e.g. `"quantiles"`
    fn name(&self) -> &'static str;

    /// Upper bin edges for `k` bins over an ascending sample.
    ///
    /// `sorted` is non-empty and `k` is between 1 and `sorted.len()`.
    fn break_points(&self, sorted: &[f64], k: usize) -> Vec<f64>;
}

/// Equal-count bins based on sample quantiles
pub struct Quantiles;

impl ClassificationScheme for Quantiles {
    fn name(&self) -> &'static str {
        "quantiles"
    }

    fn break_points(&self, sorted: &[f64], k: usize) -> Vec<f64> {
        (1..=k)
            .map(|i| quantile(sorted, i as f64 / k as f64))
            .collect()
    }
}

/// Linearly interpolated sample quantile
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (position - lower as f64) * (sorted[upper] - sorted[lower])
    }
}

/// Bins of equal value width between the sample minimum and maximum
pub struct EqualInterval;

impl ClassificationScheme for EqualInterval {
    fn name(&self) -> &'static str {
        "equal-interval"
    }

    fn break_points(&self, sorted: &[f64], k: usize) -> Vec<f64> {
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let step = (max - min) / k as f64;

        let mut edges: Vec<f64> = (1..k).map(|i| min + step * i as f64).collect();
        edges.push(max);
        edges
    }
}

/// Jenks natural breaks via the classic Fisher dynamic program over
/// within-class squared deviations
pub struct NaturalBreaks;

impl ClassificationScheme for NaturalBreaks {
    fn name(&self) -> &'static str {
        "natural-breaks"
    }

    fn break_points(&self, sorted: &[f64], k: usize) -> Vec<f64> {
        let n = sorted.len();
        if k >= n {
            return sorted.to_vec();
        }

        // lower_class_limits[l][j]: 1-based index of the first element of the
        // last class in the optimal j-class partition of the first l values
        let mut lower_class_limits = vec![vec![0usize; k + 1]; n + 1];
        let mut variance_combinations = vec![vec![f64::INFINITY; k + 1]; n + 1];
        for j in 1..=k {
            lower_class_limits[1][j] = 1;
            variance_combinations[1][j] = 0.0;
        }

        for l in 2..=n {
            let mut sum = 0.0;
            let mut sum_squares = 0.0;
            let mut count = 0.0;
            let mut variance = 0.0;

            for m in 1..=l {
                let lower = l - m + 1;
                let value = sorted[lower - 1];

                count += 1.0;
                sum += value;
                sum_squares += value * value;
                variance = sum_squares - (sum * sum) / count;

                if lower != 1 {
                    for j in 2..=k {
                        let candidate = variance + variance_combinations[lower - 1][j - 1];
                        if variance_combinations[l][j] >= candidate {
                            lower_class_limits[l][j] = lower;
                            variance_combinations[l][j] = candidate;
                        }
                    }
                }
            }

            lower_class_limits[l][1] = 1;
            variance_combinations[l][1] = variance;
        }

        let mut edges = vec![0.0; k];
        edges[k - 1] = sorted[n - 1];
        let mut remaining = n;
        for j in (2..=k).rev() {
            let lower = lower_class_limits[remaining][j];
            edges[j - 2] = sorted[lower - 2];
            remaining = lower - 1;
        }
        edges
    }
}

/// Built-in schemes, selectable by name
static SCHEMES: Lazy<Vec<Box<dyn ClassificationScheme>>> = Lazy::new(|| {
    vec![
        Box::new(Quantiles),
        Box::new(EqualInterval),
        Box::new(NaturalBreaks),
    ]
});

/// Looks up a registered scheme by its name
pub fn scheme_by_name(name: &str) -> Option<&'static dyn ClassificationScheme> {
    SCHEMES.iter().find(|s| s.name() == name).map(|s| s.as_ref())
}
