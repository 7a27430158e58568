//! Aggregate statistics over samples and over summarized groups.
//!
//! Every function returns `None` when there is nothing to aggregate,
//! which is distinct from a zero result.  Other degenerate inputs (a
//! zero mean for [`cv`], for example) give non-finite values, as
//! plain floating-point division does.

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() { return None }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation (the sum of squared deviations is
/// divided by N, not N - 1).
pub fn std_dev(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    let dev: f64 = xs.iter().map(|x| (x - m).powi(2)).sum();
    Some((dev / xs.len() as f64).sqrt())
}

/// Coefficient of variation, `std_dev / mean`.
pub fn cv(xs: &[f64]) -> Option<f64> {
    Some(std_dev(xs)? / mean(xs)?)
}

/// Coefficient of variation as a percentage.
pub fn cv_percent(xs: &[f64]) -> Option<f64> {
    cv(xs).map(|cv| cv * 100.)
}

/// The `p`-quantile, `p` ∈ \[0, 1\], interpolating linearly between
/// the two closest ranks.  Returns `None` if `xs` is empty or `p` is
/// outside \[0, 1\].
pub fn percentile(xs: &[f64], p: f64) -> Option<f64> {
    if xs.is_empty() || !(0. ..= 1.).contains(&p) { return None }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let k = (sorted.len() - 1) as f64 * p;
    let (f, c) = (k.floor(), k.ceil());
    if f == c {
        Some(sorted[k as usize])
    } else {
        Some(sorted[f as usize] * (c - k) + sorted[c as usize] * (k - f))
    }
}

#[inline]
pub fn median(xs: &[f64]) -> Option<f64> { percentile(xs, 0.5) }


/// What is known of a sub-population whose samples are not kept: its
/// size, mean and possibly standard deviation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation, if measured.
    pub stdev: Option<f64>,
}

impl SampleSummary {
    #[inline]
    pub fn new(count: usize, mean: f64) -> Self {
        SampleSummary { count, mean, stdev: None }
    }

    #[inline]
    pub fn with_stdev(count: usize, mean: f64, stdev: f64) -> Self {
        SampleSummary { count, mean, stdev: Some(stdev) }
    }

    /// Summarize `xs`; `None` if it is empty.
    pub fn from_samples(xs: &[f64]) -> Option<Self> {
        Some(SampleSummary { count: xs.len(), mean: mean(xs)?,
                             stdev: std_dev(xs) })
    }
}

impl From<(usize, f64)> for SampleSummary {
    fn from((count, mean): (usize, f64)) -> Self {
        SampleSummary::new(count, mean)
    }
}

impl From<(usize, f64, f64)> for SampleSummary {
    fn from((count, mean, stdev): (usize, f64, f64)) -> Self {
        SampleSummary::with_stdev(count, mean, stdev)
    }
}

/// Collect the groups and their total count; `None` if the total is 0.
fn collect<I>(groups: I) -> Option<(Vec<SampleSummary>, f64)>
where I: IntoIterator, I::Item: Into<SampleSummary> {
    let groups: Vec<SampleSummary> =
        groups.into_iter().map(Into::into).collect();
    let total = groups.iter().map(|g| g.count).sum::<usize>();
    if total == 0 { return None }
    Some((groups, total as f64))
}

/// Count-weighted mean of the groups' means (the weights are the
/// fractions `count / total` so that a single group gives back its
/// mean exactly).
fn pooled_mean(groups: &[SampleSummary], total: f64) -> f64 {
    groups.iter().map(|g| g.count as f64 / total * g.mean).sum()
}

/// Pooled population variance: weighted within-group variance plus
/// the spread of the group means around the pooled mean.  The second
/// term equals Σ_{i<j} nᵢ nⱼ (mᵢ - mⱼ)² / N².
fn pooled_variance(groups: &[SampleSummary], total: f64) -> Option<f64> {
    let m = pooled_mean(groups, total);
    let mut within = 0.;
    let mut between = 0.;
    for g in groups {
        let w = g.count as f64 / total;
        within += w * g.stdev?.powi(2);
        between += w * (g.mean - m).powi(2);
    }
    Some(within + between)
}

/// Mean of the union of independently measured groups, each given as
/// `(count, mean)` (or anything convertible to [`SampleSummary`]).
///
/// `None` if there are no groups or they are all empty.
///
/// # Example
///
/// ```
/// use colorstat::stats::combined_independent_mean;
/// let m = combined_independent_mean([(10, 5.0), (20, 8.0)]).unwrap();
/// assert!((m - 7.0).abs() < 1e-12);
/// ```
pub fn combined_independent_mean<I>(groups: I) -> Option<f64>
where I: IntoIterator, I::Item: Into<SampleSummary> {
    let (groups, total) = collect(groups)?;
    Some(pooled_mean(&groups, total))
}

/// Population standard deviation of the union of independently
/// measured groups, each given as `(count, mean, stdev)`.
///
/// `None` if there are no groups, they are all empty, or one of them
/// has no standard deviation.
pub fn combined_independent_std_dev<I>(groups: I) -> Option<f64>
where I: IntoIterator, I::Item: Into<SampleSummary> {
    let (groups, total) = collect(groups)?;
    Some(pooled_variance(&groups, total)?.sqrt())
}

/// Summary of the union of the groups.  The standard deviation is
/// present only if every group has one.
pub fn combine<I>(groups: I) -> Option<SampleSummary>
where I: IntoIterator, I::Item: Into<SampleSummary> {
    let (groups, total) = collect(groups)?;
    Some(SampleSummary {
        count: total as usize,
        mean: pooled_mean(&groups, total),
        stdev: pooled_variance(&groups, total).map(f64::sqrt),
    })
}
