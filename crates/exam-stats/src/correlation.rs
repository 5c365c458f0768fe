/// Pearson correlation coefficient of paired samples.
///
/// Returns `f64::NAN` when fewer than two pairs are given or when either side
/// has zero variance. The result is clamped to `[-1.0, 1.0]`.
///
/// The coefficient is computed from centred sums, which keeps `pearson(x, x)`
/// within a few ULPs of `1.0` for non-constant `x`.
///
/// # Examples
///
/// ```
/// # use exam_stats::correlation::pearson;
/// let pairs = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
/// assert!((pearson(pairs) - 1.0).abs() < 1e-12);
///
/// let constant = [(1.0, 5.0), (2.0, 5.0), (3.0, 5.0)];
/// assert!(pearson(constant).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let pairs = pairs.into_iter().collect::<Vec<_>>();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_negative() {
        let r = pearson([(1.0, 10.0), (2.0, 8.0), (3.0, 6.0), (4.0, 4.0)]);
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_self_correlation_is_one() {
        let xs = [35.0, 71.0, 64.0, 88.0, 12.0, 49.5, 90.0];
        let r = pearson(xs.iter().map(|&x| (x, x)));
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_uncorrelated() {
        let r = pearson([(1.0, 1.0), (2.0, -1.0), (3.0, -1.0), (4.0, 1.0)]);
        assert!(r.abs() < 1e-12);
    }

    #[test]
    fn test_insufficient_pairs() {
        assert!(pearson([]).is_nan());
        assert!(pearson([(1.0, 2.0)]).is_nan());
    }

    #[test]
    fn test_known_value() {
        // x = 1..5, y = 2, 4, 5, 4, 5 -> r = 0.7745966...
        let r = pearson([(1.0, 2.0), (2.0, 4.0), (3.0, 5.0), (4.0, 4.0), (5.0, 5.0)]);
        assert!((r - 0.774_596_669_241_483_4).abs() < 1e-9);
    }
}
