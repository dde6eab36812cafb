use crate::models::fund::Fund;

/// Return periods used for the correlation display, shortest first.
pub const RETURN_PERIODS: [&str; 5] = ["1M", "6M", "1Y", "3Y", "5Y"];

/// A fund's trailing returns in [`RETURN_PERIODS`] order.
#[must_use]
pub fn returns_vector(fund: &Fund) -> [Option<f64>; 5] {
    [
        fund.returns_1m,
        fund.returns_6m,
        fund.returns_1y,
        fund.returns_3y,
        fund.returns_5y,
    ]
}

/// Pearson correlation over the positions where both series have a value.
///
/// `None` with fewer than two shared points or when either side has zero
/// variance. The result is clamped to −1..=1.
#[must_use]
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .collect();
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= f64::EPSILON || var_y <= f64::EPSILON {
        return None;
    }
    let r = cov / (var_x.sqrt() * var_y.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Symmetric correlation matrix of the funds' return vectors.
/// The diagonal is `Some(1.0)`.
#[must_use]
pub fn correlation_matrix(funds: &[Fund]) -> Vec<Vec<Option<f64>>> {
    let vectors: Vec<[Option<f64>; 5]> = funds.iter().map(returns_vector).collect();
    let n = vectors.len();
    let mut matrix = vec![vec![None; n]; n];
    for i in 0..n {
        matrix[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&vectors[i], &vectors[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}
