use crate::error::BayesError;

/// Equal-width binning of every column into `bins` integer codes.
///
/// A value maps to `floor(bins * (v - min) / (max - min))`, clamped to
/// `bins - 1` so the column maximum lands in the last bin. Constant columns
/// map to bin 0.
pub fn discretize(rows: &[Vec<f64>], bins: usize) -> Result<Vec<Vec<usize>>, BayesError> {
    if bins == 0 {
        return Err(BayesError::InvalidBinCount(bins));
    }
    let width = rows.first().map_or(0, |r| r.len());
    for (row, values) in rows.iter().enumerate() {
        if values.len() != width {
            return Err(BayesError::RowWidth {
                row,
                expected: width,
                actual: values.len(),
            });
        }
    }

    let mut min = vec![f64::INFINITY; width];
    let mut max = vec![f64::NEG_INFINITY; width];
    for values in rows {
        for (c, &v) in values.iter().enumerate() {
            min[c] = min[c].min(v);
            max[c] = max[c].max(v);
        }
    }

    let scale = bins as f64;
    Ok(rows
        .iter()
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(c, &v)| {
                    let range = max[c] - min[c];
                    if range <= 0.0 {
                        return 0;
                    }
                    let bin = (scale * (v - min[c]) / range).floor();
                    (bin as usize).min(bins - 1)
                })
                .collect()
        })
        .collect())
}
