//! Min-max scaling of one bucket of values into [0, 1] for colour emphasis.
//!
//! A bucket is one column within one category (one unit-type of the by-type table, or one
//! metric of one property in the characteristics summary). Buckets are never mixed: the
//! caller passes exactly the values that share a scale.

/// Intensity of every slot relative to the bucket's own positive min and max.
///
/// Slots holding `None`, zero, negative or non-finite values get `None` ("no colour").
/// When the bucket has fewer than two distinct positive values every slot is `None`.
pub fn normalize(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let positive = |v: &Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter().filter_map(positive) {
        min = min.min(v);
        max = max.max(v);
    }

    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return vec![None; values.len()];
    }

    values
        .iter()
        .map(|v| positive(v).map(|x| (x - min) / range))
        .collect()
}

/// Convenience for plain values where zero means "absent".
pub fn normalize_values(values: &[f64]) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    normalize(&wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_map_to_zero_and_one() {
        let got = normalize(&[Some(10.0), Some(20.0), Some(15.0)]);
        assert_eq!(got, vec![Some(0.0), Some(1.0), Some(0.5)]);
    }

    #[test]
    fn empty_bucket_is_empty() {
        assert!(normalize(&[]).is_empty());
    }
}
