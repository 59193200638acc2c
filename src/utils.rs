use crate::errors::DecTreeError;

// Validation
pub fn validate_num_threads(num_threads: Option<usize>) -> Result<(), DecTreeError> {
    match num_threads {
        Some(0) => Err(DecTreeError::InvalidParameter(
            "num_threads".to_string(),
            "None or a positive number".to_string(),
            "0".to_string(),
        )),
        _ => Ok(()),
    }
}

pub fn validate_column_index(column_index: usize, n_columns: usize) -> Result<(), DecTreeError> {
    if column_index < n_columns {
        Ok(())
    } else {
        Err(DecTreeError::ColumnOutOfRange(column_index, n_columns))
    }
}

/// Shannon entropy, in bits, of a distribution given as counts.
///
/// Only nonzero counters contribute. An empty distribution has zero entropy.
#[inline]
pub fn entropy(counters: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    counters
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let probability = count as f64 / total;
            -probability * probability.log2()
        })
        .sum()
}

/// Index of the largest counter. Ties go to the lowest index.
#[inline]
pub fn max_index(counters: &[usize]) -> usize {
    let mut max_index = 0;
    for (i, &count) in counters.iter().enumerate().skip(1) {
        if count > counters[max_index] {
            max_index = i;
        }
    }
    max_index
}

#[inline]
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let p = (10.0_f64).powi(precision);
    (n * p).round() / p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round() {
        assert_eq!(0.3, precision_round(0.3333, 1));
        assert_eq!(0.2343, precision_round(0.2343123123123, 4));
    }

    #[test]
    fn test_entropy_pure_and_uniform() {
        assert_eq!(entropy(&[0, 5, 0], 5), 0.0);
        assert_eq!(entropy(&[2, 2], 4), 1.0);
        assert_eq!(entropy(&[1, 1, 1, 1], 4), 2.0);
        assert_eq!(entropy(&[0, 0], 0), 0.0);
        assert_eq!(precision_round(entropy(&[9, 5], 14), 3), 0.94);
    }

    #[test]
    fn test_entropy_bounds() {
        let distributions: Vec<Vec<usize>> = vec![vec![1, 2, 3], vec![10, 1], vec![0, 7, 7, 0, 1], vec![3], vec![5, 0, 5]];
        for counters in distributions {
            let total = counters.iter().sum();
            let nonzero = counters.iter().filter(|&&c| c > 0).count();
            let h = entropy(&counters, total);
            assert!(h >= 0.0);
            assert!(h <= (nonzero as f64).log2() + 1e-12);
            assert_eq!(h == 0.0, nonzero == 1);
        }
    }

    #[test]
    fn test_max_index_ties_lowest() {
        assert_eq!(max_index(&[3, 5, 5, 1]), 1);
        assert_eq!(max_index(&[4, 4]), 0);
        assert_eq!(max_index(&[0, 0, 1]), 2);
        assert_eq!(max_index(&[2, 1, 3, 0]), 2);
        assert_eq!(max_index(&[7]), 0);
        assert_eq!(max_index(&[]), 0);
    }

    #[test]
    fn test_validation() {
        assert!(validate_num_threads(None).is_ok());
        assert!(validate_num_threads(Some(3)).is_ok());
        assert!(validate_num_threads(Some(0)).is_err());
        assert!(validate_column_index(1, 2).is_ok());
        assert!(matches!(validate_column_index(2, 2), Err(DecTreeError::ColumnOutOfRange(2, 2))));
    }
}
