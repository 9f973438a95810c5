//! Parallel validation of independent subjects.
//!
//! Every subject gets its own run, exactly as if [`Runner::validate`] had
//! been called on it; only the scheduling differs. Results come back in
//! input order.

use rayon::prelude::*;

use crate::validator::Runner;
use crate::ValidationResult;

impl<C, T, E> Runner<C, T, E>
where
    C: Sync,
    T: Send,
    E: Send,
{
    /// Validates every subject on the rayon thread pool, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the error of one failing declaration block; which one is
    /// unspecified when several fail.
    pub fn try_validate_all(&self, subjects: Vec<T>) -> Result<Vec<ValidationResult<T>>, E> {
        tracing::debug!(subjects = subjects.len(), "validating batch");
        subjects
            .into_par_iter()
            .map(|subject| self.try_validate(subject))
            .collect()
    }
}

impl<C, T> Runner<C, T>
where
    C: Sync,
    T: Send,
{
    /// Validates every subject on the rayon thread pool.
    ///
    /// ```rust
    /// use scrutiny::prelude::*;
    ///
    /// let validator = Validator::new(|root: &Validatable<&i32>| {
    ///     root.map(|n| *n).is_positive();
    /// });
    ///
    /// let results = validator.runner().validate_all(vec![3, -1, 7]);
    /// let outcomes: Vec<bool> = results.iter().map(|r| r.is_success()).collect();
    /// assert_eq!(outcomes, vec![true, false, true]);
    /// ```
    pub fn validate_all(&self, subjects: Vec<T>) -> Vec<ValidationResult<T>> {
        tracing::debug!(subjects = subjects.len(), "validating batch");
        subjects
            .into_par_iter()
            .map(|subject| self.validate(subject))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_results_keep_input_order() {
        let validator = Validator::new(|root: &Validatable<&String>| {
            root.map(|s| s.as_str()).has_length_at_most(3);
        });

        let subjects: Vec<String> = (0..200).map(|n| "x".repeat(n % 6)).collect();
        let results = validator.runner().validate_all(subjects.clone());

        assert_eq!(results.len(), subjects.len());
        for (subject, result) in subjects.iter().zip(&results) {
            assert_eq!(result.is_success(), subject.len() <= 3, "{subject}");
        }
    }

    #[test]
    fn test_error_stops_batch() {
        let validator = Validator::try_new(|root: &Validatable<&i32>| {
            if *root.get() == 13 {
                Err("unlucky")
            } else {
                Ok(())
            }
        });

        let runner = validator.runner();
        assert_eq!(runner.try_validate_all(vec![1, 13, 2]).unwrap_err(), "unlucky");
        assert_eq!(runner.try_validate_all(vec![1, 2]).unwrap().len(), 2);
    }
}
