use crate::maximum_flow::error::FlowError;
use num_traits::Float;
use std::cmp::Ordering;

pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Tolerant comparison of flow values.
///
/// Two values closer than `epsilon` compare equal. This relation is not transitive:
/// `a ~ b` and `b ~ c` does not imply `a ~ c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonComparator<Flow> {
    epsilon: Flow,
}

impl<Flow> EpsilonComparator<Flow>
where
    Flow: Float,
{
    pub fn new(epsilon: Flow) -> Result<Self, FlowError> {
        if epsilon.is_nan() || epsilon < Flow::zero() {
            return Err(FlowError::NegativeEpsilon);
        }
        Ok(Self { epsilon })
    }

    #[inline]
    pub fn epsilon(&self) -> Flow {
        self.epsilon
    }

    #[inline]
    pub fn compare(&self, a: Flow, b: Flow) -> Ordering {
        if (a - b).abs() < self.epsilon {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    #[inline]
    pub fn is_zero(&self, a: Flow) -> bool {
        self.compare(a, Flow::zero()) == Ordering::Equal
    }

    #[inline]
    pub fn is_positive(&self, a: Flow) -> bool {
        self.compare(a, Flow::zero()) == Ordering::Greater
    }
}

impl<Flow> Default for EpsilonComparator<Flow>
where
    Flow: Float,
{
    fn default() -> Self {
        Self { epsilon: Flow::from(DEFAULT_EPSILON).unwrap_or_else(Flow::epsilon) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cmp() -> EpsilonComparator<f64> {
        EpsilonComparator::default()
    }

    #[rstest]
    #[case(1.0, 1.0)]
    #[case(1.0, 1.0 + 1e-10)]
    #[case(0.0, -5e-10)]
    #[case(3.0, 3.0 - 9.9e-10)]
    fn values_within_tolerance_are_equal(cmp: EpsilonComparator<f64>, #[case] a: f64, #[case] b: f64) {
        assert_eq!(cmp.compare(a, b), Ordering::Equal);
        assert_eq!(cmp.compare(b, a), Ordering::Equal);
    }

    #[rstest]
    #[case(1.0, 2.0)]
    #[case(0.0, 1e-8)]
    #[case(-3.0, 3.0)]
    fn compare_is_antisymmetric_outside_tolerance(cmp: EpsilonComparator<f64>, #[case] a: f64, #[case] b: f64) {
        assert_eq!(cmp.compare(a, b), Ordering::Less);
        assert_eq!(cmp.compare(b, a), Ordering::Greater);
    }

    #[rstest]
    fn tolerance_is_not_transitive(cmp: EpsilonComparator<f64>) {
        let (a, b, c) = (0.0, 0.6e-9, 1.2e-9);
        assert_eq!(cmp.compare(a, b), Ordering::Equal);
        assert_eq!(cmp.compare(b, c), Ordering::Equal);
        assert_eq!(cmp.compare(a, c), Ordering::Less);
    }

    #[test]
    fn zero_epsilon_never_reports_equal() {
        let cmp = EpsilonComparator::new(0.0).unwrap();
        assert_eq!(cmp.compare(1.0, 1.0), Ordering::Greater);
        assert_eq!(cmp.compare(1.0, 1.0 + f64::EPSILON), Ordering::Less);
    }

    #[rstest]
    #[case(-1e-12)]
    #[case(f64::NAN)]
    fn rejects_invalid_epsilon(#[case] epsilon: f64) {
        assert_eq!(EpsilonComparator::new(epsilon), Err(FlowError::NegativeEpsilon));
    }

    #[rstest]
    fn sign_helpers(cmp: EpsilonComparator<f64>) {
        assert!(cmp.is_zero(1e-12));
        assert!(!cmp.is_positive(1e-12));
        assert!(cmp.is_positive(1e-6));
        assert!(!cmp.is_zero(-1e-6));
    }
}
