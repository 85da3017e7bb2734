//! Axis-aligned guard boxes over the augmented (state, clock) space.
//!
//! Per design note "Guard projection": treated as a first-class type with
//! explicit spatial/temporal projections, rather than overloading a
//! general set representation.

/// An axis-aligned box `[lower_i, upper_i]` over the augmented vector. The
/// last coordinate is always the clock dimension (input constraint: "the
/// last dimension of every mode's state is the clock").
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl BoundingBox {
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        assert_eq!(lower.len(), upper.len(), "bounding box bounds must agree in dimension");
        assert!(
            lower.iter().zip(&upper).all(|(l, u)| l <= u),
            "bounding box lower bound must not exceed upper bound"
        );
        Self { lower, upper }
    }

    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// The projection onto all but the last (clock) dimension.
    pub fn spatial_projection(&self) -> BoundingBox {
        let n = self.dim() - 1;
        BoundingBox::new(self.lower[..n].to_vec(), self.upper[..n].to_vec())
    }

    /// The projection onto the clock dimension, as `(t_min, t_max)`.
    pub fn temporal_projection(&self) -> (f64, f64) {
        (self.lower[self.dim() - 1], self.upper[self.dim() - 1])
    }

    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(xi, (l, u))| *xi >= *l && *xi <= *u)
    }
}

/// A guard as supplied by the caller's hybrid automaton. The core only
/// understands axis-aligned boxes; a caller whose guard representation
/// cannot be expressed as one causes
/// [`tha_utils::BuildError::UnsupportedGuardShape`](tha_utils::BuildError)
/// during the switching-transition build.
pub trait GuardShape {
    fn as_bounding_box(&self) -> Option<BoundingBox>;
}

impl GuardShape for BoundingBox {
    fn as_bounding_box(&self) -> Option<BoundingBox> {
        Some(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_split_state_and_clock() {
        let guard = BoundingBox::new(vec![0.4, 0.0], vec![0.6, 0.0]);
        let spatial = guard.spatial_projection();
        assert_eq!(spatial.lower, vec![0.4]);
        assert_eq!(spatial.upper, vec![0.6]);
        assert_eq!(guard.temporal_projection(), (0.0, 0.0));
    }

    #[test]
    fn contains_checks_all_dimensions() {
        let guard = BoundingBox::new(vec![0.0, 0.0], vec![1.0, 2.0]);
        assert!(guard.contains(&[0.5, 1.0]));
        assert!(!guard.contains(&[1.5, 1.0]));
    }
}
