//! Expansion step schedule derivation.

use poly_clip::OFFSET_SHORTEST_EDGE_FACTOR;
use poly_types::scale;

use crate::error::{ExpandError, ExpandResult};

/// Discretized step schedule and offsetter tolerances for one expansion.
///
/// Built once per expansion via [`ExpansionParameters::build`] and treated
/// as immutable afterwards. All distances are in scaled coordinate units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionParameters {
    /// Initial nudge of the source outline so it reliably overlaps the
    /// boundary before seeds are extracted.
    pub tiny_expansion: f64,
    /// Offset distance of the first wave.
    pub initial_step: f64,
    /// Offset distance of each subsequent wave.
    pub other_step: f64,
    /// Number of waves after the initial one.
    pub num_other_steps: usize,
    /// Upper bound on the total growth over the seed outline. Used to trim
    /// the boundary before propagation; never affects the result.
    pub max_inflation: f64,
    /// Arc discretization tolerance handed to the offsetter.
    pub arc_tolerance: f64,
    /// Minimum edge length handed to the offsetter.
    pub shortest_edge_length: f64,
}

impl ExpansionParameters {
    /// Derive a step schedule from a target expansion distance.
    ///
    /// The remaining distance after the tiny nudge is divided into
    /// `ceil(remaining / expansion_step)` waves, capped at
    /// `max_nr_expansion_steps`. Steps that would come out smaller than
    /// four times the tiny nudge are coarsened by lowering the step count,
    /// and a schedule that degenerates to a single step collapses to the
    /// fixed 0.2 / 0.8 split of the full distance.
    ///
    /// All distances are scaled units; inputs must be positive (debug
    /// assertion, caller contract). Use [`try_build`](Self::try_build) for
    /// unchecked configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use poly_expand::ExpansionParameters;
    /// use poly_types::scale;
    ///
    /// let params = ExpansionParameters::build(scale(2.0), scale(0.4), 10);
    /// assert_eq!(params.num_other_steps, 4);
    /// ```
    #[must_use]
    pub fn build(full_expansion: f64, expansion_step: f64, max_nr_expansion_steps: usize) -> Self {
        debug_assert!(full_expansion > 0.0);
        debug_assert!(expansion_step > 0.0);
        debug_assert!(max_nr_expansion_steps > 0);

        // The tiny expansion should not be too small, but also small enough
        // that the first wave compensates for it and brings the wavefront
        // back to the boundary without cusps where it touches.
        let mut tiny_expansion = (0.25 * full_expansion).min(scale(0.05));
        let mut nsteps = ((full_expansion - tiny_expansion) / expansion_step).ceil() as usize;
        nsteps = nsteps.min(max_nr_expansion_steps);
        debug_assert!(nsteps > 0);
        let mut initial_step = (full_expansion - tiny_expansion) / nsteps as f64;
        if nsteps > 1 && 0.25 * initial_step < tiny_expansion {
            // Decrease the step size by lowering the number of steps.
            nsteps = (((full_expansion - tiny_expansion) / (4.0 * tiny_expansion)).floor()
                as usize)
                .max(1);
            initial_step = (full_expansion - tiny_expansion) / nsteps as f64;
        }
        if 0.25 * initial_step < tiny_expansion || nsteps == 1 {
            tiny_expansion = 0.2 * full_expansion;
            initial_step = 0.8 * full_expansion;
        }

        Self {
            tiny_expansion,
            initial_step,
            other_step: initial_step,
            num_other_steps: nsteps - 1,
            // Maximum inflation of seed contours over the boundary, used to
            // trim the boundary before wave propagation. Positive round
            // offsets rather offset less than more; still a bit of slack is
            // added on top.
            max_inflation: (tiny_expansion + nsteps as f64 * initial_step) * 1.1,
            arc_tolerance: scale(0.1),
            shortest_edge_length: initial_step * OFFSET_SHORTEST_EDGE_FACTOR,
        }
    }

    /// Validating variant of [`build`](Self::build) for callers holding
    /// unchecked configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::InvalidExpansion`], [`ExpandError::InvalidStep`]
    /// or [`ExpandError::InvalidStepCount`] when an input is out of range.
    pub fn try_build(
        full_expansion: f64,
        expansion_step: f64,
        max_nr_expansion_steps: usize,
    ) -> ExpandResult<Self> {
        if !(full_expansion > 0.0) {
            return Err(ExpandError::InvalidExpansion(full_expansion));
        }
        if !(expansion_step > 0.0) {
            return Err(ExpandError::InvalidStep(expansion_step));
        }
        if max_nr_expansion_steps == 0 {
            return Err(ExpandError::InvalidStepCount);
        }
        Ok(Self::build(full_expansion, expansion_step, max_nr_expansion_steps))
    }

    /// Total distance the schedule covers, tiny nudge included.
    #[must_use]
    pub fn total_expansion(&self) -> f64 {
        self.tiny_expansion + self.initial_step + self.num_other_steps as f64 * self.other_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_even_schedule_covers_distance_exactly() {
        let params = ExpansionParameters::build(scale(2.0), scale(0.4), 10);
        assert_relative_eq!(params.tiny_expansion, 50_000.0);
        assert_relative_eq!(params.initial_step, 390_000.0);
        assert_relative_eq!(params.other_step, 390_000.0);
        assert_eq!(params.num_other_steps, 4);
        assert_relative_eq!(params.total_expansion(), scale(2.0));
        assert_relative_eq!(params.max_inflation, scale(2.0) * 1.1);
        assert_relative_eq!(params.arc_tolerance, 100_000.0);
        assert_relative_eq!(params.shortest_edge_length, 390_000.0 * 0.005);
    }

    #[test]
    fn test_single_step_falls_back_to_fixed_split() {
        let params = ExpansionParameters::build(scale(5.0), scale(5.0), 1);
        assert_relative_eq!(params.tiny_expansion, scale(1.0));
        assert_relative_eq!(params.initial_step, scale(4.0));
        assert_eq!(params.num_other_steps, 0);
        assert_relative_eq!(params.max_inflation, scale(5.0) * 1.1);
    }

    #[test]
    fn test_small_steps_are_coarsened() {
        // 0.1mm steps over 1mm would give ten steps of 95k units, below the
        // 4x tiny-expansion floor of 200k; the count drops to four instead.
        let params = ExpansionParameters::build(scale(1.0), scale(0.1), 100);
        assert_eq!(params.num_other_steps, 3);
        assert_relative_eq!(params.initial_step, 237_500.0);
        assert_relative_eq!(params.total_expansion(), scale(1.0));
    }

    #[test]
    fn test_step_count_ceiling_is_honored() {
        let params = ExpansionParameters::build(scale(10.0), scale(0.5), 3);
        assert_eq!(params.num_other_steps, 2);
        assert_relative_eq!(params.initial_step, 9_950_000.0 / 3.0);
        assert_relative_eq!(params.total_expansion(), scale(10.0));
    }

    #[test]
    fn test_try_build_rejects_bad_input() {
        assert!(matches!(
            ExpansionParameters::try_build(-1.0, 100.0, 4),
            Err(ExpandError::InvalidExpansion(_))
        ));
        assert!(matches!(
            ExpansionParameters::try_build(f64::NAN, 100.0, 4),
            Err(ExpandError::InvalidExpansion(_))
        ));
        assert!(matches!(
            ExpansionParameters::try_build(1000.0, 0.0, 4),
            Err(ExpandError::InvalidStep(_))
        ));
        assert!(matches!(
            ExpansionParameters::try_build(1000.0, 100.0, 0),
            Err(ExpandError::InvalidStepCount)
        ));
        assert!(ExpansionParameters::try_build(1000.0, 100.0, 4).is_ok());
    }
}
