//! Fixed-point coordinate scaling.

/// Fixed-point coordinate type. One unit is [`SCALING_FACTOR`] millimeters.
pub type Coord = i64;

/// Floating-point coordinate type used for unscaled (millimeter) values.
pub type CoordF = f64;

/// Millimeters per coordinate unit. One unit is a nanometer, which keeps
/// offset discretization error far below printable feature sizes while
/// leaving ample headroom in an `i64`.
pub const SCALING_FACTOR: CoordF = 0.000_001;

/// Convert a millimeter value to scaled floating-point units.
#[inline]
#[must_use]
pub fn scale(v: CoordF) -> CoordF {
    v / SCALING_FACTOR
}

/// Convert scaled floating-point units back to millimeters.
#[inline]
#[must_use]
pub fn unscale(v: CoordF) -> CoordF {
    v * SCALING_FACTOR
}

/// Convert a millimeter value to an integer coordinate, rounding to nearest.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn scaled(v: CoordF) -> Coord {
    (v / SCALING_FACTOR).round() as Coord
}

/// Convert an integer coordinate to millimeters.
#[inline]
#[must_use]
pub fn unscaled(v: Coord) -> CoordF {
    v as CoordF * SCALING_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scaling_round_trip() {
        assert_eq!(scaled(0.05), 50_000);
        assert_eq!(scaled(0.1), 100_000);
        assert_eq!(scaled(1.0), 1_000_000);
        assert_relative_eq!(unscaled(1_000_000), 1.0);
        assert_relative_eq!(unscale(scale(12.5)), 12.5);
    }

    #[test]
    fn test_scaled_rounds_to_nearest() {
        assert_eq!(scaled(0.000_000_4), 0);
        assert_eq!(scaled(0.000_000_6), 1);
        assert_eq!(scaled(-0.000_000_6), -1);
    }
}
