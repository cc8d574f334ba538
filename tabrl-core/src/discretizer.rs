//! Binning of bounded scalar observations into a finite lattice.
use crate::{error::TabrlError, State};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One axis of a lattice: a closed domain `[min, max]` split into `n_bins` equal bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    min: f32,
    max: f32,
    n_bins: usize,
}

impl Axis {
    /// Constructs an axis.
    ///
    /// Fails if `n_bins == 0`, if a bound is not finite or if `min >= max`.
    pub fn new(min: f32, max: f32, n_bins: usize) -> Result<Self> {
        if n_bins == 0 {
            return Err(TabrlError::config("n_bins must be positive").into());
        }
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(TabrlError::config(format!(
                "axis domain [{}, {}] is empty or not finite",
                min, max
            ))
            .into());
        }
        Ok(Self { min, max, n_bins })
    }

    /// Lower bound of the domain.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound of the domain.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// The number of bins.
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// Width of a single bin.
    pub fn bin_width(&self) -> f32 {
        (self.max - self.min) / self.n_bins as f32
    }

    /// Clamps `value` into the domain.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    /// Maps `value` to a bin index in `[0, n_bins - 1]`.
    ///
    /// Out-of-range values are clamped first. `NaN` falls into bin 0.
    pub fn bin(&self, value: f32) -> usize {
        let value = self.clamp(value);
        let ix = ((value - self.min) / self.bin_width()).floor();
        // `as usize` saturates, and maps NaN to 0
        (ix as usize).min(self.n_bins - 1)
    }

    /// Center of the given bin. Bins past the end are clamped to the last one.
    pub fn center(&self, bin: usize) -> f32 {
        let bin = bin.min(self.n_bins - 1);
        self.min + (bin as f32 + 0.5) * self.bin_width()
    }
}

/// A set of [`Axis`] applied independently to the components of an observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discretizer {
    axes: Vec<Axis>,
}

impl Discretizer {
    /// Constructs a discretizer. The order of `axes` is the order of the state coordinates.
    pub fn new(axes: Vec<Axis>) -> Self {
        Self { axes }
    }

    /// The axes.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// The number of bins on each axis.
    pub fn dims(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::n_bins).collect()
    }

    /// Maps an observation to a [`State`].
    ///
    /// `values` must have one entry per axis.
    pub fn discretize(&self, values: &[f32]) -> State {
        debug_assert_eq!(values.len(), self.axes.len());
        self.axes
            .iter()
            .zip(values)
            .map(|(axis, &v)| axis.bin(v))
            .collect::<Vec<_>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_in_range() -> Result<()> {
        let axis = Axis::new(0.0, 10.0, 5)?;
        assert_eq!(axis.bin(0.0), 0);
        assert_eq!(axis.bin(1.99), 0);
        assert_eq!(axis.bin(2.0), 1);
        assert_eq!(axis.bin(9.99), 4);
        Ok(())
    }

    #[test]
    fn test_bin_clamps() -> Result<()> {
        let axis = Axis::new(-1.0, 1.0, 4)?;
        assert_eq!(axis.bin(-100.0), 0);
        assert_eq!(axis.bin(100.0), 3);
        // exact upper bound must not spill into a fifth bin
        assert_eq!(axis.bin(1.0), 3);
        assert_eq!(axis.bin(f32::INFINITY), 3);
        assert_eq!(axis.bin(f32::NEG_INFINITY), 0);
        assert_eq!(axis.bin(f32::NAN), 0);
        Ok(())
    }

    #[test]
    fn test_bin_sweep_stays_in_bounds() -> Result<()> {
        let axis = Axis::new(0.0, 3.0, 7)?;
        for i in -100..400 {
            let v = i as f32 * 0.013;
            assert!(axis.bin(v) < 7, "value {} out of range", v);
        }
        Ok(())
    }

    #[test]
    fn test_center() -> Result<()> {
        let axis = Axis::new(0.0, 10.0, 5)?;
        assert!((axis.center(0) - 1.0).abs() < 1e-6);
        assert!((axis.center(4) - 9.0).abs() < 1e-6);
        assert_eq!(axis.bin(axis.center(3)), 3);
        Ok(())
    }

    #[test]
    fn test_invalid_axis() {
        for (min, max, n) in [(0.0, 1.0, 0), (1.0, 1.0, 3), (2.0, 1.0, 3), (0.0, f32::NAN, 3)] {
            let err = Axis::new(min, max, n).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<TabrlError>(),
                Some(TabrlError::Config(_))
            ));
        }
    }

    #[test]
    fn test_discretize_keeps_axis_order() -> Result<()> {
        let d = Discretizer::new(vec![Axis::new(0.0, 20.0, 20)?, Axis::new(0.0, 3.0, 3)?]);
        assert_eq!(d.dims(), vec![20, 3]);
        assert_eq!(d.discretize(&[5.5, 2.9]), State::from([5, 2]));
        assert_eq!(d.discretize(&[-1.0, 9.0]), State::from([0, 2]));
        Ok(())
    }
}
