//! Binary keep/drop masks and the store that owns them.

use crate::error::{Error, Result};
use ndarray::{Array2, Zip};

/// Hook the model calls after every optimizer update of a weight matrix.
///
/// Implementations must be cheap and must not mutate themselves: the same
/// constraint is consulted once per matrix per training step.
pub trait WeightConstraint {
    /// Constrain weight matrix `index` in place.
    fn constrain(&self, index: usize, weights: &mut Array2<f32>) -> Result<()>;
}

/// Constraint that leaves every weight untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl WeightConstraint for Unconstrained {
    fn constrain(&self, _index: usize, _weights: &mut Array2<f32>) -> Result<()> {
        Ok(())
    }
}

/// Binary mask over a weight matrix. `true` keeps a weight, `false` pins it to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    keep: Array2<bool>,
}

impl Mask {
    /// All-ones mask of the given shape.
    pub fn ones(shape: (usize, usize)) -> Self {
        Self { keep: Array2::from_elem(shape, true) }
    }

    /// Wrap an existing boolean matrix.
    pub fn from_keep(keep: Array2<bool>) -> Self {
        Self { keep }
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.keep.dim()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Whether the mask has no entries.
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Mask entry as 0 or 1.
    pub fn value(&self, row: usize, col: usize) -> u8 {
        u8::from(self.keep[[row, col]])
    }

    /// Borrow the underlying boolean matrix.
    pub fn keep(&self) -> &Array2<bool> {
        &self.keep
    }

    /// Number of kept (1-valued) entries.
    pub fn count_active(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Mask as a 0/1 matrix.
    pub fn to_binary(&self) -> Array2<u8> {
        self.keep.mapv(u8::from)
    }

    fn check_shape(&self, weights: &Array2<f32>) -> Result<()> {
        if weights.dim() != self.shape() {
            return Err(Error::ShapeMismatch { expected: self.shape(), actual: weights.dim() });
        }
        Ok(())
    }

    /// Copy of `weights` with every dropped position zeroed.
    pub fn apply(&self, weights: &Array2<f32>) -> Result<Array2<f32>> {
        let mut constrained = weights.clone();
        self.apply_in_place(&mut constrained)?;
        Ok(constrained)
    }

    /// Zero every dropped position of `weights`.
    pub fn apply_in_place(&self, weights: &mut Array2<f32>) -> Result<()> {
        self.check_shape(weights)?;
        Zip::from(weights).and(&self.keep).for_each(|w, &keep| {
            if !keep {
                *w = 0.0;
            }
        });
        Ok(())
    }
}

/// Owns one mask per trainable weight matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskStore {
    masks: Vec<Mask>,
}

impl MaskStore {
    /// All-ones masks matching `shapes`.
    pub fn initialize(shapes: &[(usize, usize)]) -> Self {
        Self { masks: shapes.iter().map(|&shape| Mask::ones(shape)).collect() }
    }

    /// Number of masks held.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Whether the store holds no masks.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Mask for weight matrix `index`.
    pub fn get(&self, index: usize) -> Option<&Mask> {
        self.masks.get(index)
    }

    /// All masks in matrix order.
    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    /// Swap the mask of matrix `index` for `mask`.
    ///
    /// The replacement must have the shape of the mask it replaces.
    pub fn replace(&mut self, index: usize, mask: Mask) -> Result<()> {
        let slot = self.masks.get_mut(index).ok_or_else(|| {
            Error::InvalidParameter(format!("no mask registered for weight matrix {index}"))
        })?;
        if slot.shape() != mask.shape() {
            return Err(Error::ShapeMismatch { expected: slot.shape(), actual: mask.shape() });
        }
        *slot = mask;
        Ok(())
    }

    /// Total kept entries across all masks.
    pub fn count_active(&self) -> usize {
        self.masks.iter().map(Mask::count_active).sum()
    }
}

impl WeightConstraint for MaskStore {
    fn constrain(&self, index: usize, weights: &mut Array2<f32>) -> Result<()> {
        match self.masks.get(index) {
            Some(mask) => mask.apply_in_place(weights),
            None => Err(Error::InvalidParameter(format!(
                "no mask registered for weight matrix {index}"
            ))),
        }
    }
}
