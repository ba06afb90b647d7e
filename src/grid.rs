use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::index_space::GridShape;




/**
 * A block-structured Cartesian "image" grid: a space dimension between 0 and
 * 3, and per-axis node counts, origin coordinates and uniform spacings. Every
 * cell of such a grid has the same measure, which the field layer exploits.
 *
 * A grid is a value: the derivations below (`refined_by`, `with_ghost`,
 * `as_single_cell`) return new, internally consistent grids and never touch
 * the receiver.
 */
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    space_dim: usize,
    node_counts: Vec<usize>,
    origin: Vec<f64>,
    spacing: Vec<f64>,
    axis_unit: Option<String>,
}




impl Grid {


    /**
     * Build a fully specified grid. The space dimension may be at most 3 and
     * the per-axis vectors must all have exactly that many entries; every
     * axis must carry at least one node.
     */
    pub fn new(
        space_dim: usize,
        node_counts: Vec<usize>,
        origin: Vec<f64>,
        spacing: Vec<f64>,
    ) -> Result<Self, Error> {
        if space_dim > 3 {
            return Err(Error::InvalidDimension(space_dim));
        }
        for &(what, len) in &[
            ("node counts", node_counts.len()),
            ("origin", origin.len()),
            ("spacing", spacing.len()),
        ] {
            if len != space_dim {
                return Err(Error::ShapeMismatch {
                    what,
                    expected: space_dim,
                    actual: len,
                });
            }
        }
        for (axis, &count) in node_counts.iter().enumerate() {
            if count == 0 {
                return Err(Error::InvalidNodeCount { axis });
            }
        }
        Ok(Self {
            space_dim,
            node_counts,
            origin,
            spacing,
            axis_unit: None,
        })
    }


    /**
     * Attach the length unit shared by all axes.
     */
    pub fn with_axis_unit(self, unit: &str) -> Self {
        Self {
            axis_unit: Some(unit.to_string()),
            ..self
        }
    }


    pub fn space_dim(&self) -> usize {
        self.space_dim
    }


    pub fn node_counts(&self) -> &[usize] {
        &self.node_counts
    }


    pub fn origin(&self) -> &[f64] {
        &self.origin
    }


    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }


    pub fn axis_unit(&self) -> Option<&str> {
        self.axis_unit.as_deref()
    }


    /**
     * Return the per-axis cell counts (one less than the node counts).
     */
    pub fn cell_counts(&self) -> Vec<usize> {
        self.node_counts.iter().map(|&count| count - 1).collect()
    }


    /**
     * Return the cell counts as a `GridShape` suitable for the transfer
     * kernels. Fails if any axis has no cells.
     */
    pub fn cell_shape(&self) -> Result<GridShape, Error> {
        GridShape::new(self.cell_counts())
    }


    /**
     * Return the grid uniformly refined by the given per-axis factors: the
     * cell count on each axis scales by exactly the factor, the spacing
     * shrinks by the factor, and the origin is unchanged.
     */
    pub fn refined_by(&self, factors: &[usize]) -> Result<Self, Error> {
        if factors.len() != self.space_dim {
            return Err(Error::ShapeMismatch {
                what: "refinement factors",
                expected: self.space_dim,
                actual: factors.len(),
            });
        }
        for (axis, &factor) in factors.iter().enumerate() {
            if factor == 0 {
                return Err(Error::InvalidFactor { axis, factor });
            }
        }
        let node_counts = self
            .node_counts
            .iter()
            .zip(factors)
            .map(|(&count, &factor)| (count - 1) * factor + 1)
            .collect();
        let spacing = self
            .spacing
            .iter()
            .zip(factors)
            .map(|(&spacing, &factor)| spacing / factor as f64)
            .collect();

        Ok(Self {
            node_counts,
            spacing,
            ..self.clone()
        })
    }


    /**
     * Return the grid enlarged by `ghost` cells on every side of every axis.
     * The spacing is unchanged and the origin moves back by `ghost` spacings;
     * a ghost width of zero yields a value-equal clone.
     */
    pub fn with_ghost(&self, ghost: usize) -> Self {
        Self {
            node_counts: self.node_counts.iter().map(|&count| count + 2 * ghost).collect(),
            origin: self
                .origin
                .iter()
                .zip(&self.spacing)
                .map(|(&origin, &spacing)| origin - ghost as f64 * spacing)
                .collect(),
            ..self.clone()
        }
    }


    /**
     * Return the grid with every multi-cell axis collapsed to a single cell
     * spanning the axis's original extent. Axes that already hold one cell
     * (or one lone node) are left as they are.
     */
    pub fn as_single_cell(&self) -> Self {
        let mut node_counts = self.node_counts.clone();
        let mut spacing = self.spacing.clone();

        for axis in 0..self.space_dim {
            if node_counts[axis] > 2 {
                spacing[axis] *= (node_counts[axis] - 1) as f64;
                node_counts[axis] = 2;
            }
        }
        Self {
            node_counts,
            spacing,
            ..self.clone()
        }
    }


    /**
     * Return the measure (length, area or volume) of any one cell. All cells
     * of an image grid are congruent, so a single product of the per-axis
     * spacings covers the whole grid.
     */
    pub fn cell_measure(&self) -> f64 {
        self.spacing.iter().map(|spacing| spacing.abs()).product()
    }
}
