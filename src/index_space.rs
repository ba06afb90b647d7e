use core::ops::Range;
use serde::{Deserialize, Serialize};

use crate::error::Error;




/**
 * The largest transfer rank the kernels support. Multi-indexes are carried in
 * fixed arrays of this length with unused trailing axes held at zero.
 */
pub const MAX_RANK: usize = 3;




/**
 * Per-axis cell counts of a rectangular Cartesian grid. The linear buffer
 * layout associated with a shape is lexicographic with axis 0 varying
 * fastest: the stride of axis 0 is 1 and the stride of each subsequent axis
 * is the product of the extents before it.
 */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    counts: Vec<usize>,
}




impl GridShape {


    /**
     * Build a shape from per-axis cell counts. Every count must be positive;
     * rank restrictions are left to the transfer entry points so that they
     * can report unsupported ranks themselves.
     */
    pub fn new(counts: Vec<usize>) -> Result<Self, Error> {
        for (axis, &count) in counts.iter().enumerate() {
            if count == 0 {
                return Err(Error::InvalidCellCount { axis });
            }
        }
        Ok(Self { counts })
    }


    /**
     * Return the number of axes.
     */
    pub fn rank(&self) -> usize {
        self.counts.len()
    }


    /**
     * Return the per-axis cell counts.
     */
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }


    /**
     * Return the total number of cells (the product of the per-axis counts).
     */
    pub fn num_cells(&self) -> usize {
        self.counts.iter().product()
    }


    /**
     * Return the shape enlarged by `ghost` cells on every side of every axis.
     */
    pub fn extended(&self, ghost: usize) -> Self {
        Self {
            counts: self.counts.iter().map(|&count| count + 2 * ghost).collect(),
        }
    }
}




/**
 * The rectangular sub-block of a coarse grid's cell index space covered by a
 * fine grid patch: one half-open index range per axis. An empty range is
 * permitted (the patch covers nothing) but a reversed one is not.
 */
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapWindow {
    ranges: Vec<Range<usize>>,
}




impl OverlapWindow {


    pub fn new(ranges: Vec<Range<usize>>) -> Result<Self, Error> {
        for (axis, range) in ranges.iter().enumerate() {
            if range.start > range.end {
                return Err(Error::ReversedWindow {
                    axis,
                    start: range.start,
                    end: range.end,
                });
            }
        }
        Ok(Self { ranges })
    }


    pub fn rank(&self) -> usize {
        self.ranges.len()
    }


    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }


    /**
     * Return the lower coarse-cell index on the given axis.
     */
    pub fn start(&self, axis: usize) -> usize {
        self.ranges[axis].start
    }


    /**
     * Return the number of coarse cells covered along the given axis.
     */
    pub fn extent(&self, axis: usize) -> usize {
        self.ranges[axis].end - self.ranges[axis].start
    }


    /**
     * Return the number of coarse cells covered by the whole window.
     */
    pub fn num_cells(&self) -> usize {
        (0..self.rank()).map(|axis| self.extent(axis)).product()
    }
}




/**
 * Iterator over the multi-indexes of a rectangular index block, visiting them
 * in the lexicographic order matching the linear buffer layout: axis 0 varies
 * fastest. Yields fixed-size arrays with unused trailing axes held at zero.
 */
pub struct CellIter {
    extent: [usize; MAX_RANK],
    rank: usize,
    index: [usize; MAX_RANK],
    remaining: usize,
}




impl CellIter {

    pub fn new(extent: &[usize]) -> Self {
        assert!(extent.len() <= MAX_RANK, "index block rank exceeds {}", MAX_RANK);

        let mut padded = [1; MAX_RANK];
        padded[..extent.len()].copy_from_slice(extent);

        Self {
            extent: padded,
            rank: extent.len(),
            index: [0; MAX_RANK],
            remaining: extent.iter().product(),
        }
    }
}




impl Iterator for CellIter {
    type Item = [usize; MAX_RANK];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.index;
        self.remaining -= 1;

        for axis in 0..self.rank {
            self.index[axis] += 1;
            if self.index[axis] < self.extent[axis] {
                break;
            }
            self.index[axis] = 0;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}




/**
 * Return the per-axis strides of the linear layout for the given extents:
 * stride 1 on axis 0, then the running product of the extents before each
 * axis. Unused trailing entries are zero.
 */
pub fn strides(extent: &[usize]) -> [usize; MAX_RANK] {
    assert!(extent.len() <= MAX_RANK, "index block rank exceeds {}", MAX_RANK);

    let mut strides = [0; MAX_RANK];
    let mut stride = 1;

    for (axis, &count) in extent.iter().enumerate() {
        strides[axis] = stride;
        stride *= count;
    }
    strides
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{strides, CellIter, GridShape, OverlapWindow};
    use crate::error::Error;

    #[test]
    fn shape_rejects_zero_cell_counts() {
        assert_eq!(
            GridShape::new(vec![4, 0, 2]).unwrap_err(),
            Error::InvalidCellCount { axis: 1 }
        );
        assert_eq!(GridShape::new(vec![4, 3]).unwrap().num_cells(), 12);
    }

    #[test]
    fn shape_extends_on_both_sides_of_every_axis() {
        let shape = GridShape::new(vec![4, 3]).unwrap();
        assert_eq!(shape.extended(2).counts(), &[8, 7]);
        assert_eq!(shape.extended(0), shape);
    }

    #[test]
    fn window_rejects_reversed_ranges_but_allows_empty_ones() {
        assert_eq!(
            OverlapWindow::new(vec![3..1]).unwrap_err(),
            Error::ReversedWindow { axis: 0, start: 3, end: 1 }
        );
        let window = OverlapWindow::new(vec![1..3, 2..2]).unwrap();
        assert_eq!(window.extent(0), 2);
        assert_eq!(window.extent(1), 0);
        assert_eq!(window.num_cells(), 0);
    }

    #[test]
    fn cell_iter_varies_axis_zero_fastest() {
        let visited: Vec<_> = CellIter::new(&[2, 3]).collect();
        assert_eq!(visited, vec![
            [0, 0, 0], [1, 0, 0],
            [0, 1, 0], [1, 1, 0],
            [0, 2, 0], [1, 2, 0],
        ]);
    }

    #[test]
    fn cell_iter_agrees_with_strides() {
        let extent = [3, 4, 5];
        let strides = strides(&extent);

        for (linear, index) in CellIter::new(&extent).enumerate() {
            let offset: usize = (0..3).map(|axis| index[axis] * strides[axis]).sum();
            assert_eq!(offset, linear);
        }
    }

    #[test]
    fn cell_iter_handles_empty_blocks() {
        assert_eq!(CellIter::new(&[2, 0, 3]).count(), 0);
        assert_eq!(CellIter::new(&[]).count(), 1);
    }
}
