//! Validation helpers shared by the restriction and prolongation kernels.
//! All of them are pure predicates: the kernels run every applicable check
//! before touching a buffer, so a failed transfer performs no partial writes.

use crate::error::Error;
use crate::index_space::{GridShape, OverlapWindow, MAX_RANK};




/**
 * The transfer kernels handle ranks 1 through 3 only.
 */
pub fn require_supported_rank(rank: usize) -> Result<(), Error> {
    if rank == 0 || rank > MAX_RANK {
        return Err(Error::UnsupportedDimension(rank));
    }
    Ok(())
}


/**
 * Every per-axis argument vector must agree with the transfer rank.
 */
pub fn require_equal_rank(what: &'static str, expected: usize, actual: usize) -> Result<(), Error> {
    if actual != expected {
        return Err(Error::ShapeMismatch { what, expected, actual });
    }
    Ok(())
}


pub fn require_positive_factors(factors: &[usize]) -> Result<(), Error> {
    for (axis, &factor) in factors.iter().enumerate() {
        if factor == 0 {
            return Err(Error::InvalidFactor { axis, factor });
        }
    }
    Ok(())
}


/**
 * The overlap window must sit inside the coarse grid's cell extent.
 */
pub fn require_window_within(window: &OverlapWindow, shape: &GridShape) -> Result<(), Error> {
    for (axis, range) in window.ranges().iter().enumerate() {
        let cells = shape.counts()[axis];
        if range.end > cells {
            return Err(Error::WindowOutOfBounds { axis, end: range.end, cells });
        }
    }
    Ok(())
}


/**
 * Ghost-filling prolongation needs at least one coarse cell on every axis of
 * the window to extend from.
 */
pub fn require_nonempty_window(window: &OverlapWindow) -> Result<(), Error> {
    for axis in 0..window.rank() {
        if window.extent(axis) == 0 {
            return Err(Error::EmptyWindow { axis });
        }
    }
    Ok(())
}


/**
 * Ghost-filling prolongation replicates the nearest window-edge coarse cell
 * into the halo; a halo wider than one refined coarse cell has no single
 * nearest neighbor, so the ghost width may not exceed any factor.
 */
pub fn require_ghost_within_factors(ghost: usize, factors: &[usize]) -> Result<(), Error> {
    for &factor in factors {
        if ghost > factor {
            return Err(Error::GhostWidthExceedsFactor { ghost, factor });
        }
    }
    Ok(())
}


pub fn require_matching_components(coarse: usize, fine: usize) -> Result<(), Error> {
    if coarse != fine {
        return Err(Error::ComponentCountMismatch { coarse, fine });
    }
    Ok(())
}


/**
 * A buffer must hold exactly the expected number of whole tuples: neither
 * empty when tuples are required, nor truncated, padded or ragged.
 */
pub fn require_buffer(
    what: &'static str,
    len: usize,
    num_fields: usize,
    expected_tuples: usize,
) -> Result<(), Error> {
    if expected_tuples > 0 && len == 0 {
        return Err(Error::BufferNotAllocated(what));
    }
    if len != expected_tuples * num_fields {
        return Err(Error::TupleCountMismatch {
            what,
            expected: expected_tuples,
            actual: len / num_fields,
        });
    }
    Ok(())
}


/**
 * Return the tuple count implied by a shape enlarged by a ghost border.
 */
pub fn expected_tuple_count(shape: &GridShape, ghost: usize) -> usize {
    shape.extended(ghost).num_cells()
}


/**
 * Return the per-axis fine-cell extents of the window's footprint at the
 * given refinement, without any ghost border. Unused trailing axes are zero.
 */
pub fn refined_extent(window: &OverlapWindow, factors: &[usize]) -> [usize; MAX_RANK] {
    let mut extent = [0; MAX_RANK];

    for axis in 0..window.rank() {
        extent[axis] = window.extent(axis) * factors[axis];
    }
    extent
}


/**
 * Run the geometry checks common to every transfer entry point and return
 * the transfer rank.
 */
pub fn require_transfer_geometry(
    coarse_shape: &GridShape,
    window: &OverlapWindow,
    factors: &[usize],
) -> Result<usize, Error> {
    let rank = coarse_shape.rank();

    require_supported_rank(rank)?;
    require_equal_rank("overlap window", rank, window.rank())?;
    require_equal_rank("refinement factors", rank, factors.len())?;
    require_positive_factors(factors)?;
    require_window_within(window, coarse_shape)?;
    Ok(rank)
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::*;
    use crate::error::Error;

    #[test]
    fn only_ranks_one_through_three_are_supported() {
        assert_eq!(require_supported_rank(0), Err(Error::UnsupportedDimension(0)));
        assert_eq!(require_supported_rank(4), Err(Error::UnsupportedDimension(4)));
        for rank in 1..=3 {
            assert_eq!(require_supported_rank(rank), Ok(()));
        }
    }

    #[test]
    fn windows_may_not_reach_outside_the_coarse_grid() {
        let shape = GridShape::new(vec![4, 3]).unwrap();
        let inside = OverlapWindow::new(vec![1..4, 0..3]).unwrap();
        let outside = OverlapWindow::new(vec![1..4, 0..4]).unwrap();

        assert_eq!(require_window_within(&inside, &shape), Ok(()));
        assert_eq!(
            require_window_within(&outside, &shape),
            Err(Error::WindowOutOfBounds { axis: 1, end: 4, cells: 3 })
        );
    }

    #[test]
    fn ghost_width_is_bounded_by_the_smallest_factor() {
        assert_eq!(require_ghost_within_factors(2, &[2, 3]), Ok(()));
        assert_eq!(
            require_ghost_within_factors(3, &[2, 3]),
            Err(Error::GhostWidthExceedsFactor { ghost: 3, factor: 2 })
        );
    }

    #[test]
    fn buffers_must_hold_exactly_the_expected_tuples() {
        assert_eq!(require_buffer("coarse", 8, 2, 4), Ok(()));
        assert_eq!(require_buffer("coarse", 0, 2, 0), Ok(()));
        assert_eq!(
            require_buffer("coarse", 0, 2, 4),
            Err(Error::BufferNotAllocated("coarse"))
        );
        assert_eq!(
            require_buffer("fine", 6, 2, 4),
            Err(Error::TupleCountMismatch { what: "fine", expected: 4, actual: 3 })
        );
    }

    #[test]
    fn refined_extent_scales_the_window_by_the_factors() {
        let window = OverlapWindow::new(vec![1..3, 0..3]).unwrap();
        assert_eq!(refined_extent(&window, &[2, 3]), [4, 9, 0]);
    }
}
