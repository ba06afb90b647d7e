use core::ops::AddAssign;

use crate::check;
use crate::error::Error;
use crate::field::{Field, FieldMut};
use crate::index_space::{strides, CellIter, GridShape, OverlapWindow, MAX_RANK};




/**
 * Accumulate fine-grid tuples into the coarse tuples they geometrically
 * overlap: an exact conservative sum, never an average. Coarse cells outside
 * the overlap window keep their previous values.
 *
 * The fine buffer covers the window's refined footprint and is consumed
 * strictly in its own linear order (axis 0 fastest). The first fine
 * contribution reaching a coarse cell overwrites it and later contributions
 * add component-wise, which pins the floating-point summation order and
 * makes the result bit-for-bit reproducible.
 */
pub fn condense_fine_to_coarse<T>(
    coarse_shape: &GridShape,
    fine: Field<T>,
    window: &OverlapWindow,
    factors: &[usize],
    coarse: &mut FieldMut<T>,
) -> Result<(), Error>
where
    T: Copy + AddAssign,
{
    let rank = check::require_transfer_geometry(coarse_shape, window, factors)?;
    check::require_matching_components(coarse.num_fields(), fine.num_fields())?;
    check::require_buffer("coarse", coarse.len(), coarse.num_fields(), coarse_shape.num_cells())?;

    let fine_extent = check::refined_extent(window, factors);
    let fine_cells = fine_extent[..rank].iter().product();
    check::require_buffer("fine", fine.len(), fine.num_fields(), fine_cells)?;

    let num_fields = fine.num_fields();
    let coarse_strides = strides(coarse_shape.counts());

    for (index, src) in CellIter::new(&fine_extent[..rank]).zip(fine.data().chunks_exact(num_fields)) {
        let mut offset = 0;
        let mut leading = true;

        for axis in 0..rank {
            offset += (window.start(axis) + index[axis] / factors[axis]) * coarse_strides[axis];
            leading &= index[axis] % factors[axis] == 0;
        }
        let dst = coarse.tuple_mut(offset);

        if leading {
            dst.copy_from_slice(src);
        } else {
            for (d, s) in dst.iter_mut().zip(src) {
                *d += *s;
            }
        }
    }
    Ok(())
}




/**
 * Ghost-aware variant of `condense_fine_to_coarse`. Both buffers carry a
 * ghost border of the given width on every side: the fine buffer's border is
 * skipped when reading, and the sums land in the ghost-padded coarse buffer
 * at the window position offset by the ghost width. The coarse ghost border
 * itself is never written.
 */
pub fn condense_fine_to_coarse_ghost<T>(
    coarse_shape: &GridShape,
    fine: Field<T>,
    window: &OverlapWindow,
    factors: &[usize],
    coarse: &mut FieldMut<T>,
    ghost: usize,
) -> Result<(), Error>
where
    T: Copy + AddAssign,
{
    let rank = check::require_transfer_geometry(coarse_shape, window, factors)?;
    check::require_matching_components(coarse.num_fields(), fine.num_fields())?;
    check::require_buffer(
        "coarse",
        coarse.len(),
        coarse.num_fields(),
        check::expected_tuple_count(coarse_shape, ghost),
    )?;

    let fine_extent = check::refined_extent(window, factors);
    let mut fine_ghost_extent = [0; MAX_RANK];
    for axis in 0..rank {
        fine_ghost_extent[axis] = fine_extent[axis] + 2 * ghost;
    }
    let fine_cells = fine_ghost_extent[..rank].iter().product();
    check::require_buffer("fine", fine.len(), fine.num_fields(), fine_cells)?;

    let coarse_strides = strides(coarse_shape.extended(ghost).counts());
    let fine_strides = strides(&fine_ghost_extent[..rank]);

    for index in CellIter::new(&fine_extent[..rank]) {
        let mut read = 0;
        let mut write = 0;
        let mut leading = true;

        for axis in 0..rank {
            read += (index[axis] + ghost) * fine_strides[axis];
            write += (window.start(axis) + index[axis] / factors[axis] + ghost) * coarse_strides[axis];
            leading &= index[axis] % factors[axis] == 0;
        }
        let src = fine.tuple(read);
        let dst = coarse.tuple_mut(write);

        if leading {
            dst.copy_from_slice(src);
        } else {
            for (d, s) in dst.iter_mut().zip(src) {
                *d += *s;
            }
        }
    }
    Ok(())
}
