use rayon::prelude::*;

use crate::check;
use crate::error::Error;
use crate::field::{Field, FieldMut};
use crate::index_space::{strides, CellIter, GridShape, OverlapWindow, MAX_RANK};




/**
 * Broadcast each coarse tuple inside the overlap window into every fine cell
 * it overlaps: an exact copy, never an interpolation. The fine buffer covers
 * the window's refined footprint and is overwritten completely, in the linear
 * order that `condense_fine_to_coarse` consumes it, so a spread followed by a
 * condense over the same window recovers the coarse values scaled by the
 * product of the factors.
 *
 * Every fine value is a pure function of its position, so the rows of the
 * fine buffer are filled in parallel; the result does not depend on the
 * schedule.
 */
pub fn spread_coarse_to_fine<T>(
    coarse: Field<T>,
    coarse_shape: &GridShape,
    fine: &mut FieldMut<T>,
    window: &OverlapWindow,
    factors: &[usize],
) -> Result<(), Error>
where
    T: Copy + Send + Sync,
{
    let rank = check::require_transfer_geometry(coarse_shape, window, factors)?;
    check::require_matching_components(coarse.num_fields(), fine.num_fields())?;
    check::require_buffer("coarse", coarse.len(), coarse.num_fields(), coarse_shape.num_cells())?;

    let fine_extent = check::refined_extent(window, factors);
    let fine_cells = fine_extent[..rank].iter().product();
    check::require_buffer("fine", fine.len(), fine.num_fields(), fine_cells)?;

    if fine_cells == 0 {
        return Ok(());
    }
    let num_fields = fine.num_fields();
    let coarse_strides = strides(coarse_shape.counts());
    let row_len = fine_extent[0] * num_fields;

    fine.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(row, data)| {
            let mut offset = 0;
            let mut rest = row;

            for axis in 1..rank {
                let index = rest % fine_extent[axis];
                rest /= fine_extent[axis];
                offset += (window.start(axis) + index / factors[axis]) * coarse_strides[axis];
            }
            for i in 0..fine_extent[0] {
                let cell = offset + (window.start(0) + i / factors[0]) * coarse_strides[0];
                data[i * num_fields..(i + 1) * num_fields].copy_from_slice(coarse.tuple(cell));
            }
        });
    Ok(())
}




/**
 * Ghost-aware variant of `spread_coarse_to_fine`. Both buffers carry a ghost
 * border of the given width. The interior of the fine buffer is filled as in
 * the plain variant; the fine ghost border is filled by constant extension
 * from the nearest window-edge coarse cell (never from the coarse ghost
 * border). The ghost width may not exceed any refinement factor, so the
 * extension never reaches past the window's edge cells.
 */
pub fn spread_coarse_to_fine_ghost<T>(
    coarse: Field<T>,
    coarse_shape: &GridShape,
    fine: &mut FieldMut<T>,
    window: &OverlapWindow,
    factors: &[usize],
    ghost: usize,
) -> Result<(), Error>
where
    T: Copy,
{
    let geometry = GhostGeometry::checked(coarse, coarse_shape, fine, window, factors, ghost)?;
    let num_fields = fine.num_fields();

    for (index, dst) in CellIter::new(&geometry.fine_extent[..geometry.rank])
        .zip(fine.data_mut().chunks_exact_mut(num_fields))
    {
        dst.copy_from_slice(coarse.tuple(geometry.source_offset(&index, window, factors)));
    }
    Ok(())
}




/**
 * Halo-refresh variant of `spread_coarse_to_fine_ghost`: fills only the fine
 * buffer's ghost border by the same constant-extension rule and leaves the
 * interior byte-identical, so already computed interior data survives.
 */
pub fn spread_coarse_to_fine_ghost_zone<T>(
    coarse: Field<T>,
    coarse_shape: &GridShape,
    fine: &mut FieldMut<T>,
    window: &OverlapWindow,
    factors: &[usize],
    ghost: usize,
) -> Result<(), Error>
where
    T: Copy,
{
    let geometry = GhostGeometry::checked(coarse, coarse_shape, fine, window, factors, ghost)?;
    let num_fields = fine.num_fields();

    for (index, dst) in CellIter::new(&geometry.fine_extent[..geometry.rank])
        .zip(fine.data_mut().chunks_exact_mut(num_fields))
    {
        if geometry.is_interior(&index) {
            continue;
        }
        dst.copy_from_slice(coarse.tuple(geometry.source_offset(&index, window, factors)));
    }
    Ok(())
}




/**
 * The validated geometry shared by the two ghost-filling spreads: the extents
 * of the ghost-padded fine grid, the strides of the ghost-padded coarse grid,
 * and the clamped fine-to-coarse index mapping.
 */
struct GhostGeometry {
    rank: usize,
    ghost: usize,
    fine_extent: [usize; MAX_RANK],
    interior_extent: [usize; MAX_RANK],
    coarse_strides: [usize; MAX_RANK],
}




impl GhostGeometry {

    fn checked<T, U>(
        coarse: Field<T>,
        coarse_shape: &GridShape,
        fine: &FieldMut<U>,
        window: &OverlapWindow,
        factors: &[usize],
        ghost: usize,
    ) -> Result<Self, Error> {
        let rank = check::require_transfer_geometry(coarse_shape, window, factors)?;
        check::require_matching_components(coarse.num_fields(), fine.num_fields())?;
        check::require_nonempty_window(window)?;
        check::require_ghost_within_factors(ghost, factors)?;
        check::require_buffer(
            "coarse",
            coarse.len(),
            coarse.num_fields(),
            check::expected_tuple_count(coarse_shape, ghost),
        )?;

        let interior_extent = check::refined_extent(window, factors);
        let mut fine_extent = [0; MAX_RANK];
        for axis in 0..rank {
            fine_extent[axis] = interior_extent[axis] + 2 * ghost;
        }
        let fine_cells = fine_extent[..rank].iter().product();
        check::require_buffer("fine", fine.len(), fine.num_fields(), fine_cells)?;

        Ok(Self {
            rank,
            ghost,
            fine_extent,
            interior_extent,
            coarse_strides: strides(coarse_shape.extended(ghost).counts()),
        })
    }


    /**
     * Map a multi-index on the ghost-padded fine grid to the linear offset of
     * its source tuple on the ghost-padded coarse grid. Halo indexes clamp to
     * the window's edge cells, which is the constant-extension rule.
     */
    fn source_offset(
        &self,
        index: &[usize; MAX_RANK],
        window: &OverlapWindow,
        factors: &[usize],
    ) -> usize {
        let mut offset = 0;

        for axis in 0..self.rank {
            let fine = index[axis] as isize - self.ghost as isize;
            let cell = fine
                .div_euclid(factors[axis] as isize)
                .max(0)
                .min(window.extent(axis) as isize - 1) as usize;
            offset += (window.start(axis) + cell + self.ghost) * self.coarse_strides[axis];
        }
        offset
    }


    fn is_interior(&self, index: &[usize; MAX_RANK]) -> bool {
        (0..self.rank).all(|axis| {
            index[axis] >= self.ghost && index[axis] < self.ghost + self.interior_extent[axis]
        })
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::{spread_coarse_to_fine, spread_coarse_to_fine_ghost, spread_coarse_to_fine_ghost_zone};
    use crate::error::Error;
    use crate::field::{Field, FieldMut};
    use crate::index_space::{GridShape, OverlapWindow};
    use crate::restrict::condense_fine_to_coarse;

    #[test]
    fn spreading_broadcasts_each_coarse_cell_over_its_footprint() {
        let shape = GridShape::new(vec![4]).unwrap();
        let window = OverlapWindow::new(vec![1..3]).unwrap();
        let coarse_data = [0.0, 5.0, 7.0, 0.0];
        let mut fine_data = [0.0; 4];

        spread_coarse_to_fine(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2],
        )
        .unwrap();

        assert_eq!(fine_data, [5.0, 5.0, 7.0, 7.0]);
    }

    #[test]
    fn every_fine_cell_receives_an_exact_copy_of_its_coarse_tuple() {
        let shape = GridShape::new(vec![3, 2]).unwrap();
        let window = OverlapWindow::new(vec![1..3, 0..2]).unwrap();
        let coarse_data: Vec<f64> = (0..6).map(|cell| cell as f64).collect();
        let mut fine_data = vec![-1.0; 4 * 6];

        spread_coarse_to_fine(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2, 3],
        )
        .unwrap();

        for j in 0..6 {
            for i in 0..4 {
                let coarse_cell = (1 + i / 2) + 3 * (j / 3);
                assert_eq!(fine_data[i + 4 * j], coarse_cell as f64);
            }
        }
    }

    #[test]
    fn spreading_then_condensing_recovers_the_coarse_values_scaled() {
        let shape = GridShape::new(vec![3, 2]).unwrap();
        let window = OverlapWindow::new(vec![0..3, 0..2]).unwrap();
        let factors = [2, 3];
        let coarse_data: Vec<f64> = (1..=6).map(|cell| cell as f64).collect();
        let mut fine_data = vec![0.0; 36];

        spread_coarse_to_fine(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &factors,
        )
        .unwrap();

        let mut condensed = vec![0.0; 6];
        condense_fine_to_coarse(
            &shape,
            Field::new(&fine_data, 1).unwrap(),
            &window,
            &factors,
            &mut FieldMut::new(&mut condensed, 1).unwrap(),
        )
        .unwrap();

        let scaled: Vec<f64> = coarse_data.iter().map(|value| value * 6.0).collect();
        assert_eq!(condensed, scaled);
    }

    #[test]
    fn ghost_spreading_extends_the_nearest_window_edge_cell() {
        let shape = GridShape::new(vec![2]).unwrap();
        let window = OverlapWindow::new(vec![0..2]).unwrap();
        let coarse_data = [99.0, 1.0, 2.0, 99.0];
        let mut fine_data = [0.0; 6];

        spread_coarse_to_fine_ghost(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2],
            1,
        )
        .unwrap();

        assert_eq!(fine_data, [1.0, 1.0, 1.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn ghost_spreading_clamps_corners_on_both_axes() {
        let shape = GridShape::new(vec![2, 2]).unwrap();
        let window = OverlapWindow::new(vec![0..2, 0..2]).unwrap();

        // Ghost-padded 4 x 4 coarse grid whose interior holds 1 2 / 3 4 and
        // whose halo holds 99; the halo must never be read.
        let coarse_data = [
            99.0, 99.0, 99.0, 99.0,
            99.0,  1.0,  2.0, 99.0,
            99.0,  3.0,  4.0, 99.0,
            99.0, 99.0, 99.0, 99.0,
        ];
        let mut fine_data = [0.0; 36];

        spread_coarse_to_fine_ghost(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2, 2],
            1,
        )
        .unwrap();

        assert_eq!(fine_data, [
            1.0, 1.0, 1.0, 2.0, 2.0, 2.0,
            1.0, 1.0, 1.0, 2.0, 2.0, 2.0,
            1.0, 1.0, 1.0, 2.0, 2.0, 2.0,
            3.0, 3.0, 3.0, 4.0, 4.0, 4.0,
            3.0, 3.0, 3.0, 4.0, 4.0, 4.0,
            3.0, 3.0, 3.0, 4.0, 4.0, 4.0,
        ]);
    }

    #[test]
    fn ghost_zone_spreading_leaves_the_interior_untouched() {
        let shape = GridShape::new(vec![2, 2]).unwrap();
        let window = OverlapWindow::new(vec![0..2, 0..2]).unwrap();
        let coarse_data = [
            99.0, 99.0, 99.0, 99.0,
            99.0,  1.0,  2.0, 99.0,
            99.0,  3.0,  4.0, 99.0,
            99.0, 99.0, 99.0, 99.0,
        ];
        let mut fine_data = [-1.0; 36];

        spread_coarse_to_fine_ghost_zone(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2, 2],
            1,
        )
        .unwrap();

        assert_eq!(fine_data, [
            1.0,  1.0,  1.0,  2.0,  2.0, 2.0,
            1.0, -1.0, -1.0, -1.0, -1.0, 2.0,
            1.0, -1.0, -1.0, -1.0, -1.0, 2.0,
            3.0, -1.0, -1.0, -1.0, -1.0, 4.0,
            3.0, -1.0, -1.0, -1.0, -1.0, 4.0,
            3.0,  3.0,  3.0,  4.0,  4.0, 4.0,
        ]);
    }

    #[test]
    fn ghost_widths_beyond_the_factors_are_rejected() {
        let shape = GridShape::new(vec![2]).unwrap();
        let window = OverlapWindow::new(vec![0..2]).unwrap();
        let coarse_data = [0.0; 8];
        let mut fine_data = [5.0; 10];

        let result = spread_coarse_to_fine_ghost(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2],
            3,
        );

        assert_eq!(result, Err(Error::GhostWidthExceedsFactor { ghost: 3, factor: 2 }));
        assert_eq!(fine_data, [5.0; 10]);
    }

    #[test]
    fn ghost_spreading_needs_a_nonempty_window() {
        let shape = GridShape::new(vec![4]).unwrap();
        let window = OverlapWindow::new(vec![2..2]).unwrap();
        let coarse_data = [0.0; 6];
        let mut fine_data = [0.0; 2];

        let result = spread_coarse_to_fine_ghost(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2],
            1,
        );

        assert_eq!(result, Err(Error::EmptyWindow { axis: 0 }));
    }

    #[test]
    fn spreading_an_empty_window_writes_nothing() {
        let shape = GridShape::new(vec![4]).unwrap();
        let window = OverlapWindow::new(vec![2..2]).unwrap();
        let coarse_data = [1.0; 4];
        let mut fine_data: [f64; 0] = [];

        spread_coarse_to_fine(
            Field::new(&coarse_data, 1).unwrap(),
            &shape,
            &mut FieldMut::new(&mut fine_data, 1).unwrap(),
            &window,
            &[2],
        )
        .unwrap();
    }
}
