//! Regrid moves per-cell field data between a block-structured Cartesian
//! "image" grid and a uniformly refined or coarsened version of itself, in
//! the style of Berger-Oliger AMR: restriction condenses a fine patch into
//! the coarse cells it overlaps by exact conservative summation, and
//! prolongation spreads coarse values over the fine cells they cover by
//! exact broadcast. Neither direction ever interpolates. Both directions
//! come in ghost-aware variants which understand a uniform halo of ghost
//! cells around either grid, including a halo-only refresh that leaves
//! interior data untouched. The kernels operate in place on flat,
//! caller-owned buffers at ranks 1 through 3.

pub mod check;
pub mod error;
pub mod field;
pub mod grid;
pub mod index_space;
pub mod prolong;
pub mod restrict;
