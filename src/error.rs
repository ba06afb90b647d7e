use std::error;
use std::fmt;




/**
 * Error to represent invalid grid descriptions or transfer arguments. Every
 * transfer entry point checks its arguments up front and returns one of these
 * before touching any buffer, so a failed call performs no partial writes.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {

    /// A grid was described with a space dimension greater than 3.
    InvalidDimension(usize),

    /// A transfer was requested at a rank other than 1, 2, or 3.
    UnsupportedDimension(usize),

    /// Two per-axis argument vectors have different lengths.
    ShapeMismatch { what: &'static str, expected: usize, actual: usize },

    /// A grid axis was described with zero nodes.
    InvalidNodeCount { axis: usize },

    /// A shape axis was described with zero cells.
    InvalidCellCount { axis: usize },

    /// A refinement factor was zero on the given axis.
    InvalidFactor { axis: usize, factor: usize },

    /// A field buffer was described with zero components per tuple.
    InvalidComponentCount(usize),

    /// The ghost width exceeds the smallest refinement factor; ghost-filling
    /// prolongation reads at most one coarse cell beyond the window edge.
    GhostWidthExceedsFactor { ghost: usize, factor: usize },

    /// An overlap window range has its start after its end.
    ReversedWindow { axis: usize, start: usize, end: usize },

    /// An overlap window reaches outside the coarse grid's cell extent.
    WindowOutOfBounds { axis: usize, end: usize, cells: usize },

    /// An overlap window with zero extent was given where the operation
    /// requires at least one coarse cell per axis.
    EmptyWindow { axis: usize },

    /// A buffer argument was empty where a non-empty result is required.
    BufferNotAllocated(&'static str),

    /// A buffer's tuple count disagrees with the count implied by the shape,
    /// window, factor, and ghost arguments.
    TupleCountMismatch { what: &'static str, expected: usize, actual: usize },

    /// The coarse and fine buffers have different components per tuple.
    ComponentCountMismatch { coarse: usize, fine: usize },
}




// ============================================================================
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            InvalidDimension(dim) =>
                write!(fmt, "space dimension must be 3 or less, got {}", dim),
            UnsupportedDimension(rank) =>
                write!(fmt, "transfers support ranks 1, 2 and 3, got {}", rank),
            ShapeMismatch { what, expected, actual } =>
                write!(fmt, "{} must have {} entries, got {}", what, expected, actual),
            InvalidNodeCount { axis } =>
                write!(fmt, "node count on axis {} must be at least 1", axis),
            InvalidCellCount { axis } =>
                write!(fmt, "cell count on axis {} must be at least 1", axis),
            InvalidFactor { axis, factor } =>
                write!(fmt, "refinement factor on axis {} must be positive, got {}", axis, factor),
            InvalidComponentCount(n) =>
                write!(fmt, "components per tuple must be positive, got {}", n),
            GhostWidthExceedsFactor { ghost, factor } =>
                write!(fmt, "ghost width {} exceeds smallest refinement factor {}", ghost, factor),
            ReversedWindow { axis, start, end } =>
                write!(fmt, "window {}..{} on axis {} is reversed", start, end, axis),
            WindowOutOfBounds { axis, end, cells } =>
                write!(fmt, "window ends at {} on axis {} but the grid has {} cells", end, axis, cells),
            EmptyWindow { axis } =>
                write!(fmt, "window is empty on axis {}; ghost filling needs at least one coarse cell", axis),
            BufferNotAllocated(what) =>
                write!(fmt, "{} buffer is empty but a non-empty result is required", what),
            TupleCountMismatch { what, expected, actual } =>
                write!(fmt, "{} buffer must hold {} tuples, got {}", what, expected, actual),
            ComponentCountMismatch { coarse, fine } =>
                write!(fmt, "coarse buffer has {} components per tuple but fine has {}", coarse, fine),
        }
    }
}

impl error::Error for Error {}
