use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell id outside `[0, len)` was addressed.
    OutOfRange { id: usize, len: usize },
    /// A reservation was attempted without a session name.
    NameRequired,
    /// Rows, columns and cells do not describe a valid grid.
    InvalidShape(String),
    /// A partition would exceed `MAX_CELLS` cells.
    TooLarge { rows: usize, cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { id, len } => {
                write!(f, "cell {id} is out of range (grid has {len} cells)")
            }
            Self::NameRequired => write!(f, "a name is required before reserving a cell"),
            Self::InvalidShape(msg) => write!(f, "invalid grid: {msg}"),
            Self::TooLarge { rows, cols } => write!(
                f,
                "a {rows}x{cols} partition exceeds the limit of {} cells",
                crate::grid::MAX_CELLS
            ),
        }
    }
}

impl std::error::Error for GridError {}
