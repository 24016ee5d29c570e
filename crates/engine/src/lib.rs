pub mod cell;
pub mod error;
pub mod filter;
pub mod grid;
pub mod reservation;
pub mod state;

pub use cell::{Cell, CellField, FieldUpdate};
pub use error::GridError;
pub use filter::{Matches, SearchFilter};
pub use grid::{Grid, Summary, MAX_CELLS};
pub use state::{Operation, PersistedConfig, SpaceState};
