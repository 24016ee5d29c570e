//! Snapshot state store.
//!
//! `SpaceState` pairs a grid with the session name used for reservations.
//! Transitions are pure: `apply` returns the next snapshot and leaves the
//! current one alone, so an error leaves the caller holding a valid state.

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, FieldUpdate};
use crate::error::GridError;
use crate::grid::Grid;

/// The exact shape written to and read from durable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    pub rows: usize,
    pub cols: usize,
    pub squares: Vec<Cell>,
    #[serde(default)]
    pub name: String,
}

/// A single state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Repartition { rows: usize, cols: usize },
    SetField { id: usize, update: FieldUpdate },
    ToggleReservation { id: usize },
    SetSessionName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceState {
    pub grid: Grid,
    pub session_name: String,
}

impl SpaceState {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::initialize(rows, cols),
            session_name: String::new(),
        }
    }

    pub fn apply(&self, op: Operation) -> Result<Self, GridError> {
        match op {
            Operation::Repartition { rows, cols } => Ok(Self {
                grid: self.grid.repartition(rows, cols)?,
                session_name: self.session_name.clone(),
            }),
            Operation::SetField { id, update } => Ok(Self {
                grid: self.grid.set_field(id, update)?,
                session_name: self.session_name.clone(),
            }),
            Operation::ToggleReservation { id } => Ok(Self {
                grid: self.grid.toggle_reservation(id, &self.session_name)?,
                session_name: self.session_name.clone(),
            }),
            Operation::SetSessionName(name) => Ok(Self {
                grid: self.grid.clone(),
                session_name: name,
            }),
        }
    }

    pub fn to_persisted(&self) -> PersistedConfig {
        PersistedConfig {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            squares: self.grid.cells().to_vec(),
            name: self.session_name.clone(),
        }
    }

    /// Rebuild a snapshot, validating the grid invariants.
    pub fn from_persisted(config: PersistedConfig) -> Result<Self, GridError> {
        let grid = Grid::from_parts(config.rows, config.cols, config.squares)?;
        Ok(Self {
            grid,
            session_name: config.name,
        })
    }
}
