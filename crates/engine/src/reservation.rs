//! Reservation Policy.
//!
//! Toggling alternates a cell between unreserved and reserved-by-`name`.
//! Releasing does not check ownership: whoever holds a session name can
//! release anyone's reservation.

use crate::error::GridError;
use crate::grid::Grid;

impl Grid {
    /// Flip the reservation on cell `id`, attributing a new reservation to
    /// `acting_name`.
    ///
    /// An empty `acting_name` fails with `NameRequired` before anything else is
    /// looked at; the receiver is never modified either way.
    pub fn toggle_reservation(&self, id: usize, acting_name: &str) -> Result<Self, GridError> {
        if acting_name.is_empty() {
            return Err(GridError::NameRequired);
        }
        self.with_cell(id, |cell| {
            if cell.reserved {
                log::debug!("cell {id}: released (was held by {:?})", cell.reserved_by);
                cell.reserved = false;
                cell.reserved_by.clear();
            } else {
                log::debug!("cell {id}: reserved by {acting_name:?}");
                cell.reserved = true;
                cell.reserved_by = acting_name.to_string();
            }
        })
    }
}
