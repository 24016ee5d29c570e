//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad args, oversized grid)         |
//! | 3    | Square id outside the grid                     |
//! | 4    | Reservation attempted without a name           |
//! | 5    | IO error reading or writing saved state        |
//! | 6    | Export failed                                  |

use divspace_config::projects::ProjectError;
use divspace_config::StoreError;
use divspace_engine::GridError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing or unparsable values.
pub const EXIT_USAGE: u8 = 2;

/// A square id outside `1..=rows*cols` was addressed.
pub const EXIT_OUT_OF_RANGE: u8 = 3;

/// A reservation (or project) needs a name and none was given.
pub const EXIT_NAME_REQUIRED: u8 = 4;

/// Reading or writing saved state failed.
pub const EXIT_IO: u8 = 5;

/// Writing the export file failed.
pub const EXIT_EXPORT: u8 = 6;

pub fn grid_exit_code(err: &GridError) -> u8 {
    match err {
        GridError::OutOfRange { .. } => EXIT_OUT_OF_RANGE,
        GridError::NameRequired => EXIT_NAME_REQUIRED,
        GridError::InvalidShape(_) => EXIT_ERROR,
        GridError::TooLarge { .. } => EXIT_USAGE,
    }
}

pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::Io(_) => EXIT_IO,
        StoreError::Malformed(_) | StoreError::Serialize(_) => EXIT_ERROR,
    }
}

pub fn project_exit_code(err: &ProjectError) -> u8 {
    match err {
        ProjectError::NameRequired => EXIT_NAME_REQUIRED,
        ProjectError::Store(e) => store_exit_code(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_OUT_OF_RANGE,
            EXIT_NAME_REQUIRED,
            EXIT_IO,
            EXIT_EXPORT,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn test_grid_errors_map() {
        assert_eq!(grid_exit_code(&GridError::NameRequired), EXIT_NAME_REQUIRED);
        assert_eq!(
            grid_exit_code(&GridError::OutOfRange { id: 9, len: 4 }),
            EXIT_OUT_OF_RANGE
        );
        assert_eq!(grid_exit_code(&GridError::TooLarge { rows: 2, cols: 1 << 40 }), EXIT_USAGE);
    }
}
