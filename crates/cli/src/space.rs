//! Space commands: init, show, summary, name, resize, set, reserve, search.
//!
//! Squares are numbered from 1 on the command line, as in the export.

use serde::Serialize;

use divspace_engine::cell::{Cell, CellField, FieldUpdate};
use divspace_engine::grid::{cell_count, clamp_dimension, Grid};
use divspace_engine::state::{Operation, SpaceState};

use crate::util::format_table;
use crate::{CliError, Context};

/// Columns of the square listings printed by `show` and `search`
const LIST_HEADERS: [&str; 6] = ["#", "Details", "Reserved By", "Capacity", "Color", "Tags"];

/// Grids wider than this print only the reserved list, not the map
const MAX_MAP_COLS: usize = 64;

/// Convert a 1-based square number to a cell id within `grid`.
fn cell_id(grid: &Grid, square: usize) -> Result<usize, CliError> {
    if square == 0 || square > grid.len() {
        return Err(CliError::out_of_range(square, grid.len()));
    }
    Ok(square - 1)
}

fn apply(state: &SpaceState, op: Operation) -> Result<SpaceState, CliError> {
    state.apply(op).map_err(CliError::grid)
}

fn list_row(cell: &Cell) -> Vec<String> {
    vec![
        cell.display_number().to_string(),
        cell.details.clone(),
        cell.reserved_by.clone(),
        cell.capacity.to_string(),
        cell.color.clone(),
        cell.tags_display(),
    ]
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::general(format!("JSON error: {e}")))?;
    println!("{json}");
    Ok(())
}

/// One character per square, rows on separate lines: `#` reserved, `.` free.
fn grid_map(grid: &Grid) -> String {
    grid.cells()
        .chunks(grid.cols())
        .map(|row| {
            row.iter()
                .map(|cell| if cell.reserved { '#' } else { '.' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// init
// ============================================================================

pub(crate) fn cmd_init(
    ctx: &Context,
    rows: Option<i64>,
    cols: Option<i64>,
    name: Option<String>,
) -> Result<(), CliError> {
    let (default_rows, default_cols) = ctx.variant.default_dimensions();
    let rows = rows.map(clamp_dimension).unwrap_or(default_rows);
    let cols = cols.map(clamp_dimension).unwrap_or(default_cols);

    cell_count(rows, cols).map_err(CliError::grid)?;

    let mut state = SpaceState::new(rows, cols);
    if let Some(name) = name {
        state = apply(&state, Operation::SetSessionName(name))?;
    }
    ctx.save(&state)?;
    ctx.note(format!("initialized {rows}x{cols} space ({} squares)", state.grid.len()));
    Ok(())
}

// ============================================================================
// show / summary
// ============================================================================

pub(crate) fn cmd_show(ctx: &Context, json: bool) -> Result<(), CliError> {
    let state = ctx.load();
    if json {
        return print_json(&state.to_persisted());
    }

    let grid = &state.grid;
    let name = if state.session_name.is_empty() { "(none)" } else { state.session_name.as_str() };
    println!("{} x {} squares, session name: {}", grid.rows(), grid.cols(), name);
    if grid.cols() <= MAX_MAP_COLS {
        println!("{}", grid_map(grid));
    }

    let reserved: Vec<Vec<String>> = grid.reserved().map(list_row).collect();
    if !reserved.is_empty() {
        println!();
        print!("{}", format_table(&LIST_HEADERS, &reserved));
    }
    Ok(())
}

#[derive(Serialize)]
struct SummaryJson {
    rows: usize,
    cols: usize,
    total: usize,
    reserved: usize,
    available: usize,
}

pub(crate) fn cmd_summary(ctx: &Context, json: bool) -> Result<(), CliError> {
    let state = ctx.load();
    let summary = state.grid.summary();
    if json {
        return print_json(&SummaryJson {
            rows: state.grid.rows(),
            cols: state.grid.cols(),
            total: summary.total,
            reserved: summary.reserved,
            available: summary.available,
        });
    }
    println!("total:     {}", summary.total);
    println!("reserved:  {}", summary.reserved);
    println!("available: {}", summary.available);
    Ok(())
}

// ============================================================================
// name / resize / set / reserve
// ============================================================================

pub(crate) fn cmd_name(ctx: &Context, name: String) -> Result<(), CliError> {
    let state = apply(&ctx.load(), Operation::SetSessionName(name))?;
    ctx.save(&state)?;
    ctx.note(format!("session name set to {:?}", state.session_name));
    Ok(())
}

pub(crate) fn cmd_resize(ctx: &Context, rows: i64, cols: i64) -> Result<(), CliError> {
    let state = ctx.load();
    let rows = clamp_dimension(rows);
    let cols = clamp_dimension(cols);

    let discarded = state.grid.summary();
    let next = apply(&state, Operation::Repartition { rows, cols })?;
    ctx.save(&next)?;

    if discarded.reserved > 0 {
        tracing::warn!(reserved = discarded.reserved, "resize released every reservation");
    }
    ctx.note(format!(
        "re-partitioned to {rows}x{cols}; {} previous squares cleared",
        discarded.total
    ));
    Ok(())
}

pub(crate) fn cmd_set(ctx: &Context, square: usize, field: &str, value: String) -> Result<(), CliError> {
    let field = CellField::from_name(field).ok_or_else(|| {
        CliError::args(format!("unknown field '{field}'"))
            .with_hint("expected one of: details, color, tags, capacity")
    })?;
    let update = match field {
        CellField::Details => FieldUpdate::Details(value),
        CellField::Color => FieldUpdate::Color(value),
        CellField::Tags => FieldUpdate::Tags(value),
        CellField::Capacity => {
            let capacity = value.trim().parse::<u32>().map_err(|_| {
                CliError::args(format!("capacity must be a whole number, got '{value}'"))
            })?;
            FieldUpdate::Capacity(capacity)
        }
    };

    let state = ctx.load();
    let id = cell_id(&state.grid, square)?;
    let next = apply(&state, Operation::SetField { id, update })?;
    ctx.save(&next)?;
    ctx.note(format!("square {square}: {} updated", field.name()));
    Ok(())
}

pub(crate) fn cmd_reserve(ctx: &Context, square: usize, acting_name: Option<String>) -> Result<(), CliError> {
    let state = ctx.load();
    let id = cell_id(&state.grid, square)?;

    // The saved session name is never changed here
    let name = ctx.acting_name(&state, acting_name.as_deref());
    let next = SpaceState {
        grid: state.grid.toggle_reservation(id, name).map_err(CliError::grid)?,
        session_name: state.session_name.clone(),
    };
    ctx.save(&next)?;

    let cell = next.grid.cell(id).map_err(CliError::grid)?;
    if cell.reserved {
        ctx.note(format!("square {square} reserved by {}", cell.reserved_by));
    } else {
        ctx.note(format!("square {square} released"));
    }
    Ok(())
}

// ============================================================================
// search
// ============================================================================

pub(crate) fn cmd_search(ctx: &Context, query: &str, json: bool) -> Result<(), CliError> {
    let state = ctx.load();
    let matches = state.grid.filter(query);

    if json {
        let cells: Vec<&Cell> = matches.collect();
        return print_json(&cells);
    }

    let rows: Vec<Vec<String>> = matches.map(list_row).collect();
    if rows.is_empty() {
        ctx.note(format!("no squares match {query:?}"));
        return Ok(());
    }
    print!("{}", format_table(&LIST_HEADERS, &rows));
    Ok(())
}
