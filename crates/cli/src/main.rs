// divspace CLI - edit, search and export a divisible space from the shell
//
// Every mutating command is one explicit save point: load the saved space,
// apply one operation, save the result.

mod exit_codes;
mod export;
mod project;
mod space;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use divspace_config::projects::ProjectError;
use divspace_config::{Settings, SlotStore, StoreError, Variant};
use divspace_engine::state::SpaceState;
use divspace_engine::GridError;

use exit_codes::{
    grid_exit_code, project_exit_code, store_exit_code, EXIT_ERROR, EXIT_EXPORT,
    EXIT_OUT_OF_RANGE, EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "dspace")]
#[command(about = "Partition a space into squares, annotate and reserve them, export the result")]
#[command(version)]
struct Cli {
    /// Which saved space to work on (defaults to settings, then "enhanced")
    #[arg(long, global = true, value_parser = parse_variant)]
    variant: Option<Variant>,

    /// Directory holding saved spaces (overrides settings)
    #[arg(long, global = true, env = "DIVSPACE_STORE")]
    store: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress confirmation lines on stderr
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a fresh space, replacing any saved one
    #[command(after_help = "\
Examples:
  dspace init
  dspace init --rows 4 --cols 6 --name Alice
  dspace --variant minimal init")]
    Init {
        /// Rows (values below 1 become 1; default depends on the variant)
        #[arg(long, allow_negative_numbers = true)]
        rows: Option<i64>,

        /// Columns (values below 1 become 1; default depends on the variant)
        #[arg(long, allow_negative_numbers = true)]
        cols: Option<i64>,

        /// Session name used for reservations
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the grid map and the reserved squares
    Show {
        /// Emit the saved configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count total, reserved and available squares
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// Set the session name used for reservations
    Name {
        name: String,
    },

    /// Re-partition the space. Discards every annotation and reservation.
    Resize {
        #[arg(allow_negative_numbers = true)]
        rows: i64,
        #[arg(allow_negative_numbers = true)]
        cols: i64,
    },

    /// Set details, color, tags or capacity of one square
    #[command(after_help = "\
Examples:
  dspace set 3 details 'Next to the stage'
  dspace set 3 tags 'vip, aisle'
  dspace set 3 color '#00ff00'
  dspace set 3 capacity 4")]
    Set {
        /// Square number (1-based)
        id: usize,

        /// details | color | tags | capacity
        field: String,

        value: String,
    },

    /// Reserve a square, or release it if already reserved
    Reserve {
        /// Square number (1-based)
        id: usize,

        /// Act under this name instead of the saved session name
        #[arg(long = "as", value_name = "NAME")]
        acting_name: Option<String>,
    },

    /// List squares whose details, tags or owner contain QUERY (any case)
    Search {
        #[arg(default_value = "")]
        query: String,

        #[arg(long)]
        json: bool,
    },

    /// Write the squares as a workbook (or CSV/JSON)
    Export(export::ExportArgs),

    /// Manage the project list
    #[command(subcommand)]
    Project(project::ProjectCommands),
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_name(s).ok_or_else(|| format!("unknown variant '{s}' (expected minimal or enhanced)"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = Context::new(&cli);
    let result = match cli.command {
        Commands::Init { rows, cols, name } => space::cmd_init(&ctx, rows, cols, name),
        Commands::Show { json } => space::cmd_show(&ctx, json),
        Commands::Summary { json } => space::cmd_summary(&ctx, json),
        Commands::Name { name } => space::cmd_name(&ctx, name),
        Commands::Resize { rows, cols } => space::cmd_resize(&ctx, rows, cols),
        Commands::Set { id, field, value } => space::cmd_set(&ctx, id, &field, value),
        Commands::Reserve { id, acting_name } => space::cmd_reserve(&ctx, id, acting_name),
        Commands::Search { query, json } => space::cmd_search(&ctx, &query, json),
        Commands::Export(args) => export::cmd_export(&ctx, args),
        Commands::Project(cmd) => project::cmd_project(&ctx, cmd),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Route `tracing` events and the library crates' `log` records to stderr.
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ============================================================================
// Context
// ============================================================================

/// Settings and flags resolved once per invocation.
pub(crate) struct Context {
    pub settings: Settings,
    pub store: SlotStore,
    pub variant: Variant,
    pub quiet: bool,
}

impl Context {
    fn new(cli: &Cli) -> Self {
        let settings = Settings::load();
        let store = match &cli.store {
            Some(dir) => SlotStore::new(dir.clone()),
            None => settings.store(),
        };
        let variant = cli.variant.unwrap_or(settings.default_variant);
        tracing::debug!(store = %store.dir().display(), ?variant, "resolved context");
        Self {
            settings,
            store,
            variant,
            quiet: cli.quiet,
        }
    }

    /// Saved snapshot, or the variant's default grid.
    pub fn load(&self) -> SpaceState {
        self.store.load_state(self.variant)
    }

    /// Name a reservation acts under: `--as`, else the saved session name,
    /// else `session.defaultName` from settings.
    pub fn acting_name<'a>(&'a self, state: &'a SpaceState, explicit: Option<&'a str>) -> &'a str {
        match explicit {
            Some(name) => name,
            None if state.session_name.is_empty() => self.settings.fallback_session_name(),
            None => &state.session_name,
        }
    }

    pub fn save(&self, state: &SpaceState) -> Result<(), CliError> {
        self.store
            .save(self.variant, &state.to_persisted())
            .map_err(CliError::store)
    }

    /// Confirmation line on stderr unless `--quiet`.
    pub fn note(&self, msg: impl AsRef<str>) {
        if !self.quiet {
            eprintln!("{}", msg.as_ref());
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Error from a grid operation, reported with 1-based square numbers.
    pub fn grid(err: GridError) -> Self {
        let code = grid_exit_code(&err);
        match err {
            GridError::OutOfRange { id, len } => Self::out_of_range(id + 1, len),
            GridError::NameRequired => Self { code, message: err.to_string(), hint: None }
                .with_hint("set one with `dspace name <NAME>` or pass --as <NAME>"),
            GridError::InvalidShape(_) => Self { code, message: err.to_string(), hint: None },
            GridError::TooLarge { .. } => Self { code, message: err.to_string(), hint: None }
                .with_hint("use fewer rows or columns"),
        }
    }

    pub fn out_of_range(square: usize, len: usize) -> Self {
        Self {
            code: EXIT_OUT_OF_RANGE,
            message: format!("square {square} does not exist"),
            hint: Some(format!("squares are numbered 1 to {len}")),
        }
    }

    pub fn store(err: StoreError) -> Self {
        Self { code: store_exit_code(&err), message: err.to_string(), hint: None }
    }

    pub fn project(err: ProjectError) -> Self {
        Self { code: project_exit_code(&err), message: err.to_string(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
