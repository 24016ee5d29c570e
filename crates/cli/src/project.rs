//! `dspace project`: the project list.

use clap::Subcommand;
use serde::Serialize;

use divspace_config::{Project, ProjectRegistry, ProjectStatus, SlotStore};

use crate::util::format_table;
use crate::{CliError, Context};

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Add a project
    Add {
        name: String,

        #[arg(long, short = 'd', default_value = "")]
        description: String,

        /// active | completed | on-hold
        #[arg(long, short = 's', default_value = "active", value_parser = parse_status)]
        status: ProjectStatus,
    },

    /// List projects in creation order
    List {
        #[arg(long)]
        json: bool,
    },
}

fn parse_status(s: &str) -> Result<ProjectStatus, String> {
    ProjectStatus::from_name(s)
        .ok_or_else(|| format!("unknown status '{s}' (expected active, completed or on-hold)"))
}

/// Projects share the directory of the saved spaces.
fn registry(ctx: &Context) -> ProjectRegistry {
    ProjectRegistry::open(SlotStore::new(ctx.store.dir()))
}

pub(crate) fn cmd_project(ctx: &Context, cmd: ProjectCommands) -> Result<(), CliError> {
    match cmd {
        ProjectCommands::Add { name, description, status } => {
            let mut registry = registry(ctx);
            let project = registry
                .create(&name, &description, status)
                .map_err(CliError::project)?;
            ctx.note(format!("project {} created ({})", project.name, project.id));
            Ok(())
        }
        ProjectCommands::List { json } => {
            let registry = registry(ctx);
            if json {
                return print_projects_json(registry.list());
            }
            let rows: Vec<Vec<String>> = registry
                .list()
                .iter()
                .map(|p| {
                    vec![
                        p.name.clone(),
                        p.status.as_str().to_string(),
                        p.created_at.format("%Y-%m-%d %H:%M").to_string(),
                        p.description.clone(),
                    ]
                })
                .collect();
            if rows.is_empty() {
                ctx.note("no projects yet");
                return Ok(());
            }
            print!("{}", format_table(&["Name", "Status", "Created", "Description"], &rows));
            Ok(())
        }
    }
}

fn print_projects_json(projects: &[Project]) -> Result<(), CliError> {
    #[derive(Serialize)]
    struct Listing<'a> {
        projects: &'a [Project],
    }
    let json = serde_json::to_string_pretty(&Listing { projects })
        .map_err(|e| CliError::general(format!("JSON error: {e}")))?;
    println!("{json}");
    Ok(())
}
