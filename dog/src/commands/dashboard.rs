//! `dog dashboard ...`: create, push, pull, show, update, and delete dashboards.

use super::{read_stdin, CommandError, CommandResult, Context};
use crate::output::value_id;
use clap::Subcommand;
use dog_lib::dashboard::{parse_graphs, write_value};
use dog_lib::{ApiResponse, DashboardDefinition, DashboardFile, Error};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum DashboardCommands {
    /// Create a blank dashboard on the server and write it to FILE
    #[command(name = "new_file", alias = "new-file")]
    NewFile {
        file: PathBuf,
        #[arg(long, default_value = "New Dashboard")]
        title: String,
    },
    /// Upload dashboard files; files without an id are created and rewritten with one
    Push {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Download a dashboard to FILE
    Pull { dash_id: u64, file: PathBuf },
    /// Download every dashboard into DIR as `<id>.json`
    #[command(name = "pull_all", alias = "pull-all")]
    PullAll { dir: PathBuf },
    /// Create a dashboard; graphs JSON is read from stdin
    Post { title: String, description: String },
    /// Replace a dashboard's title, description, and graphs (graphs JSON from stdin)
    Update {
        dash_id: u64,
        title: String,
        description: String,
    },
    /// Print one dashboard as JSON
    Show { dash_id: u64 },
    /// Print every dashboard summary as JSON
    #[command(name = "show_all", alias = "show-all")]
    ShowAll,
    /// Delete a dashboard
    Delete { dash_id: u64 },
}

pub async fn run(ctx: &Context<'_>, cmd: DashboardCommands) -> CommandResult {
    match cmd {
        DashboardCommands::NewFile { file, title } => {
            let def = DashboardDefinition::template(title);
            let res = ctx.checked(ctx.client.create_dashboard(&def).await?)?;
            write_value(&file, dash_of(&res)?)?;
            tracing::debug!(file = %file.display(), "wrote new dashboard");
            Ok(())
        }
        DashboardCommands::Push { files } => {
            for file in files {
                push_file(ctx, &file).await?;
            }
            Ok(())
        }
        DashboardCommands::Pull { dash_id, file } => {
            let res = ctx.checked(ctx.client.get_dashboard(dash_id).await?)?;
            write_value(&file, dash_of(&res)?)?;
            Ok(())
        }
        DashboardCommands::PullAll { dir } => {
            std::fs::create_dir_all(&dir)?;
            let res = ctx.checked(ctx.client.list_dashboards().await?)?;
            let ids: Vec<u64> = res
                .get("dashes")
                .and_then(Value::as_array)
                .map(|dashes| {
                    dashes
                        .iter()
                        .filter_map(|d| d.get("id").and_then(value_id))
                        .collect()
                })
                .unwrap_or_default();
            for id in ids {
                let res = ctx.checked(ctx.client.get_dashboard(id).await?)?;
                let path = dir.join(format!("{}.json", id));
                write_value(&path, dash_of(&res)?)?;
                tracing::debug!(dash_id = id, file = %path.display(), "pulled dashboard");
            }
            Ok(())
        }
        DashboardCommands::Post { title, description } => {
            let def = DashboardDefinition {
                title,
                description,
                graphs: parse_graphs(&read_stdin()?)?,
                template_variables: None,
            };
            let res = ctx.checked(ctx.client.create_dashboard(&def).await?)?;
            ctx.print_json(&res.body)
        }
        DashboardCommands::Update {
            dash_id,
            title,
            description,
        } => {
            let def = DashboardDefinition {
                title,
                description,
                graphs: parse_graphs(&read_stdin()?)?,
                template_variables: None,
            };
            let res = ctx.checked(ctx.client.update_dashboard(dash_id, &def).await?)?;
            ctx.print_json(&res.body)
        }
        DashboardCommands::Show { dash_id } => {
            let res = ctx.checked(ctx.client.get_dashboard(dash_id).await?)?;
            ctx.print_json(&res.body)
        }
        DashboardCommands::ShowAll => {
            let res = ctx.checked(ctx.client.list_dashboards().await?)?;
            ctx.print_json(&res.body)
        }
        DashboardCommands::Delete { dash_id } => {
            ctx.checked(ctx.client.delete_dashboard(dash_id).await?)?;
            Ok(())
        }
    }
}

async fn push_file(ctx: &Context<'_>, file: &Path) -> CommandResult {
    let dash = DashboardFile::read(file)?;
    let def = dash.definition();
    match dash.numeric_id() {
        Some(id) => {
            tracing::debug!(dash_id = id, file = %file.display(), "updating dashboard");
            ctx.checked(ctx.client.update_dashboard(id, &def).await?)?;
        }
        None => {
            tracing::debug!(file = %file.display(), "creating dashboard");
            let res = ctx.checked(ctx.client.create_dashboard(&def).await?)?;
            write_value(file, dash_of(&res)?)?;
        }
    }
    Ok(())
}

fn dash_of(res: &ApiResponse) -> Result<&Value, CommandError> {
    res.get("dash")
        .filter(|d| d.is_object())
        .ok_or_else(|| CommandError::Lib(Error::Other("response has no dashboard".to_string())))
}
