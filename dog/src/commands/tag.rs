//! `dog tag add|replace|show|detach`

use super::{CommandError, CommandResult, Context};
use crate::output;
use clap::Subcommand;
use dog_lib::ApiResponse;
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add tags to a host
    Add {
        host: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Replace all of a host's tags
    Replace {
        host: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Show a host's tags, or every tag and its hosts when no host is given
    Show { host: Option<String> },
    /// Remove all tags from a host
    Detach { host: String },
}

pub async fn run(ctx: &Context<'_>, cmd: TagCommands) -> CommandResult {
    match cmd {
        TagCommands::Add { host, tags } => {
            let tags = clean(tags)?;
            let res = ctx.checked(ctx.client.add_tags(&host, &tags).await?)?;
            print_host_tags(ctx, &res)
        }
        TagCommands::Replace { host, tags } => {
            let tags = clean(tags)?;
            let res = ctx.checked(ctx.client.replace_tags(&host, &tags).await?)?;
            print_host_tags(ctx, &res)
        }
        TagCommands::Show { host: Some(host) } => {
            let res = ctx.checked(ctx.client.host_tags(&host).await?)?;
            print_host_tags(ctx, &res)
        }
        TagCommands::Show { host: None } => {
            let res = ctx.checked(ctx.client.all_tags().await?)?;
            if ctx.print_structured(&res.body)? {
                return Ok(());
            }
            print!(
                "{}",
                output::format_tag_map(res.get("tags").unwrap_or(&Value::Null))
            );
            Ok(())
        }
        TagCommands::Detach { host } => {
            ctx.checked(ctx.client.detach_tags(&host).await?)?;
            Ok(())
        }
    }
}

/// Accept both `t1 t2` and `t1,t2`.
fn clean(tags: Vec<String>) -> Result<Vec<String>, CommandError> {
    let tags: Vec<String> = tags
        .iter()
        .flat_map(|t| dog_lib::helpers::split_tags(t))
        .collect();
    if tags.is_empty() {
        return Err(CommandError::Usage("no tags given".to_string()));
    }
    Ok(tags)
}

fn print_host_tags(ctx: &Context<'_>, res: &ApiResponse) -> CommandResult {
    if ctx.print_structured(&res.body)? {
        return Ok(());
    }
    print!(
        "{}",
        output::format_tag_list(res.get("tags").unwrap_or(&Value::Null))
    );
    Ok(())
}
