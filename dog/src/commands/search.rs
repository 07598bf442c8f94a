//! `dog search query`

use super::{CommandResult, Context};
use crate::output;
use clap::Subcommand;
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum SearchCommands {
    /// Search hosts and metrics; prefix with `hosts:` or `metrics:` to narrow
    Query { query: String },
}

pub async fn run(ctx: &Context<'_>, cmd: SearchCommands) -> CommandResult {
    match cmd {
        SearchCommands::Query { query } => {
            let res = ctx.checked(ctx.client.search(&query).await?)?;
            if ctx.print_structured(&res.body)? {
                return Ok(());
            }
            let results = res.get("results").unwrap_or(&Value::Null);
            print!("{}", output::format_search(results));
            Ok(())
        }
    }
}
