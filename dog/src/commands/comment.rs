//! `dog comment post|update|show|delete`

use super::{read_stdin, CommandError, CommandResult, Context};
use crate::output;
use clap::Subcommand;
use dog_lib::model::CommentRequest;
use serde_json::Value;

#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Post a comment; the message is read from stdin
    Post {
        /// Handle to post as
        #[arg(long)]
        handle: Option<String>,
        /// Attach the comment to this event
        #[arg(long)]
        related_event_id: Option<u64>,
    },
    /// Replace a comment's message with stdin
    Update {
        comment_id: u64,
        #[arg(long)]
        handle: Option<String>,
    },
    /// Show one comment
    Show { comment_id: u64 },
    /// Delete a comment
    Delete { comment_id: u64 },
}

pub async fn run(ctx: &Context<'_>, cmd: CommentCommands) -> CommandResult {
    match cmd {
        CommentCommands::Post {
            handle,
            related_event_id,
        } => {
            let message = read_message()?;
            let req = CommentRequest {
                message,
                handle,
                related_event_id,
            };
            let res = ctx.checked(ctx.client.post_comment(&req).await?)?;
            print_comment(ctx, &res.body, "comment")
        }
        CommentCommands::Update { comment_id, handle } => {
            let message = read_message()?;
            let req = CommentRequest {
                message,
                handle,
                related_event_id: None,
            };
            let res = ctx.checked(ctx.client.update_comment(comment_id, &req).await?)?;
            print_comment(ctx, &res.body, "comment")
        }
        CommentCommands::Show { comment_id } => {
            let res = ctx.checked(ctx.client.get_event(comment_id).await?)?;
            print_comment(ctx, &res.body, "event")
        }
        CommentCommands::Delete { comment_id } => {
            ctx.checked(ctx.client.delete_comment(comment_id).await?)?;
            Ok(())
        }
    }
}

fn read_message() -> Result<String, CommandError> {
    let message = read_stdin()?;
    if message.trim().is_empty() {
        return Err(CommandError::Usage(
            "no comment message given on stdin".to_string(),
        ));
    }
    Ok(message)
}

fn print_comment(ctx: &Context<'_>, body: &Value, key: &str) -> CommandResult {
    if ctx.print_structured(body)? {
        return Ok(());
    }
    let comment = body.get(key).unwrap_or(&Value::Null);
    print!("{}", output::format_comment(comment, ctx.permalink()));
    Ok(())
}
