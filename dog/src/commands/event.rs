//! `dog event post|show|stream`

use super::{read_stdin, CommandError, CommandResult, Context};
use crate::output;
use clap::{Subcommand, ValueEnum};
use dog_lib::helpers::{relative_to_now, split_tags, unix_now};
use dog_lib::model::{AlertType, EventQuery, NewEvent, Priority};
use serde_json::Value;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorityArg {
    Normal,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::Normal => Priority::Normal,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AlertTypeArg {
    Error,
    Warning,
    Info,
    Success,
}

impl From<AlertTypeArg> for AlertType {
    fn from(a: AlertTypeArg) -> Self {
        match a {
            AlertTypeArg::Error => AlertType::Error,
            AlertTypeArg::Warning => AlertType::Warning,
            AlertTypeArg::Info => AlertType::Info,
            AlertTypeArg::Success => AlertType::Success,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// Post an event; the event text is read from stdin
    Post {
        title: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
        #[arg(long, value_enum)]
        alert_type: Option<AlertTypeArg>,
        /// Events with the same key are grouped in the stream
        #[arg(long)]
        aggregation_key: Option<String>,
        /// Source type name, e.g. `nagios`
        #[arg(long = "type")]
        source_type: Option<String>,
        /// Unix timestamp or relative time (`10m`, `2h`); defaults to now
        #[arg(long)]
        date_happened: Option<String>,
        #[arg(long)]
        related_event_id: Option<u64>,
        /// Don't read stdin; post the title only
        #[arg(long)]
        no_text: bool,
    },
    /// Show one event
    Show { event_id: u64 },
    /// List events between START and END (default now)
    Stream {
        /// Unix timestamp or relative time such as `30m`, `1d`
        start: String,
        end: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,
        /// Comma-separated source types
        #[arg(long)]
        sources: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
}

pub async fn run(ctx: &Context<'_>, cmd: EventCommands) -> CommandResult {
    match cmd {
        EventCommands::Post {
            title,
            tags,
            host,
            priority,
            alert_type,
            aggregation_key,
            source_type,
            date_happened,
            related_event_id,
            no_text,
        } => {
            let text = if no_text { String::new() } else { read_stdin()? };
            let date_happened = date_happened
                .map(|d| relative_to_now(&d).map_err(CommandError::Usage))
                .transpose()?;
            let event = NewEvent {
                title,
                text,
                tags: tags.as_deref().map(split_tags).unwrap_or_default(),
                priority: priority.map(Priority::from),
                alert_type: alert_type.map(AlertType::from),
                host,
                aggregation_key,
                source_type_name: source_type,
                date_happened,
                related_event_id,
            };
            let res = ctx.checked(ctx.client.post_event(&event).await?)?;
            print_event(ctx, &res.body)
        }
        EventCommands::Show { event_id } => {
            let res = ctx.checked(ctx.client.get_event(event_id).await?)?;
            print_event(ctx, &res.body)
        }
        EventCommands::Stream {
            start,
            end,
            priority,
            sources,
            tags,
        } => {
            let start = relative_to_now(&start).map_err(CommandError::Usage)?;
            let end = match end {
                Some(e) => relative_to_now(&e).map_err(CommandError::Usage)?,
                None => unix_now(),
            };
            if start > end {
                return Err(CommandError::Usage(
                    "stream start must be before its end".to_string(),
                ));
            }
            let query = EventQuery {
                start,
                end,
                priority: priority.map(Priority::from),
                sources,
                tags: tags.as_deref().map(split_tags).unwrap_or_default(),
            };
            let res = ctx.checked(ctx.client.stream_events(&query).await?)?;
            if ctx.print_structured(&res.body)? {
                return Ok(());
            }
            let events = res
                .get("events")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            print!(
                "{}",
                output::format_event_stream(&events, ctx.permalink(), ctx.use_utc)
            );
            Ok(())
        }
    }
}

fn print_event(ctx: &Context<'_>, body: &Value) -> CommandResult {
    if ctx.print_structured(body)? {
        return Ok(());
    }
    let event = body.get("event").unwrap_or(&Value::Null);
    print!(
        "{}",
        output::format_event(event, ctx.permalink(), ctx.use_utc)
    );
    Ok(())
}
