//! `dog metric post`

use super::{CommandError, CommandResult, Context};
use clap::{Subcommand, ValueEnum};
use dog_lib::helpers::{local_hostname, split_tags, unix_now};
use dog_lib::model::{MetricPoint, MetricType};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum MetricTypeArg {
    #[default]
    Gauge,
    Count,
    Rate,
}

impl From<MetricTypeArg> for MetricType {
    fn from(t: MetricTypeArg) -> Self {
        match t {
            MetricTypeArg::Gauge => MetricType::Gauge,
            MetricTypeArg::Count => MetricType::Count,
            MetricTypeArg::Rate => MetricType::Rate,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum MetricCommands {
    /// Submit one point for a metric, timestamped now
    Post {
        name: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Report for this host (defaults to the local host name)
        #[arg(long, conflicts_with = "no_host")]
        host: Option<String>,
        /// Submit without any host
        #[arg(long)]
        no_host: bool,
        #[arg(long)]
        device: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long = "type", value_enum, default_value_t = MetricTypeArg::Gauge)]
        metric_type: MetricTypeArg,
    },
}

pub async fn run(ctx: &Context<'_>, cmd: MetricCommands) -> CommandResult {
    match cmd {
        MetricCommands::Post {
            name,
            value,
            host,
            no_host,
            device,
            tags,
            metric_type,
        } => {
            if !value.is_finite() {
                return Err(CommandError::Usage(format!(
                    "metric value must be a finite number, got {}",
                    value
                )));
            }
            let host = if no_host { None } else { host.or_else(local_hostname) };
            let mut point = MetricPoint::new(name, unix_now(), value);
            point.metric_type = metric_type.into();
            point.host = host;
            point.device = device;
            point.tags = tags.as_deref().map(split_tags).unwrap_or_default();
            tracing::debug!(metric = %point.metric, host = ?point.host, "submitting metric");
            ctx.checked(ctx.client.submit_metric(&point).await?)?;
            Ok(())
        }
    }
}
