use std::{path::PathBuf, time::Duration};

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pnp_webui::{GraphOptions, GraphSource, MonitoredEntity, PnpConfig, TimeRange};

/// Prints the PNP4Nagios graph links for a host or a service as JSON
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// JSON settings file (module_name, uri, username, password)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Base uri of the PNP4Nagios installation, overrides the settings file
    #[clap(short, long)]
    uri: Option<String>,

    #[clap(long)]
    username: Option<String>,

    #[clap(long)]
    password: Option<String>,

    /// Print the backend's external link instead of graph links
    #[clap(long)]
    external: bool,

    #[clap(long, required_unless_present = "external")]
    host: Option<String>,

    /// Service description; without it the links are for the host itself
    #[clap(long)]
    service: Option<String>,

    #[clap(short, long, default_value = "")]
    perf_data: String,

    /// Graph start, seconds since the epoch (default: an hour ago)
    #[clap(long)]
    start: Option<f64>,

    /// Graph end, seconds since the epoch (default: now)
    #[clap(long)]
    end: Option<f64>,

    #[clap(long)]
    width: Option<String>,

    #[clap(long)]
    height: Option<String>,

    /// detail or dashboard
    #[clap(long, default_value = "detail")]
    source: GraphSource,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match args.config.as_ref() {
        Some(path) => PnpConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => PnpConfig::default(),
    };
    if args.uri.is_some() {
        config.uri = args.uri;
    }
    if args.username.is_some() {
        config.username = args.username;
    }
    if let Some(password) = args.password {
        config.password = password.into();
    }

    let builder = pnp_webui::instance(config)?;

    if args.external {
        println!("{}", serde_json::to_string_pretty(&builder.external_link())?);
        return Ok(());
    }

    let host = args.host.ok_or(anyhow!("--host is required"))?;
    let entity = match args.service {
        Some(description) => MonitoredEntity::service(host, description, args.perf_data),
        None => MonitoredEntity::host(host, args.perf_data),
    };

    let last_hour = TimeRange::ending_now(Duration::from_secs(3600));
    let range = TimeRange::new(
        args.start.unwrap_or(last_hour.start),
        args.end.unwrap_or(last_hour.end),
    );

    let options = GraphOptions {
        width: args.width,
        height: args.height,
    };

    let links = builder.graph_links(Some(&entity), range, args.source, &options);
    println!("{}", serde_json::to_string_pretty(&links)?);

    Ok(())
}
