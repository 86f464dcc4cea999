//! `pnp-webui` links a monitoring web UI to the performance graphs kept by PNP4Nagios
//!
//! Nothing is fetched: given a host or a service it builds the urls of the graph images and of
//! the PNP pages behind them.
//!
//! ```
//! use pnp_webui::{GraphLinkBuilder, GraphOptions, GraphSource, MonitoredEntity, PnpConfig, TimeRange};
//!
//! let builder = GraphLinkBuilder::new(PnpConfig::new("http://pnp.example.com/pnp4nagios")).unwrap();
//! let service = MonitoredEntity::service("web-1", "Load", "load1=0.5 load5=0.3 load15=0.2");
//!
//! let links = builder.graph_links(
//!     Some(&service),
//!     TimeRange::new(1000., 4600.),
//!     GraphSource::Detail,
//!     &GraphOptions::new().width(800),
//! );
//!
//! assert_eq!(links.len(), 3);
//! assert!(links[2].img_src.contains("source=2&host=web-1&srv=Load&graph_width=800"));
//! ```

#[allow(unused)]
use tracing::{debug, error, info, span, trace, warn, Instrument, Level};

/// Module settings and uri normalization
pub mod config;

/// Hosts, services, and the trait the hosting framework's own objects implement
pub mod entity;

/// Graph and page url construction
pub mod links;

/// Splits performance data into metrics
pub mod perfdata;

/// Query string editing that leaves unrelated parameters alone
pub mod query;

#[cfg(test)]
mod test;

pub use config::{ConfigError, PnpConfig};
pub use entity::{Entity, EntityKind, MonitoredEntity};
pub use links::{ExternalLink, GraphLink, GraphLinkBuilder, GraphOptions, GraphSource, TimeRange};

/// Indicates that the module couldn't be set up
#[derive(thiserror::Error, Debug)]
pub enum PnpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unreadable settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Creates the module for the hosting framework's plugin manager.
pub fn instance(config: PnpConfig) -> Result<GraphLinkBuilder, PnpError> {
    info!(
        daemons = ?crate::config::DAEMONS,
        "Get an PNP UI module for plugin {}",
        config.name()
    );
    GraphLinkBuilder::new(config)
}

/// Like [`instance`], from JSON settings.
pub fn load(settings: &str) -> Result<GraphLinkBuilder, PnpError> {
    let config = PnpConfig::from_json(settings)?;
    instance(config)
}
