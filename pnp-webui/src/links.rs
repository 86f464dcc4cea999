#[allow(unused)]
use tracing::{debug, error, info, span, trace, warn, Instrument, Level};

use std::{
    fmt::Display,
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde_derive::Serialize;

use crate::{
    config::{local_host_name, Password, PnpConfig},
    entity::{Entity, EntityKind},
    perfdata,
    query::Query,
    PnpError,
};

pub const DEFAULT_GRAPH_WIDTH: u32 = 586;
pub const DEFAULT_GRAPH_HEIGHT: u32 = 308;

/// Label shown next to the backend's uri in the UI
pub const EXTERNAL_LABEL: &str = "PNP4";

const GRAPH_WIDTH: &str = "graph_width";
const GRAPH_HEIGHT: &str = "graph_height";

const IMAGE_PATH: &str = "index.php/image?view=0";
const GRAPH_PATH: &str = "index.php/graph?";

/// PNP4Nagios' service name for a host's own check
const HOST_SERVICE: &str = "_HOST_";

/// One graph: the PNP page to drill down into and the image to embed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub link: String,
    pub img_src: String,
}

/// Where the graphing backend lives, for the UI's list of external tools
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExternalLink<'a> {
    pub label: &'static str,
    pub uri: &'a str,
}

/// The UI page asking for graphs.  Accepted for every request but it doesn't change the links
/// (yet).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GraphSource {
    /// The host or service detail page
    #[default]
    Detail,
    /// A dashboard widget
    Dashboard,
}

/// Graph size overrides.  Values are written into the image url verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Graph window, in seconds since the epoch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

/// Builds PNP4Nagios graph and page urls for hosts and services.
///
/// The base uri is validated and normalized once, when the builder is created; every other
/// operation is a pure string transformation.
#[derive(Clone, Debug)]
pub struct GraphLinkBuilder {
    uri: String,
    username: Option<String>,
    password: Password,
}

/// Host/srv pair PNP4Nagios files an entity's graphs under
#[derive(Debug)]
enum GraphTarget<'a> {
    Host(&'a str),
    Service { host: &'a str, description: &'a str },
}

impl FromStr for GraphSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detail" => Ok(Self::Detail),
            "dashboard" => Ok(Self::Dashboard),
            _ => Err(format!("unknown graph source «{}»", s)),
        }
    }
}

impl GraphOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(self, width: impl Display) -> Self {
        Self {
            width: Some(width.to_string()),
            ..self
        }
    }

    pub fn height(self, height: impl Display) -> Self {
        Self {
            height: Some(height.to_string()),
            ..self
        }
    }
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The `span` leading up to now
    pub fn ending_now(span: Duration) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        Self::new(now - span.as_secs_f64(), now)
    }
}

impl<'a> GraphTarget<'a> {
    fn of<E: Entity + ?Sized>(entity: &'a E) -> Option<Self> {
        match entity.kind() {
            EntityKind::Host => Some(Self::Host(entity.host_name())),
            EntityKind::Service => match entity.service_description() {
                Some(description) => Some(Self::Service {
                    host: entity.host_name(),
                    description,
                }),
                None => {
                    debug!(host = entity.host_name(), "service without a description");
                    None
                }
            },
            // Not an error, there just aren't any graphs
            EntityKind::Other => None,
        }
    }

    fn host(&self) -> &'a str {
        match self {
            Self::Host(host) | Self::Service { host, .. } => *host,
        }
    }

    fn srv(&self) -> &'a str {
        match self {
            Self::Host(_) => HOST_SERVICE,
            Self::Service { description, .. } => *description,
        }
    }
}

impl GraphLinkBuilder {
    /// Creates a builder, resolving the local host name if the uri asks for it.
    pub fn new(config: PnpConfig) -> Result<Self, PnpError> {
        Self::build(config, local_host_name)
    }

    /// Creates a builder that substitutes `host_name` for the uri's placeholder instead of
    /// looking the local name up.
    pub fn with_host_name(config: PnpConfig, host_name: Option<&str>) -> Result<Self, PnpError> {
        Self::build(config, || host_name.map(str::to_owned))
    }

    fn build<F>(config: PnpConfig, host_name: F) -> Result<Self, PnpError>
    where
        F: FnOnce() -> Option<String>,
    {
        let uri = config.base_uri(host_name)?;
        debug!(%uri, module = config.name(), "graph backend");

        Ok(Self {
            uri,
            username: config.username,
            password: config.password,
        })
    }

    /// Normalized base uri, always ending with `/`
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Number of graphs the backend has for `entity`
    pub fn metric_count<E: Entity + ?Sized>(entity: &E) -> usize {
        perfdata::metric_count(entity.perf_data())
    }

    /// Sets `graph_width` and `graph_height` in `url`'s query string, replacing existing values
    /// or appending new parameters.  Every other parameter is left alone.
    pub fn override_graph_size(url: &str, width: impl Display, height: impl Display) -> String {
        let mut query = Query::parse(url);
        query.set(GRAPH_WIDTH, width).set(GRAPH_HEIGHT, height);
        query.to_string()
    }

    pub fn external_link(&self) -> ExternalLink<'_> {
        ExternalLink {
            label: EXTERNAL_LABEL,
            uri: &self.uri,
        }
    }

    /// Links to every graph PNP4Nagios holds for `entity` over `range`, in metric order.
    ///
    /// Absent entities and entities that are neither hosts nor services have no graphs.
    #[tracing::instrument(skip(self, entity, options))]
    pub fn graph_links<E: Entity + ?Sized>(
        &self,
        entity: Option<&E>,
        range: TimeRange,
        source: GraphSource,
        options: &GraphOptions,
    ) -> Vec<GraphLink> {
        let entity = match entity {
            Some(entity) => entity,
            None => return Vec::new(),
        };

        let target = match GraphTarget::of(entity) {
            Some(target) => target,
            None => {
                debug!(kind = ?entity.kind(), "no graphs");
                return Vec::new();
            }
        };

        let width = options
            .width
            .clone()
            .unwrap_or_else(|| DEFAULT_GRAPH_WIDTH.to_string());
        let height = options
            .height
            .clone()
            .unwrap_or_else(|| DEFAULT_GRAPH_HEIGHT.to_string());

        let img_src_prefix = format!(
            "{}{}&start={}&end={}",
            self.uri, IMAGE_PATH, range.start, range.end
        );
        let link = format!(
            "{}{}host={}&srv={}",
            self.uri,
            GRAPH_PATH,
            target.host(),
            target.srv()
        );

        let count = Self::metric_count(entity);
        debug!(?target, count);

        (0..count)
            .map(|i| {
                let img_src = format!(
                    "{}&source={}&host={}&srv={}",
                    img_src_prefix,
                    i,
                    target.host(),
                    target.srv()
                );
                GraphLink {
                    link: link.clone(),
                    img_src: Self::override_graph_size(&img_src, &width, &height),
                }
            })
            .collect()
    }
}
