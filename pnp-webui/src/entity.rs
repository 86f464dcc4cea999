/// What kind of monitored object an [`Entity`] is.  Only hosts and services have graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Host,
    Service,
    /// Anything else the hosting framework hands us (contacts, timeperiods, ...)
    Other,
}

/// Read-only view of a monitored object, implemented by the hosting framework's own types.
pub trait Entity {
    fn kind(&self) -> EntityKind;

    /// The host's own name, or for a service the name of the host it runs on
    fn host_name(&self) -> &str;

    /// Service description, `None` for hosts
    fn service_description(&self) -> Option<&str>;

    /// Raw performance data from the last check
    fn perf_data(&self) -> &str;
}

/// A host or a service, for callers that don't carry their own object model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MonitoredEntity {
    Host {
        name: String,
        perf_data: String,
    },
    Service {
        host_name: String,
        description: String,
        perf_data: String,
    },
}

impl MonitoredEntity {
    pub fn host(name: impl Into<String>, perf_data: impl Into<String>) -> Self {
        Self::Host {
            name: name.into(),
            perf_data: perf_data.into(),
        }
    }

    pub fn service(
        host_name: impl Into<String>,
        description: impl Into<String>,
        perf_data: impl Into<String>,
    ) -> Self {
        Self::Service {
            host_name: host_name.into(),
            description: description.into(),
            perf_data: perf_data.into(),
        }
    }
}

impl Entity for MonitoredEntity {
    fn kind(&self) -> EntityKind {
        match self {
            Self::Host { .. } => EntityKind::Host,
            Self::Service { .. } => EntityKind::Service,
        }
    }

    fn host_name(&self) -> &str {
        match self {
            Self::Host { name, .. } => name,
            Self::Service { host_name, .. } => host_name,
        }
    }

    fn service_description(&self) -> Option<&str> {
        match self {
            Self::Host { .. } => None,
            Self::Service { description, .. } => Some(description),
        }
    }

    fn perf_data(&self) -> &str {
        match self {
            Self::Host { perf_data, .. } | Self::Service { perf_data, .. } => perf_data,
        }
    }
}
