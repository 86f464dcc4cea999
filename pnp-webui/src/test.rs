use crate::*;
use tracing_test::traced_test;

const BASE_URI: &str = "http://YOURSERVERNAME/pnp4nagios/";
const RANGE: TimeRange = TimeRange {
    start: 1000.,
    end: 4600.,
};

fn init_builder() -> GraphLinkBuilder {
    GraphLinkBuilder::with_host_name(PnpConfig::new(BASE_URI), Some("poller-1"))
        .expect("valid config")
}

fn links_for(entity: &MonitoredEntity, options: &GraphOptions) -> Vec<GraphLink> {
    init_builder().graph_links(Some(entity), RANGE, GraphSource::Detail, options)
}

/// A service the hosting framework hasn't finished loading
struct UnnamedService;

impl Entity for UnnamedService {
    fn kind(&self) -> EntityKind {
        EntityKind::Service
    }

    fn host_name(&self) -> &str {
        "sw-1"
    }

    fn service_description(&self) -> Option<&str> {
        None
    }

    fn perf_data(&self) -> &str {
        "m1=1 m2=2"
    }
}

/// Something the hosting framework knows about that has no graphs
struct Contact;

impl Entity for Contact {
    fn kind(&self) -> EntityKind {
        EntityKind::Other
    }

    fn host_name(&self) -> &str {
        "admin"
    }

    fn service_description(&self) -> Option<&str> {
        None
    }

    fn perf_data(&self) -> &str {
        "m1=1 m2=2"
    }
}

macro_rules! graph_size_test {
    ($test_name:ident, $url:expr, present: [$($present:expr),*], absent: [$($absent:expr),*]) => {
        #[test]
        #[traced_test]
        fn $test_name() {
            let new_url = GraphLinkBuilder::override_graph_size($url, "123", "123");
            info!(%new_url);

            $(assert!(new_url.contains($present), "{} missing from {}", $present, new_url);)*
            $(assert!(!new_url.contains($absent), "{} still in {}", $absent, new_url);)*

            // Applying the same size again changes nothing
            assert_eq!(GraphLinkBuilder::override_graph_size(&new_url, "123", "123"), new_url);
        }
    };
}

graph_size_test!(
    replace_graph_size,
    "http://pnp.example.com/?graph_width=42&graph_height=42&after=2",
    present: ["graph_width=123", "graph_height=123", "after=2"],
    absent: ["=42"]
);
graph_size_test!(
    add_graph_size,
    "http://pnp.example.com/?before=1&after=2",
    present: ["before=1", "after=2", "graph_width=123", "graph_height=123"],
    absent: []
);
graph_size_test!(
    add_graph_size_height,
    "http://pnp.example.com/?before=1&graph_width=42&after=2",
    present: ["before=1", "after=2", "graph_width=123", "graph_height=123"],
    absent: ["=42"]
);
graph_size_test!(
    add_graph_size_width,
    "http://pnp.example.com/?before=1&graph_height=42&after=2",
    present: ["before=1", "after=2", "graph_width=123", "graph_height=123"],
    absent: ["=42"]
);
graph_size_test!(
    graph_size_without_query,
    "http://pnp.example.com/",
    present: ["http://pnp.example.com/?graph_width=123&graph_height=123"],
    absent: ["&graph_width"]
);
graph_size_test!(
    graph_size_after_hash,
    "http://pnp.example.com/?srv=Port #3&graph_height=42",
    present: ["?srv=Port #3&graph_height=123&graph_width=123"],
    absent: ["=42", "#3&graph_width=123&graph_height"]
);
graph_size_test!(
    graph_size_lookalike_keys,
    "http://pnp.example.com/?xgraph_width=42&graph_heights=42",
    present: ["xgraph_width=42", "graph_heights=42", "&graph_width=123", "&graph_height=123"],
    absent: []
);

#[test]
fn graph_size_preserves_order() {
    assert_eq!(
        GraphLinkBuilder::override_graph_size(
            "http://x/?before=1&graph_width=42&after=2&graph_height=7&z",
            586,
            308
        ),
        "http://x/?before=1&graph_width=586&after=2&graph_height=308&z"
    );
    assert_eq!(
        GraphLinkBuilder::override_graph_size("http://x/?before=1&after=2", 586, 308),
        "http://x/?before=1&after=2&graph_width=586&graph_height=308"
    );
}

#[test]
#[traced_test]
fn missing_uri() {
    for config in [PnpConfig::default(), PnpConfig::new(""), PnpConfig::new("   ")] {
        match GraphLinkBuilder::new(config) {
            Err(PnpError::Config(ConfigError::MissingUri)) => {}
            other => panic!("expected a missing uri error, got {:?}", other),
        }
    }
}

#[test]
#[traced_test]
fn placeholder_substituted_once() {
    let builder = init_builder();
    assert_eq!(builder.uri(), "http://poller-1/pnp4nagios/");
    assert_eq!(
        builder.external_link(),
        ExternalLink {
            label: "PNP4",
            uri: "http://poller-1/pnp4nagios/",
        }
    );
}

#[test]
#[traced_test]
fn placeholder_without_host_name() {
    let builder =
        GraphLinkBuilder::with_host_name(PnpConfig::new(BASE_URI), None).expect("valid config");
    assert_eq!(builder.uri(), BASE_URI);
    assert!(logs_contain("no host name to substitute"));
}

#[cfg(feature = "resolve_hostname")]
#[test]
fn placeholder_resolved_locally() {
    let builder = GraphLinkBuilder::new(PnpConfig::new(BASE_URI)).expect("valid config");
    assert!(!builder.uri().contains("YOURSERVERNAME"));
    assert!(builder.uri().ends_with("/pnp4nagios/"));
}

#[test]
fn trailing_separator_added() {
    let builder = GraphLinkBuilder::with_host_name(
        PnpConfig::new(" http://pnp.example.com/pnp4nagios "),
        None,
    )
    .expect("valid config");
    assert_eq!(builder.uri(), "http://pnp.example.com/pnp4nagios/");
    assert_eq!(
        builder.external_link().uri,
        "http://pnp.example.com/pnp4nagios/"
    );
}

#[test]
#[traced_test]
fn instance_from_settings() {
    let builder = load(
        r#"{"module_name": "ui-pnp", "uri": "http://pnp.example.com/pnp4nagios/", "username": "nagiosadmin", "password": "secret"}"#,
    )
    .expect("valid settings");
    assert!(logs_contain("Get an PNP UI module for plugin ui-pnp"));
    assert_eq!(builder.username(), Some("nagiosadmin"));
    assert_eq!(builder.password().expose(), "secret");

    assert!(matches!(load("{"), Err(PnpError::Settings(_))));
    assert!(matches!(
        load(r#"{"module_name": "ui-pnp"}"#),
        Err(PnpError::Config(ConfigError::MissingUri))
    ));
}

#[test]
#[traced_test]
fn service_uri_without_graph() {
    let service = MonitoredEntity::service("Dummy host", "Dummy service", "");
    assert!(links_for(&service, &GraphOptions::new()).is_empty());
}

#[test]
#[traced_test]
fn service_with_graph() {
    let service = MonitoredEntity::service(
        "Dummy host",
        "Dummy service",
        "dummy_service=500M;300;400;110;1000;",
    );
    let links = links_for(&service, &GraphOptions::new());

    assert_eq!(
        links,
        vec![GraphLink {
            link: "http://poller-1/pnp4nagios/index.php/graph?host=Dummy host&srv=Dummy service"
                .into(),
            img_src: "http://poller-1/pnp4nagios/index.php/image?view=0&start=1000&end=4600\
                      &source=0&host=Dummy host&srv=Dummy service&graph_width=586&graph_height=308"
                .into(),
        }]
    );
}

#[test]
#[traced_test]
fn service_with_graph_size() {
    let service = MonitoredEntity::service(
        "Dummy host",
        "Dummy service",
        "dummy_service=500M;300;400;110;1000;",
    );
    let links = links_for(&service, &GraphOptions::new().width("42").height("4242"));

    assert_eq!(links.len(), 1);
    assert!(links[0].img_src.contains("graph_width=42"));
    assert!(links[0].img_src.contains("graph_height=4242"));
    assert!(!links[0].img_src.contains("graph_width=586"));
}

#[test]
#[traced_test]
fn host_graphs_in_metric_order() {
    let host = MonitoredEntity::host("srv-web", "m1=1 m2=2 m3=3");
    let links = links_for(&host, &GraphOptions::new().width(800));

    assert_eq!(links.len(), 3);
    for (i, link) in links.iter().enumerate() {
        assert_eq!(
            link.link,
            "http://poller-1/pnp4nagios/index.php/graph?host=srv-web&srv=_HOST_"
        );
        assert_eq!(
            link.img_src,
            format!(
                "http://poller-1/pnp4nagios/index.php/image?view=0&start=1000&end=4600\
                 &source={}&host=srv-web&srv=_HOST_&graph_width=800&graph_height=308",
                i
            )
        );
    }
}

#[test]
fn metric_count_ignores_blanks() {
    assert_eq!(GraphLinkBuilder::metric_count(&MonitoredEntity::host("h", "")), 0);
    assert_eq!(GraphLinkBuilder::metric_count(&MonitoredEntity::host("h", "  ")), 0);
    assert_eq!(
        GraphLinkBuilder::metric_count(&MonitoredEntity::host("h", " m1=1  m2=2 ")),
        2
    );
}

#[test]
#[traced_test]
fn other_entities_have_no_graphs() {
    let links = init_builder().graph_links(Some(&Contact), RANGE, GraphSource::Detail, &GraphOptions::new());
    assert!(links.is_empty());
}

#[test]
#[traced_test]
fn service_without_description_has_no_graphs() {
    let links = init_builder().graph_links(
        Some(&UnnamedService),
        RANGE,
        GraphSource::Detail,
        &GraphOptions::new(),
    );
    assert!(links.is_empty());
    assert!(logs_contain("service without a description"));
}

#[test]
#[traced_test]
fn service_description_with_hash() {
    let service = MonitoredEntity::service("sw-1", "Port #3", "m=1");
    let links = links_for(&service, &GraphOptions::new());

    assert_eq!(
        links,
        vec![GraphLink {
            link: "http://poller-1/pnp4nagios/index.php/graph?host=sw-1&srv=Port #3".into(),
            img_src: "http://poller-1/pnp4nagios/index.php/image?view=0&start=1000&end=4600\
                      &source=0&host=sw-1&srv=Port #3&graph_width=586&graph_height=308"
                .into(),
        }]
    );
}

#[test]
fn absent_entity_has_no_graphs() {
    let links = init_builder().graph_links::<MonitoredEntity>(
        None,
        RANGE,
        GraphSource::Detail,
        &GraphOptions::new(),
    );
    assert!(links.is_empty());
}

#[test]
fn source_does_not_change_links() {
    let builder = init_builder();
    let host = MonitoredEntity::host("srv-web", "m1=1 m2=2");
    let options = GraphOptions::new();

    assert_eq!(
        builder.graph_links(Some(&host), RANGE, GraphSource::Detail, &options),
        builder.graph_links(Some(&host), RANGE, GraphSource::Dashboard, &options)
    );
    assert_eq!("dashboard".parse::<GraphSource>(), Ok(GraphSource::Dashboard));
    assert_eq!("detail".parse::<GraphSource>(), Ok(GraphSource::Detail));
    assert!("widget".parse::<GraphSource>().is_err());
}

#[test]
fn builder_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphLinkBuilder>();
}
