use anyhow::{anyhow, Result};
use indoc::indoc;
use pnp_webui::{GraphLink, GraphOptions, GraphSource, MonitoredEntity, PnpConfig, TimeRange};

trait ToHtml {
    fn to_html(&self) -> String;
}

impl ToHtml for GraphLink {
    fn to_html(&self) -> String {
        format!(r#"<a href="{}"><img src="{}"></a>"#, self.link, self.img_src)
    }
}

fn main() -> Result<()> {
    let perf_data = indoc! {"
        rta=0.052ms;100.000;500.000;0;
        pl=0%;20;60;;
    "};

    let mut source = GraphSource::Detail;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" => {
                println!("Usage: print-links [--print-perfdata] [--dashboard]");
                return Ok(());
            }
            "--print-perfdata" => {
                println!("Perf data:\n\n{}", perf_data);
            }
            "--dashboard" => source = GraphSource::Dashboard,
            arg => return Err(anyhow!("print-links: unknown option «{}», try --help", arg)),
        }
    }

    let builder = pnp_webui::instance(PnpConfig::new("http://YOURSERVERNAME/pnp4nagios"))?;
    let service = MonitoredEntity::service("gateway", "PING", perf_data);

    let options = match source {
        GraphSource::Detail => GraphOptions::new(),
        GraphSource::Dashboard => GraphOptions::new().width(300).height(150),
    };

    for link in builder.graph_links(Some(&service), TimeRange::new(1000., 4600.), source, &options) {
        println!("{}", link.to_html());
    }

    Ok(())
}
