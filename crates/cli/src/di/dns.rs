use no6_application::ports::DnsHandler;
use no6_domain::{Config, FilterSet};
use no6_infrastructure::dns::{ForwardingHandler, No6Handler};
use std::sync::Arc;
use tracing::info;

/// The request handling chain: `no6` in front of the upstream forwarder.
pub struct DnsServices {
    pub filters: Arc<FilterSet>,
    pub handler: Arc<dyn DnsHandler>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let filters = Arc::new(config.filter.load_rules()?);
        info!(
            rules = filters.len(),
            exact = filters.exact_count(),
            suffix = filters.suffix_count(),
            "Loaded AAAA filter rules"
        );

        let upstreams = config.upstream.protocols()?;
        for upstream in &upstreams {
            info!(upstream = %upstream, "Upstream configured");
        }
        let forwarder = Arc::new(ForwardingHandler::new(
            upstreams,
            config.upstream.timeout(),
        ));

        let handler: Arc<dyn DnsHandler> =
            Arc::new(No6Handler::new(forwarder, filters.clone()));

        Ok(Self { filters, handler })
    }
}
