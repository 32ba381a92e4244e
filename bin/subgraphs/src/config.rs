use std::env::var;

/// Listen and upstream settings. Defaults reproduce the fixed deployment
/// layout: movies on 4001, prices (with reviews mounted at `/reviews`) on
/// 4002, discounts on 4003, REST catalog on localhost:3000. The gateway
/// itself listens on 4000 and is configured separately (see `gateway/`).
#[derive(Debug, Clone)]
pub struct SubgraphsConfig {
    pub host: String,
    pub source_url: String,
    pub movies_port: u16,
    pub prices_port: u16,
    pub discounts_port: u16,
}

impl SubgraphsConfig {
    pub fn from_env() -> Self {
        Self {
            host: var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            source_url: var("SOURCE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            movies_port: port_var("MOVIES_PORT", 4001),
            prices_port: port_var("PRICES_PORT", 4002),
            discounts_port: port_var("DISCOUNTS_PORT", 4003),
        }
    }
}

fn port_var(name: &str, default: u16) -> u16 {
    var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
