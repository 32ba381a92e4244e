use std::path::Path;

use moviegraph_subgraphs::config::SubgraphsConfig;
use moviegraph_subgraphs::{export_sdl, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SubgraphsConfig::from_env();

    let mut args = std::env::args().skip(1);
    if let Some(mode) = args.next() {
        if mode != "sdl" {
            return Err(format!("unknown mode '{mode}', expected 'sdl'").into());
        }
        let out_dir = args
            .next()
            .unwrap_or_else(|| "gateway/subgraphs".to_string());
        export_sdl(&config, Path::new(&out_dir))?;
        return Ok(());
    }

    info!(source_url = %config.source_url, "starting moviegraph subgraphs");
    run(config).await?;
    Ok(())
}
