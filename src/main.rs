use anyhow::Result;
use clap::Parser;

use evon_server::{server, Settings};

#[derive(Debug, Parser)]
#[command(name = "evon-server", version)]
struct Cli {
    /// Override HOST
    #[arg(long)]
    host: Option<String>,

    /// Override PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(h) = cli.host {
        settings.host = h;
    }
    if let Some(p) = cli.port {
        settings.port = p;
    }

    log::info!(
        "app.start host={} port={} env={} password_protected={}",
        settings.host,
        settings.port,
        settings.environment,
        settings.app_password.is_some()
    );

    server::serve(settings).await
}
