use handoff::config::{Config, HandlerKind};
use handoff::handler::{AckHandler, FileHandler};
use handoff::server::Server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();

    let server = match Server::bind(&cfg.server).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            std::process::exit(e.exit_code());
        }
    };

    let run = async {
        match cfg.handler {
            HandlerKind::File => server.run(FileHandler::from_config(&cfg.content)).await,
            HandlerKind::Ack => server.run(AckHandler).await,
        }
    };

    tokio::select! {
        res = run => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
