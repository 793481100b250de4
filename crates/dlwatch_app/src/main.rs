mod runner;
mod surface;

use std::sync::Arc;

use anyhow::Context;
use dlwatch_client::{ApiSettings, ReqwestApi};
use dlwatch_core::Msg;
use dlwatch_logging::{watch_info, LogDestination};
use tokio::io::AsyncBufReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dlwatch_logging::initialize(LogDestination::File);

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DLWATCH_SERVER").ok())
        .unwrap_or_else(|| ApiSettings::default().base_url);

    let api = ReqwestApi::new(ApiSettings {
        base_url: base_url.clone(),
        ..ApiSettings::default()
    })
    .context("building http client")?;

    watch_info!("watching downloads at {base_url}");
    println!("commands: add <url> | rm <file_path> | quit");

    let runner = runner::Runner::new(Arc::new(api), Arc::new(surface::ConsoleSurface));
    let msg_tx = runner.sender();
    let shutdown = runner.shutdown_token();

    // Command intake from stdin; `quit` tears the shared timer down.
    let intake = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let line = line.trim();
                if line == "quit" {
                    shutdown.cancel();
                    break;
                }
                if let Some(url) = line.strip_prefix("add ") {
                    let _ = msg_tx.send(Msg::SubmitRequested {
                        url: url.to_string(),
                    });
                } else if let Some(path) = line.strip_prefix("rm ") {
                    let _ = msg_tx.send(Msg::DeleteClicked {
                        file_path: path.to_string(),
                    });
                } else if !line.is_empty() {
                    eprintln!("commands: add <url> | rm <file_path> | quit");
                }
            }
        }
    });

    runner.run().await;
    intake.abort();
    Ok(())
}
