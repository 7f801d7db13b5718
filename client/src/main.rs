mod ai;
mod config;
mod error;
mod game;
mod net;
mod protocol;
mod session;

use ai::{BotPlayer, Strategy};
use clap::Parser;
use config::ClientArgs;
use log::{error, info};
use net::WsTransport;
use session::{GameSummary, Session};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ClientArgs::parse();
    let player = BotPlayer::new(&args.player, Strategy::from_name(&args.strategy));

    let url = match config::websocket_url(&args.http_endpoint, &player.name) {
        Ok(url) => url,
        Err(e) => {
            error!("[MAIN] {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "[MAIN] {} connecting to {} ({} strategy)",
        player.name, url, player.strategy
    );

    let transport = match WsTransport::connect(&url) {
        Ok(t) => t,
        Err(e) => {
            error!("[MAIN] {}", e);
            return ExitCode::FAILURE;
        }
    };

    match Session::new(transport, player.strategy).run() {
        Ok(summary) => {
            log_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("[MAIN] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn log_summary(summary: &GameSummary) {
    info!(
        "[MAIN] Finished after {} turns, bought {:?}: {}",
        summary.turns, summary.acquired, summary.result
    );
}
