use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::session::PlayerDefaults;

/// Serves a two-player tic-tac-toe page and runs each browser's game.
#[derive(Parser, Debug, Clone)]
#[command(name = "tic-tac-toe-web")]
#[command(version)]
pub struct Config {
    /// Address for the page and its assets
    #[arg(long, env = "TICTACTOE_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: SocketAddr,

    /// Address for the game WebSocket
    #[arg(long, env = "TICTACTOE_WS_ADDR", default_value = "127.0.0.1:8081")]
    pub ws_addr: SocketAddr,

    /// WebSocket URL the browser should dial; defaults to ws://<ws-addr>
    #[arg(long, env = "TICTACTOE_WS_ENDPOINT")]
    pub ws_endpoint: Option<String>,

    /// Directory holding index.html, app.js and grid.css
    #[arg(long, env = "TICTACTOE_STATIC_DIR", default_value = "src/static")]
    pub static_dir: PathBuf,

    #[arg(long, default_value = "Player 1")]
    pub player_one_name: String,

    #[arg(long, default_value = "Player 2")]
    pub player_two_name: String,
}

impl Config {
    pub fn ws_endpoint(&self) -> String {
        self.ws_endpoint
            .clone()
            .unwrap_or_else(|| format!("ws://{}", self.ws_addr))
    }

    pub fn player_defaults(&self) -> PlayerDefaults {
        PlayerDefaults {
            player_one_name: self.player_one_name.clone(),
            player_two_name: self.player_two_name.clone(),
        }
    }
}
