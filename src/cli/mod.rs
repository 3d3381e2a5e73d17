//! Command-line interface parsing and dispatch.
//!
//! This module parses command-line arguments and routes into the chat
//! interface or the bundled mock server.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::backend::HttpBackend;
use crate::core::config::Config;
use crate::server::{self, ServeOptions};
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "glow-chat")]
#[command(about = "A terminal chat interface for the GLOW showroom assistant")]
#[command(
    long_about = "Glow-chat is a full-screen terminal chat interface for the GLOW showroom \
assistant. It talks to a chat backend over HTTP, renders replies as short paced bubbles, \
and relays document uploads.\n\n\
Run `glow-chat serve` in another terminal to get a local mock backend on port 3000; \
point --backend-url at the real service when you have one.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\n\
Commands:\n\
  /upload <path>    Upload documents to the assistant\n\
  /log <filename>   Enable transcript logging to specified file\n\
  /log              Toggle logging pause/resume\n\
  /help             Show command help\n\
  /quit             Leave the chat"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend API base URL, joined with /chat and /upload
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,

    /// Disable the simulated typing pacing between bubbles
    #[arg(long, global = true)]
    pub no_typing: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Run the bundled mock backend server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory served at / and /static
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,
        /// Directory uploaded files are written to
        #[arg(long, value_name = "DIR")]
        uploads_dir: Option<PathBuf>,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = Config::load()?;

    if let Some(url) = args.backend_url {
        config.backend_url = Some(url);
    }
    if let Some(log) = args.log {
        config.log_file = Some(log);
    }
    if args.no_typing {
        config.typing = Some(false);
    }

    match args.command {
        Some(Commands::Serve {
            port,
            static_dir,
            uploads_dir,
        }) => {
            server::configure_logging();
            let options = ServeOptions {
                port: port.unwrap_or_else(|| config.server_port()),
                static_dir: static_dir.unwrap_or_else(|| config.server_static_dir()),
                uploads_dir: uploads_dir.unwrap_or_else(|| config.server_uploads_dir()),
            };
            server::run(options).await
        }
        Some(Commands::Chat) | None => {
            let backend = Arc::new(HttpBackend::from_config(&config));
            run_chat(&config, backend).await
        }
    }
}
