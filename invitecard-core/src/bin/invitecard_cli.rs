//! Invitation Card Studio CLI
//!
//! Commands: palette, layout, prompt, compose, image-request,
//! wording-request, key, endpoint
//! Outputs JSON to stdout
//! Returns 1 on bad input, 2 on a rejected request

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use invitecard_core::{
    build_image_prompt, keyword_palette, CardRequest, CardStudio,
    FilePreferenceStore, PreferenceStore, StudioConfig,
};

#[derive(Parser)]
#[command(name = "invitecard-cli")]
#[command(about = "Invitation Card Studio CLI - palette, layout and prompt engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to studio config (JSON)
    #[arg(short, long, default_value = "invitecard.json")]
    config: PathBuf,

    /// Directory holding saved preferences
    #[arg(long, default_value = ".invitecard")]
    prefs_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Palette for a design prompt
    Palette {
        #[arg(short, long)]
        prompt: String,
    },

    /// Layout plan for wording under style and design prompts
    Layout {
        #[arg(short, long)]
        wording: String,

        #[arg(short, long, default_value = "")]
        style: String,

        #[arg(short, long, default_value = "")]
        design: String,
    },

    /// Background image prompt for a design prompt
    Prompt {
        #[arg(short, long)]
        prompt: String,
    },

    /// Compose a full card design
    Compose {
        /// JSON payload (CardRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Build the image generation payload
    ImageRequest {
        /// JSON payload (CardRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Build the wording generation payload
    WordingRequest {
        /// JSON payload (CardRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Manage the saved API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Resolve the URL for an API path
    Endpoint {
        #[arg(short, long)]
        path: String,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Report whether a key is saved
    Show,
    /// Save a key
    Set { value: String },
    /// Remove the saved key
    Clear,
}

fn emit(value: &impl Serialize) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => fail(1, &format!("Serialization error: {}", e)),
    }
}

fn fail(code: u8, message: &str) -> ExitCode {
    let output = serde_json::json!({
        "success": false,
        "error": message,
    });
    println!("{}", output);
    ExitCode::from(code)
}

fn parse_request(payload: &str) -> Result<CardRequest, ExitCode> {
    serde_json::from_str(payload).map_err(|e| fail(1, &format!("Invalid payload: {}", e)))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match StudioConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => return fail(1, &format!("Failed to load config: {}", e)),
    };

    let prefs = match FilePreferenceStore::new(&cli.prefs_dir, &config.preference_key) {
        Ok(p) => p,
        Err(e) => return fail(1, &e.to_string()),
    };

    let studio = CardStudio::new(config);

    match cli.command {
        Commands::Palette { prompt } => emit(&keyword_palette(&prompt)),

        Commands::Layout { wording, style, design } => {
            let design = studio.design(&CardRequest::new(wording, style, design));
            emit(&serde_json::json!({
                "palette": design.palette,
                "layout": design.layout,
            }))
        }

        Commands::Prompt { prompt } => {
            let palette = keyword_palette(&prompt);
            emit(&serde_json::json!({
                "prompt": build_image_prompt(&prompt, &palette),
            }))
        }

        Commands::Compose { payload } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(code) => return code,
            };
            match studio.compose(&request) {
                Ok(card) => emit(&serde_json::json!({
                    "success": true,
                    "card": card,
                })),
                Err(e) => fail(2, &e.to_string()),
            }
        }

        Commands::ImageRequest { payload } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(code) => return code,
            };
            match studio.image_request(&request) {
                Ok(body) => emit(&body),
                Err(e) => fail(2, &e.to_string()),
            }
        }

        Commands::WordingRequest { payload } => {
            let request = match parse_request(&payload) {
                Ok(r) => r,
                Err(code) => return code,
            };
            match studio.wording_request(&request) {
                Ok(body) => emit(&body),
                Err(e) => fail(2, &e.to_string()),
            }
        }

        Commands::Key { action } => {
            let result = match action {
                KeyAction::Show => prefs.load().map(|key| {
                    serde_json::json!({ "saved": key.is_some() })
                }),
                KeyAction::Set { value } => prefs
                    .save(&value)
                    .map(|_| serde_json::json!({ "saved": !value.trim().is_empty() })),
                KeyAction::Clear => prefs.save("").map(|_| serde_json::json!({ "saved": false })),
            };
            match result {
                Ok(output) => emit(&output),
                Err(e) => fail(1, &e.to_string()),
            }
        }

        Commands::Endpoint { path } => {
            let key = match prefs.load() {
                Ok(k) => k,
                Err(e) => return fail(1, &e.to_string()),
            };
            match studio.endpoint(&path, key.as_deref()) {
                Ok(url) => emit(&serde_json::json!({ "url": url })),
                Err(e) => fail(2, &e.to_string()),
            }
        }
    }
}
