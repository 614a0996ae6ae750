//! wslkit - WSL/Windows bridge utilities

use std::process::ExitCode;

use clap::Parser;
use wslkit_cli::cli::Cli;
use wslkit_cli::output::json;

#[tokio::main]
async fn main() -> ExitCode {
    wslkit_cli::logging::init();
    let cli = Cli::parse();
    let as_json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            let message = format!("{e:#}");
            match json::format_error(&message, "command_failed") {
                Ok(text) if as_json => println!("{text}"),
                _ => eprintln!("Error: {message}"),
            }
            ExitCode::FAILURE
        }
    }
}
