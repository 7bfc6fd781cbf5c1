//! One-shot lyrics search from the command line.
//!
//! Runs the same pipeline as the HTTP endpoint and prints markdown (default)
//! or the JSON wire payload.

use std::process::ExitCode;

use clap::Parser;

use songfinder_api::{init_tracing, markdown};
use songfinder_common::{Config, ErrorResponse};
use songfinder_lyrics::LyricsFinder;

#[derive(Parser)]
#[command(name = "songfinder")]
#[command(about = "Find song lyrics on the web")]
#[command(version)]
struct Cli {
    /// Song to look for, e.g. "Amazing Grace - Chris Tomlin"
    #[arg(required = true)]
    query: Vec<String>,

    /// Print the JSON payload instead of markdown
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    let finder = LyricsFinder::from_config(&config);
    let query = cli.query.join(" ");

    match finder.search_response(&query).await {
        Ok(payload) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", markdown::render_results(&payload.query, &payload.results));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let payload = ErrorResponse::from(&err);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", markdown::render_error(Some(query.trim()), &err, &payload));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
