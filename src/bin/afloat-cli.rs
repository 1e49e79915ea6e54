use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use std::path::PathBuf;

use afloat::calls::CallKind;

#[derive(Debug, Parser)]
#[command(name = "afloat-cli")]
#[command(about = "Fetch vessel-call CSV exports through an afloat gateway", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, default_value = "http://localhost:3000")]
    url: String,

    /// Write the CSV here instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Port calls over the last N days
    Portcalls {
        #[arg(short, long, default_value_t = 1)]
        days: i64,
    },
    /// Berth calls over the last N days
    Berthcalls {
        #[arg(short, long, default_value_t = 1)]
        days: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (kind, days) = match cli.command {
        Commands::Portcalls { days } => (CallKind::PortCall, days),
        Commands::Berthcalls { days } => (CallKind::BerthCall, days),
    };

    let res = client
        .post(format!("{}/api/{}", cli.url.trim_end_matches('/'), kind.as_str()))
        .json(&serde_json::json!({ "days": days }))
        .send()
        .await?;

    let status = res.status();
    if status != StatusCode::OK {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let csv = res.bytes().await?;
    match cli.output {
        Some(path) => {
            tokio::fs::write(&path, &csv).await?;
            eprintln!("Wrote {} bytes to {}", csv.len(), path.display());
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&csv)?;
        }
    }

    Ok(())
}
