use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mockwire-cli")]
#[command(about = "Manage routes on a running mockwire server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Control API path on the server.
    #[arg(short, long, default_value = "/_request")]
    path: String,

    /// Bearer token, if the server requires one.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register every route object in a JSON file
    Create {
        /// File holding a route object or an array of them
        file: PathBuf,
    },
    /// List registered routes
    List,
    /// Remove every route
    Reset,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let endpoint = format!("{}{}", cli.url.trim_end_matches('/'), cli.path);

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
    }

    match cli.command {
        Commands::Create { file } => {
            let text = std::fs::read_to_string(&file)?;
            let routes = match serde_json::from_str::<Value>(&text)? {
                Value::Array(items) => items,
                single => vec![single],
            };
            for route in routes {
                let res = client
                    .post(&endpoint)
                    .headers(headers.clone())
                    .json(&route)
                    .send()
                    .await?;
                print_response(res).await?;
            }
        }
        Commands::List => {
            let res = client.get(&endpoint).headers(headers).send().await?;
            print_response(res).await?;
        }
        Commands::Reset => {
            let res = client.delete(&endpoint).headers(headers).send().await?;
            if res.status().is_success() {
                println!("Routes cleared");
            } else {
                print_response(res).await?;
            }
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: control API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
