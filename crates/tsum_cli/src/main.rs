use std::io::Read;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;

use tsum_core::{ErrorResponse, ModelKind, Result, SummarizeRequest, SummarizeResponse};
use tsum_inference::{create_loader, Config, ModelRegistry, Summarizer};
use tsum_web::{create_app, AppState};

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    'd' => total_seconds += num * 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_value = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds += num;
                    has_value = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Per-chunk character budget for splitting long inputs
    #[arg(long, default_value_t = tsum_core::chunk::DEFAULT_CHUNK_BUDGET)]
    chunk_budget: usize,
    /// How many loaded models to keep cached
    #[arg(long, default_value = "2")]
    cache_capacity: NonZeroUsize,
    /// Bound on concurrent inference calls
    #[arg(long, default_value_t = tsum_inference::DEFAULT_INFERENCE_PERMITS)]
    inference_permits: usize,
    /// Substitute the default model for unknown identifiers instead of rejecting them
    #[arg(long)]
    fallback: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the summarization HTTP server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Summarize text locally, without a server
    Summarize {
        #[arg(long, default_value = "bart", help = "Model to use. Available models: bart (default), t5")]
        model: String,
        #[arg(long, default_value_t = 130)]
        max_length: u32,
        #[arg(long, default_value_t = 30)]
        min_length: u32,
        /// File to read the text from; stdin if omitted
        file: Option<PathBuf>,
    },
    /// Send text to a running summarization server
    Client {
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        url: String,
        #[arg(long, default_value = "bart")]
        model: String,
        #[arg(long, default_value_t = 130)]
        max_length: u32,
        #[arg(long, default_value_t = 30)]
        min_length: u32,
        /// Request timeout (e.g. 30s, 2m, 1h15m30s)
        #[arg(long, default_value = "2m")]
        timeout: HumanDuration,
        /// File to read the text from; stdin if omitted
        file: Option<PathBuf>,
    },
    /// List the available models
    Models,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            chunk_budget: self.chunk_budget,
            cache_capacity: self.cache_capacity,
            inference_permits: self.inference_permits,
            fallback_to_default: self.fallback,
        }
    }
}

fn read_input(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn build_summarizer(config: &Config) -> (Summarizer, Arc<ModelRegistry>) {
    let registry = Arc::new(ModelRegistry::new(create_loader(), config.cache_capacity));
    (Summarizer::new(registry.clone(), config), registry)
}

async fn run_client(
    url: String,
    req: SummarizeRequest,
    timeout: Duration,
) -> Result<()> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let endpoint = format!("{}/summarize", url.trim_end_matches('/'));
    info!("📡 Sending {} chars to {}", req.text.len(), endpoint);

    let started = Instant::now();
    match client.post(&endpoint).json(&req).send().await {
        Ok(resp) if resp.status().is_success() => {
            let body: SummarizeResponse = resp.json().await?;
            println!("{}", body.summary);
            info!("✨ Summary generated in {:.1}s", started.elapsed().as_secs_f64());
            Ok(())
        }
        Ok(resp) => {
            let status = resp.status();
            let body: ErrorResponse = resp.json().await.unwrap_or_else(|_| ErrorResponse {
                error: format!("HTTP {}", status),
            });
            eprintln!("❌ API error ({}): {}", status, body.error);
            std::process::exit(1);
        }
        Err(e) if e.is_timeout() => {
            eprintln!(
                "⏱️ Request timed out after {}s. Try shorter text or a smaller summary length.",
                timeout.as_secs()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("⚠️ Request failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = cli.config();

    match cli.command {
        Commands::Serve { host, port } => {
            let (summarizer, registry) = build_summarizer(&config);
            info!("🧠 Model registry initialized (capacity {})", config.cache_capacity);
            let app = create_app(AppState::new(summarizer, registry)).await;
            let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
            info!("🚀 Listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app).await?;
            Ok(())
        }
        Commands::Summarize {
            model,
            max_length,
            min_length,
            file,
        } => {
            let (summarizer, _registry) = build_summarizer(&config);
            let req = SummarizeRequest {
                text: read_input(file)?,
                model_name: model,
                max_length,
                min_length,
            };
            let summary = summarizer.summarize(&req).await?;
            println!("{}", summary);
            Ok(())
        }
        Commands::Client {
            url,
            model,
            max_length,
            min_length,
            timeout,
            file,
        } => {
            let req = SummarizeRequest {
                text: read_input(file)?,
                model_name: model,
                max_length,
                min_length,
            };
            run_client(url, req, timeout.0).await
        }
        Commands::Models => {
            for kind in ModelKind::ALL {
                println!(
                    "{:<6} {:<24} prefix: {:<14} {}",
                    kind.name(),
                    kind.pretrained(),
                    kind.task_prefix().unwrap_or("-"),
                    if kind == ModelKind::DEFAULT { "(default)" } else { "" }
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_unit_durations() {
        assert_eq!(HumanDuration::from_str("2m").unwrap().0.as_secs(), 120);
        assert_eq!(HumanDuration::from_str("45s").unwrap().0.as_secs(), 45);
        assert_eq!(HumanDuration::from_str("1h").unwrap().0.as_secs(), 3600);
    }

    #[test]
    fn bare_numbers_are_seconds() {
        assert_eq!(HumanDuration::from_str("120").unwrap().0.as_secs(), 120);
    }

    #[test]
    fn parses_compound_durations() {
        assert_eq!(
            HumanDuration::from_str("1h15m30s").unwrap().0.as_secs(),
            3600 + 15 * 60 + 30
        );
    }

    #[test]
    fn rejects_junk() {
        assert!(HumanDuration::from_str("").is_err());
        assert!(HumanDuration::from_str("abc").is_err());
        assert!(HumanDuration::from_str("5x").is_err());
    }
}
