use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use painel_assist::{AnsweringClient, HttpTransport, Session, Submission};
use painel_core::{daily_series, flow_comparison, summarize, Dataset};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod auth;
mod chat;
mod config;
mod report;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PAINEL_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "painel", version = VERSION, about = "Personal finance dashboard with an AI Q&A assistant")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary cards, daily movements and inflow/outflow comparison
    Report {
        /// Transaction export with `Data` and `Valor` columns
        #[arg(long)]
        csv: PathBuf,
    },

    /// Show every loaded row, including ones with unparsed cells
    Rows {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Ask one question about the transactions
    Ask {
        #[arg(long)]
        csv: PathBuf,

        /// API key for the completion endpoint (prompted for when absent)
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// The question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Interactive question/answer session over the transactions
    Chat {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// Manage ~/.painel/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(csv: &Path) -> Result<Dataset> {
    tracing::debug!(path = %csv.display(), "loading export");
    painel_ingest::load_path(csv).with_context(|| format!("loading {}", csv.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Report { csv } => {
            let cfg = config::load_config()?;
            let dataset = load(&csv)?;
            let summary = summarize(&dataset);
            let currency = &cfg.display.currency;

            println!("# Finance dashboard\n");
            println!(
                "{} rows from {} ({} invalid dates, {} missing values)\n",
                dataset.len(),
                csv.display(),
                dataset.invalid_dates(),
                dataset.missing_amounts()
            );
            println!("{}", report::render_summary(&summary, currency));
            println!("{}", report::render_daily(&daily_series(&dataset), currency));
            println!(
                "{}",
                report::render_comparison(&flow_comparison(&summary), currency)
            );
        }

        Command::Rows { csv } => {
            let dataset = load(&csv)?;
            print!("{}", report::render_rows(&dataset));
        }

        Command::Ask {
            csv,
            api_key,
            question,
        } => {
            let cfg = config::load_config()?;
            let dataset = load(&csv)?;
            let question = question.join(" ");

            let credential = auth::resolve_credential(api_key)?;
            let client = AnsweringClient::new(cfg.assist_config(), HttpTransport::new()?);
            let mut session = Session::new(dataset);

            match session.submit(&question, &credential, &client) {
                Submission::Rejected => println!("Please type a question."),
                Submission::Answered(result) => {
                    println!("you: {question}");
                    println!("assistant: {result}");
                }
            }
        }

        Command::Chat { csv, api_key } => {
            let cfg = config::load_config()?;
            let dataset = load(&csv)?;

            let credential = auth::resolve_credential(api_key)?;
            let client = AnsweringClient::new(cfg.assist_config(), HttpTransport::new()?);
            let mut session = Session::new(dataset);

            let stdin = std::io::stdin();
            chat::run_chat(
                &mut session,
                &client,
                &credential,
                stdin.lock(),
                std::io::stdout(),
            )?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}\n", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}
