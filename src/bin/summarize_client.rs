//! Sends one text to a running summarizer and prints the summary.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use groq_summarizer::remote::DEFAULT_REMOTE_URL;
use groq_summarizer::RemoteSummarizer;

const DEMO_TEXT: &str = "Building an LLM-based application is more complex than simply calling an API. \
While integrating an LLM into your project can significantly enhance its capabilities, it comes with a \
unique set of challenges that require careful consideration. Below, we'll break down the primary obstacles \
you might encounter and highlight the aspects of deployment that need attention.";

#[derive(Parser)]
#[command(name = "summarize-client")]
#[command(author, version, about = "Summarize a paragraph with a running groq-summarizer")]
struct Cli {
    /// Base URL of the summarize routes
    #[arg(short, long, env = "SUMMARIZER_URL", default_value = DEFAULT_REMOTE_URL)]
    url: String,

    /// Text to summarize
    #[arg(short, long, default_value = DEMO_TEXT)]
    text: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let cli = Cli::parse();

    let summarizer = RemoteSummarizer::new(&cli.url)?;
    let summary = summarizer.invoke(cli.text).await?;

    println!("{}", summary);
    Ok(())
}
