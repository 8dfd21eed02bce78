//! codechat-agent - CLI Entry Point
//!
//! Runs one question through the conversation loop and prints the answer.

use codechat_agent::{agent::Agent, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codechat_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        anyhow::bail!("Usage: codechat-agent <question>");
    }

    // Missing credentials fail here, before any request is made.
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    let agent = Agent::new(config);
    let outcome = agent.run(&question).await?;

    if outcome.truncated {
        eprintln!("[answer truncated by token limit]");
    }
    println!("{}", outcome.text);
    info!(
        "Conversation finished: {} messages, {} tokens",
        outcome.history.len(),
        outcome.usage.total_tokens
    );

    Ok(())
}
