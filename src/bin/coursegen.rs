use anyhow::Result;
use coursegen::cli;

// Single-threaded: every store is driven from one cooperative queue.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let action = cli::start()?;

    action.execute().await?;

    Ok(())
}
