use anyhow::Result;
use mamy_dashboard::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
