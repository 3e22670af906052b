// pagepack - assembles bundler configuration for multi-page sites

use pagepack::cli::CliHandler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let handler = CliHandler::new();
    handler.run().await?;
    Ok(())
}
