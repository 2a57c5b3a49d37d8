//! tokenrelay - CORS-friendly relay for Solana token data APIs

use anyhow::Result;

use tokenrelay::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // .env holds secrets (API keys), not committed config
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
