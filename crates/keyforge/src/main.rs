use anyhow::Context;
use clap::Parser;
use keyforge::KeyforgeServer;
use keyforge::config::Args;
use keyforge_keys::KeyPair;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(args.env_filter())
        .init();

    // Fatal: never bind without a usable key pair.
    let keys = KeyPair::load(&args.private_key, &args.public_key)
        .context("failed to load signing keys")?;

    let server = KeyforgeServer::builder()
        .bind(&args.listen)
        .build(keys)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;

    server.run().await?;

    Ok(())
}
