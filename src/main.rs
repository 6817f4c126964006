// Entrypoint for the CLI application.
// - Keeps `main` small: resolve config, create the client, run the flow.
// - Returns `anyhow::Result` so any failure aborts with the error chain.

use zenodep_cli::{api::DepositionClient, config::Config, ui};

fn main() -> anyhow::Result<()> {
    // Token and endpoints come from the environment (`ACCESS_TOKEN`,
    // `DEPOSITION_URL`, `BUCKET_URL`). See `config::Config::from_env`.
    let config = Config::from_env()?;
    let client = DepositionClient::new(&config)?;

    // Upload the file, then register its metadata. Blocks until both
    // calls complete.
    ui::run(&client, &config)?;
    Ok(())
}
