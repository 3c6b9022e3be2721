use desk_server::core::{setup_environment, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    let config = setup_environment()?;

    tracing::info!(
        environment = %config.environment,
        timezone = %config.timezone,
        "Harbor desk server starting"
    );

    // 2. Open the store and wire the engine
    let state = ServerState::initialize(&config)?;

    // 3. Serve until shutdown
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
