use preorder_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (.env is optional, real env vars win)
    dotenv::dotenv().ok();
    init_logger();

    tracing::info!("Preorder Hub server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Open the database and run migrations
    let state = ServerState::initialize(&config).await?;

    // 4. Serve until ctrl-c
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
