use {api::consts::GRACEFUL_DRAIN_SECS, tracing::info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let state = api::init::init_all().await?;

	let config = api::config::get_config()?;
	let addr = config.server.get_addr();
	let listener = tokio::net::TcpListener::bind(&addr).await?;
	info!("Analytics API Server is running at {}", listener.local_addr()?);

	let app = api::server::app(state);

	axum::serve(listener, app).with_graceful_shutdown(common::graceful::shutdown_signal(GRACEFUL_DRAIN_SECS)).await?;

	info!("API service stopped");
	Ok(())
}
