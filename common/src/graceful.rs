use {
	std::time::Duration,
	tokio::signal,
	tracing::{info, warn},
};

/// 等待 SIGINT/SIGTERM 之后再给进行中的请求留出 drain_secs 的收尾时间
///
/// 只读服务没有需要回调的消费者 收到信号后只负责等待
pub async fn shutdown_signal(drain_secs: u64) {
	#[cfg(unix)]
	{
		use tokio::signal::unix::{SignalKind, signal};
		match signal(SignalKind::terminate()) {
			Ok(mut sigterm) => {
				tokio::select! {
					_ = signal::ctrl_c() => {
						info!("Received SIGINT, starting graceful shutdown...");
					}
					_ = sigterm.recv() => {
						info!("Received SIGTERM, starting graceful shutdown...");
					}
				}
			}
			Err(e) => {
				warn!("Failed to create SIGTERM signal handler: {}", e);
				let _ = signal::ctrl_c().await;
				info!("Received SIGINT, starting graceful shutdown...");
			}
		}
	}
	#[cfg(not(unix))]
	{
		let _ = signal::ctrl_c().await;
		info!("Received SIGINT, starting graceful shutdown...");
	}

	if drain_secs > 0 {
		info!("Waiting for in-flight requests to drain (max {}s)...", drain_secs);
		tokio::time::sleep(Duration::from_secs(drain_secs)).await;
	}
	info!("Graceful shutdown completed");
}
