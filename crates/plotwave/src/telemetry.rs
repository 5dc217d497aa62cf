use pw_config::PlotConfig;
use tracing::debug;

/// Fire-and-forget usage ping, sent once per run when `report_url` is set.
/// Failures are logged at debug and otherwise ignored; scheduling never
/// waits on this.
pub fn report_best_effort(config: &PlotConfig) {
    let Some(url) = config.report_url.clone() else {
        return;
    };
    let fast_concurrency = config.fast_concurrency;
    tokio::spawn(async move {
        let url = format!("{url}?fast_concurrency={fast_concurrency}");
        match reqwest::get(&url).await {
            Ok(response) => debug!(status = %response.status(), "telemetry ping sent"),
            Err(e) => debug!(error = %e, "telemetry ping failed"),
        }
    });
}
