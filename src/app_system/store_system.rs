use tracing::{error, info, instrument};

use super::config::{ConfigError, StoreConfig};
use crate::clients::StoreClient;
use crate::store_actor::{StoreService, StoreState};
use crate::ticker::StatusTicker;

/// Owns the running store: the actor task, the status ticker, and the client
/// handed to the presentation layer.
///
/// **Startup order:** the store actor first, then the ticker that feeds it.
/// **Shutdown order:** the reverse, so no tick can reach a store that is
/// going away.
pub struct StoreSystem {
    pub client: StoreClient,
    ticker: StatusTicker,
    handle: tokio::task::JoinHandle<()>,
}

impl StoreSystem {
    /// Create and start the store with a fresh state.
    pub fn new(config: &StoreConfig) -> Result<Self, ConfigError> {
        Self::with_state(config, StoreState::new(config))
    }

    /// Start the store around an existing state, e.g. one with a fixed clock.
    ///
    /// The config is validated first; nothing is spawned if it is rejected.
    #[instrument(name = "store_system", skip_all, fields(tick_interval_secs = config.tick_interval_secs))]
    pub fn with_state(config: &StoreConfig, state: StoreState) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            error!(error = %e, "Refusing to start store system");
            return Err(e);
        }

        info!("Starting store system");

        let (service, client) = StoreService::new(config.buffer_size, state);
        let handle = tokio::spawn(service.run());

        let ticker = StatusTicker::spawn(client.clone(), config.tick_interval());

        info!("Store system started successfully");

        Ok(Self {
            client,
            ticker,
            handle,
        })
    }

    /// Stop the ticker, then the store, and wait for both tasks.
    ///
    /// Errors are logged rather than returned so shutdown never hangs halfway.
    #[instrument(skip(self))]
    pub async fn shutdown(self) {
        info!("Shutting down store system");

        self.ticker.stop().await;

        if let Err(e) = self.client.shutdown().await {
            error!(error = %e, "Store already stopped");
        }
        if let Err(e) = self.handle.await {
            error!(error = ?e, "Store task failed");
        }

        info!("Store system shutdown complete");
    }
}
