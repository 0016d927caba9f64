//! Application wiring: configuration, host and the Lucky Barrel plugin.

use crate::cli::CliArgs;
use crate::config::HostConfig;
use crate::error::HostError;
use crate::host::GameHost;
use crate::logging::display_banner;
use crate::signals::wait_for_shutdown_signal;
use lucky_event_system::ShutdownState;
use plugin_lucky_barrel::LuckyBarrelPlugin;
use tracing::{error, info};

/// A configured host with its plugins loaded.
pub struct Application {
    host: GameHost,
}

impl Application {
    /// Builds the host from a validated configuration and loads the plugins.
    pub async fn new(config: HostConfig) -> Result<Self, HostError> {
        config.validate().map_err(HostError::InvalidConfig)?;
        display_banner();

        let mut host = GameHost::new(&config);
        host.load_plugin(Box::new(LuckyBarrelPlugin::new())).await?;

        info!(
            "✅ Host ready with plugins {:?}, plugin configs in {}",
            host.plugin_names(),
            config.plugin_config_dir().display()
        );
        Ok(Self { host })
    }

    pub fn host(&self) -> &GameHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut GameHost {
        &mut self.host
    }

    /// Ticks until a termination signal arrives, then shuts the plugins down.
    pub async fn run(mut self) -> Result<(), HostError> {
        let shutdown = ShutdownState::new();

        let signal_state = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = wait_for_shutdown_signal(signal_state.clone()).await {
                error!("❌ Signal handling failed: {}", e);
                signal_state.initiate_shutdown();
            }
        });

        self.host.run(shutdown).await;
        self.host.shutdown().await;
        info!("👋 Host stopped");
        Ok(())
    }
}

/// Loads the configuration named by the command line, sets up logging and
/// runs the host until it is signalled to stop.
pub async fn init() -> Result<(), HostError> {
    let args = CliArgs::parse();

    let mut config = HostConfig::load_from_file(&args.config_path).await?;
    args.apply_overrides(&mut config);

    crate::logging::setup_logging(&config.logging, args.json_logs)?;
    info!("🔧 Configuration loaded from {}", args.config_path.display());

    Application::new(config).await?.run().await
}
