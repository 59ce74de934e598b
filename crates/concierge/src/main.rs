//! Concierge - Discord community bot.
//!
//! Greets new members, sends a periodic direct message to a fixed list of
//! users, optionally watches a log file, and reports problems to the
//! administrators. A small HTTP server answers liveness checks and a
//! self-ping keeps the hosting platform from idling the process.

mod cli;
mod observability;

use clap::Parser;
use cli::{Args, mask_token};
use concierge_core::{
    AdminNotifier, ConciergeConfig, ConnectionSupervisor, DirectMessageTask, DirectMessenger,
    EventDispatcher, IntervalScheduler, LogMonitor, WelcomeGreeter,
};
use concierge_error::{ConciergeResult, ConfigError, ConfigErrorKind};
use concierge_server::{ApiState, KeepAlive, bind, create_router, serve};
use concierge_social::{DiscordBot, DiscordPlatform};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let mut config = match ConciergeConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if args.json_logs {
        config.logging.json = true;
    }

    if let Err(e) = observability::init_logging(&config.logging) {
        eprintln!("Failed to initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Concierge stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args, config: ConciergeConfig) -> ConciergeResult<()> {
    info!("Starting Concierge v{}", env!("CARGO_PKG_VERSION"));
    for warning in config.validate() {
        warn!("{}", warning);
    }

    let token = args
        .token()
        .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingToken))?
        .to_string();
    info!(token = %mask_token(&token), "Discord token loaded");

    // Chat components
    let platform = Arc::new(DiscordPlatform::new(&token));
    let messenger = DirectMessenger::new(platform.clone());
    let notifier = AdminNotifier::new(messenger.clone(), config.admins.user_ids.clone());
    let greeter = WelcomeGreeter::new(platform, config.welcome.clone(), notifier.clone());
    let dm_task = DirectMessageTask::new(messenger, notifier.clone(), &config.direct_messages);
    let supervisor = Arc::new(ConnectionSupervisor::new(
        config.reconnect.delay(),
        notifier.clone(),
    ));
    let scheduler = IntervalScheduler::new();

    let mut dispatcher = EventDispatcher::new(
        greeter,
        dm_task,
        config.direct_messages.interval(),
        scheduler.clone(),
        Arc::clone(&supervisor),
    );
    if config.log_monitor.enabled {
        let monitor = LogMonitor::new(&config.log_monitor, notifier)?;
        info!(path = %monitor.path().display(), "Log monitor enabled");
        dispatcher = dispatcher.with_log_monitor(monitor, config.log_monitor.poll_interval());
    }
    let dispatcher = Arc::new(dispatcher);

    // Liveness server
    let listener = bind(&config.server.host, config.server.port).await?;
    let router = create_router(
        ApiState::new(config.server.health_log_interval()),
        config.server.root_route,
    );
    let (stop_server, server_stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(serve(listener, router, async move {
        let _ = server_stopped.await;
    }));

    let keep_alive = config.keep_alive.enabled.then(|| {
        let pinger = KeepAlive::new(config.keep_alive.url.clone(), config.keep_alive.interval());
        info!(url = %pinger.url(), "Self-ping enabled");
        tokio::spawn(pinger.run())
    });

    // Gateway session, restarted on failure until shutdown
    let bot = DiscordBot::new(token, Arc::clone(&dispatcher));
    tokio::select! {
        attempts = supervisor.run(&bot) => {
            info!(attempts, "Discord session ended");
        }
        () = shutdown_signal() => {
            info!("Shutdown signal received, shutting down");
        }
    }

    bot.shutdown().await;
    scheduler.shutdown().await;
    if let Some(handle) = keep_alive {
        handle.abort();
    }
    let _ = stop_server.send(());
    match server.await {
        Ok(result) => result?,
        Err(e) => error!(error = %e, "Liveness server task failed"),
    }

    info!("Concierge stopped");
    Ok(())
}

/// Wait for Ctrl+C. Never completes if the handler cannot be installed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
