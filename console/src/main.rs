use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use netboot_console::actions::{Confirmer, LineConfirmer, StaticConfirmer, TimedReloader};
use netboot_console::binder::SystemStatus;
use netboot_console::feedback::FeedEvent;
use netboot_console::{ActionOutcome, AdminConsole, Config, ConfigManager, HttpControlPlane};

#[derive(Parser, Debug)]
#[command(name = "netboot-console", about = "Netboot administration console")]
struct Cli {
    #[arg(long, default_value = "config")]
    config_dir: String,
    /// Overrides `base_url` from main.toml
    #[arg(long)]
    base_url: Option<String>,
    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show service states and disk usage
    Status,
    /// Start or stop a managed service
    Toggle { service: String, state: SwitchState },
    /// Restart the reverse proxy (the connection may drop)
    RestartProxy,
    /// Regenerate iPXE boot menus
    RegenerateMenus,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SwitchState {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("netboot_console=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = load_config(&cli).await?;

    let control_plane = Arc::new(HttpControlPlane::from_config(&config)?);
    let confirmer: Arc<dyn Confirmer> = if cli.yes {
        Arc::new(StaticConfirmer::approve())
    } else {
        Arc::new(LineConfirmer::stdio())
    };
    let (reloader, mut reloads) = TimedReloader::new();

    let console = AdminConsole::new(&config, control_plane, confirmer, Arc::new(reloader));
    let mut feed = console.notifications().subscribe();

    // Controls start from server state, like the page does on load
    let initial = console.refresh().await;
    if let Command::Status = cli.command {
        render_status(&console, &initial?).await;
        return Ok(());
    }
    if let Err(e) = &initial {
        warn!("Could not read initial system status: {}", e);
    }

    let outcome = match &cli.command {
        Command::Toggle { service, state } => {
            console
                .toggle_service(service, matches!(state, SwitchState::On))
                .await?
        }
        Command::RestartProxy => console.restart_proxy().await?,
        Command::RegenerateMenus => console.regenerate_menus().await?,
        Command::Status => return Ok(()),
    };

    print_notifications(&mut feed);

    if let Some(delay) = outcome.reload_after() {
        info!("Waiting {}ms for the scheduled reload", delay.as_millis());
        if reloads.recv().await.is_some() {
            match console.reload().await {
                Ok(status) => render_status(&console, &status).await,
                Err(e) => warn!("Reload could not read system status: {}", e),
            }
        }
    }

    match outcome {
        ActionOutcome::RolledBack { error } => Err(anyhow!(error)),
        _ => Ok(()),
    }
}

async fn load_config(cli: &Cli) -> Result<Arc<Config>> {
    let mut config = match ConfigManager::new(cli.config_dir.clone()).await {
        Ok(manager) => (*manager.get_current_config()).clone(),
        Err(e) if cli.base_url.is_some() => {
            warn!("Using defaults, config not loaded: {}", e);
            Config::with_base_url(String::new())
        }
        Err(e) => return Err(e),
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }

    Ok(ConfigManager::from_config(config)?.get_current_config())
}

fn print_notifications(feed: &mut broadcast::Receiver<FeedEvent>) {
    while let Ok(event) = feed.try_recv() {
        if let FeedEvent::Shown(notification) = event {
            println!("[{}] {}", notification.severity, notification.message);
        }
    }
}

async fn render_status(console: &AdminConsole, status: &SystemStatus) {
    for control in console.controls() {
        let state = control.snapshot().await;
        if let Some(text) = state.status_text() {
            println!("{:<18} {}", state.name, text);
        }
    }
    for (service, active) in &status.services {
        if console.control(service).is_err() {
            let text = if *active { "Active" } else { "Inactive" };
            println!("{:<18} {}", service, text);
        }
    }
    println!(
        "{:<18} {}",
        "disk usage",
        status.disk_usage.as_deref().unwrap_or("Unknown")
    );
}
