use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::net::TcpListener;

use resume_router::config::{load_config, validate_config, ConfigError, LogFormat, RouterConfig};
use resume_router::cta::Activation;
use resume_router::lifecycle::{shutdown_signal, Shutdown};
use resume_router::observability::{logging, metrics};
use resume_router::{App, NavigationRequest, PreviewServer};

#[derive(Parser)]
#[command(name = "resume-router")]
#[command(version, about = "Route resolver and preview server for the resume app shell", long_about = None)]
struct Cli {
    /// TOML configuration file (built-in route table when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate to each path in turn within one browsing context
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Step back one history entry after the last navigation
        #[arg(long)]
        back: bool,
    },
    /// List every matchable route branch
    Routes,
    /// Validate the configuration and exit
    Check,
    /// Show the hero call-to-action and where "Get Started" lands
    Cta,
    /// Run the HTTP preview server
    Serve {
        /// Override `server.bind_address`
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match read_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("Configuration is invalid:");
            for error in &errors {
                eprintln!("  - {error}");
            }
            return Err(format!("{} configuration error(s)", errors.len()).into());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(format) = cli.log_format {
        config.observability.log_format = format;
    }
    logging::init_logging(&config.observability)?;

    run(cli.command, config).await.inspect_err(|e| {
        tracing::error!(error = %e, "Command failed");
    })
}

fn read_config(path: Option<&PathBuf>) -> Result<RouterConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = RouterConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

async fn run(
    command: Commands,
    mut config: RouterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Serve { bind: Some(bind) } = &command {
        config.server.bind_address = bind.clone();
    }
    let app = App::from_config(config)?;

    match command {
        Commands::Resolve { paths, back } => {
            let state = app.new_state();
            let mut failed = 0;
            for path in paths {
                let navigation = app.resolver().navigate(&state, NavigationRequest::push(path));
                match navigation.await {
                    Ok(outcome) => print_json(&outcome)?,
                    Err(e) => {
                        eprintln!("Error: {e}");
                        failed += 1;
                    }
                }
            }
            if back {
                match app.resolver().back(&state).await? {
                    Some(outcome) => print_json(&outcome)?,
                    None => eprintln!("Already at the first history entry"),
                }
            }
            print_json(&state.snapshot().history)?;
            if failed > 0 {
                return Err(format!("{failed} navigation(s) failed").into());
            }
        }
        Commands::Routes => {
            for branch in app.tree().branches() {
                let target = match &branch.redirect {
                    Some(redirect) => format!("-> {}", redirect.to),
                    None => branch.components.join(" > "),
                };
                let loader = branch
                    .loader
                    .as_deref()
                    .map(|l| format!("  [loader: {l}]"))
                    .unwrap_or_default();
                println!("{:<12} {:<22} {target}{loader}", branch.route, branch.pattern);
            }
        }
        Commands::Check => {
            println!(
                "Configuration OK: {} route branches, {} resumes",
                app.tree().branches().len(),
                app.store().len()
            );
        }
        Commands::Cta => {
            println!("{}", app.cta().to_html());
            let state = app.new_state();
            for action in app.cta().actions() {
                match action.activate(app.resolver(), &state).await? {
                    Activation::Navigated(outcome) => {
                        if let Some(committed) = outcome.committed() {
                            println!("{} -> {}", action.label(), committed.location);
                        }
                    }
                    Activation::OpenExternal { href, target, rel } => {
                        println!("{} -> {href} (target={target}, rel=\"{rel}\")", action.label());
                    }
                }
            }
        }
        Commands::Serve { .. } => {
            let observability = &app.config().observability;
            if observability.metrics_enabled {
                match observability.metrics_address.parse() {
                    Ok(addr) => metrics::init_metrics(addr),
                    Err(e) => tracing::error!(
                        metrics_address = %observability.metrics_address,
                        error = %e,
                        "Failed to parse metrics address"
                    ),
                }
            }

            let listener = TcpListener::bind(&app.config().server.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");

            let shutdown = Shutdown::new();
            let stopped = shutdown.wait();
            tokio::spawn(async move {
                shutdown_signal().await;
                shutdown.trigger();
            });

            PreviewServer::new(app).run(listener, stopped).await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
