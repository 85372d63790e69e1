mod cli;
mod logging;

use std::future::Future;
use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Context;
use backend_lib::{
    auth::{
        password::hash_password_secure, token_generator::generate_encoded_key,
        validate_password_strength, PasswordRequirements,
    },
    config::Settings,
    router, AppState,
};
use clap::Parser;
use tokio::net::TcpListener;
use zeroize::Zeroize;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        },
        Some(Command::GenKey) => {
            println!("{}", generate_encoded_key());
            Ok(())
        },
        Some(Command::HashPassword) => hash_password_from_stdin(),
        Some(Command::Serve { bind }) => serve(&cli, *bind).await,
        None => serve(&cli, None).await,
    }
}

async fn serve(cli: &Cli, bind: Option<std::net::SocketAddr>) -> anyhow::Result<()> {
    // Initialize configuration, command line flags win over files and env
    let mut settings = Settings::load_from(&cli.config_dir)?;
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    if let Some(addr) = bind {
        settings.bind_addr = addr;
    }
    settings.validate()?;

    // Initialize tracing
    logging::init_logging(&settings.log_level, settings.log_format)?;
    tracing::debug!(?settings, "configuration loaded");

    let addr = settings.bind_addr;
    let users = settings.users.len();

    // Create application state
    let state = AppState::new(settings)?;
    let app = router::create_router(state);

    // Start the server
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, users, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires; never resolve if it cannot be listened for
async fn wait_for_signal(signal: impl Future<Output = io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn hash_password_from_stdin() -> anyhow::Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("password: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    let mut password = line.trim_end_matches(['\r', '\n']).to_string();
    line.zeroize();

    if password.is_empty() {
        anyhow::bail!("empty password");
    }
    if !validate_password_strength(&password, &PasswordRequirements::default()) {
        eprintln!(
            "warning: password is weak (use at least 10 characters with upper and lower case, a digit and a symbol)"
        );
    }

    let hash = hash_password_secure(&mut password)?;
    println!("{hash}");
    Ok(())
}
