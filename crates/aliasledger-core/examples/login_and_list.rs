//! Example: full session lifecycle against a real server
//!
//! This example demonstrates how to:
//! 1. Build a session (optionally against a self-hosted server)
//! 2. Log in, handling the MFA branch
//! 3. Page through aliases with `PagedList`
//! 4. Log out, revoking the key server-side and clearing the keyring
//!
//! ## Running
//!
//! ```bash
//! export ALIASLEDGER_EMAIL="john@example.com"
//! export ALIASLEDGER_PASSWORD="..."
//! # optional: export ALIASLEDGER_API_URL="https://sl.my-server.example"
//! cargo run --example login_and_list
//! ```

use std::env;
use std::io::{self, Write};

use aliasledger_core::{Config, LoginOutcome, PagedList, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let email = env::var("ALIASLEDGER_EMAIL")?;
    let password = env::var("ALIASLEDGER_PASSWORD")?;

    let mut config = Config::new("login_and_list example")?;
    if let Ok(api_url) = env::var("ALIASLEDGER_API_URL") {
        config = config.with_api_url(&api_url)?;
    }
    let mut session = Session::new(config)?;

    match session.log_in(&email, &password).await? {
        LoginOutcome::LoggedIn(login) => println!("Logged in as {}", login.name),
        LoginOutcome::MfaRequired(challenge) => {
            print!("OTP code for {}: ", challenge.email());
            io::stdout().flush()?;
            let mut code = String::new();
            io::stdin().read_line(&mut code)?;
            let login = session.verify_mfa(&challenge, code.trim()).await?;
            println!("Logged in as {}", login.name);
        }
    }

    let aliases = PagedList::new();
    while aliases.more_to_load() {
        aliases
            .load_more(|page| session.client().aliases(page, None))
            .await?;
        println!("...{} aliases loaded", aliases.len());
    }

    for alias in aliases.items() {
        println!(
            "{:>6}  {}  {}",
            alias.id,
            alias.email,
            if alias.enabled { "on" } else { "off" },
        );
    }

    session.log_out().await?;
    println!("Logged out");
    Ok(())
}
