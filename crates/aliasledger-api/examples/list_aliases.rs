//! Example: authenticate and page through aliases
//!
//! This example demonstrates how to:
//! 1. Log in with email and password (MFA accounts need the TUI-less
//!    `verify_mfa` step, not shown here)
//! 2. Attach the returned API key to the client
//! 3. Page through the alias list until the server runs dry
//!
//! ## Running
//!
//! ```bash
//! export ALIASLEDGER_EMAIL="john@example.com"
//! export ALIASLEDGER_PASSWORD="..."
//! cargo run --example list_aliases
//! ```

use std::env;

use aliasledger_api::ApiClient;
use url::Url;

const DEVICE: &str = "list_aliases example";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let email = env::var("ALIASLEDGER_EMAIL").expect("ALIASLEDGER_EMAIL not set");
    let password = env::var("ALIASLEDGER_PASSWORD").expect("ALIASLEDGER_PASSWORD not set");
    let base = env::var("ALIASLEDGER_API_URL")
        .unwrap_or_else(|_| "https://api.aliasledger.app".to_string());

    let client = ApiClient::new(Url::parse(&base)?)?;

    let login = client.login(&email, &password, DEVICE).await?;
    if login.mfa_enabled {
        eprintln!("account has MFA enabled; complete the login with verify_mfa");
        return Ok(());
    }
    let client = client.with_api_key(login.api_key.ok_or("login returned no API key")?);

    let mut page = 0;
    loop {
        let aliases = client.aliases(page, None).await?;
        if aliases.is_empty() {
            break;
        }
        for alias in &aliases {
            println!(
                "{:>6}  {}  forwarded={} blocked={} {}",
                alias.id,
                alias.email,
                alias.nb_forward,
                alias.nb_block,
                if alias.enabled { "" } else { "(disabled)" },
            );
        }
        page += 1;
    }

    Ok(())
}
