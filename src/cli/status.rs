//! Status command handler
//!
//! Shows the effective setup and, optionally, whether the server is up.

use crate::config::Config;
use crate::error::Result;
use crate::geo::ip_location::IpLocator;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,

    /// Forget the cached IP location
    #[arg(long)]
    pub clear_cache: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    // Check server status if requested
    if args.server {
        check_server_status(&config).await;
    }

    let locator = IpLocator::new();
    if args.clear_cache {
        locator.clear_cache();
        println!("IP location cache cleared");
        println!();
    }

    println!("nearby v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Location:");
    println!("  Provider: {}", config.location.provider);
    println!("  Allowed:  {}", config.location.allow);
    if config.location.cache {
        match locator.cached_location() {
            Some(cached) => println!(
                "  Cached:   {} ({:.5}, {:.5})",
                cached.display_name, cached.lat, cached.lng
            ),
            None => println!(
                "  Cached:   none (kept for {}s)",
                IpLocator::cache_duration().as_secs()
            ),
        }
    }
    println!();

    println!("Search:");
    println!("  Endpoint:    {}", config.search.endpoint);
    println!("  Box:         ±{}°", config.search.box_degrees);
    println!(
        "  Results:     top {} of {}",
        config.search.max_results, config.search.raw_limit
    );
    println!("  Map links:   {}", config.url.default);

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(body) = response.text().await {
                    if let Ok(status) = serde_json::from_str::<serde_json::Value>(&body) {
                        if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                            println!("  Version: {}", version);
                        }
                        if let Some(uptime) = status.get("uptime_secs").and_then(|v| v.as_u64()) {
                            println!("  Uptime:  {}s", uptime);
                        }
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
