//! streamlens CLI
//!
//! Command-line interface for interacting with the streamlens daemon

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use url::Url;

use streamlens_api::events::CatalogEvent;
use streamlens_api::requests::AddHostRequest;
use streamlens_api::responses::SnapshotResponse;
use streamlens_client::{HttpClient, WsClient};

#[derive(Parser)]
#[command(name = "streamlens")]
#[command(about = "Catalog inventory for remote streaming hosts", long_about = None)]
struct Cli {
    /// Daemon base URL
    #[arg(long, global = true, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered hosts
    Hosts {
        /// Filter by comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Show the cached app catalog for a host
    Apps {
        /// Host name
        host: String,
    },
    /// Fetch a fresh catalog snapshot for a host
    Refresh {
        /// Host name
        host: String,
    },
    /// Cancel the in-flight fetch for a host
    Cancel {
        /// Host name
        host: String,
    },
    /// Drop the cached catalog for a host
    Invalidate {
        /// Host name
        host: String,
    },
    /// Register a host
    Add {
        /// Unique host name
        name: String,
        /// Address the catalog endpoint is reachable on
        addr: String,
        /// Catalog port
        #[arg(long)]
        port: Option<u16>,
        /// Human-readable display name
        #[arg(long)]
        display_name: Option<String>,
        /// Tags for filtering and grouping
        #[arg(long)]
        tags: Vec<String>,
    },
    /// Unregister a host
    Remove {
        /// Host name
        host: String,
    },
    /// Stream live catalog events
    Watch,
}

fn print_snapshot(snapshot: &SnapshotResponse) {
    println!("{} ({} apps, {})", snapshot.host, snapshot.apps.len(), snapshot.fetched_at);
    for app in &snapshot.apps {
        let marker = if app.running { "*" } else { " " };
        println!("  {marker} {:<40} [{}]", app.title, app.id);
    }
}

/// Derive the WebSocket events URL from the daemon base URL
fn ws_events_url(server: &str) -> Result<String> {
    let mut url = Url::parse(server)?;
    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => return Err(eyre!("unsupported scheme: {other}")),
    };
    url.set_scheme(scheme)
        .map_err(|()| eyre!("failed to set scheme on {server}"))?;
    url.set_path("/ws/events");
    Ok(url.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let client = HttpClient::new(&cli.server)?;

    match cli.command {
        Commands::Hosts { tags } => {
            let hosts = client.list_hosts(tags.as_deref()).await?;
            if hosts.is_empty() {
                println!("no hosts registered");
            }
            for host in hosts {
                let apps = host
                    .app_count
                    .map_or_else(|| "-".to_string(), |c| c.to_string());
                print!("{:<20} {:<10} apps={apps:<5}", host.name, host.state);
                if let Some(error) = host.error {
                    print!(" last error: {error}");
                }
                println!();
            }
        }
        Commands::Apps { host } => {
            let cached = client.cached_apps(&host).await?;
            match cached.snapshot {
                Some(snapshot) => print_snapshot(&snapshot),
                None => println!("no catalog cached for {host}"),
            }
        }
        Commands::Refresh { host } => {
            let snapshot = client.refresh(&host).await?;
            print_snapshot(&snapshot);
        }
        Commands::Cancel { host } => {
            let result = client.cancel(&host).await?;
            if result.cancelled {
                println!("cancelled in-flight fetch for {host}");
            } else {
                println!("no in-flight fetch for {host}");
            }
        }
        Commands::Invalidate { host } => {
            client.invalidate(&host).await?;
            println!("invalidated cached catalog for {host}");
        }
        Commands::Add {
            name,
            addr,
            port,
            display_name,
            tags,
        } => {
            let status = client
                .add_host(&AddHostRequest {
                    name,
                    addr,
                    port,
                    display_name,
                    tags,
                })
                .await?;
            println!("registered {} ({})", status.name, status.state);
        }
        Commands::Remove { host } => {
            client.remove_host(&host).await?;
            println!("removed {host}");
        }
        Commands::Watch => {
            let mut ws = WsClient::connect(ws_events_url(&cli.server)?).await?;
            while let Some(event) = ws.recv().await {
                match event {
                    CatalogEvent::HostRegistered { host } => println!("{host}: registered"),
                    CatalogEvent::HostRemoved { host, reason } => {
                        println!("{host}: removed ({reason})");
                    }
                    CatalogEvent::StateChanged { host, from, to } => {
                        println!("{host}: {from} -> {to}");
                    }
                    CatalogEvent::CatalogReady {
                        host, app_count, ..
                    } => println!("{host}: catalog ready, {app_count} apps"),
                    CatalogEvent::CatalogFailed {
                        host,
                        error,
                        stale_retained,
                    } => {
                        let stale = if stale_retained { " (stale retained)" } else { "" };
                        println!("{host}: fetch failed{stale}: {error}");
                    }
                }
            }
        }
    }

    Ok(())
}
