use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dns_admin_client::{
    ApiClient, ClientConfig, NodeOverride,
    api::dns_client::{QueryProtocol, ResolveQuery},
    api::zones::ZoneType,
    session::{Anonymous, FixedNode, StaticToken},
};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Server web console URL (e.g. http://192.0.2.10:5380)
    #[arg(long, value_name = "URL")]
    server: String,
    /// Session or API token
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
    /// Cluster node to address
    #[arg(long, value_name = "NODE")]
    node: Option<String>,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Command {
    /// Sign in and print the session token
    Login {
        #[arg(long)]
        user: String,
        #[arg(long)]
        pass: String,
    },
    /// List zones
    Zones,
    /// Create a primary zone
    CreateZone { zone: String },
    /// Show records of a domain
    Records {
        domain: String,
        #[arg(long)]
        zone: Option<String>,
    },
    /// Flush the resolver cache
    CacheFlush,
    /// Print server settings
    Settings,
    /// Resolve a name through the server
    Resolve {
        domain: String,
        #[arg(default_value = "A")]
        record_type: String,
        #[arg(long, default_value = "this-server")]
        via: String,
        #[arg(long)]
        tcp: bool,
    },
    /// List log files, or print one
    Logs { file: Option<String> },
    /// Show cluster membership
    Cluster,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = build_client_config(&cli)?;

    if let Command::Login { user, pass } = &cli.command {
        let client = ApiClient::connect(config, Anonymous, Anonymous)?;
        let login = client.login(user, pass).await.context("sign-in failed")?;
        info!(user = %login.username, "signed in");
        println!("{}", login.token);
        return Ok(());
    }

    let Some(token) = cli.token.clone() else {
        bail!("--token is required for this command (use `login` to obtain one)");
    };
    let client = ApiClient::connect(config, StaticToken(token), FixedNode(cli.node.clone()))?;

    match cli.command {
        Command::Login { .. } => unreachable!("handled above"),
        Command::Zones => {
            let list = client.list_zones(None, None).await?;
            for zone in list.zones {
                let state = if zone.disabled { "disabled" } else { "enabled" };
                println!("{}\t{}\t{}", zone.name, zone.zone_type.as_str(), state);
            }
        }
        Command::CreateZone { zone } => {
            let created = client
                .create_zone(&zone, ZoneType::Primary, Default::default())
                .await
                .with_context(|| format!("failed to create zone {zone}"))?;
            println!("{}", created.domain);
        }
        Command::Records { domain, zone } => {
            let records = client.get_records(&domain, zone.as_deref(), false).await?;
            for r in records.records {
                println!("{}\t{}\t{}\t{}", r.name, r.ttl, r.record_type, r.rdata_summary());
            }
        }
        Command::CacheFlush => {
            client.flush_cache().await?;
            info!("cache flushed");
        }
        Command::Settings => {
            let settings = client.get_settings().await?;
            print_json(&serde_json::json!({
                "version": settings.version,
                "dnsServerDomain": settings.dns_server_domain,
                "dnsServerLocalEndPoints": settings.dns_server_local_end_points,
                "forwarders": settings.forwarders,
                "other": settings.other,
            }))?;
        }
        Command::Resolve {
            domain,
            record_type,
            via,
            tcp,
        } => {
            let mut query = ResolveQuery::new(domain, record_type);
            query.server = via;
            if tcp {
                query.protocol = QueryProtocol::Tcp;
            }
            let answer = client.resolve(&query).await?;
            print_json(&answer.result)?;
        }
        Command::Logs { file: Some(file) } => {
            print!("{}", client.download_log(&file).await?);
        }
        Command::Logs { file: None } => {
            for log in client.list_logs().await? {
                println!("{}\t{}", log.file_name, log.size);
            }
        }
        Command::Cluster => {
            let state = client.cluster_state(NodeOverride::Omit).await?;
            if !state.cluster_initialized {
                println!("cluster not initialized");
            }
            for node in state.nodes() {
                println!(
                    "{}\t{}\t{}",
                    node.name,
                    node.node_type.as_deref().unwrap_or("-"),
                    node.state.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

fn build_client_config(cli: &Cli) -> Result<ClientConfig> {
    let server = cli.server.trim();
    if !(server.starts_with("http://") || server.starts_with("https://")) {
        bail!("server URL must start with http:// or https://, got '{server}'");
    }
    if cli.timeout == 0 {
        bail!("--timeout must be at least one second");
    }
    Ok(ClientConfig::new(server).with_timeout(Duration::from_secs(cli.timeout)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,dns_admin_client=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
