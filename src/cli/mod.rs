use crate::{config::Settings, schemas::parse_request, server};
use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::{net::SocketAddr, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the day-trip service
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = Command::new("day-trip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds deterministic day-trip itineraries from a places directory")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP service")
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Address to listen on (or set BIND_ADDR env var)"),
                )
                .arg(api_key_arg())
                .arg(timeout_arg()),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan a single itinerary from a request JSON file and print it")
                .arg(
                    Arg::new("request")
                        .help("Path to a JSON request body")
                        .required(true)
                        .index(1),
                )
                .arg(api_key_arg())
                .arg(timeout_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("serve", sub)) => {
            let mut settings = settings_from(sub)?;
            if let Some(bind) = sub.get_one::<String>("bind") {
                let addr: SocketAddr = bind
                    .parse()
                    .with_context(|| format!("invalid --bind address `{bind}`"))?;
                settings = settings.with_bind_addr(addr);
            }
            server::serve(&settings).await
        }
        Some(("plan", sub)) => plan_once(sub).await,
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn api_key_arg() -> Arg {
    Arg::new("api-key")
        .short('k')
        .long("api-key")
        .value_name("KEY")
        .help("Places API key (or set PLACES_API_KEY env var)")
}

fn timeout_arg() -> Arg {
    Arg::new("timeout")
        .short('t')
        .long("timeout")
        .value_name("SECONDS")
        .value_parser(clap::value_parser!(u64).range(1..))
        .help("Timeout for each outbound request in seconds (or set HTTP_TIMEOUT_SECS)")
}

fn settings_from(matches: &ArgMatches) -> anyhow::Result<Settings> {
    let mut settings = Settings::from_env()?;

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        settings = settings.with_api_key(api_key.clone());
    }
    if let Some(seconds) = matches.get_one::<u64>("timeout") {
        settings = settings.with_http_timeout(Duration::from_secs(*seconds));
    }

    Ok(settings)
}

async fn plan_once(matches: &ArgMatches) -> anyhow::Result<()> {
    let settings = settings_from(matches)?;
    let path = matches
        .get_one::<String>("request")
        .context("request path is required")?;

    let raw = std::fs::read(path).with_context(|| format!("failed to read `{path}`"))?;
    let request = parse_request(&raw)?;
    let planner = settings.planner()?;

    info!("Planning itinerary from {}", path);

    match planner.plan(&request).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            info!("Itinerary planned successfully");
            Ok(())
        }
        Err(e) => {
            error!("Itinerary planning failed: {}", e);
            println!("{}", serde_json::to_string_pretty(&e.to_error_payload())?);
            Err(e.into())
        }
    }
}
