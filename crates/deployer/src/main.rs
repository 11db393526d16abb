use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use staking_math::compute_epoch_schedule;
use staking_types::DeployResult;

use staking_deployer::config::create_example_config;
use staking_deployer::pipeline::{log_plan, log_summary};
use staking_deployer::{
    evm, exit_code, format_timestamp, run_deployment, verify_chain_id, ClientSettings, DeployConfig,
    DeploymentManifest, EvmChainClient, RewardSchedule,
};

#[derive(Parser, Debug)]
#[command(name = "staking-deployer")]
#[command(about = "Deploy the staking contracts and program the first-year reward schedule")]
struct Args {
    /// Path to deployer configuration file
    #[arg(short, long, default_value = "deploy.toml")]
    config: String,

    /// Network profile to deploy to (defaults to the config's default_network)
    #[arg(short, long)]
    network: Option<String>,

    /// Write a JSON deployment manifest to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dry run mode - compute the schedule but don't send transactions
    #[arg(long)]
    dry_run: bool,

    /// Reference timestamp for a dry run instead of the latest block
    #[arg(long, requires = "dry_run")]
    at: Option<u64>,

    /// Write an example configuration to --config and exit
    #[arg(long)]
    write_example_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    let result = run(args).await;
    if let Err(e) = &result {
        eprintln!("{}", e);
    }
    ExitCode::from(exit_code(&result))
}

async fn run(args: Args) -> DeployResult<()> {
    if args.write_example_config {
        create_example_config(&args.config)?;
        log::info!("Example configuration written to {}", args.config);
        return Ok(());
    }

    let config = if Path::new(&args.config).exists() {
        DeployConfig::load(&args.config)?
    } else {
        log::warn!("Config file {} not found, using built-in defaults", args.config);
        DeployConfig::default()
    };

    let network_name = args.network.as_deref().unwrap_or(&config.default_network);
    let network = config.resolve_network(network_name, |var| std::env::var(var).ok())?;

    log::info!("Starting staking deployment on {}", network.name);
    if network.ephemeral {
        log::warn!(
            "Network '{}' is ephemeral - deployed contracts disappear when the node stops",
            network.name
        );
    }

    // Converted up front so a bad table fails before any transaction is sent
    let rewards = RewardSchedule::standard()?;

    if args.dry_run {
        log::warn!("Running in DRY RUN mode - no transactions will be submitted");
        let reference = match args.at {
            Some(ts) => ts,
            None => evm::latest_block_timestamp_at(&network.url).await?,
        };
        let epoch = compute_epoch_schedule(reference)?;
        log::info!(
            "Reference time {} gives a schedule from {} to {}",
            format_timestamp(reference),
            format_timestamp(epoch.start_time),
            format_timestamp(epoch.end_time())
        );
        log_plan(&rewards.time_ranges(&epoch));
        return Ok(());
    }

    let client = EvmChainClient::connect(
        &network,
        ClientSettings {
            confirmations: config.confirmations,
            confirmation_timeout: config.confirmation_timeout(),
            artifacts_dir: config.artifacts_dir.clone(),
        },
    )
    .await?;

    let chain_id = verify_chain_id(&client, network.chain_id).await?;
    log::info!("Connected to chain {}", chain_id);

    let report = run_deployment(&client, &config.contracts, &rewards).await?;
    log_summary(&report);

    if let Some(path) = &args.output {
        DeploymentManifest::from_report(&network.name, chain_id, &report).write(path)?;
    }

    log::info!("Deployment complete");
    Ok(())
}
