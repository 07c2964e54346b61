//! CLI wallet for sending zap on the Waves network.

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use zap_cli::commands::spend::SpendRequest;
use zap_cli::{asset, show, spend, transactions, NodeClient, Wallet, WalletConfig};
use zap_core::asset::format_amount;
use zap_core::{AssetId, Network};

/// Command line arguments for the CLI wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "zap", about = "Show and send zap on the Waves network")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Node to connect to
    #[structopt(short, long)]
    node: Option<String>,

    /// Network: mainnet, testnet or stagenet
    #[structopt(long)]
    network: Option<Network>,

    /// Asset id to show and send (WAVES for the native asset)
    #[structopt(long)]
    asset: Option<String>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Seed options shared by the account commands.
#[derive(Debug, StructOpt)]
struct SeedOpt {
    /// Seed (used to generate account)
    #[structopt(short, long)]
    seed: String,

    /// Seed is base58 encoded
    #[structopt(short, long)]
    base58: bool,

    /// Account index within the seed
    #[structopt(long, default_value = "0")]
    nonce: u32,
}

/// Subcommands for the CLI wallet.
#[derive(Debug, StructOpt)]
enum Command {
    /// Show zap - show funds in an account
    #[structopt(name = "show")]
    Show {
        #[structopt(flatten)]
        seed: SeedOpt,
    },

    /// Spend zap - send funds from an account
    #[structopt(name = "spend")]
    Spend {
        #[structopt(flatten)]
        seed: SeedOpt,

        /// The recipient account for the zap
        #[structopt(short, long)]
        recipient: String,

        /// Amount in the asset's smallest unit (1/100s of a zap)
        #[structopt(short, long)]
        amount: u64,

        /// Fee in whole units of the fee asset, e.g. 0.1
        #[structopt(long)]
        fee: Option<String>,

        /// Asset to pay the fee in (defaults to the sent asset)
        #[structopt(long)]
        fee_asset: Option<String>,

        /// Text attached to the transfer
        #[structopt(short = "A", long)]
        attachment: Option<String>,

        /// Sign and print the transaction without broadcasting it
        #[structopt(long)]
        dry_run: bool,
    },

    /// List recent transactions of an account
    #[structopt(name = "transactions", alias = "list")]
    Transactions {
        #[structopt(flatten)]
        seed: SeedOpt,

        /// Number of transactions to list
        #[structopt(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show details of the configured asset
    #[structopt(name = "asset")]
    Asset,
}

impl SeedOpt {
    fn wallet(&self, network: Network) -> Result<Wallet> {
        Ok(Wallet::from_seed_text(&self.seed, self.base58, self.nonce, network)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command line arguments
    let opt = Opt::from_args();

    // Load configuration
    let mut config = WalletConfig::load(opt.config.as_deref())?;

    // Override configuration if specified
    if let Some(node) = opt.node {
        config.node = node;
    }
    if let Some(network) = opt.network {
        config.network = network;
    }
    if let Some(asset) = opt.asset {
        config.asset_id = asset;
    }

    let asset_id = config.asset()?;
    let node = NodeClient::new(&config.node, config.timeout())?;

    // Run the appropriate command
    match opt.cmd {
        Command::Show { seed } => {
            let wallet = seed.wallet(config.network)?;
            let holding = show::run(&node, &wallet, &asset_id).await?;
            println!("{}", holding.address);
            println!(
                "{} {} {}",
                "Balance:".green(),
                holding.formatted_balance(),
                holding.asset.name
            );
        }
        Command::Spend {
            seed,
            recipient,
            amount,
            fee,
            fee_asset,
            attachment,
            dry_run,
        } => {
            if let Some(fee) = fee {
                config.fee = fee;
            }
            if fee_asset.is_some() {
                config.fee_asset_id = fee_asset;
            }

            let wallet = seed.wallet(config.network)?;
            let request = SpendRequest {
                recipient,
                asset_id,
                amount,
                fee: config.fee.clone(),
                fee_asset_id: config.fee_asset()?,
                attachment,
                timestamp: None,
                dry_run,
            };
            let outcome = spend::run(&node, &wallet, &request).await?;

            println!("{}", wallet.address());
            for (key, value) in outcome.json.fields()? {
                println!(" - {}", key);
                match value {
                    serde_json::Value::String(text) => println!("    {}", text),
                    other => println!("    {}", other),
                }
            }
            match outcome.response {
                Some(response) => {
                    println!("{}", "Transaction sent:".green());
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                None => println!("{}", "Dry run: transaction not broadcast".yellow()),
            }
        }
        Command::Transactions { seed, limit } => {
            let wallet = seed.wallet(config.network)?;
            let records = transactions::run(&node, &wallet, limit).await?;
            let asset = asset::run(&node, &asset_id).await?;

            println!("{}", wallet.address());
            if records.is_empty() {
                println!("{}", "No transactions".yellow());
            }
            for record in records {
                let when = record
                    .datetime()
                    .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| record.timestamp.to_string());
                let direction = if record.is_outgoing(wallet.address()) {
                    "OUT".red()
                } else {
                    "IN".green()
                };
                let amount = match record.amount {
                    Some(amount) if record.moves_asset(&asset_id) => {
                        format!("{} {}", asset.format_amount(amount), asset.name)
                    }
                    Some(amount) => format!(
                        "{} {}",
                        amount,
                        record.asset_id.as_deref().unwrap_or("WAVES")
                    ),
                    None => format!("type {}", record.tx_type),
                };
                println!("{} {:>3} {} {}", when, direction, amount, record.id);
            }
        }
        Command::Asset => {
            let asset = asset::run(&node, &asset_id).await?;
            println!("{} {}", "Asset:".green(), asset.asset_id);
            println!("  name:        {}", asset.name);
            println!("  description: {}", asset.description);
            println!("  decimals:    {}", asset.decimals);
            println!(
                "  quantity:    {}",
                format_amount(asset.quantity, asset.decimals)
            );
            println!("  reissuable:  {}", asset.reissuable);
            match asset.min_sponsored_asset_fee {
                Some(fee) => println!("  sponsored:   min fee {}", fee),
                None if asset.asset_id == AssetId::Waves => {}
                None => println!("  sponsored:   no"),
            }
        }
    }

    Ok(())
}
