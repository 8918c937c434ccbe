use clap::{Parser, Subcommand};
use txgen_rpc::{endpoints, ChainRpc};
use txgen_sender::{EmptySourcePolicy, SenderConfig};
use txgen_types::constants::DEFAULT_KEY_COUNT;
use txgen_types::Hash;
use txgen_wallet::KeyRegistry;

mod commands;

/// Test-traffic generator command-line interface.
#[derive(Parser)]
#[command(name = "txgen")]
#[command(about = "Generates random payments between well-known test wallets")]
#[command(version)]
struct Cli {
    /// Query node URL (height, UTXO, fee, pending-pool lookups).
    #[arg(long, default_value = endpoints::LOCAL_QUERY)]
    endpoint: String,

    /// Submission node URL.
    #[arg(long, default_value = endpoints::LOCAL_SUBMIT)]
    submit_endpoint: String,

    /// Size of the well-known wallet pool.
    #[arg(long, default_value_t = DEFAULT_KEY_COUNT)]
    key_count: usize,

    /// Cap on source-sampling attempts per send (defaults to the pool size).
    #[arg(long)]
    max_attempts: Option<usize>,

    /// What to do when a sampled source has no unspent outputs
    /// (abort or retry).
    #[arg(long, default_value = "abort")]
    empty_source_policy: EmptySourcePolicy,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and submit one random payment.
    Send {
        /// Repeat count.
        #[arg(long, default_value = "1")]
        count: usize,
    },

    /// Cancel a pending transaction by re-spending its inputs.
    Cancel {
        /// Hash of the pending transaction.
        hash: Hash,
    },

    /// List the well-known wallet addresses.
    Keys {
        /// Maximum number of pool entries to show.
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

/// Application context shared across commands.
struct AppContext {
    config: SenderConfig,
    chain: ChainRpc,
    keys: KeyRegistry,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        let mut config = SenderConfig::with_key_count(cli.key_count);
        if let Some(max_attempts) = cli.max_attempts {
            config.max_attempts = max_attempts;
        }
        config.empty_source_policy = cli.empty_source_policy;

        log::debug!(
            "chain endpoints: query {}, submit {}",
            cli.endpoint,
            cli.submit_endpoint
        );
        let chain = ChainRpc::with_endpoints(&cli.endpoint, &cli.submit_endpoint);

        Self {
            config,
            chain,
            keys: KeyRegistry::new(cli.key_count),
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);

    let result = match cli.command {
        Commands::Send { count } => commands::send(&ctx, count).await,
        Commands::Cancel { hash } => commands::cancel(&ctx, &hash).await,
        Commands::Keys { limit } => commands::list_keys(&ctx, limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let cli = Cli::try_parse_from(["txgen", "send"]).unwrap();
        assert_eq!(cli.endpoint, endpoints::LOCAL_QUERY);
        assert_eq!(cli.submit_endpoint, endpoints::LOCAL_SUBMIT);
        assert_eq!(cli.key_count, DEFAULT_KEY_COUNT);
    }

    #[test]
    fn test_policy_flag_parses() {
        let cli =
            Cli::try_parse_from(["txgen", "--empty-source-policy", "retry", "send"]).unwrap();
        assert_eq!(cli.empty_source_policy, EmptySourcePolicy::Retry);
    }
}
