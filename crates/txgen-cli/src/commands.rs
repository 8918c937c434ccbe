//! CLI command implementations.

use crate::AppContext;
use txgen_sender::{CancellationBuilder, RandomPaymentGenerator};
use txgen_types::Hash;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

/// Generate and submit `count` random payments, one at a time.
pub async fn send(ctx: &AppContext, count: usize) -> Result {
    let generator = RandomPaymentGenerator::new(&ctx.config, &ctx.chain, &ctx.keys);

    for i in 0..count {
        let report = generator.send().await?;
        println!(
            "[{}/{}] {} at height {}: wallet {} -> wallet {}, amount {}, fee {}",
            i + 1,
            count,
            report.tx_hash,
            report.height,
            report.source,
            report.destination,
            report.amount,
            report.fee
        );
    }
    Ok(())
}

/// Cancel a pending transaction by hash.
pub async fn cancel(ctx: &AppContext, hash: &Hash) -> Result {
    let canceller = CancellationBuilder::new(&ctx.chain, &ctx.keys);
    let report = canceller.cancel(hash).await?;

    println!("Cancelled {} ({} bytes)", report.original_hash, report.original_size);
    println!(
        "Replacement {} ({} bytes) submitted at height {}",
        report.cancel_hash, report.cancel_size, report.height
    );
    Ok(())
}

/// Print the well-known addresses: pool entries up to `limit`, then the
/// named wallets.
pub fn list_keys(ctx: &AppContext, limit: usize) -> Result {
    let shown = ctx.keys.len().min(limit);
    for i in 0..shown {
        let pair = ctx.keys.key(i)?;
        println!("pool.{:<4} {}", i, pair.address);
    }
    if shown < ctx.keys.len() {
        println!("... {} more pool entries", ctx.keys.len() - shown);
    }

    println!("genesis       {}", ctx.keys.genesis().address);
    println!("commons-budget {}", ctx.keys.commons_budget().address);
    for n in 1..=txgen_wallet::keys::NODE_WALLETS {
        if let Ok(pair) = ctx.keys.node(n) {
            println!("node.{:<8} {}", n, pair.address);
        }
    }
    Ok(())
}
