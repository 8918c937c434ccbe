//! Connectivity smoke test against a locally running query node.
//!
//! Run with: cargo test -p txgen-rpc --test live_node -- --ignored --nocapture

use txgen_rpc::{endpoints, ChainRpc};

#[tokio::test]
#[ignore]
async fn test_live_height_and_fees() {
    let chain = ChainRpc::new(endpoints::LOCAL_QUERY);

    let height = chain.get_height().await.expect("node unreachable");
    println!("height: {}", height);

    let quote = chain.get_fee_estimate(500).await.expect("no fee quote");
    println!("fees: low={} medium={} high={}", quote.low, quote.medium, quote.high);
    assert!(quote.low <= quote.medium && quote.medium <= quote.high);
}
