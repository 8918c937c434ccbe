//! Test-traffic orchestrators.
//!
//! [`RandomPaymentGenerator`] produces one synthetic payment between two
//! randomly chosen well-known wallets; [`CancellationBuilder`] supersedes a
//! still-pending transaction by re-spending its inputs. Both consult the
//! height gate before touching the chain.

pub mod canceller;
pub mod chain;
pub mod config;
pub mod error;
pub mod gate;
pub mod generator;

pub use canceller::{CancelReport, CancellationBuilder};
pub use chain::ChainSource;
pub use config::{EmptySourcePolicy, SenderConfig};
pub use error::SenderError;
pub use gate::GateStatus;
pub use generator::{RandomPaymentGenerator, SendReport};
