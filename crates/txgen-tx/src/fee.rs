//! Structural transaction size estimation.
//!
//! Fee quotes are keyed by transaction byte size, so the generator sizes a
//! provisional transaction before it knows how many inputs selection will
//! pick, then re-sizes once the input count is final.

/// Fixed encoding overhead: input count, output count, payload length,
/// lock height.
const TX_OVERHEAD: usize = 4 + 4 + 4 + 8;

/// A signed input: utxo hash + unlock length + 64-byte signature + age.
const INPUT_SIZE: usize = 32 + 4 + 64 + 4;

/// An output: amount + 32-byte address key.
const OUTPUT_SIZE: usize = 8 + 32;

/// Estimate the serialized byte size of a signed transaction with the given
/// structure. Matches `Transaction::num_bytes` for fully signed
/// transactions.
pub fn estimate_tx_size(num_inputs: usize, num_outputs: usize, payload_len: usize) -> usize {
    TX_OVERHEAD + num_inputs * INPUT_SIZE + num_outputs * OUTPUT_SIZE + payload_len
}
