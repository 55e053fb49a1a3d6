//! Small helpers shared across modules.
//!
//! ## Hex Quantities (`hex`)
//! - `0x`-prefixed quantity parsing into `u64` and `U256`
//! - Fixed-size byte array decoding for addresses and hashes
//! - Integer lossless: nothing passes through floating point

pub mod hex;
