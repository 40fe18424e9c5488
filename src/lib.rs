//! # LZW-GC
//!
//! A streaming LZW variant whose dictionary never simply "fills up and
//! stops growing": once full, every new entry evicts an existing one
//! chosen by an approximate LFU policy built from per-entry reference
//! counters, so the dictionary keeps adapting on long streams whose
//! vocabulary drifts.
//!
//! The hard part this crate is built around is that the compressor and
//! decompressor must evolve *byte-identical* dictionaries while this
//! eviction is going on. [`dictionary::Dictionary`] is the piece both
//! sides share; [`Compressor`] and [`Decompressor`] each own one and
//! update it by the same rule, keyed only on the stream of tokens that
//! passes between them, never on the raw input bytes.
//!
//! ## Buffer example
//!
//! ```
//! use lzwgc::{Compressor, Decompressor};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let mut comp = Compressor::new(4095).unwrap();
//! let mut tokens: Vec<u32> = Vec::new();
//! for &b in data {
//!     if let Some(t) = comp.feed(b) {
//!         tokens.push(t);
//!     }
//! }
//! if let Some(t) = comp.finalize() {
//!     tokens.push(t);
//! }
//!
//! let mut decomp = Decompressor::new(4095).unwrap();
//! let mut out = Vec::new();
//! for t in tokens {
//!     out.extend_from_slice(decomp.feed(t).unwrap());
//! }
//! assert_eq!(out, data);
//! ```

pub mod codec;
pub mod compressor;
pub mod decompressor;
pub mod dictionary;
pub mod reverse_index;

pub use compressor::Compressor;
pub use decompressor::Decompressor;

/// A token: a non-negative integer standing for a byte string. Values
/// `0..256` are literal tokens (the byte of the same value); values
/// `256..S` are dictionary tokens (§3.1).
pub type Token = u32;

/// Errors this crate's codec pair and byte-stream wrapper can report.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Dictionary size given to `Compressor::new`/`Decompressor::new`
    /// was outside `256..=2^24` (§7 kind 1).
    #[error("dictionary size {0} out of range (256..=2^24)")]
    InvalidDictionarySize(u32),
    /// A decompressor was fed a token that is `>= S`, or that names a
    /// vacant slot (§7 kind 3). Fatal for the stream.
    #[error("invalid token {0}: out of range or names a vacant slot")]
    InvalidToken(Token),
    /// The byte-stream codec hit EOF partway through a token (§7 kind 4).
    #[error("truncated token at end of stream")]
    TruncatedToken,
    /// The configured bit width is outside the `9..=24` range the byte
    /// codec supports (§6.2).
    #[error("bit width {0} out of range (9..=24)")]
    InvalidBitWidth(u32),
    /// I/O failure in the byte-stream codec or CLI layer.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
