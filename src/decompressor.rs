//! The decompressor (§4.4).
//!
//! Consumes tokens one at a time and emits the byte run each one
//! expands to. Every token is validated before use (§7 kind 3); this is
//! the one place in the codec pair that has to distrust its input. A
//! malformed or adversarial token stream is rejected without producing
//! output, and the decompressor is not usable afterward (§7).

use crate::dictionary::Dictionary;
use crate::Error;
use crate::Token;

/// Streaming LZW-GC decoder.
pub struct Decompressor {
    dict: Dictionary,
    /// Reversed expansion of the token currently being decoded.
    scratch: Vec<u8>,
    /// The byte run produced by the most recent `feed`, in forward order.
    output: Vec<u8>,
}

impl Decompressor {
    /// Create a decompressor with dictionary size `size` (`256..=2^24`).
    /// Must match the `size` the encoder used (§6.1).
    pub fn new(size: Token) -> Result<Self, Error> {
        let dict = Dictionary::new(size)?;
        let cap = (size as usize).saturating_sub(255);
        Ok(Self {
            dict,
            scratch: Vec::with_capacity(cap),
            output: Vec::with_capacity(cap),
        })
    }

    /// Feed one token, returning the byte run it expands to.
    ///
    /// Returns [`Error::InvalidToken`] if `t >= size`, or if `t` names a
    /// slot that is currently vacant. Once this happens the stream is
    /// corrupt and this decompressor must be discarded (§7); no further
    /// calls are guaranteed to behave sensibly.
    pub fn feed(&mut self, t: Token) -> Result<&[u8], Error> {
        if !self.dict.is_valid_token(t) {
            log::error!("rejecting invalid token {t}");
            return Err(Error::InvalidToken(t));
        }

        self.scratch.clear();
        self.dict.expand_into(t, &mut self.scratch);

        self.output.clear();
        self.output.extend(self.scratch.iter().rev());

        // Shared update rule (§4.1); ignore the eviction record, the
        // decompressor has no reverse index to maintain.
        self.dict.update(t);

        Ok(&self.output)
    }

    /// No-op: resources are released by `Drop`. Present so call sites
    /// written against the init/feed/finalize lifecycle in §6.1 read the
    /// same on both sides of the codec pair.
    pub fn finalize(&mut self) {}

    /// Exposed for the `debug` lockstep checker only.
    pub(crate) fn dict(&self) -> &Dictionary {
        &self.dict
    }
}
