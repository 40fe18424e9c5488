//! The compressor (§4.2).
//!
//! Consumes bytes one at a time, owns a "current longest match" token,
//! and emits at most one token per byte fed in. On a dictionary miss it
//! performs the shared dictionary update (§4.1) and the matching
//! reverse-index maintenance (§4.3). On a hit it only advances its
//! match; no dictionary mutation happens until the match breaks.

use crate::dictionary::Dictionary;
use crate::reverse_index::ReverseIndex;
use crate::Error;
use crate::Token;

/// Streaming LZW-GC encoder.
pub struct Compressor {
    dict: Dictionary,
    index: ReverseIndex,
    /// The longest match found so far against the current input run;
    /// the dictionary's own sentinel (`size`) before the first byte.
    matched_token: Token,
}

impl Compressor {
    /// Create a compressor with dictionary size `size` (`256..=2^24`).
    pub fn new(size: Token) -> Result<Self, Error> {
        let dict = Dictionary::new(size)?;
        let index = ReverseIndex::new(size);
        let matched_token = dict.size();
        Ok(Self { dict, index, matched_token })
    }

    /// Feed one byte, returning the token to emit, if any.
    ///
    /// At most one token comes out per call; exactly one comes out per
    /// byte that breaks a match (§4.2's output cardinality lemma).
    pub fn feed(&mut self, byte: u8) -> Option<Token> {
        let s = self.matched_token;
        if let Some(t) = self.index.find_live(&self.dict, s, byte) {
            self.matched_token = t;
            return None;
        }

        let have_output = s < self.dict.size();
        let token_output = s;
        self.matched_token = byte as Token;

        if have_output {
            if let Some(eviction) = self.dict.update(token_output) {
                self.index.apply_eviction(&self.dict, &eviction);
            }
            Some(token_output)
        } else {
            None
        }
    }

    /// Flush the trailing match, if any. The returned token, if present,
    /// is never itself added to the dictionary (§9); a decoder must
    /// tolerate that.
    pub fn finalize(&mut self) -> Option<Token> {
        if self.matched_token < self.dict.size() {
            Some(self.matched_token)
        } else {
            None
        }
    }

    /// Exposed for the `debug` lockstep checker only.
    pub(crate) fn dict(&self) -> &Dictionary {
        &self.dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compress_all(data: &[u8], size: Token) -> Vec<Token> {
        let mut comp = Compressor::new(size).unwrap();
        let mut tokens = Vec::new();
        for &b in data {
            if let Some(t) = comp.feed(b) {
                tokens.push(t);
            }
        }
        if let Some(t) = comp.finalize() {
            tokens.push(t);
        }
        tokens
    }

    #[test]
    fn empty_input_emits_nothing() {
        assert_eq!(compress_all(b"", 4095), Vec::<Token>::new());
    }

    #[test]
    fn single_byte_emits_its_own_literal() {
        assert_eq!(compress_all(b"Q", 4095), vec![b'Q' as Token]);
    }

    #[test]
    fn no_growth_dictionary_is_pure_literals() {
        // S = 256: no dynamic slots at all, every byte is its own token.
        let tokens = compress_all(b"ABC", 256);
        assert_eq!(tokens, vec![b'A' as Token, b'B' as Token, b'C' as Token]);
    }

    #[test]
    fn repeats_build_longer_matches() {
        // "AAAA" at a generous size: A, A(lit again since miss first time),
        // then a dictionary entry should let later A's compress into runs.
        let tokens = compress_all(b"AAAAAAAA", 4095);
        assert!(tokens.len() < 8, "repeated input should compress: {tokens:?}");
        assert!(tokens.len() >= 1);
    }

    #[test]
    fn output_never_exceeds_bytes_fed_plus_one() {
        let data = b"the quick brown fox jumps over the lazy dog, the quick brown fox again";
        let tokens = compress_all(data, 512);
        assert!(tokens.len() <= data.len() + 1);
    }
}
