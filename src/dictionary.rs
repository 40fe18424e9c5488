//! The shared dictionary abstraction (§3.2, §3.3, §4.1).
//!
//! Both `Compressor` and `Decompressor` own one of these and evolve it by
//! calling [`Dictionary::update`] with tokens taken from the *update
//! stream*, the sequence of tokens the compressor emits. Keying the
//! update purely on that stream, rather than on which side is running,
//! is what keeps the two dictionaries in lockstep (see the design note
//! in the crate root docs).

use crate::{Error, Token};

/// Smallest legal dictionary size, `2^8`.
pub const MIN_SIZE: Token = 256;
/// Largest legal dictionary size, `2^24`.
pub const MAX_SIZE: Token = 1 << 24;

/// One dynamic dictionary slot.
///
/// A slot is *vacant* when `prev == token(index)`, the representational
/// convenience called out in §9. It must never be followed.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Slot {
    prev: Token,
    byte: u8,
    refs: u32,
}

/// Outcome of a [`Dictionary::update`] call that performed an eviction.
///
/// `None` is returned by `update` itself on the very first call (no
/// allocation happens then); this type only describes the allocation
/// that happens on every subsequent call.
pub struct Eviction {
    /// Dynamic slot index that was overwritten.
    pub victim: usize,
    /// The `(prev, byte)` pair the victim held before being overwritten,
    /// or `None` if the victim was vacant.
    pub evicted: Option<(Token, u8)>,
    /// The `(prev, byte)` pair now installed at `victim`.
    pub prev: Token,
    pub byte: u8,
}

/// The dictionary: a forest of `(prev, byte)` extensions rooted at
/// literal tokens, plus the allocator cursor and reference counters that
/// drive eviction.
#[derive(PartialEq)]
pub struct Dictionary {
    size: Token,
    slots: Vec<Slot>,
    alloc_idx: usize,
    hist_token: Token,
}

impl Dictionary {
    /// Create a dictionary of the given size. `size` must satisfy
    /// `256 <= size <= 2^24` (§3.1).
    pub fn new(size: Token) -> Result<Self, Error> {
        if size < MIN_SIZE || size > MAX_SIZE {
            return Err(Error::InvalidDictionarySize(size));
        }
        let dyn_len = (size - MIN_SIZE) as usize;
        let mut slots = Vec::with_capacity(dyn_len);
        for i in 0..dyn_len {
            // vacant: prev == token(i)
            slots.push(Slot { prev: Self::token_of(i), byte: 0, refs: 0 });
        }
        Ok(Self {
            size,
            slots,
            // first real allocation lands at dynamic slot 0 (§9, open question)
            alloc_idx: dyn_len.wrapping_sub(1),
            hist_token: size,
        })
    }

    /// The configured dictionary size `S`. Also the sentinel value
    /// meaning "invalid / no token".
    pub fn size(&self) -> Token {
        self.size
    }

    pub(crate) fn dyn_len(&self) -> usize {
        self.slots.len()
    }

    fn index(&self, token: Token) -> usize {
        (token - MIN_SIZE) as usize
    }

    pub(crate) fn token_of(index: usize) -> Token {
        MIN_SIZE + index as Token
    }

    pub(crate) fn is_well_formed(&self, index: usize) -> bool {
        self.slots[index].prev != Self::token_of(index)
    }

    /// Is `t` a valid token against this dictionary (§3.2)? Literal
    /// tokens are always valid; dictionary tokens are valid iff their
    /// slot is well-formed (not vacant).
    pub fn is_valid_token(&self, t: Token) -> bool {
        t < self.size && (t < MIN_SIZE || self.is_well_formed(self.index(t)))
    }

    fn slot(&self, index: usize) -> (Token, u8) {
        (self.slots[index].prev, self.slots[index].byte)
    }

    /// The `(prev, byte)` pair for a dictionary token. Caller must have
    /// already validated that `t` is a well-formed dictionary token.
    pub(crate) fn slot_for_token(&self, t: Token) -> (Token, u8) {
        self.slot(self.index(t))
    }

    /// Every well-formed slot as `(token, prev, byte)`, used to rebuild
    /// the reverse index from scratch (§4.3 step 3).
    pub(crate) fn well_formed_entries(&self) -> impl Iterator<Item = (Token, Token, u8)> + '_ {
        (0..self.dyn_len()).filter_map(move |i| {
            if self.is_well_formed(i) {
                let (prev, byte) = self.slot(i);
                Some((Self::token_of(i), prev, byte))
            } else {
                None
            }
        })
    }

    /// Walk `t`'s expansion, pushing bytes into `scratch` from the last
    /// character to the first (§4.4 step 2). Returns the number of bytes
    /// pushed. Caller must have already validated `t`.
    pub fn expand_into(&self, mut t: Token, scratch: &mut Vec<u8>) -> usize {
        let start = scratch.len();
        loop {
            if t < MIN_SIZE {
                scratch.push(t as u8);
                break;
            }
            let idx = self.index(t);
            scratch.push(self.slots[idx].byte);
            t = self.slots[idx].prev;
        }
        scratch.len() - start
    }

    /// Walk `t`'s expansion bumping `refs` on every dictionary token
    /// visited, and return the first character of the expansion (§4.1
    /// step 1).
    fn bump_refs_and_first_byte(&mut self, mut t: Token) -> u8 {
        loop {
            if t < MIN_SIZE {
                return t as u8;
            }
            let idx = self.index(t);
            self.slots[idx].refs += 1;
            t = self.slots[idx].prev;
        }
    }

    /// Cyclic LFU-with-aging scan (§4.1 step 2): starting just past the
    /// last allocation, halve any nonzero counter found and keep going;
    /// the first zero counter is the victim.
    fn pick_victim(&mut self) -> usize {
        let dyn_len = self.dyn_len();
        let mut ii = self.alloc_idx;
        loop {
            ii = (ii + 1) % dyn_len;
            if self.slots[ii].refs == 0 {
                return ii;
            }
            self.slots[ii].refs /= 2;
        }
    }

    /// Apply the shared dictionary update rule (§4.1) for one token `t`
    /// observed on the update stream. Returns `None` on the very first
    /// call (no allocation); `Some(Eviction)` on every call after.
    pub fn update(&mut self, t: Token) -> Option<Eviction> {
        if self.hist_token == self.size {
            self.hist_token = t;
            return None;
        }
        if self.dyn_len() == 0 {
            // no dynamic slots to allocate (S == 256); just track hist_token.
            self.hist_token = t;
            return None;
        }
        let byte = self.bump_refs_and_first_byte(t);
        let victim = self.pick_victim();
        let evicted = if self.is_well_formed(victim) {
            Some(self.slot(victim))
        } else {
            None
        };
        let prev = self.hist_token;
        self.slots[victim].prev = prev;
        self.slots[victim].byte = byte;
        // refs is already 0 for the victim; leave it as-is.
        self.alloc_idx = victim;
        self.hist_token = t;
        log::trace!("evict slot {victim} -> prev={prev} byte={byte:#04x}");
        Some(Eviction { victim, evicted, prev, byte })
    }
}
