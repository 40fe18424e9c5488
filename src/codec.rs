//! Byte-oriented stream framing (§6.2), carried here the way
//! `retrocompressor::lzss_huff` and `retrocompressor::td0` wrap their
//! own cores: generic functions over `Read`/`Write` plus buffer
//! convenience wrappers.
//!
//! Tokens are **not** bit-packed: each is 2 big-endian bytes if the
//! configured bit width `B <= 16`, otherwise 3. No length prefix, no
//! magic bytes, no checksum; the stream simply ends at EOF (§6.2).

use std::io::{BufReader, BufWriter, Read, Write};

use crate::compressor::Compressor;
use crate::decompressor::Decompressor;
use crate::{Error, Token};

const MIN_BITS: u32 = 9;
const MAX_BITS: u32 = 24;

fn dict_size(bits: u32) -> Result<Token, Error> {
    if !(MIN_BITS..=MAX_BITS).contains(&bits) {
        return Err(Error::InvalidBitWidth(bits));
    }
    Ok((1u32 << bits) - 1)
}

fn token_width(bits: u32) -> usize {
    if bits <= 16 {
        2
    } else {
        3
    }
}

fn write_token<W: Write>(w: &mut W, tok: Token, bits: u32) -> Result<(), Error> {
    let bytes = tok.to_be_bytes(); // [b0,b1,b2,b3], MSB first
    let width = token_width(bits);
    w.write_all(&bytes[4 - width..])?;
    Ok(())
}

/// Read one token, or `Ok(None)` on a clean EOF at a token boundary.
fn read_token<R: Read>(r: &mut R, bits: u32) -> Result<Option<Token>, Error> {
    let width = token_width(bits);
    let mut buf = [0u8; 3];
    let mut got = 0;
    while got < width {
        match r.read(&mut buf[got..width]) {
            Ok(0) => {
                if got == 0 {
                    return Ok(None);
                }
                return Err(Error::TruncatedToken);
            }
            Ok(n) => got += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    let mut padded = [0u8; 4];
    padded[4 - width..].copy_from_slice(&buf[..width]);
    Ok(Some(u32::from_be_bytes(padded)))
}

/// Compress `input` to `output` using a dictionary of size `2^bits - 1`.
/// Returns `(bytes_read, bytes_written)`.
pub fn compress<R: Read, W: Write>(input: &mut R, output: &mut W, bits: u32) -> Result<(u64, u64), Error> {
    let size = dict_size(bits)?;
    let mut comp = Compressor::new(size)?;
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut in_count: u64 = 0;
    let mut out_count: u64 = 0;
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                in_count += 1;
                if let Some(t) = comp.feed(byte[0]) {
                    write_token(&mut writer, t, bits)?;
                    out_count += 1;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if let Some(t) = comp.finalize() {
        write_token(&mut writer, t, bits)?;
        out_count += 1;
    }
    writer.flush()?;
    Ok((in_count, out_count * token_width(bits) as u64))
}

/// Expand `input` to `output` using a dictionary of size `2^bits - 1`.
/// Returns `(bytes_read, bytes_written)`.
pub fn expand<R: Read, W: Write>(input: &mut R, output: &mut W, bits: u32) -> Result<(u64, u64), Error> {
    let size = dict_size(bits)?;
    let mut decomp = Decompressor::new(size)?;
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut in_count: u64 = 0;
    let mut out_count: u64 = 0;
    while let Some(t) = read_token(&mut reader, bits)? {
        in_count += token_width(bits) as u64;
        let bytes = decomp.feed(t)?;
        writer.write_all(bytes)?;
        out_count += bytes.len() as u64;
    }
    writer.flush()?;
    Ok((in_count, out_count))
}

/// Convenience wrapper: compress a slice into a fresh `Vec<u8>`.
pub fn compress_slice(data: &[u8], bits: u32) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    compress(&mut std::io::Cursor::new(data), &mut out, bits)?;
    Ok(out)
}

/// Convenience wrapper: expand a slice into a fresh `Vec<u8>`.
pub fn expand_slice(data: &[u8], bits: u32) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    expand(&mut std::io::Cursor::new(data), &mut out, bits)?;
    Ok(out)
}

/// Run a compressor and decompressor over the same input in lockstep,
/// logging the first point (if any) where their dictionaries diverge.
/// Returns the expanded output and the number of divergences observed.
///
/// Underlies the `debug` CLI mode (see `original_source/lzwgc_main.c`'s
/// `compare_dicts`).
fn observe_step<W: Write>(
    comp: &Compressor,
    decomp: &mut Decompressor,
    t: Token,
    writer: &mut W,
    token_count: &mut u64,
    divergences: &mut u64,
) -> Result<(), Error> {
    let bytes = decomp.feed(t)?;
    writer.write_all(bytes)?;
    if comp.dict() != decomp.dict() {
        *divergences += 1;
        log::error!("token {token_count} ({t:#x}): dictionaries diverged after this step");
    }
    *token_count += 1;
    Ok(())
}

pub fn debug_roundtrip<R: Read, W: Write>(input: &mut R, output: &mut W, bits: u32) -> Result<u64, Error> {
    let size = dict_size(bits)?;
    let mut comp = Compressor::new(size)?;
    let mut decomp = Decompressor::new(size)?;
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut divergences: u64 = 0;
    let mut token_count: u64 = 0;

    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => break,
            Ok(_) => {
                if let Some(t) = comp.feed(byte[0]) {
                    observe_step(&comp, &mut decomp, t, &mut writer, &mut token_count, &mut divergences)?;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if let Some(t) = comp.finalize() {
        observe_step(&comp, &mut decomp, t, &mut writer, &mut token_count, &mut divergences)?;
    }
    writer.flush()?;
    Ok(divergences)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_wire_format() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT";
        let compressed = compress_slice(data, 12).unwrap();
        let expanded = expand_slice(&compressed, 12).unwrap();
        assert_eq!(expanded, data);
    }

    #[test]
    fn single_byte_input_matches_a_fixed_wire_encoding() {
        // a lone 'A' (0x41) never matches in the reverse index, so it
        // comes out only via finalize, as the literal token 0x0041.
        let compressed = compress_slice(b"A", 9).unwrap();
        assert_eq!(compressed, hex::decode("0041").unwrap());
    }

    #[test]
    fn sixteen_plus_bits_use_three_byte_tokens() {
        assert_eq!(token_width(16), 2);
        assert_eq!(token_width(17), 3);
    }

    #[test]
    fn rejects_out_of_range_bit_width() {
        assert!(compress_slice(b"x", 8).is_err());
        assert!(compress_slice(b"x", 25).is_err());
    }

    #[test]
    fn truncated_token_is_reported() {
        let mut out = Vec::new();
        let err = expand(&mut std::io::Cursor::new([0x01u8].as_slice()), &mut out, 12).unwrap_err();
        assert!(matches!(err, Error::TruncatedToken));
    }

    #[test]
    fn debug_roundtrip_reports_no_divergence_on_a_healthy_stream() {
        let data = b"I am Sam. Sam I am. I do not like this Sam I am.\n";
        let mut out = Vec::new();
        let divergences = debug_roundtrip(&mut std::io::Cursor::new(data.as_slice()), &mut out, 12).unwrap();
        assert_eq!(divergences, 0);
        assert_eq!(out, data);
    }
}
