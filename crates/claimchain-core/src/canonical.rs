//! Canonical CBOR encoding of the hashed block fields.
//!
//! The block hash covers `{height, time, previous_block_hash, body}`. Those
//! fields are written as a CBOR map following RFC 8949 Core Deterministic
//! Encoding:
//! - Map keys are small integers, emitted in ascending order
//! - Integers use the smallest valid encoding
//! - Definite lengths only
//!
//! The same block therefore produces identical bytes (and an identical hash)
//! on every platform.

use crate::types::BlockHash;

/// Field keys of the hashed map.
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIME: u64 = 1;
    pub const PREVIOUS_BLOCK_HASH: u64 = 2;
    pub const BODY: u64 = 3;
}

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_MAP: u8 = 5;
const SIMPLE_NULL: u8 = 0xf6;

/// Encode the hashed fields of a block to canonical CBOR bytes.
pub fn canonical_block_bytes(
    height: u64,
    time: i64,
    previous_block_hash: Option<&BlockHash>,
    body: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(body.len() + 64);

    encode_uint(&mut buf, MAJOR_MAP, 4);

    // 0: height
    encode_uint(&mut buf, MAJOR_UNSIGNED, keys::HEIGHT);
    encode_uint(&mut buf, MAJOR_UNSIGNED, height);

    // 1: time
    encode_uint(&mut buf, MAJOR_UNSIGNED, keys::TIME);
    encode_int(&mut buf, time);

    // 2: previous_block_hash (null or bytes)
    encode_uint(&mut buf, MAJOR_UNSIGNED, keys::PREVIOUS_BLOCK_HASH);
    match previous_block_hash {
        Some(hash) => encode_bytes(&mut buf, hash.as_bytes()),
        None => buf.push(SIMPLE_NULL),
    }

    // 3: body
    encode_uint(&mut buf, MAJOR_UNSIGNED, keys::BODY);
    encode_bytes(&mut buf, body);

    buf
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, MAJOR_UNSIGNED, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, MAJOR_NEGATIVE, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, MAJOR_BYTES, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}
