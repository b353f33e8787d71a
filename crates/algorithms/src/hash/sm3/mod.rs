//! SM3 hash function implementation with enhanced memory safety
//!
//! This module implements the SM3 cryptographic hash function as specified
//! in GB/T 32905 with additional security measures for memory handling.
//! SM3 produces a 256-bit digest over 512-bit message blocks using a
//! 64-round compression function.

use crate::error::{validate, Result};
use crate::hash::{HashAlgorithm, HashFunction};
use crate::types::Digest;
use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use gmcrypt_common::security::{barrier, EphemeralSecret, ZeroizeGuard};
use gmcrypt_params::hash::{SM3_BLOCK_SIZE, SM3_OUTPUT_SIZE};

/// Round constant for rounds 0..16
const T0: u32 = 0x79CC4519;
/// Round constant for rounds 16..64
const T1: u32 = 0x7A879D8A;

/// Initialization vector from the standard
const IV: [u32; 8] = [
    0x7380166F, 0x4914B2B9, 0x172442D7, 0xDA8A0600, 0xA96F30BC, 0x163138AA, 0xE38DEE4D, 0xB0FB0E4E,
];

/// Permutation P0(X) = X ⊕ (X <<< 9) ⊕ (X <<< 17)
#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

/// Permutation P1(X) = X ⊕ (X <<< 15) ⊕ (X <<< 23)
#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// Boolean function FF: XOR below round 16, majority at and above
#[inline(always)]
fn ff(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

/// Boolean function GG: XOR below round 16, choice at and above
#[inline(always)]
fn gg(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | ((!x) & z)
    }
}

/// Marker type for the SM3 algorithm
pub enum Sm3Algorithm {}

impl HashAlgorithm for Sm3Algorithm {
    const OUTPUT_SIZE: usize = SM3_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SM3_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SM3";
}

/// SM3 hash function state with enhanced memory safety
#[derive(Clone, Zeroize)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sm3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Sm3 {
    fn new() -> Self {
        Sm3 {
            state: IV,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    /// Compression function: expand one 512-bit block and run 64 rounds
    fn compress(state: &mut [u32; 8], block: &[u8; SM3_BLOCK_SIZE]) -> Result<()> {
        // Message schedule W[0..68) and W'[0..64) in ephemeral storage
        let mut w = EphemeralSecret::new([0u32; 68]);
        let mut w_prime = EphemeralSecret::new([0u32; 64]);

        // Memory barrier before processing
        barrier::compiler_fence_seq_cst();

        for i in 0..16 {
            let start = i * 4;
            validate::max_length("SM3 block read", start + 4, SM3_BLOCK_SIZE)?;
            w[i] = BigEndian::read_u32(&block[start..]);
        }

        for i in 16..68 {
            w[i] = p1(w[i - 16] ^ w[i - 9] ^ w[i - 3].rotate_left(15))
                ^ w[i - 13].rotate_left(7)
                ^ w[i - 6];
        }

        for i in 0..64 {
            w_prime[i] = w[i] ^ w[i + 4];
        }

        // Working registers A..H behind a zeroizing guard
        let mut working_vars = [
            state[0], state[1], state[2], state[3], state[4], state[5], state[6], state[7],
        ];
        let mut guard = ZeroizeGuard::new(&mut working_vars);

        let mut a = guard[0];
        let mut b = guard[1];
        let mut c = guard[2];
        let mut d = guard[3];
        let mut e = guard[4];
        let mut f = guard[5];
        let mut g = guard[6];
        let mut h = guard[7];

        for j in 0..64 {
            let t_j = if j < 16 { T0 } else { T1 };
            let ss1 = a
                .rotate_left(12)
                .wrapping_add(e)
                .wrapping_add(t_j.rotate_left(j as u32))
                .rotate_left(7);
            let ss2 = ss1 ^ a.rotate_left(12);
            let tt1 = ff(a, b, c, j)
                .wrapping_add(d)
                .wrapping_add(ss2)
                .wrapping_add(w_prime[j]);
            let tt2 = gg(e, f, g, j)
                .wrapping_add(h)
                .wrapping_add(ss1)
                .wrapping_add(w[j]);

            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }

        // Write back the results
        guard[0] = a;
        guard[1] = b;
        guard[2] = c;
        guard[3] = d;
        guard[4] = e;
        guard[5] = f;
        guard[6] = g;
        guard[7] = h;

        // SM3 folds the round output into the state by XOR
        state[0] ^= guard[0];
        state[1] ^= guard[1];
        state[2] ^= guard[2];
        state[3] ^= guard[3];
        state[4] ^= guard[4];
        state[5] ^= guard[5];
        state[6] ^= guard[6];
        state[7] ^= guard[7];

        // Memory barrier after processing
        barrier::compiler_fence_seq_cst();

        Ok(())
    }

    fn update_internal(&mut self, mut input: &[u8]) -> Result<()> {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SM3_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SM3_BLOCK_SIZE {
                let mut block = [0u8; SM3_BLOCK_SIZE];
                block.copy_from_slice(&self.buffer);
                Self::compress(&mut self.state, &block)?;
                self.total_bytes += SM3_BLOCK_SIZE as u64;
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    fn finalize_internal(&mut self) -> Result<[u8; SM3_OUTPUT_SIZE]> {
        self.total_bytes += self.buffer_idx as u64;
        let bit_len = self.total_bytes * 8;

        let pad_buffer = EphemeralSecret::new([0u8; SM3_BLOCK_SIZE]);

        // padding: a single 1 bit, zeros to 448 mod 512, then the bit length
        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= 56 {
            for b in &mut self.buffer[self.buffer_idx + 1..] {
                *b = 0;
            }
            let mut block = [0u8; SM3_BLOCK_SIZE];
            block.copy_from_slice(&self.buffer);
            Self::compress(&mut self.state, &block)?;
            self.buffer = *pad_buffer;
        } else {
            for b in &mut self.buffer[self.buffer_idx + 1..56] {
                *b = 0;
            }
        }

        BigEndian::write_u64(&mut self.buffer[56..], bit_len);
        let mut block = [0u8; SM3_BLOCK_SIZE];
        block.copy_from_slice(&self.buffer);
        Self::compress(&mut self.state, &block)?;

        let mut out = [0u8; SM3_OUTPUT_SIZE];
        for (i, &word) in self.state.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        self.zeroize();
        Ok(out)
    }
}

impl HashFunction for Sm3 {
    type Algorithm = Sm3Algorithm;
    type Output = Digest<SM3_OUTPUT_SIZE>;

    fn new() -> Self {
        Sm3::new()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        let digest = self.finalize_internal()?;
        Ok(Digest::new(digest))
    }
}
