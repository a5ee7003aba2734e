//! SipHash-2-4 keyed pseudorandom function
//!
//! This module carries its own implementation of SipHash-2-4 so that the mask derivation does not
//! depend on the unspecified hash algorithms of the standard library. Besides the general
//! [`hash()`] function and the streaming [`SipHasher24`], it offers [`hash_10()`], a fully
//! unrolled path for the fixed 10-byte messages the facade transform feeds to it.
//!
//! ```rust
//! use uuid47::{siphash, Key};
//!
//! let key = Key::new(0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908);
//! assert_eq!(siphash::hash(&key, b""), 0x726f_db47_dd0e_0e31);
//!
//! let message = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
//! assert_eq!(siphash::hash_10(&key, &message), siphash::hash(&key, &message));
//! ```

#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, hash::Hasher};

use crate::Key;

/// Internal state words `v0` through `v3`.
#[derive(Clone)]
struct State {
    v0: u64,
    v1: u64,
    v2: u64,
    v3: u64,
}

impl State {
    const fn new(key: &Key) -> Self {
        // "somepseudorandomlygeneratedbytes"
        Self {
            v0: key.k0() ^ 0x736f_6d65_7073_6575,
            v1: key.k1() ^ 0x646f_7261_6e64_6f6d,
            v2: key.k0() ^ 0x6c79_6765_6e65_7261,
            v3: key.k1() ^ 0x7465_6462_7974_6573,
        }
    }

    #[inline(always)]
    fn sip_round(&mut self) {
        self.v0 = self.v0.wrapping_add(self.v1);
        self.v2 = self.v2.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(13);
        self.v3 = self.v3.rotate_left(16);
        self.v1 ^= self.v0;
        self.v3 ^= self.v2;
        self.v0 = self.v0.rotate_left(32);
        self.v2 = self.v2.wrapping_add(self.v1);
        self.v0 = self.v0.wrapping_add(self.v3);
        self.v1 = self.v1.rotate_left(17);
        self.v3 = self.v3.rotate_left(21);
        self.v1 ^= self.v2;
        self.v3 ^= self.v0;
        self.v2 = self.v2.rotate_left(32);
    }

    /// Absorbs one 64-bit message word with two compression rounds.
    #[inline(always)]
    fn compress(&mut self, m: u64) {
        self.v3 ^= m;
        self.sip_round();
        self.sip_round();
        self.v0 ^= m;
    }

    /// Runs the four finalization rounds and folds the state into the digest.
    #[inline(always)]
    fn finalize(mut self) -> u64 {
        self.v2 ^= 0xff;
        self.sip_round();
        self.sip_round();
        self.sip_round();
        self.sip_round();
        self.v0 ^ self.v1 ^ self.v2 ^ self.v3
    }
}

/// Streaming SipHash-2-4 hasher.
///
/// Bytes can be fed in arbitrary pieces; the digest only depends on their concatenation. Unlike
/// the [`std::hash::Hash`] implementations of slices, [`write`](Self::write) never adds length
/// prefixes, so hashing a message in one or many calls gives the same result as [`hash()`].
///
/// # Examples
///
/// ```rust
/// use uuid47::{siphash::SipHasher24, Key};
///
/// let key = Key::new(0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908);
/// let mut hasher = SipHasher24::new(&key);
/// hasher.write(&[0, 1, 2]);
/// hasher.write(&[3, 4, 5, 6, 7, 8, 9]);
/// assert_eq!(hasher.finish(), 0x7a5d_bbc5_94dd_b9f3);
/// ```
#[derive(Clone)]
pub struct SipHasher24 {
    state: State,

    /// Pending bytes that do not yet form a full word, packed little-endian.
    tail: u64,
    ntail: usize,

    /// Total number of bytes written; only the low byte enters the digest.
    length: usize,
}

impl SipHasher24 {
    /// Creates a hasher keyed with `key`.
    pub const fn new(key: &Key) -> Self {
        Self {
            state: State::new(key),
            tail: 0,
            ntail: 0,
            length: 0,
        }
    }

    /// Appends `bytes` to the message.
    pub fn write(&mut self, bytes: &[u8]) {
        self.length = self.length.wrapping_add(bytes.len());

        let mut rest = bytes;
        if self.ntail != 0 {
            let needed = 8 - self.ntail;
            let fill = needed.min(rest.len());
            self.tail |= read_le(&rest[..fill]) << (8 * self.ntail);
            self.ntail += fill;
            rest = &rest[fill..];
            if self.ntail < 8 {
                return;
            }
            self.state.compress(self.tail);
            self.tail = 0;
            self.ntail = 0;
        }

        let mut chunks = rest.chunks_exact(8);
        for chunk in &mut chunks {
            self.state.compress(read_le(chunk));
        }

        let remainder = chunks.remainder();
        self.tail = read_le(remainder);
        self.ntail = remainder.len();
    }

    /// Returns the digest of the bytes written so far.
    ///
    /// The hasher itself is left untouched and can keep absorbing bytes.
    pub fn finish(&self) -> u64 {
        let mut state = self.state.clone();
        state.compress(((self.length as u64 & 0xff) << 56) | self.tail);
        state.finalize()
    }
}

impl fmt::Debug for SipHasher24 {
    /// Omits the internal state, which would reveal the key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SipHasher24")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl Hasher for SipHasher24 {
    fn write(&mut self, bytes: &[u8]) {
        SipHasher24::write(self, bytes);
    }

    fn finish(&self) -> u64 {
        SipHasher24::finish(self)
    }
}

/// Computes the SipHash-2-4 digest of `message` under `key`.
pub fn hash(key: &Key, message: &[u8]) -> u64 {
    let mut hasher = SipHasher24::new(key);
    hasher.write(message);
    hasher.finish()
}

/// Computes the SipHash-2-4 digest of a 10-byte `message` under `key`.
///
/// This is the shape of every mask input built by the facade transform: one full word followed
/// by a final word holding the two trailing bytes and the length `10` in its top byte. The result
/// is identical to that of [`hash()`].
#[inline]
pub fn hash_10(key: &Key, message: &[u8; 10]) -> u64 {
    let m0 = u64::from_le_bytes([
        message[0], message[1], message[2], message[3], message[4], message[5], message[6],
        message[7],
    ]);
    let m1 = (10u64 << 56) | (message[9] as u64) << 8 | message[8] as u64;

    let mut state = State::new(key);
    state.compress(m0);
    state.compress(m1);
    state.finalize()
}

/// Packs up to eight bytes into a little-endian word.
#[inline(always)]
fn read_le(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    bytes
        .iter()
        .rev()
        .fold(0, |acc, &e| (acc << 8) | e as u64)
}

#[cfg(feature = "std")]
#[cfg(test)]
mod tests {
    use super::{hash, hash_10, SipHasher24};
    use crate::Key;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Returns the key `00 01 02 .. 0f` used by the reference test vectors.
    fn reference_key() -> Key {
        Key::new(0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908)
    }

    /// Reference digests for messages `00 01 .. (n - 1)`, serialized as little-endian bytes.
    const VECTORS: [[u8; 8]; 16] = [
        [0x31, 0x0e, 0x0e, 0xdd, 0x47, 0xdb, 0x6f, 0x72],
        [0xfd, 0x67, 0xdc, 0x93, 0xc5, 0x39, 0xf8, 0x74],
        [0x5a, 0x4f, 0xa9, 0xd9, 0x09, 0x80, 0x6c, 0x0d],
        [0x2d, 0x7e, 0xfb, 0xd7, 0x96, 0x66, 0x67, 0x85],
        [0xb7, 0x87, 0x71, 0x27, 0xe0, 0x94, 0x27, 0xcf],
        [0x8d, 0xa6, 0x99, 0xcd, 0x64, 0x55, 0x76, 0x18],
        [0xce, 0xe3, 0xfe, 0x58, 0x6e, 0x46, 0xc9, 0xcb],
        [0x37, 0xd1, 0x01, 0x8b, 0xf5, 0x00, 0x02, 0xab],
        [0x62, 0x24, 0x93, 0x9a, 0x79, 0xf5, 0xf5, 0x93],
        [0xb0, 0xe4, 0xa9, 0x0b, 0xdf, 0x82, 0x00, 0x9e],
        [0xf3, 0xb9, 0xdd, 0x94, 0xc5, 0xbb, 0x5d, 0x7a],
        [0xa7, 0xad, 0x6b, 0x22, 0x46, 0x2f, 0xb3, 0xf4],
        [0xfb, 0xe5, 0x0e, 0x86, 0xbc, 0x8f, 0x1e, 0x75],
        [0x90, 0x3d, 0x84, 0xc0, 0x27, 0x56, 0xea, 0x14],
        [0xee, 0xf2, 0x7a, 0x8e, 0x90, 0xca, 0x23, 0xf7],
        [0xe5, 0x45, 0xbe, 0x49, 0x61, 0xca, 0x29, 0xa1],
    ];

    /// Reproduces reference test vectors
    #[test]
    fn reproduces_reference_test_vectors() {
        let key = reference_key();
        let message: Vec<u8> = (0..VECTORS.len() as u8).collect();
        for (n, expected) in VECTORS.iter().enumerate() {
            assert_eq!(
                hash(&key, &message[..n]),
                u64::from_le_bytes(*expected),
                "message length {n}"
            );
        }
    }

    /// Produces identical digests through the 10-byte fast path
    #[test]
    fn produces_identical_digests_through_the_10_byte_fast_path() {
        let key = reference_key();
        let message = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        assert_eq!(hash_10(&key, &message), u64::from_le_bytes(VECTORS[10]));

        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_0010);
        for _ in 0..10_000 {
            let key = Key::new(rng.gen(), rng.gen());
            let message: [u8; 10] = rng.gen();
            assert_eq!(hash_10(&key, &message), hash(&key, &message));
        }

        for e in [[0x00; 10], [0xff; 10]] {
            assert_eq!(hash_10(&key, &e), hash(&key, &e));
        }
    }

    /// Gives the same digest regardless of how the message is split
    #[test]
    fn gives_the_same_digest_regardless_of_how_the_message_is_split() {
        let key = reference_key();
        let message: Vec<u8> = (0..64).collect();
        for len in 0..message.len() {
            let expected = hash(&key, &message[..len]);
            for split in 0..=len {
                let mut hasher = SipHasher24::new(&key);
                hasher.write(&message[..split]);
                hasher.write(&[]);
                hasher.write(&message[split..len]);
                assert_eq!(hasher.finish(), expected, "len {len}, split {split}");
            }

            let mut hasher = SipHasher24::new(&key);
            for e in &message[..len] {
                hasher.write(std::slice::from_ref(e));
            }
            assert_eq!(hasher.finish(), expected, "len {len}, bytewise");
        }
    }

    /// Agrees with the SipHash-2-4 implementation of the standard library
    #[test]
    #[allow(deprecated)]
    fn agrees_with_the_siphash_2_4_implementation_of_the_standard_library() {
        use std::hash::{Hasher, SipHasher};

        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_0024);
        for len in 0..300 {
            let (k0, k1) = (rng.gen(), rng.gen());
            let message: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

            let mut reference = SipHasher::new_with_keys(k0, k1);
            reference.write(&message);
            assert_eq!(hash(&Key::new(k0, k1), &message), reference.finish());
        }
    }

    /// Leaves hasher usable after finish
    #[test]
    fn leaves_hasher_usable_after_finish() {
        let key = reference_key();
        let mut hasher = SipHasher24::new(&key);
        hasher.write(&[0, 1, 2, 3]);
        assert_eq!(hasher.finish(), u64::from_le_bytes(VECTORS[4]));
        assert_eq!(hasher.finish(), u64::from_le_bytes(VECTORS[4]));
        hasher.write(&[4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(hasher.finish(), u64::from_le_bytes(VECTORS[13]));
    }
}
