#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

/// Represents the 128-bit secret key shared by the parties that convert between UUIDv7 values
/// and their UUIDv4 facades.
///
/// The key consists of the two 64-bit SipHash key words `k0` and `k1`. Its 16-byte form holds `k0`
/// in the first eight bytes and `k1` in the last eight, both little-endian.
///
/// The type implements [`Clone`] but not [`Copy`] so that copies of key material are always
/// explicit, and its [`Debug`](fmt::Debug) output omits the key words.
///
/// # Examples
///
/// ```rust
/// use uuid47::Key;
///
/// let key = Key::new(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
/// let bytes = key.to_bytes();
/// assert_eq!(bytes[0], 0xef);
/// assert_eq!(bytes[8], 0x10);
/// assert_eq!(Key::from_bytes(bytes), key);
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Key {
    k0: u64,
    k1: u64,
}

impl Key {
    /// Creates a key from the two SipHash key words.
    pub const fn new(k0: u64, k1: u64) -> Self {
        Self { k0, k1 }
    }

    /// Creates a key from its 16-byte representation.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        let [b0, b1, b2, b3, b4, b5, b6, b7, b8, b9, b10, b11, b12, b13, b14, b15] = bytes;
        Self {
            k0: u64::from_le_bytes([b0, b1, b2, b3, b4, b5, b6, b7]),
            k1: u64::from_le_bytes([b8, b9, b10, b11, b12, b13, b14, b15]),
        }
    }

    /// Returns the 16-byte representation of the key.
    pub const fn to_bytes(&self) -> [u8; 16] {
        let [b0, b1, b2, b3, b4, b5, b6, b7] = self.k0.to_le_bytes();
        let [b8, b9, b10, b11, b12, b13, b14, b15] = self.k1.to_le_bytes();
        [
            b0, b1, b2, b3, b4, b5, b6, b7, b8, b9, b10, b11, b12, b13, b14, b15,
        ]
    }

    /// Returns the first key word.
    pub const fn k0(&self) -> u64 {
        self.k0
    }

    /// Returns the second key word.
    pub const fn k1(&self) -> u64 {
        self.k1
    }

    /// Creates a key from a cryptographically secure random number generator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid47::Key;
    ///
    /// let key = Key::generate(&mut rand::rngs::OsRng);
    /// assert_ne!(key, Key::generate(&mut rand::rngs::OsRng));
    /// ```
    #[cfg(feature = "rand")]
    #[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
    pub fn generate<R: rand::RngCore + rand::CryptoRng>(rng: &mut R) -> Self {
        Self::new(rng.next_u64(), rng.next_u64())
    }

    /// Creates a key from the thread-local random number generator of the `rand` crate.
    #[cfg(all(feature = "std", feature = "rand"))]
    #[cfg_attr(docsrs, doc(cfg(all(feature = "std", feature = "rand"))))]
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key { .. }")
    }
}

impl From<[u8; 16]> for Key {
    fn from(src: [u8; 16]) -> Self {
        Self::from_bytes(src)
    }
}

impl From<Key> for [u8; 16] {
    fn from(src: Key) -> Self {
        src.to_bytes()
    }
}

impl From<(u64, u64)> for Key {
    fn from((k0, k1): (u64, u64)) -> Self {
        Self::new(k0, k1)
    }
}
