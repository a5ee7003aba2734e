//! Conversion between UUIDv7 and UUIDv4 facades
//!
//! The 74 random bits of a UUID (`rand_a` and `rand_b`) are never touched. They are hashed with
//! SipHash-2-4 under the secret key, and the low 48 bits of the digest are XORed into the
//! timestamp field. Since the hashed bits survive the conversion, the same mask is derived on the
//! way back, and XORing it again restores the original timestamp.

#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

use crate::{siphash, Key, Uuid};

const MASK_48: u64 = (1 << 48) - 1;

const VERSION_V4: u8 = 4;
const VERSION_V7: u8 = 7;

/// Selects whether the conversion functions check the version field of their input.
///
/// [`Validation::Skip`] is meant for call sites that have already validated their input. It never
/// changes the result for valid input, but input of a wrong version is converted silently into a
/// well-formed yet meaningless UUID instead of being rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Validation {
    /// Rejects input with [`InvalidVersion`] if its version field is not the expected one.
    #[default]
    Check,
    /// Converts input regardless of its version field.
    Skip,
}

/// Builds the 10-byte SipHash message from the bits that the conversion leaves untouched.
///
/// The message consists of the low nibble of byte 6, byte 7, the low six bits of byte 8, and
/// bytes 9 to 15, and is thus identical for a UUIDv7 and its facade.
pub const fn mask_input(uuid: &Uuid) -> [u8; 10] {
    let b = uuid.as_bytes();
    [
        b[6] & 0x0f,
        b[7],
        b[8] & 0x3f,
        b[9],
        b[10],
        b[11],
        b[12],
        b[13],
        b[14],
        b[15],
    ]
}

/// Converts a UUIDv7 into its UUIDv4 facade under `key`.
///
/// # Errors
///
/// Returns [`InvalidVersion`] if the version field of `uuid` is not `7`.
///
/// # Examples
///
/// ```rust
/// use uuid47::{facade, Key, Uuid};
///
/// let key = Key::new(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
/// let v7 = "018f4e7c-3c4a-7000-8000-123456789abc".parse::<Uuid>()?;
///
/// let v4 = facade::encode(v7, &key)?;
/// assert_eq!(v4.version(), Some(4));
/// assert_eq!(facade::decode(v4, &key)?, v7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode(uuid: Uuid, key: &Key) -> Result<Uuid, InvalidVersion> {
    encode_with(uuid, key, Validation::Check)
}

/// Recovers the UUIDv7 behind a UUIDv4 facade under `key`.
///
/// A key other than the one used to create the facade cannot be detected; the result is then a
/// well-formed UUIDv7 with a wrong timestamp.
///
/// # Errors
///
/// Returns [`InvalidVersion`] if the version field of `uuid` is not `4`.
pub fn decode(uuid: Uuid, key: &Key) -> Result<Uuid, InvalidVersion> {
    decode_with(uuid, key, Validation::Check)
}

/// Converts a UUIDv7 into its UUIDv4 facade, checking the version field only if `validation`
/// says so.
///
/// # Errors
///
/// Returns [`InvalidVersion`] if `validation` is [`Validation::Check`] and the version field of
/// `uuid` is not `7`.
pub fn encode_with(
    uuid: Uuid,
    key: &Key,
    validation: Validation,
) -> Result<Uuid, InvalidVersion> {
    check_version(&uuid, VERSION_V7, validation)?;
    Ok(transform(uuid, key, VERSION_V4))
}

/// Recovers the UUIDv7 behind a UUIDv4 facade, checking the version field only if `validation`
/// says so.
///
/// # Errors
///
/// Returns [`InvalidVersion`] if `validation` is [`Validation::Check`] and the version field of
/// `uuid` is not `4`.
pub fn decode_with(
    uuid: Uuid,
    key: &Key,
    validation: Validation,
) -> Result<Uuid, InvalidVersion> {
    check_version(&uuid, VERSION_V4, validation)?;
    Ok(transform(uuid, key, VERSION_V7))
}

/// Converts a UUIDv7 into its UUIDv4 facade without checking the version field.
///
/// Equivalent to [`encode_with()`] with [`Validation::Skip`].
pub fn encode_unchecked(uuid: Uuid, key: &Key) -> Uuid {
    transform(uuid, key, VERSION_V4)
}

/// Recovers the UUIDv7 behind a UUIDv4 facade without checking the version field.
///
/// Equivalent to [`decode_with()`] with [`Validation::Skip`].
pub fn decode_unchecked(uuid: Uuid, key: &Key) -> Uuid {
    transform(uuid, key, VERSION_V7)
}

/// Returns an iterator that lazily converts each UUIDv7 of `uuids` into its facade.
///
/// # Examples
///
/// ```rust
/// use uuid47::{facade, Key, Uuid, Validation};
///
/// let key = Key::new(1, 2);
/// let v7s = [
///     Uuid::from_fields_v7(0x0190_0000_0000, 0x123, 0x0456),
///     Uuid::from_fields_v7(0x0190_0000_0001, 0x789, 0x0abc),
/// ];
///
/// for (v7, v4) in v7s.iter().zip(facade::encode_iter(v7s, &key, Validation::Check)) {
///     assert_eq!(facade::decode(v4?, &key)?, *v7);
/// }
/// # Ok::<(), uuid47::InvalidVersion>(())
/// ```
pub fn encode_iter<'a, I>(
    uuids: I,
    key: &'a Key,
    validation: Validation,
) -> impl Iterator<Item = Result<Uuid, InvalidVersion>> + 'a
where
    I: IntoIterator<Item = Uuid>,
    I::IntoIter: 'a,
{
    uuids
        .into_iter()
        .map(move |e| encode_with(e, key, validation))
}

/// Returns an iterator that lazily recovers the UUIDv7 behind each facade of `uuids`.
pub fn decode_iter<'a, I>(
    uuids: I,
    key: &'a Key,
    validation: Validation,
) -> impl Iterator<Item = Result<Uuid, InvalidVersion>> + 'a
where
    I: IntoIterator<Item = Uuid>,
    I::IntoIter: 'a,
{
    uuids
        .into_iter()
        .map(move |e| decode_with(e, key, validation))
}

/// Converts every UUIDv7 of `uuids` into its facade, preserving the order.
///
/// # Errors
///
/// Stops at and returns the error of the first UUID that fails the version check.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn encode_all<I>(
    uuids: I,
    key: &Key,
    validation: Validation,
) -> Result<Vec<Uuid>, InvalidVersion>
where
    I: IntoIterator<Item = Uuid>,
{
    uuids
        .into_iter()
        .map(|e| encode_with(e, key, validation))
        .collect()
}

/// Recovers the UUIDv7 behind every facade of `uuids`, preserving the order.
///
/// # Errors
///
/// Stops at and returns the error of the first UUID that fails the version check.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub fn decode_all<I>(
    uuids: I,
    key: &Key,
    validation: Validation,
) -> Result<Vec<Uuid>, InvalidVersion>
where
    I: IntoIterator<Item = Uuid>,
{
    uuids
        .into_iter()
        .map(|e| decode_with(e, key, validation))
        .collect()
}

impl Uuid {
    /// Converts `self` as a UUIDv7 into its UUIDv4 facade under `key`.
    ///
    /// See [`facade::encode()`](encode).
    pub fn encode_v4facade(&self, key: &Key) -> Result<Self, InvalidVersion> {
        encode(*self, key)
    }

    /// Recovers the UUIDv7 behind `self` as a UUIDv4 facade under `key`.
    ///
    /// See [`facade::decode()`](decode).
    pub fn decode_v4facade(&self, key: &Key) -> Result<Self, InvalidVersion> {
        decode(*self, key)
    }
}

fn check_version(
    uuid: &Uuid,
    expected: u8,
    validation: Validation,
) -> Result<(), InvalidVersion> {
    let found = uuid.version_field();
    match validation {
        Validation::Check if found != expected => Err(InvalidVersion { expected, found }),
        _ => Ok(()),
    }
}

/// XORs the keyed mask into the timestamp field and rewrites the version and variant fields.
///
/// The operation is an involution on the timestamp field, so the same routine serves both
/// directions.
fn transform(uuid: Uuid, key: &Key, version: u8) -> Uuid {
    let mask = siphash::hash_10(key, &mask_input(&uuid)) & MASK_48;
    let timestamp = uuid.timestamp_field() ^ mask;

    let mut bytes = <[u8; 16]>::from(uuid);
    bytes[..6].copy_from_slice(&timestamp.to_be_bytes()[2..]);
    bytes[6] = (version << 4) | (bytes[6] & 0x0f);
    bytes[8] = 0x80 | (bytes[8] & 0x3f);
    Uuid::from(bytes)
}

/// Error converting a UUID whose version field is not the one the conversion expects.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct InvalidVersion {
    expected: u8,
    found: u8,
}

impl InvalidVersion {
    /// Returns the version field value of the rejected UUID.
    pub const fn found(&self) -> u8 {
        self.found
    }

    /// Returns the version field value the conversion requires.
    pub const fn expected(&self) -> u8 {
        self.expected
    }
}

impl fmt::Display for InvalidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid UUID version: expected {}, found {}",
            self.expected, self.found
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for InvalidVersion {}
