#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, ops, str};

/// Represents a Universally Unique IDentifier.
///
/// This type is a thin wrapper around the 16-byte big-endian binary representation and accepts
/// any bit pattern. The facade functions inspect the version field themselves.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Creates an object from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID byte array from UUIDv7 field values.
    ///
    /// # Panics
    ///
    /// Panics if any argument is out of the range of the respective field.
    pub const fn from_fields_v7(unix_ts_ms: u64, rand_a: u16, rand_b: u64) -> Self {
        if unix_ts_ms >= 1 << 48 || rand_a >= 1 << 12 || rand_b >= 1 << 62 {
            panic!("invalid field value");
        }

        Self([
            (unix_ts_ms >> 40) as u8,
            (unix_ts_ms >> 32) as u8,
            (unix_ts_ms >> 24) as u8,
            (unix_ts_ms >> 16) as u8,
            (unix_ts_ms >> 8) as u8,
            unix_ts_ms as u8,
            0x70 | (rand_a >> 8) as u8,
            rand_a as u8,
            0x80 | (rand_b >> 56) as u8,
            (rand_b >> 48) as u8,
            (rand_b >> 40) as u8,
            (rand_b >> 32) as u8,
            (rand_b >> 24) as u8,
            (rand_b >> 16) as u8,
            (rand_b >> 8) as u8,
            rand_b as u8,
        ])
    }

    /// Returns the leading 48 bits as a big-endian integer.
    ///
    /// This is the `unix_ts_ms` field of a UUIDv7 and the encrypted timestamp of a UUIDv4 facade.
    pub const fn timestamp_field(&self) -> u64 {
        let b = &self.0;
        (b[0] as u64) << 40
            | (b[1] as u64) << 32
            | (b[2] as u64) << 24
            | (b[3] as u64) << 16
            | (b[4] as u64) << 8
            | b[5] as u64
    }

    /// Returns the raw 4-bit version field regardless of the variant.
    pub const fn version_field(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::VarNil`] or [`Variant::VarMax`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => {
                if u128::from_be_bytes(self.0) == 0 {
                    Variant::VarNil
                } else {
                    Variant::Var0
                }
            }
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            0xe..=0xf => {
                if u128::from_be_bytes(self.0) == u128::MAX {
                    Variant::VarMax
                } else {
                    Variant::Var111
                }
            }
            _ => unreachable!(),
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.version_field()),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid47::Uuid;
    ///
    /// let x = "018f4e7c-3c4a-7000-8000-123456789abc".parse::<Uuid>()?;
    /// let y = x.hyphenated();
    /// assert_eq!(&y as &str, "018f4e7c-3c4a-7000-8000-123456789abc");
    /// assert_eq!(format!("{}", y), "018f4e7c-3c4a-7000-8000-123456789abc");
    /// # Ok::<(), uuid47::ParseError>(())
    /// ```
    pub fn hyphenated(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut r = 0;
        let mut w = 0;
        while r < 16 {
            let e = self.0[r] as usize;
            buffer[w] = DIGITS[e >> 4];
            buffer[w + 1] = DIGITS[e & 15];
            if r == 3 || r == 5 || r == 7 || r == 9 {
                buffer[w + 2] = b'-';
                w += 1;
            }
            r += 1;
            w += 2;
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

/// Concrete return type of [`Uuid::hyphenated()`] containing the stack-allocated 8-4-4-4-12
/// string representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        // SAFETY: the buffer holds hexadecimal digits and hyphens only
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Lookup table from ASCII bytes to hexadecimal digit values; `0xff` marks non-digits.
static HEX_VALUES: [u8; 256] = {
    let mut table = [0xff; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
};

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let src = src.as_bytes();
        if src.len() != 36 {
            return Err(ERR);
        }

        let mut dst = [0u8; 16];
        let mut pos = 0;
        for (i, e) in dst.iter_mut().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                if src[pos] != b'-' {
                    return Err(ERR);
                }
                pos += 1;
            }
            let hi = HEX_VALUES[src[pos] as usize];
            let lo = HEX_VALUES[src[pos + 1] as usize];
            if hi > 0xf || lo > 0xf {
                return Err(ERR);
            }
            *e = (hi << 4) | lo;
            pos += 2;
        }
        Ok(Self(dst))
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// The reserved UUID variants and the Nil and Max UUIDs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// The Nil UUID.
    VarNil,
    /// The variant field value of `0b0` (NCS compatibility).
    Var0,
    /// The variant field value of `0b10` (RFC 9562), used by UUIDv4 and UUIDv7.
    Var10,
    /// The variant field value of `0b110` (Microsoft compatibility).
    Var110,
    /// The variant field value of `0b111` (reserved for future definition).
    Var111,
    /// The Max UUID.
    VarMax,
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.hyphenated())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(feature = "std")]
#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u16, u64), &'static str)] {
        const MAX_UINT48: u64 = (1 << 48) - 1;
        const MAX_UINT12: u16 = (1 << 12) - 1;
        const MAX_UINT62: u64 = (1 << 62) - 1;

        &[
            ((0, 0, 0), "00000000-0000-7000-8000-000000000000"),
            ((MAX_UINT48, 0, 0), "ffffffff-ffff-7000-8000-000000000000"),
            ((0, MAX_UINT12, 0), "00000000-0000-7fff-8000-000000000000"),
            ((0, 0, MAX_UINT62), "00000000-0000-7000-bfff-ffffffffffff"),
            (
                (MAX_UINT48, MAX_UINT12, MAX_UINT62),
                "ffffffff-ffff-7fff-bfff-ffffffffffff",
            ),
            (
                (0x18f4e7c3c4a, 0x000, 0x0000_1234_5678_9abc),
                "018f4e7c-3c4a-7000-8000-123456789abc",
            ),
            (
                (0x17f22e279b0, 0xcc3, 0x18c4dc0c0c07398f),
                "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            ),
        ]
    }

    /// Formats and parses prepared cases correctly
    #[test]
    fn formats_and_parses_prepared_cases_correctly() {
        for (fs, text) in prepare_cases() {
            let from_fields = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(Ok(from_fields), text.parse());
            assert_eq!(Ok(from_fields), text.to_uppercase().parse());
            assert_eq!(&from_fields.hyphenated() as &str, *text);
            assert_eq!(from_fields.timestamp_field(), fs.0);
            assert_eq!(from_fields.version(), Some(7));
            assert_eq!(&from_fields.to_string(), text);
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(from_fields).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "+180a8f0-5b84-7438-ab50-f066aa10a367",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
            "0180a8f0-5b84-7438-ab50-f06d3ea2442é",
            "0180a8f0-5b84-7438-ab50-f06d3ea2442",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err(), "{e:?}");
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(&Uuid::NIL.hyphenated() as &str, "00000000-0000-0000-0000-000000000000");
        assert_eq!(&Uuid::MAX.hyphenated() as &str, "ffffffff-ffff-ffff-ffff-ffffffffffff");
        assert_eq!(Uuid::NIL.variant(), Variant::VarNil);
        assert_eq!(Uuid::MAX.variant(), Variant::VarMax);
        assert_eq!(Uuid::NIL.version(), None);
        assert_eq!(Uuid::MAX.version(), None);
    }

    /// Reports variant and version fields
    #[test]
    fn reports_variant_and_version_fields() {
        let cases = [
            ("00000000-0000-0000-0000-000000000001", Variant::Var0, None, 0),
            ("0186d1e6-52c1-4f51-8b52-57a08b9e8a1c", Variant::Var10, Some(4), 4),
            ("0186d1e6-52c1-7f51-bb52-57a08b9e8a1c", Variant::Var10, Some(7), 7),
            ("0186d1e6-52c1-7f51-4b52-57a08b9e8a1c", Variant::Var0, None, 7),
            ("0186d1e6-52c1-7f51-cb52-57a08b9e8a1c", Variant::Var110, None, 7),
            ("0186d1e6-52c1-4f51-eb52-57a08b9e8a1c", Variant::Var111, None, 4),
        ];

        for (text, variant, version, version_field) in cases {
            let e = text.parse::<Uuid>().unwrap();
            assert_eq!(e.variant(), variant, "{text}");
            assert_eq!(e.version(), version, "{text}");
            assert_eq!(e.version_field(), version_field, "{text}");
        }
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _) in prepare_cases() {
            let e = Uuid::from_fields_v7(fs.0, fs.1, fs.2);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from_bytes(*e.as_bytes()), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.hyphenated().parse(), Ok(e));
            assert_eq!(e.hyphenated().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
            #[cfg(feature = "uuid")]
            assert_eq!(uuid::Uuid::from(e).as_u128(), u128::from(e));
        }
    }
}
