//! Keyed, reversible masking of UUIDv7 timestamps behind UUIDv4-looking facades
//!
//! UUIDv7 values sort by creation time, which makes them good database keys but also reveals
//! when each record was created. This crate converts a UUIDv7 into a UUIDv4 "facade" that looks
//! random to anyone without the secret key, and converts the facade back to the original UUIDv7
//! for anyone with it. No lookup table or extra state is needed.
//!
//! ```rust
//! use uuid47::{Key, Uuid};
//!
//! let key = Key::new(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
//! let v7: Uuid = "018f4e7c-3c4a-7000-8000-123456789abc".parse()?;
//!
//! let v4 = uuid47::encode(v7, &key)?;
//! println!("{}", v4); // "87134571-49d8-4000-8000-123456789abc"
//! assert_eq!(uuid47::decode(v4, &key)?, v7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Field and bit layout
//!
//! A UUIDv7 and its facade share the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                   unix_ts_ms (v7) / masked (v4)               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  unix_ts_ms (v7) / masked (v4)|  ver  |        rand_a         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                        rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            rand_b                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit timestamp field holds `unix_ts_ms` in a UUIDv7 and `unix_ts_ms` XORed with a
//!   48-bit mask in the facade.
//! - The 4-bit `ver` field is `0111` in a UUIDv7 and `0100` in the facade.
//! - The 2-bit `var` field is set at `10` in both.
//! - The 12-bit `rand_a` and 62-bit `rand_b` fields are copied unchanged.
//!
//! The mask is the low 48 bits of the SipHash-2-4 digest of the `rand_a` and `rand_b` bits under
//! the 128-bit [`Key`]. Because these bits are the same on both sides, the mask can be recomputed
//! from the facade, and the conversion is its own inverse on the timestamp field. Decoding with a
//! wrong key cannot be detected and yields a well-formed UUIDv7 with a garbled timestamp.
//!
//! # Crate features
//!
//! - `std` (default): `String` conversions, [`std::error::Error`] impls, and the `Vec`-returning
//!   [`encode_all()`] and [`decode_all()`]. Without it the crate is `no_std`.
//! - `rand` (default): [`Key::generate()`], plus [`Key::random()`] together with `std`.
//! - `serde`: serialization of [`Uuid`] as a string or as 16 bytes.
//! - `uuid`: conversions between [`Uuid`] and `uuid::Uuid`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{ParseError, Uuid, Variant};

mod key;
pub use key::Key;

pub mod facade;
#[doc(no_inline)]
pub use facade::{
    decode, decode_unchecked, decode_with, encode, encode_unchecked, encode_with, InvalidVersion,
    Validation,
};

#[cfg(feature = "std")]
#[doc(no_inline)]
pub use facade::{decode_all, encode_all};

pub mod siphash;
