//! An implementation of RFC 4122 UUIDs and their draft-revision successors
//! (versions 6, 7, and 8), the Microsoft GUID byte-order variant, and
//! sequential COMB identifiers.
//!
//! ```rust
//! use uuid128::{uuid4, uuid7};
//!
//! let uuid = uuid7()?;
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid4()?;
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! # Ok::<(), uuid128::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! All identifiers share the canonical 16-byte layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |     time_hi_and_version       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |clk_seq_hi_res |  clk_seq_low  |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          node (cont.)                         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The top nibble of `time_hi_and_version` records the generation
//!   algorithm (the version); the top bits of `clk_seq_hi_res` record the
//!   layout family (the variant).
//! - The interpretation of the time fields depends on the version: a 60-bit
//!   count of 100-nanosecond intervals since 1582-10-15 (versions 1, 2, and
//!   6, the last with its fields permuted to sort by creation time) or a
//!   48-bit count of Unix-epoch milliseconds (version 7).
//! - The Microsoft GUID variant stores the same identifier with the three
//!   leading fields byte-reversed; see [`guid`].
//!
//! # Constructing identifiers
//!
//! [`UuidFactory`] holds the injected random, time, and node collaborators
//! and creates identifiers of every version. The free functions
//! ([`uuid1`], [`uuid4`], [`uuid7`], ...) use a thread-local factory:
//!
//! ```rust
//! use uuid128::{Uuid, uuid5};
//!
//! let uuid = uuid5(Uuid::NAMESPACE_DNS, b"python.org");
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! ```
//!
//! Raw bytes are classified and validated by [`UuidBuilder`], which yields
//! a [`TaggedUuid`] with version-specific accessors:
//!
//! ```rust
//! use uuid128::{TaggedUuid, UuidBuilder};
//!
//! let uuid = "ff6f8cb0-c57d-11e1-9b21-0800200c9a66"
//!     .parse::<uuid128::Uuid>()?;
//! if let TaggedUuid::Time(v1) = UuidBuilder.build(uuid.as_bytes())? {
//!     let ts = v1.timestamp()?;
//!     assert_eq!(ts.seconds(), 1_341_368_074); // 2012-07-04T02:14:34Z
//! }
//! # Ok::<(), uuid128::Error>(())
//! ```

mod entry;
mod error;
mod uuid;

pub mod builder;
pub mod codec;
pub mod comb;
pub mod factory;
pub mod fields;
pub mod guid;
pub mod num;
pub mod provider;
pub mod time;

pub use builder::{
    DceDomain, TaggedUuid, UuidBuilder, UuidV1, UuidV2, UuidV3, UuidV4, UuidV5, UuidV6, UuidV7,
    UuidV8,
};
pub use entry::{uuid1, uuid2, uuid3, uuid4, uuid5, uuid6, uuid7, uuid8};
pub use error::Error;
pub use factory::UuidFactory;
pub use fields::{Fields, Variant, Version};
pub use time::Timestamp;
pub use uuid::Uuid;
