//! AWS Signature Version 4 signing for direct client-to-object-storage
//! requests against an S3-compatible endpoint (Cloudflare R2 by default).
//!
//! Two artifacts are produced, neither of which involves network I/O:
//!
//! - a presigned URL ([`S3::presign_upload`], [`S3::presign_download`]),
//!   usable by anyone holding it until it expires;
//! - a `{url, headers}` envelope ([`S3::build_signed_request`]) whose headers
//!   carry an `Authorization` value.
//!
//! The payload hash is always `UNSIGNED-PAYLOAD`: signatures authenticate the
//! method, path, signed headers, identity and time, never the body.
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use r2_signer::{FixedClock, SigningCredentials, S3};
//!
//! let creds = SigningCredentials::new("acct", "AKIDEXAMPLE", "secret", "media");
//! let s3 = S3::new(creds)
//!     .unwrap()
//!     .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
//! let url = s3
//!     .presign_upload("videos/test.mp4", "video/mp4", Duration::seconds(3600))
//!     .unwrap();
//! assert!(url
//!     .as_str()
//!     .starts_with("https://acct.r2.cloudflarestorage.com/media/videos/test.mp4?"));
//! ```

#[macro_use]
extern crate serde;

pub mod error;
pub mod s3;
pub mod s3_canonical;
pub mod s3_clock;
pub mod s3_constant;
pub mod s3_credentials;
pub mod s3_crypto;
pub mod s3_signer;

pub use error::{Error, Result};
pub use s3::*;
pub use s3_canonical::*;
pub use s3_clock::*;
pub use s3_constant::*;
pub use s3_credentials::*;
pub use s3_crypto::*;
pub use s3_signer::*;
