pub const S3_ALGO_KEY: &str = "X-Amz-Algorithm";
pub const S3_CRED_KEY: &str = "X-Amz-Credential";
pub const S3_DATE_KEY: &str = "X-Amz-Date";
pub const S3_SIGNATURE_KEY: &str = "X-Amz-Signature";
pub const S3_EXPIRES_KEY: &str = "X-Amz-Expires";
pub const S3_SIGNED_HEADERS_KEY: &str = "X-Amz-SignedHeaders";
pub const S3_ALGO_VALUE: &str = "AWS4-HMAC-SHA256";

pub const HOST_HEADER: &str = "host";
pub const DATE_HEADER: &str = "x-amz-date";
pub const CONTENT_SHA256_HEADER: &str = "x-amz-content-sha256";
pub const CONTENT_TYPE_HEADER: &str = "content-type";
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Payload hash sentinel used in place of a body digest.
///
/// Signatures produced by this crate cover method, path, signed headers,
/// identity and time, but never the request body. Large uploads are not
/// hashed up front; callers needing body integrity must add it themselves.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

pub const SIGNING_REGION: &str = "auto";
pub const SIGNING_SERVICE: &str = "s3";
pub const SCOPE_TERMINATOR: &str = "aws4_request";
pub const DEFAULT_STORAGE_DOMAIN: &str = "r2.cloudflarestorage.com";

/// Longest lifetime a SigV4 presigned URL may carry (seven days).
pub const MAX_PRESIGN_EXPIRES_SECS: i64 = 604_800;

pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";
