//! Canonical request and string-to-sign construction for SigV4.
//!
//! ```text
//! METHOD\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! PayloadHash
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::s3_constant::*;

/// RFC 3986 unreserved characters pass through, everything else is escaped.
const STRICT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Same as strict but leaves `! * ' ( )` raw, like a browser's
/// `encodeURIComponent`.
const LENIENT_ENCODE_SET: &AsciiSet = &STRICT_ENCODE_SET
    .remove(b'!')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encoding applied to object keys and query values.
///
/// `Lenient` is the default because it is what deployed clients have been
/// signing with. Providers that canonicalize strictly will reject keys
/// containing `! * ' ( )` under `Lenient`; switch to `Strict` for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    #[default]
    Lenient,
    Strict,
}

impl KeyEncoding {
    #[inline]
    fn ascii_set(self) -> &'static AsciiSet {
        match self {
            KeyEncoding::Lenient => LENIENT_ENCODE_SET,
            KeyEncoding::Strict => STRICT_ENCODE_SET,
        }
    }

    #[inline]
    pub fn encode(self, value: &str) -> String {
        utf8_percent_encode(value, self.ascii_set()).to_string()
    }

    /// Encodes each `/`-separated segment, keeping the separators.
    pub fn encode_path(self, path: &str) -> String {
        path.split('/')
            .map(|segment| self.encode(segment))
            .collect::<Vec<String>>()
            .join("/")
    }
}

/// The `(date, region, service)` triple a signing key is valid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningScope {
    date_stamp: String,
    region: String,
    service: String,
}

impl SigningScope {
    pub fn new(
        date_stamp: impl Into<String>,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            date_stamp: date_stamp.into(),
            region: region.into(),
            service: service.into(),
        }
    }

    /// Scope for the UTC day containing `date`, region `auto`, service `s3`.
    #[inline]
    pub fn for_date(date: DateTime<Utc>) -> Self {
        Self::new(
            date.format(DATE_STAMP_FORMAT).to_string(),
            SIGNING_REGION,
            SIGNING_SERVICE,
        )
    }

    #[inline]
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// `{date}/{region}/{service}/aws4_request`
    pub fn credential_scope(&self) -> String {
        format!(
            "{date}/{region}/{service}/{terminator}",
            date = self.date_stamp,
            region = self.region,
            service = self.service,
            terminator = SCOPE_TERMINATOR,
        )
    }

    /// `{access_key}/{credential_scope}`, the value of `X-Amz-Credential`.
    #[inline]
    pub fn credential(&self, access_key: &str) -> String {
        format!("{}/{}", access_key, self.credential_scope())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: String,
    canonical_uri: String,
    canonical_query_string: String,
    headers: BTreeMap<String, String>,
    payload_hash: String,
}

impl CanonicalRequest {
    /// `canonical_uri` must already be encoded (see [`KeyEncoding::encode_path`]).
    pub fn new(method: &str, canonical_uri: impl Into<String>) -> Self {
        Self {
            method: method.to_uppercase(),
            canonical_uri: canonical_uri.into(),
            canonical_query_string: String::new(),
            headers: BTreeMap::new(),
            payload_hash: UNSIGNED_PAYLOAD.to_string(),
        }
    }

    /// Sorts and encodes `params` into the canonical query string.
    pub fn with_query(mut self, params: &[(&str, &str)], encoding: KeyEncoding) -> Self {
        self.canonical_query_string = canonical_query_string(params, encoding);
        self
    }

    /// Adds a header to the signed set. Names are lowercased; values are
    /// trimmed and runs of inner whitespace collapsed. Repeated names are
    /// joined with a comma.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        let value = collapse_whitespace(value.trim());
        self.headers
            .entry(name.to_lowercase())
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
        self
    }

    #[inline]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[inline]
    pub fn canonical_uri(&self) -> &str {
        &self.canonical_uri
    }

    #[inline]
    pub fn canonical_query_string(&self) -> &str {
        &self.canonical_query_string
    }

    #[inline]
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// Header names joined by `;`, in sorted order.
    pub fn signed_headers(&self) -> String {
        self.headers
            .keys()
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join(";")
    }

    /// `name:value` lines joined by `\n`, without a trailing newline.
    pub fn canonical_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{}:{}", name, value))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{method}\n{uri}\n{query}\n{headers}\n\n{signed_headers}\n{payload}",
            method = self.method,
            uri = self.canonical_uri,
            query = self.canonical_query_string,
            headers = self.canonical_headers(),
            signed_headers = self.signed_headers(),
            payload = self.payload_hash,
        )
    }
}

/// Encodes names and values, then sorts by name (and by value for repeated
/// names) and joins as `name=value&...`.
pub fn canonical_query_string(params: &[(&str, &str)], encoding: KeyEncoding) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(name, value)| (encoding.encode(name), encoding.encode(value)))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<String>>()
        .join("&")
}

/// `AWS4-HMAC-SHA256\n{amz_date}\n{scope}\n{hex(sha256(canonical_request))}`
pub fn string_to_sign(amz_date: &str, scope: &SigningScope, canonical_hash: &str) -> String {
    format!(
        "{algo}\n{date}\n{scope}\n{hash}",
        algo = S3_ALGO_VALUE,
        date = amz_date,
        scope = scope.credential_scope(),
        hash = canonical_hash,
    )
}

#[inline]
pub fn amz_date(date: DateTime<Utc>) -> String {
    date.format(AMZ_DATE_FORMAT).to_string()
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn path_keeps_separators_and_encodes_segments() {
        let encoded = KeyEncoding::Lenient.encode_path("/media/videos/my clip ü.mp4");
        assert_eq!(encoded, "/media/videos/my%20clip%20%C3%BC.mp4");
    }

    #[test]
    fn lenient_leaves_sub_delims_raw() {
        assert_eq!(KeyEncoding::Lenient.encode("a!b*c'd(e)"), "a!b*c'd(e)");
        assert_eq!(KeyEncoding::Lenient.encode("a+b=c&d"), "a%2Bb%3Dc%26d");
    }

    #[test]
    fn strict_escapes_sub_delims() {
        assert_eq!(KeyEncoding::Strict.encode("a!b*c'd(e)"), "a%21b%2Ac%27d%28e%29");
        assert_eq!(KeyEncoding::Strict.encode("AZaz09-_.~"), "AZaz09-_.~");
    }

    #[test]
    fn query_is_sorted_regardless_of_input_order() {
        let query = canonical_query_string(
            &[
                ("X-Amz-SignedHeaders", "host"),
                ("X-Amz-Algorithm", "AWS4-HMAC-SHA256"),
                ("X-Amz-Date", "x"),
            ],
            KeyEncoding::Lenient,
        );
        assert_eq!(
            query,
            "X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Date=x&X-Amz-SignedHeaders=host"
        );
    }

    #[test]
    fn query_values_are_encoded() {
        let query = canonical_query_string(
            &[("X-Amz-Credential", "AKID/20240101/auto/s3/aws4_request")],
            KeyEncoding::Lenient,
        );
        assert_eq!(query, "X-Amz-Credential=AKID%2F20240101%2Fauto%2Fs3%2Faws4_request");
    }

    #[test]
    fn headers_are_lowercased_sorted_and_trimmed() {
        let req = CanonicalRequest::new("get", "/b/k")
            .with_header("X-Amz-Date", "20240101T000000Z")
            .with_header("Host", "  acct.example.com ")
            .with_header("Content-Type", "text/plain;   charset=utf-8");
        assert_eq!(req.signed_headers(), "content-type;host;x-amz-date");
        assert_eq!(
            req.canonical_headers(),
            "content-type:text/plain; charset=utf-8\n\
             host:acct.example.com\n\
             x-amz-date:20240101T000000Z"
        );
    }

    #[test]
    fn canonical_request_layout() {
        let req = CanonicalRequest::new("PUT", "/bucket/a.txt")
            .with_query(&[("b", "2"), ("a", "1")], KeyEncoding::Lenient)
            .with_header("host", "h");
        assert_eq!(
            req.to_string(),
            "PUT\n/bucket/a.txt\na=1&b=2\nhost:h\n\nhost\nUNSIGNED-PAYLOAD"
        );
    }

    #[test]
    fn scope_and_string_to_sign() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 58).unwrap();
        let scope = SigningScope::for_date(date);
        assert_eq!(scope.credential_scope(), "20240309/auto/s3/aws4_request");
        assert_eq!(scope.credential("AKID"), "AKID/20240309/auto/s3/aws4_request");
        assert_eq!(amz_date(date), "20240309T235958Z");
        assert_eq!(
            string_to_sign(&amz_date(date), &scope, "abc"),
            "AWS4-HMAC-SHA256\n20240309T235958Z\n20240309/auto/s3/aws4_request\nabc"
        );
    }
}
