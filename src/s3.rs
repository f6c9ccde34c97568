use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Method, Request, Url};

use crate::error::{Error, Result};
use crate::s3_canonical::KeyEncoding;
use crate::s3_clock::{signing_instant, Clock, SystemClock};
use crate::s3_constant::DEFAULT_STORAGE_DOMAIN;
use crate::s3_credentials::SigningCredentials;
use crate::s3_crypto::{Crypto, Sha2Crypto};
use crate::Signer;

/// A time-limited URL that bearer-authenticates one method on one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresignedUrl {
    pub method: String,
    pub url: String,
    pub signed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PresignedUrl {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn is_expired_at(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.expires_at
    }
}

impl fmt::Display for PresignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// URL plus the headers a caller's HTTP client must attach verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

impl SignedRequest {
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Builds an unsent `reqwest::Request`. No body is attached.
    pub fn into_request(self) -> Result<Request> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|e| Error::Request(e.to_string()))?;
        let url = Url::parse(&self.url).map_err(|e| Error::Request(e.to_string()))?;

        let mut req = Request::new(method, url);
        let headers_mut = req.headers_mut();
        for (name, value) in self.headers.iter() {
            headers_mut.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(req)
    }
}

/// Signs requests against one bucket of an S3-compatible store.
///
/// Cheap to clone and safe to share between threads; every call reads the
/// clock once and is otherwise a pure function of its arguments.
#[derive(Clone)]
pub struct S3 {
    credentials: Arc<SigningCredentials>,
    storage_domain: String,
    host: String,
    encoding: KeyEncoding,
    clock: Arc<dyn Clock>,
    crypto: Arc<dyn Crypto>,
}

impl S3 {
    /// Fails with [`Error::Config`] if any credential field is empty.
    pub fn new(credentials: SigningCredentials) -> Result<Self> {
        credentials.validate()?;
        let storage_domain = DEFAULT_STORAGE_DOMAIN.to_string();
        let host = format!("{}.{}", credentials.account_id(), storage_domain);

        Ok(Self {
            credentials: Arc::new(credentials),
            storage_domain,
            host,
            encoding: KeyEncoding::default(),
            clock: Arc::new(SystemClock),
            crypto: Arc::new(Sha2Crypto),
        })
    }

    #[inline]
    pub fn from_env() -> Result<Self> {
        Self::new(SigningCredentials::from_env()?)
    }

    pub fn with_storage_domain(mut self, storage_domain: impl Into<String>) -> Self {
        self.storage_domain = storage_domain.into();
        self.host = format!("{}.{}", self.credentials.account_id(), self.storage_domain);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_crypto(mut self, crypto: impl Crypto + 'static) -> Self {
        self.crypto = Arc::new(crypto);
        self
    }

    pub fn with_key_encoding(mut self, encoding: KeyEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[inline]
    pub fn credentials(&self) -> &SigningCredentials {
        &self.credentials
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn endpoint(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Unsigned, canonically encoded URL of `key`.
    pub fn object_url(&self, key: &str) -> Result<String> {
        let uri = self.signer().canonical_uri(key)?;
        Ok(format!("{}{}", self.endpoint(), uri))
    }

    /// Presigned PUT. The upload must send `Content-Type: {content_type}`.
    #[inline]
    pub fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<PresignedUrl> {
        self.presign(Method::PUT, key, Some(content_type), ttl)
    }

    #[inline]
    pub fn presign_download(&self, key: &str, ttl: Duration) -> Result<PresignedUrl> {
        self.presign(Method::GET, key, None, ttl)
    }

    pub fn presign(
        &self,
        method: Method,
        key: &str,
        content_type: Option<&str>,
        ttl: Duration,
    ) -> Result<PresignedUrl> {
        let now = signing_instant(self.clock.as_ref());
        self.signer()
            .sign_presigned(&method, key, content_type, ttl.num_seconds(), now)
    }

    pub fn build_signed_request(
        &self,
        method: Method,
        key: &str,
        content_type: Option<&str>,
    ) -> Result<SignedRequest> {
        let now = signing_instant(self.clock.as_ref());
        self.signer().sign_request(&method, key, content_type, now)
    }

    #[inline]
    fn signer(&self) -> Signer<'_> {
        Signer::new(
            &self.credentials,
            self.crypto.as_ref(),
            &self.host,
            self.encoding,
        )
    }
}

impl fmt::Debug for S3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3")
            .field("credentials", &self.credentials)
            .field("host", &self.host)
            .field("encoding", &self.encoding)
            .finish()
    }
}
