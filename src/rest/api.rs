/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use futures::future::BoxFuture;
use num_enum::TryFromPrimitive;

// Root Flickr API services, replaced when a proxy base url is configured
pub const API_BASE_URL: &str = "https://api.flickr.com/services";

// OAuth1 handshake endpoints
pub const OAUTH_REQUEST_TOKEN_URL: &str = "https://www.flickr.com/services/oauth/request_token";
pub const OAUTH_AUTHORIZE_URL: &str = "https://www.flickr.com/services/oauth/authorize";
pub const OAUTH_ACCESS_TOKEN_URL: &str = "https://www.flickr.com/services/oauth/access_token";

// Static photo hosting
pub const STATIC_PHOTO_ORIGIN: &str = "https://live.staticflickr.com";

/// Every method name is namespaced with this prefix.
pub const METHOD_PREFIX: &str = "flickr.";

/// Key the token store uses for this service.
pub const SERVICE_NAME: &str = "Flickr";

/// Default cache time-to-live in seconds.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 600;

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "flickr-rs/",
    env!("CARGO_PKG_VERSION"),
    " https://github.com/cch71/flickr_rs"
);

/// The wire capability the client needs: POST a form body and hand back the raw response.
///
/// Signing happens before the transport is called, so an implementation only has to move
/// bytes. Timeouts and connection pooling belong to the implementation.
pub trait Transport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        form: &'a [(String, String)],
        headers: &'a [(String, String)],
    ) -> BoxFuture<'a, Result<String, FlickrError>>;
}

/// Transport backed by [`reqwest`].
#[derive(Default, Clone)]
pub struct HttpTransport {
    https_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            https_client: reqwest::Client::new(),
        }
    }

    /// Uses an already configured reqwest client (timeouts, proxies, etc.)
    pub fn from_client(https_client: reqwest::Client) -> Self {
        Self { https_client }
    }
}

impl Transport for HttpTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        form: &'a [(String, String)],
        headers: &'a [(String, String)],
    ) -> BoxFuture<'a, Result<String, FlickrError>> {
        Box::pin(async move {
            let body = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(form.iter())
                .finish();
            let mut req = self
                .https_client
                .post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .header("Accept", "application/json");
            for (name, value) in headers {
                req = req.header(name.as_str(), value.as_str());
            }
            let resp = req.body(body).send().await?;
            log::debug!("POST {} -> {}", url, resp.status());
            Ok(resp.text().await?)
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish()
    }
}

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, crate::rest::ParamValue)];

/// Error codes shared by every method per the Flickr API site
#[derive(Debug, PartialEq, Eq, Clone, Copy, TryFromPrimitive)]
#[repr(u32)]
pub enum ApiErrorCodes {
    SslRequired = 95,
    InvalidSignature = 96,
    MissingSignature = 97,
    LoginFailed = 98,
    InsufficientPermissions = 99,
    InvalidApiKey = 100,
    ServiceUnavailable = 105,
    WriteOperationFailed = 106,
    FormatNotFound = 111,
    MethodNotFound = 112,
    InvalidSoapEnvelope = 114,
    InvalidXmlRpcMethodCall = 115,
    BadUrlFound = 116,
}
