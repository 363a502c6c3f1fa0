/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::cache::{CacheBackend, cache_key};
use crate::rest::errors::FlickrError;
use crate::rest::normalize::clean_text_nodes;
use crate::rest::oauth::{
    AccessToken, Handshake, MemoryTokenStore, OAuthToken, Signer, Token, TokenStore,
    access_token_from_response, request_token_from_response,
};
use crate::rest::params::{is_reserved_param, normalize_params};
use crate::rest::{
    API_BASE_URL, ApiParams, DEFAULT_CACHE_TTL_SECS, DEFAULT_USER_AGENT, HttpTransport,
    METHOD_PREFIX, OAUTH_ACCESS_TOKEN_URL, OAUTH_AUTHORIZE_URL, OAUTH_REQUEST_TOKEN_URL,
    Permission, SERVICE_NAME, Transport,
};
use chrono::Duration;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Callback used when the application can't receive a redirect (console apps)
pub const OUT_OF_BAND_CALLBACK: &str = "oob";

/// Consumer credentials and, optionally, an access token obtained earlier.
#[derive(Default, Clone)]
pub struct Creds {
    consumer_api_key: String,
    consumer_api_secret: Option<String>,
    access_token: Option<AccessToken>,
}

impl Creds {
    /// Creates credentials from the provided tokens.
    ///
    /// Only the API key is required for public, read only methods. The secret is needed for
    /// anything signed on behalf of an account.
    pub fn from_tokens(
        consumer_api_key: &str,
        consumer_api_secret: Option<&str>,
        access_token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Self {
        if access_token.is_some() != token_secret.is_some() {
            log::warn!(
                "Access token and token secret must be given together, ignoring the access token"
            );
        }
        Self {
            consumer_api_key: consumer_api_key.into(),
            consumer_api_secret: consumer_api_secret.map(Into::into),
            access_token: access_token
                .zip(token_secret)
                .map(|(token, secret)| AccessToken::new(token, secret)),
        }
    }

    pub fn consumer_api_key(&self) -> &str {
        &self.consumer_api_key
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("consumer_api_key", &"xxx")
            .field("consumer_api_secret", &"xxx")
            .field("access_token", &self.access_token.as_ref().map(|_| "xxx"))
            .finish()
    }
}

/// Client for the Flickr REST API.
///
/// Cloning is cheap; clones share the transport, cache, token store and handshake state.
#[derive(Clone)]
pub struct Client {
    signer: Arc<Signer>,
    transport: Arc<dyn Transport>,
    token_store: Arc<dyn TokenStore>,
    cache: Option<Arc<dyn CacheBackend>>,
    cache_ttl: Duration,
    base_url: String,
    user_agent: String,
    pending_request_token: Arc<Mutex<Option<OAuthToken>>>,
}

impl Client {
    /// Creates a client talking to the live API.
    ///
    /// Without an access token in `creds` calls are signed with the consumer credentials
    /// only, which is enough for methods that don't need a logged in user.
    pub fn new(creds: Creds) -> Self {
        let token = creds
            .access_token
            .clone()
            .map_or(Token::Empty, Token::Access);
        Self {
            signer: Arc::new(Signer::new(
                &creds.consumer_api_key,
                creds.consumer_api_secret.as_deref().unwrap_or_default(),
            )),
            transport: Arc::new(HttpTransport::new()),
            token_store: Arc::new(MemoryTokenStore::with_token(token)),
            cache: None,
            cache_ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS),
            base_url: API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pending_request_token: Arc::new(Mutex::new(None)),
        }
    }

    /// Replaces the wire transport.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Enables caching of responses in the provided backend.
    pub fn with_cache(mut self, cache: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Time-to-live for every cached response. Defaults to 10 minutes.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Uses a different token store. Whatever token it holds becomes the current one.
    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = store;
        self
    }

    /// Stores a previously obtained access token so later calls are signed with it.
    pub fn with_access_token(self, token: AccessToken) -> Result<Self, FlickrError> {
        self.token_store
            .store_access_token(SERVICE_NAME, Token::Access(token))?;
        Ok(self)
    }

    /// Sends every API call through a proxy service instead of the Flickr API.
    pub fn with_proxy_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Should be of the form `product/product-version comment`.
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    /// The REST endpoint every API method is posted to.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/", self.base_url)
    }

    /// The token currently held in the token store.
    pub fn token(&self) -> Result<Token, FlickrError> {
        self.token_store.retrieve_access_token(SERVICE_NAME)
    }

    /// Sends a request to the API and returns the normalized response envelope.
    ///
    /// `method` may leave off the `flickr.` prefix. With `force_no_cache` the cache is neither
    /// read nor written, which is what mutating methods want.
    pub async fn send(
        &self,
        method: &str,
        params: &ApiParams<'_>,
        force_no_cache: bool,
    ) -> Result<Value, FlickrError> {
        let method = namespaced(method);
        let params = normalize_params(params);
        if let Some(name) = params.keys().find(|name| is_reserved_param(name)) {
            return Err(FlickrError::ReservedParameter(method, name.clone()));
        }
        let key = cache_key(&method, &params);

        let cached = if force_no_cache {
            None
        } else {
            self.get_cached(&key)
        };

        let raw = match cached {
            Some(body) => {
                log::debug!("Cache hit for {} ({})", method, key);
                body
            }
            None => {
                let body = self.post_signed(&method, &params).await?;
                if !force_no_cache && self.cache_response(&key, &body) {
                    log::debug!("Cached {} ({})", method, key);
                }
                body
            }
        };

        let decoded: Value =
            serde_json::from_str(&raw).map_err(|source| FlickrError::ApiResponseMalformed {
                method: method.clone(),
                body: raw.clone(),
                source: Some(source),
            })?;
        let resp = clean_text_nodes(decoded);

        let stat = resp.get("stat").and_then(Value::as_str).map(str::to_owned);
        match stat.as_deref() {
            Some("ok") => Ok(resp),
            Some("fail") => {
                let code = resp.get("code").and_then(code_from_value).unwrap_or_default();
                let msg = resp
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                log::debug!("{} failed: {} {}", method, code, msg);
                Err(FlickrError::ApiResponse(code, msg))
            }
            // Anything else isn't a Flickr envelope
            _ => Err(FlickrError::ApiResponseMalformed {
                method,
                body: raw,
                source: None,
            }),
        }
    }

    /// Returns the cached body for `key`. Backend failures count as a miss.
    fn get_cached(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(key) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("Cache read failed, treating as a miss: {}", err);
                None
            }
        }
    }

    /// Stores a raw response body. Returns whether it was saved.
    fn cache_response(&self, key: &str, body: &str) -> bool {
        let Some(cache) = self.cache.as_ref() else {
            return false;
        };
        match cache.put(key, body, self.cache_ttl) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Cache write failed: {}", err);
                false
            }
        }
    }

    async fn post_signed(
        &self,
        method: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, FlickrError> {
        let token = self.token()?;
        let mut form: Vec<(String, String)> = vec![
            ("method".into(), method.into()),
            ("format".into(), "json".into()),
            ("nojsoncallback".into(), "1".into()),
        ];
        form.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let url = self.rest_url();
        let auth =
            self.signer
                .authorization(&url, token.signing_pair(), &form, Handshake::default())?;
        log::debug!("Calling {} at {}", method, url);
        self.transport
            .post_form(&url, &form, &self.headers(auth))
            .await
    }

    fn headers(&self, authorization: String) -> Vec<(String, String)> {
        vec![
            ("Authorization".into(), authorization),
            ("User-Agent".into(), self.user_agent.clone()),
        ]
    }

    /// Starts the OAuth handshake and returns the url the user should be sent to.
    ///
    /// This performs a request token exchange with Flickr, so only call it when the user has
    /// actually asked to log in. `callback_url` defaults to [`OUT_OF_BAND_CALLBACK`].
    pub async fn get_auth_url(
        &self,
        permission: Permission,
        callback_url: Option<&str>,
    ) -> Result<url::Url, FlickrError> {
        let callback = callback_url.unwrap_or(OUT_OF_BAND_CALLBACK);
        let auth = self.signer.authorization(
            OAUTH_REQUEST_TOKEN_URL,
            None,
            &[],
            Handshake {
                callback: Some(callback),
                ..Default::default()
            },
        )?;
        let body = self
            .transport
            .post_form(OAUTH_REQUEST_TOKEN_URL, &[], &self.headers(auth))
            .await?;
        let request_token = request_token_from_response(&body)?;
        log::debug!("Obtained request token {}", request_token.token);

        self.token_store
            .store_access_token(SERVICE_NAME, Token::Request(request_token.clone()))?;
        let perms: &'static str = permission.into();
        let auth_url = url::Url::parse_with_params(
            OAUTH_AUTHORIZE_URL,
            &[("oauth_token", request_token.token.as_str()), ("perms", perms)],
        )?;
        *self
            .pending_request_token
            .lock()
            .map_err(|e| FlickrError::AuthState(e.to_string()))? = Some(request_token);
        Ok(auth_url)
    }

    /// Exchanges the verifier code for an access token and makes it the current token.
    ///
    /// `request_token` can be left out when this client started the handshake. Otherwise its
    /// secret has to be available from the token store.
    pub async fn retrieve_access_token(
        &self,
        verifier: &str,
        request_token: Option<&str>,
    ) -> Result<AccessToken, FlickrError> {
        let request_token = self.find_request_token(request_token)?;
        let auth = self.signer.authorization(
            OAUTH_ACCESS_TOKEN_URL,
            Some(&request_token),
            &[],
            Handshake {
                verifier: Some(verifier),
                ..Default::default()
            },
        )?;
        let body = self
            .transport
            .post_form(OAUTH_ACCESS_TOKEN_URL, &[], &self.headers(auth))
            .await?;
        let access_token = access_token_from_response(&body)?;

        self.token_store
            .store_access_token(SERVICE_NAME, Token::Access(access_token.clone()))?;
        if let Ok(mut pending) = self.pending_request_token.lock() {
            pending.take();
        }
        log::debug!(
            "Authorized as {}",
            access_token.username.as_deref().unwrap_or("unknown user")
        );
        Ok(access_token)
    }

    // The in-flight token comes first, then whatever request token the store holds
    fn find_request_token(&self, explicit: Option<&str>) -> Result<OAuthToken, FlickrError> {
        let pending = self
            .pending_request_token
            .lock()
            .map_err(|e| FlickrError::AuthState(e.to_string()))?
            .clone();
        let stored = match self.token()? {
            Token::Request(t) => Some(t),
            _ => None,
        };
        let mut known = pending.into_iter().chain(stored);
        match explicit {
            Some(token) => known.find(|t| t.token == token).ok_or_else(|| {
                FlickrError::AuthState(format!("no secret known for request token {token}"))
            }),
            None => known.next().ok_or_else(|| {
                FlickrError::AuthState(
                    "no request token available, call get_auth_url first".to_string(),
                )
            }),
        }
    }

    /// Checks the current access token with Flickr and returns its details.
    pub async fn check_token(&self) -> Result<Value, FlickrError> {
        let token = match self.token()? {
            Token::Access(t) => t,
            _ => {
                return Err(FlickrError::AuthState(
                    "no access token has been obtained".to_string(),
                ));
            }
        };
        // The token travels in the signed Authorization header
        log::debug!("Checking access token {}", token.oauth.token);
        let resp = self.send("flickr.auth.oauth.checkToken", &[], true).await?;
        resp.get("oauth")
            .cloned()
            .ok_or_else(|| FlickrError::ResponseMissing("oauth".to_string()))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("cache_enabled", &self.cache.is_some())
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Makes sure the method begins with `flickr.`.
pub fn namespaced(method: &str) -> String {
    if method.starts_with(METHOD_PREFIX) {
        method.to_string()
    } else {
        format!("{}{}", METHOD_PREFIX, method)
    }
}

// Codes normally arrive as numbers but some proxies stringify them
fn code_from_value(v: &Value) -> Option<u32> {
    v.as_u64()
        .and_then(|c| u32::try_from(c).ok())
        .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}
