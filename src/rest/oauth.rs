/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! OAuth1 (RFC 5849) request signing and token handling.

use crate::rest::SERVICE_NAME;
use crate::rest::errors::FlickrError;
use reqwest_oauth1::{OAuthParameters, SecretsProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// A token/secret pair.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OAuthToken {
    pub token: String,
    pub secret: String,
}

impl OAuthToken {
    pub fn new(token: &str, secret: &str) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("token", &self.token)
            .field("secret", &"xxx")
            .finish()
    }
}

/// Long lived credential for an account along with the account details returned by the
/// access token exchange.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    #[serde(flatten)]
    pub oauth: OAuthToken,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_nsid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
}

impl AccessToken {
    pub fn new(token: &str, secret: &str) -> Self {
        Self {
            oauth: OAuthToken::new(token, secret),
            user_nsid: None,
            username: None,
            fullname: None,
        }
    }
}

/// The token currently held for the service.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// Nothing obtained yet, requests are signed with the consumer credentials only
    #[default]
    Empty,
    /// Short lived token issued at the start of the handshake
    Request(OAuthToken),
    /// Credential for an authorized account
    Access(AccessToken),
}

impl Token {
    /// The pair used when signing an API call. Only access tokens sign API calls.
    pub fn signing_pair(&self) -> Option<&OAuthToken> {
        match self {
            Token::Access(t) => Some(&t.oauth),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Token::Empty)
    }
}

/// Where the current token lives between calls.
pub trait TokenStore: Send + Sync {
    fn retrieve_access_token(&self, service: &str) -> Result<Token, FlickrError>;

    fn store_access_token(&self, service: &str, token: Token) -> Result<(), FlickrError>;
}

/// Token store held in memory. Starts out holding an empty token for the service.
#[derive(Debug)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, Token>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::with_token(Token::Empty)
    }

    /// Seeds the store with an existing token, e.g. a previously saved access token.
    pub fn with_token(token: Token) -> Self {
        Self {
            tokens: Mutex::new(HashMap::from([(SERVICE_NAME.to_string(), token)])),
        }
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemoryTokenStore {
    fn retrieve_access_token(&self, service: &str) -> Result<Token, FlickrError> {
        self.tokens
            .lock()
            .map_err(|e| FlickrError::TokenStore(e.to_string()))?
            .get(service)
            .cloned()
            .ok_or_else(|| FlickrError::TokenStore(format!("no token stored for {service}")))
    }

    fn store_access_token(&self, service: &str, token: Token) -> Result<(), FlickrError> {
        self.tokens
            .lock()
            .map_err(|e| FlickrError::TokenStore(e.to_string()))?
            .insert(service.to_string(), token);
        Ok(())
    }
}

/// Protocol parameters that only appear during the authorization handshake.
#[derive(Debug, Clone, Copy, Default)]
pub struct Handshake<'a> {
    /// `oauth_callback`, sent with the request token exchange
    pub callback: Option<&'a str>,
    /// `oauth_verifier`, sent with the access token exchange
    pub verifier: Option<&'a str>,
}

// Key pairs handed to the OAuth1 signer
#[derive(Clone)]
struct SigningSecrets {
    consumer_key: String,
    consumer_secret: String,
    token: Option<OAuthToken>,
}

impl SecretsProvider for SigningSecrets {
    fn get_consumer_key_pair<'a>(&'a self) -> (&'a str, &'a str) {
        (self.consumer_key.as_str(), self.consumer_secret.as_str())
    }

    fn get_token_pair_option<'a>(&'a self) -> Option<(&'a str, &'a str)> {
        self.token
            .as_ref()
            .map(|t| (t.token.as_str(), t.secret.as_str()))
    }

    fn get_token_option_pair<'a>(&'a self) -> (Option<&'a str>, Option<&'a str>) {
        match &self.token {
            Some(t) => (Some(t.token.as_str()), Some(t.secret.as_str())),
            None => (None, None),
        }
    }
}

impl std::fmt::Debug for SigningSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningSecrets")
            .field("consumer_key", &"xxx")
            .field("consumer_secret", &"xxx")
            .field("token", &self.token)
            .finish()
    }
}

/// Signs requests on behalf of a consumer with HMAC-SHA1.
#[derive(Clone)]
pub struct Signer {
    consumer_key: String,
    consumer_secret: String,
}

impl Signer {
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    /// Produces the `Authorization` header for a POST to `url` with form `body`.
    ///
    /// Body parameters are covered by the signature but only the `oauth_*` parameters end up
    /// in the header. `oauth_token` is left out when `token` is `None`.
    pub fn authorization(
        &self,
        url: &str,
        token: Option<&OAuthToken>,
        body: &[(String, String)],
        handshake: Handshake<'_>,
    ) -> Result<String, FlickrError> {
        self.sign_post(url, token, body, handshake, None)
    }

    /// Same as [`Signer::authorization`] with a fixed nonce and timestamp.
    pub fn authorization_with(
        &self,
        url: &str,
        token: Option<&OAuthToken>,
        body: &[(String, String)],
        handshake: Handshake<'_>,
        nonce: &str,
        timestamp: u64,
    ) -> Result<String, FlickrError> {
        self.sign_post(url, token, body, handshake, Some((nonce, timestamp)))
    }

    fn sign_post(
        &self,
        url: &str,
        token: Option<&OAuthToken>,
        body: &[(String, String)],
        handshake: Handshake<'_>,
        fixed: Option<(&str, u64)>,
    ) -> Result<String, FlickrError> {
        let mut params = OAuthParameters::new().version(true);
        if let Some(callback) = handshake.callback {
            params = params.callback(callback);
        }
        if let Some(verifier) = handshake.verifier {
            params = params.verifier(verifier);
        }
        if let Some((nonce, timestamp)) = fixed {
            params = params.nonce(nonce).timestamp(timestamp);
        }

        let secrets = SigningSecrets {
            consumer_key: self.consumer_key.clone(),
            consumer_secret: self.consumer_secret.clone(),
            token: token.cloned(),
        };
        let payload = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(body)
            .finish();
        let header = reqwest_oauth1::Signer::new(secrets, params)
            .generate_signature(reqwest::Method::POST, url::Url::parse(url)?, &payload, false)
            .map_err(|e| FlickrError::Signing(e.to_string()))?;
        log::trace!("Signed POST {}", url);
        Ok(header)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("consumer_key", &"xxx")
            .field("consumer_secret", &"xxx")
            .finish()
    }
}

/// Reads the form encoded body of a token exchange.
pub(crate) fn parse_token_response(body: &str) -> Result<HashMap<String, String>, FlickrError> {
    let fields: HashMap<String, String> = url::form_urlencoded::parse(body.trim().as_bytes())
        .into_owned()
        .collect();
    if !fields.contains_key("oauth_token") || !fields.contains_key("oauth_token_secret") {
        return Err(FlickrError::OAuthResponse(body.to_string()));
    }
    Ok(fields)
}

/// Builds a request token from the `request_token` response.
pub(crate) fn request_token_from_response(body: &str) -> Result<OAuthToken, FlickrError> {
    let fields = parse_token_response(body)?;
    if fields.get("oauth_callback_confirmed").map(String::as_str) == Some("false") {
        return Err(FlickrError::OAuthResponse(body.to_string()));
    }
    Ok(OAuthToken::new(
        &fields["oauth_token"],
        &fields["oauth_token_secret"],
    ))
}

/// Builds an access token from the `access_token` response.
pub(crate) fn access_token_from_response(body: &str) -> Result<AccessToken, FlickrError> {
    let mut fields = parse_token_response(body)?;
    Ok(AccessToken {
        oauth: OAuthToken::new(&fields["oauth_token"], &fields["oauth_token_secret"]),
        user_nsid: fields.remove("user_nsid"),
        username: fields.remove("username"),
        fullname: fields.remove("fullname"),
    })
}
