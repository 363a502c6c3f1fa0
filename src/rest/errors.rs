/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::rest::ApiErrorCodes;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum FlickrError {
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Request network error")]
    Request(#[from] reqwest::Error),

    #[error("Authorization state error. {0}")]
    AuthState(String),

    #[error("OAuth token exchange returned an unexpected response: {0}")]
    OAuthResponse(String),

    #[error("Deserialization error")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error")]
    UrlParsing(#[from] url::ParseError),

    #[error("Client not found")]
    ClientNotFound(),

    #[error("Expected response missing: {0}")]
    ResponseMissing(String),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u32, String),

    #[error("Unable to decode Flickr response to {method} request: {body}")]
    ApiResponseMalformed {
        method: String,
        body: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Unknown API method: {0}")]
    UnknownEndpoint(String),

    #[error("Missing required parameter `{1}` for {0}")]
    MissingParameter(String, String),

    #[error("Parameter `{1}` is not accepted by {0}")]
    UnexpectedParameter(String, String),

    #[error("Parameter `{1}` is set by the client and can't be passed to {0}")]
    ReservedParameter(String, String),

    #[error("Unable to sign request: {0}")]
    Signing(String),

    #[error("Cache backend error: {0}")]
    Cache(String),

    #[error("Token store error: {0}")]
    TokenStore(String),
}

impl FlickrError {
    /// Returns the well known API error code if this is an [`FlickrError::ApiResponse`].
    ///
    /// Method specific codes (1 through 94 on most methods) yield `None`.
    pub fn api_code(&self) -> Option<ApiErrorCodes> {
        match self {
            FlickrError::ApiResponse(code, _) => ApiErrorCodes::try_from(*code).ok(),
            _ => None,
        }
    }
}

/// Lets a caller reshape a remote failure into an absent value while every
/// other error still propagates.
pub trait ResultExt<T> {
    fn optional(self) -> Result<Option<T>, FlickrError>;
}

impl<T> ResultExt<T> for Result<T, FlickrError> {
    fn optional(self) -> Result<Option<T>, FlickrError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(FlickrError::ApiResponse(code, msg)) => {
                log::debug!("Treating API failure {code} ({msg}) as absent");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
