/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use flickr::rest::{Client, Creds, FlickrError, Transport};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub(crate) fn get_full_auth_tokens() -> anyhow::Result<Creds> {
    let api_key = std::env::var("FLICKR_API_KEY")?;
    let api_secret = std::env::var("FLICKR_API_SECRET")?;
    let access_token = std::env::var("FLICKR_ACCESS_TOKEN")?;
    let access_secret = std::env::var("FLICKR_ACCESS_SECRET")?;

    Ok(Creds::from_tokens(
        &api_key,
        Some(&api_secret),
        Some(&access_token),
        Some(&access_secret),
    ))
}

#[allow(dead_code)]
pub(crate) fn get_read_only_auth_tokens() -> anyhow::Result<Creds> {
    let api_key = std::env::var("FLICKR_API_KEY")?;
    let api_secret = std::env::var("FLICKR_API_SECRET").ok();

    Ok(Creds::from_tokens(&api_key, api_secret.as_deref(), None, None))
}

/// A request the stub transport received.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub url: String,
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

#[allow(dead_code)]
impl RecordedCall {
    pub fn form_value(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct StubState {
    queued: VecDeque<String>,
    fallback: Option<String>,
    calls: Vec<RecordedCall>,
}

/// Transport that records every request and answers with canned bodies.
///
/// Clones share state, so keep one to inspect after handing another to the client.
#[derive(Clone, Default)]
pub(crate) struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

#[allow(dead_code)]
impl StubTransport {
    /// Answers every request with `body`.
    pub fn replying(body: &str) -> Self {
        let stub = Self::default();
        stub.state.lock().unwrap().fallback = Some(body.to_string());
        stub
    }

    /// Answers requests with `bodies` in order, then with the last one.
    pub fn replying_in_order(bodies: &[&str]) -> Self {
        let stub = Self::default();
        {
            let mut state = stub.state.lock().unwrap();
            state.queued = bodies.iter().map(|b| b.to_string()).collect();
            state.fallback = bodies.last().map(|b| b.to_string());
        }
        stub
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

impl Transport for StubTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        form: &'a [(String, String)],
        headers: &'a [(String, String)],
    ) -> BoxFuture<'a, Result<String, FlickrError>> {
        let body = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(RecordedCall {
                url: url.to_string(),
                form: form.to_vec(),
                headers: headers.to_vec(),
            });
            state
                .queued
                .pop_front()
                .or_else(|| state.fallback.clone())
                .unwrap_or_default()
        };
        Box::pin(async move { Ok(body) })
    }
}

/// Client with a consumer key/secret that talks to `stub`.
#[allow(dead_code)]
pub(crate) fn stub_client(stub: &StubTransport) -> Client {
    Client::new(Creds::from_tokens("test-key", Some("test-secret"), None, None))
        .with_transport(stub.clone())
}
