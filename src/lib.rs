/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # Flickr
//!
//! This Flickr library was created for working with the Flickr REST API.
//!
//! For further details on the Rest API refer to the [Flickr API Docs](https://www.flickr.com/services/api/)
//!
//! ## Features
//!
//! - Generic access to any API method through [`rest::Client::send`]
//! - A table of common methods with argument checking through [`rest::Client::call`]
//! - OAuth1 request signing and the three-legged authorization handshake
//! - Optional response caching (in memory, on disk, or your own backend)
//! - Text node normalization, `{"_content": "x"}` comes back as `"x"`
//! - Person information and streaming photo searches
//!
//! *Unauthenticated calls only need the API key. Anything done on behalf of an account needs
//! the API secret and an access token, which can be obtained with
//! [`rest::Client::get_auth_url`] and [`rest::Client::retrieve_access_token`]*
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! flickr = "0.3.0"
//! ```
//!
//! ## Usage
//!
//! **You will need to acquire an API key/secret from Flickr prior to using the API**
//!
//! ```rust,no_run
//! use flickr::rest::{Client, Creds, FlickrError, MemoryCache, Person, PhotoSize};
//! use futures::{pin_mut, StreamExt};
//! use std::sync::Arc;
//!
//! async fn list_photos(api_key: &str, username: &str) -> Result<(), FlickrError> {
//!     // The API key is the only required field for public information
//!     let client = Client::new(Creds::from_tokens(api_key, None, None, None))
//!         .with_cache(Arc::new(MemoryCache::new()));
//!
//!     // Raw access to any method, the envelope comes back normalized
//!     let echo = client.send("test.echo", &[("foo", "bar".into())], false).await?;
//!     assert_eq!(echo["foo"], "bar");
//!
//!     // Typed access
//!     let person = Person::from_username(client.clone(), username).await?;
//!     let photos = person.public_photos(&["date_upload"]);
//!     pin_mut!(photos);
//!     while let Some(Ok(photo)) = photos.next().await {
//!         println!("{} {}", photo.title, photo.source_url(PhotoSize::Medium640));
//!     }
//!     Ok(())
//! }
//! ```
//!
pub mod rest;
