/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod api;
pub mod cache;
pub mod client;
pub mod endpoints;
pub mod errors;
mod macros;
pub mod normalize;
pub mod oauth;
pub mod params;
mod parsers;
pub mod person;
pub mod photo;
pub mod properties;

pub use api::*;
pub use cache::*;
pub use client::*;
pub use errors::*;
pub use oauth::{AccessToken, MemoryTokenStore, OAuthToken, Token, TokenStore};
pub use params::*;
pub use person::*;
pub use photo::*;
pub use properties::*;
