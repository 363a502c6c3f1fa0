/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate flickr;

use anyhow::Result;
use dotenvy::dotenv;
use flickr::rest::{Client, Creds, FileCache};
use std::sync::Arc;
use std::time::Instant;

// Sends the same request three times, first without and then with a cache
async fn send_requests(client: &Client) -> Result<()> {
    for i in 1..=3 {
        let start = Instant::now();
        client.send("flickr.test.echo", &[], false).await?;
        println!("  {}.  {:.3}", i, start.elapsed().as_secs_f64());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let api_key = std::env::var("FLICKR_API_KEY")?;
    let api_secret = std::env::var("FLICKR_API_SECRET").ok();
    let client = Client::new(Creds::from_tokens(&api_key, api_secret.as_deref(), None, None));

    println!("No caching:");
    send_requests(&client).await?;

    let cache_dir = std::env::temp_dir().join("flickr-rs-demo-cache");
    let client = client.with_cache(Arc::new(FileCache::new(cache_dir)?));

    println!("With caching:");
    send_requests(&client).await?;
    Ok(())
}
