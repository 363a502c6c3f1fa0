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
use flickr::rest::{Client, Creds, Permission};
use std::io::{self, BufRead, Write};

// Walks through the out-of-band OAuth handshake and prints the access token to save
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let api_key = std::env::var("FLICKR_API_KEY")?;
    let api_secret = std::env::var("FLICKR_API_SECRET")?;
    let client = Client::new(Creds::from_tokens(&api_key, Some(&api_secret), None, None));

    let url = client.get_auth_url(Permission::Read, None).await?;
    println!("Open this url and authorize the application:\n\n  {}\n", url);
    print!("Enter the verification code: ");
    io::stdout().flush()?;

    let mut verifier = String::new();
    io::stdin().lock().read_line(&mut verifier)?;
    let access = client.retrieve_access_token(verifier.trim(), None).await?;

    println!(
        "Authorized as {}",
        access.username.as_deref().unwrap_or("(unknown)")
    );
    println!("FLICKR_ACCESS_TOKEN={}", access.oauth.token);
    println!("FLICKR_ACCESS_SECRET={}", access.oauth.secret);
    Ok(())
}
