/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::macros::{obj_from_method, stream_photo_pages};
use crate::rest::params::comma_list;
use crate::rest::parsers::{from_empty_str_to_none, from_flag, from_num_or_str};
use crate::rest::photo::{Photo, PhotoPage};
use crate::rest::{Client, ParamValue};
use async_stream::try_stream;
use futures::Stream;
use serde::Deserialize;

/// Holds information returned from `flickr.people.getInfo`.
///
/// See [Flickr API Docs](https://www.flickr.com/services/api/flickr.people.getInfo.html) for
/// more details on the individual fields.
#[derive(Deserialize, Debug, Clone)]
pub struct Person {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub nsid: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, rename = "realname", deserialize_with = "from_empty_str_to_none")]
    pub real_name: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "from_empty_str_to_none")]
    pub description: Option<String>,

    #[serde(default, rename = "photosurl")]
    pub photos_url: Option<String>,

    #[serde(default, rename = "profileurl")]
    pub profile_url: Option<String>,

    #[serde(default, rename = "ispro", deserialize_with = "from_flag")]
    pub is_pro: bool,

    #[serde(default)]
    photos: Option<PersonPhotos>,
}

impl Person {
    /// Returns information for the specified user NSID
    pub async fn from_id(client: Client, user_id: &str) -> Result<Self, FlickrError> {
        obj_from_method!(
            client,
            "people.getInfo",
            &[("user_id", user_id.into())],
            Person
        )
    }

    /// Looks a user up by username and returns their information
    pub async fn from_username(client: Client, username: &str) -> Result<Self, FlickrError> {
        let user = client
            .call("people.findByUsername", &[("username", username.into())])
            .await?;
        let nsid = nsid_of(&user)?;
        Self::from_id(client, &nsid).await
    }

    /// Looks a user up by email address and returns their information
    pub async fn from_email(client: Client, email: &str) -> Result<Self, FlickrError> {
        let user = client
            .call("people.findByEmail", &[("email", email.into())])
            .await?;
        let nsid = nsid_of(&user)?;
        Self::from_id(client, &nsid).await
    }

    /// Number of photos in the user's photostream, if reported
    pub fn photo_count(&self) -> Option<u64> {
        self.photos.as_ref().map(|p| p.count)
    }

    /// Streams the user's public photos, optionally with extra fields.
    pub fn public_photos<S: AsRef<str>>(
        &self,
        extras: &[S],
    ) -> impl Stream<Item = Result<Photo, FlickrError>> {
        let args: Vec<(&'static str, ParamValue)> = vec![
            ("user_id", self.nsid.clone().into()),
            ("extras", comma_list(extras).into()),
        ];
        let client = self.client.clone();
        stream_photo_pages!(client, "flickr.people.getPublicPhotos", args)
    }
}

fn nsid_of(user: &serde_json::Value) -> Result<String, FlickrError> {
    user.get("nsid")
        .or_else(|| user.get("id"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| FlickrError::ResponseMissing("user.nsid".to_string()))
}

#[derive(Deserialize, Debug, Clone)]
struct PersonPhotos {
    #[serde(default, deserialize_with = "from_num_or_str")]
    count: u64,
}
