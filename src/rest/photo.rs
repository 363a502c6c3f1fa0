/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::errors::FlickrError;
use crate::rest::macros::stream_photo_pages;
use crate::rest::params::{comma_list, tag_list};
use crate::rest::parsers::{from_flag, from_num_or_str, from_unix_timestamp};
use crate::rest::{
    Client, ContentType, ParamValue, PhotoSize, STATIC_PHOTO_ORIGIN, SafeSearch, SortMethod,
};
use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::Deserialize;
use serde_json::Value;

/// A photo as returned in photo listings (search, photostreams, favorites).
///
/// See [Flickr API Docs](https://www.flickr.com/services/api/flickr.photos.search.html) for
/// details on the individual fields. Fields only present when requested through `extras`
/// are optional.
#[derive(Deserialize, Debug, Clone)]
pub struct Photo {
    #[serde(skip)]
    pub(crate) client: Option<Client>,

    pub id: String,

    #[serde(default)]
    pub owner: Option<String>,

    pub secret: String,

    pub server: String,

    #[serde(default)]
    pub farm: Option<u64>,

    #[serde(default)]
    pub title: String,

    #[serde(default, rename = "ispublic", deserialize_with = "from_flag")]
    pub is_public: bool,

    #[serde(default, rename = "isfriend", deserialize_with = "from_flag")]
    pub is_friend: bool,

    #[serde(default, rename = "isfamily", deserialize_with = "from_flag")]
    pub is_family: bool,

    // Extras
    #[serde(default, rename = "ownername")]
    pub owner_name: Option<String>,

    #[serde(default, rename = "dateupload", deserialize_with = "from_unix_timestamp")]
    pub date_uploaded: Option<DateTime<Utc>>,

    #[serde(default, rename = "datetaken")]
    pub date_taken: Option<String>,

    #[serde(default)]
    pub tags: Option<String>,
}

impl Photo {
    /// Url of the image file at the requested size.
    pub fn source_url(&self, size: PhotoSize) -> String {
        let suffix: &'static str = size.into();
        if suffix.is_empty() {
            format!(
                "{}/{}/{}_{}.jpg",
                STATIC_PHOTO_ORIGIN, self.server, self.id, self.secret
            )
        } else {
            format!(
                "{}/{}/{}_{}_{}.jpg",
                STATIC_PHOTO_ORIGIN, self.server, self.id, self.secret, suffix
            )
        }
    }

    /// Full details for this photo (`flickr.photos.getInfo`).
    pub async fn info(&self) -> Result<Value, FlickrError> {
        let client = self.client.as_ref().ok_or(FlickrError::ClientNotFound())?;
        client
            .call(
                "photos.getInfo",
                &[
                    ("photo_id", self.id.as_str().into()),
                    ("secret", self.secret.as_str().into()),
                ],
            )
            .await
    }

    /// Available sizes for this photo (`flickr.photos.getSizes`).
    pub async fn sizes(&self) -> Result<Value, FlickrError> {
        let client = self.client.as_ref().ok_or(FlickrError::ClientNotFound())?;
        client
            .call("photos.getSizes", &[("photo_id", self.id.as_str().into())])
            .await
    }

    /// Adds tags to this photo. Requires write permission.
    pub async fn add_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<bool, FlickrError> {
        let client = self.client.as_ref().ok_or(FlickrError::ClientNotFound())?;
        let resp = client
            .call(
                "photos.addTags",
                &[
                    ("photo_id", self.id.as_str().into()),
                    ("tags", tag_list(tags).into()),
                ],
            )
            .await?;
        Ok(resp.as_bool().unwrap_or_default())
    }
}

// One page of a photo listing
#[derive(Deserialize, Debug)]
pub(crate) struct PhotoPage {
    #[serde(default, deserialize_with = "from_num_or_str")]
    pub(crate) pages: u64,

    #[serde(default)]
    pub(crate) photo: Vec<Photo>,
}

/// Arguments for `flickr.photos.search`.
///
/// ```no_run
/// # async fn run(client: flickr::rest::Client) {
/// use flickr::rest::{PhotoSearch, SortMethod};
/// use futures::{pin_mut, StreamExt};
///
/// let photos = PhotoSearch::new()
///     .text("harbour")
///     .sort(SortMethod::InterestingnessDesc)
///     .stream(client);
/// pin_mut!(photos);
/// while let Some(Ok(photo)) = photos.next().await {
///     println!("{}", photo.title);
/// }
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhotoSearch {
    args: Vec<(&'static str, ParamValue)>,
}

impl PhotoSearch {
    pub fn new() -> Self {
        Self::default()
    }

    fn arg(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.args.retain(|(n, _)| *n != name);
        self.args.push((name, value.into()));
        self
    }

    pub fn user_id(self, user_id: &str) -> Self {
        self.arg("user_id", user_id)
    }

    pub fn text(self, text: &str) -> Self {
        self.arg("text", text)
    }

    pub fn tags<S: AsRef<str>>(self, tags: &[S]) -> Self {
        self.arg("tags", comma_list(tags))
    }

    /// Require every tag to match instead of any.
    pub fn all_tags(self) -> Self {
        self.arg("tag_mode", "all")
    }

    pub fn extras<S: AsRef<str>>(self, extras: &[S]) -> Self {
        self.arg("extras", comma_list(extras))
    }

    pub fn sort(self, sort: SortMethod) -> Self {
        self.arg("sort", sort)
    }

    pub fn safe_search(self, safe_search: SafeSearch) -> Self {
        self.arg("safe_search", safe_search)
    }

    pub fn content_type(self, content_type: ContentType) -> Self {
        self.arg("content_type", content_type)
    }

    pub fn min_upload_date(self, date: DateTime<Utc>) -> Self {
        self.arg("min_upload_date", date.timestamp())
    }

    pub fn max_upload_date(self, date: DateTime<Utc>) -> Self {
        self.arg("max_upload_date", date.timestamp())
    }

    pub fn per_page(self, per_page: u32) -> Self {
        self.arg("per_page", per_page)
    }

    /// Any other argument the search method accepts.
    pub fn param(self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.arg(name, value)
    }

    /// Streams every matching photo, fetching pages as needed.
    pub fn stream(self, client: Client) -> impl Stream<Item = Result<Photo, FlickrError>> {
        let args = self.args;
        stream_photo_pages!(Some(client), "flickr.photos.search", args)
    }
}
