/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Static description of the API methods and the generic entry point that drives them.
//!
//! Each [`Endpoint`] maps the argument names a caller uses onto the names sent over the wire
//! and says which part of the response is interesting. Adding a method is a matter of adding
//! a row to [`ENDPOINTS`].

use crate::rest::client::namespaced;
use crate::rest::errors::FlickrError;
use crate::rest::{ApiParams, Client, ParamValue};
use serde_json::Value;

/// A declared argument of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    /// Name the caller uses
    pub name: &'static str,
    /// Name sent to the API
    pub wire: &'static str,
    pub required: bool,
}

const fn req(name: &'static str) -> Param {
    Param {
        name,
        wire: name,
        required: true,
    }
}

const fn opt(name: &'static str) -> Param {
    Param {
        name,
        wire: name,
        required: false,
    }
}

const fn renamed(name: &'static str, wire: &'static str, required: bool) -> Param {
    Param {
        name,
        wire,
        required,
    }
}

/// What a call hands back from the normalized response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwrap {
    /// The whole envelope
    Whole,
    /// One nested value, addressed with a dotted path such as `photos` or `user.username`
    Key(&'static str),
    /// `true`; failures are reported as errors
    Success,
}

impl Unwrap {
    pub fn apply(&self, method: &str, mut resp: Value) -> Result<Value, FlickrError> {
        match self {
            Unwrap::Whole => Ok(resp),
            Unwrap::Success => Ok(Value::Bool(true)),
            Unwrap::Key(path) => {
                let pointer = format!("/{}", path.replace('.', "/"));
                resp.pointer_mut(&pointer)
                    .map(Value::take)
                    .ok_or_else(|| FlickrError::ResponseMissing(format!("{method}: {path}")))
            }
        }
    }
}

/// One API method.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub method: &'static str,
    pub params: &'static [Param],
    pub unwrap: Unwrap,
    /// Mutating methods bypass the cache in both directions
    pub mutates: bool,
    /// Accepts arguments beyond the declared ones (search style methods)
    pub open: bool,
}

macro_rules! endpoint {
    (@mutates write) => {
        true
    };
    (@mutates $kind:ident) => {
        false
    };
    (@open search) => {
        true
    };
    (@open $kind:ident) => {
        false
    };
    ($kind:ident $method:literal, [$($param:expr),* $(,)?], $unwrap:expr $(,)?) => {
        Endpoint {
            method: $method,
            params: &[$($param),*],
            unwrap: $unwrap,
            mutates: endpoint!(@mutates $kind),
            open: endpoint!(@open $kind),
        }
    };
}

const PAGING: [Param; 3] = [opt("extras"), opt("per_page"), opt("page")];

use Unwrap::{Key, Success, Whole};

pub static ENDPOINTS: &[Endpoint] = &[
    // test
    endpoint!(search "flickr.test.echo", [], Whole),
    endpoint!(read "flickr.test.login", [], Key("user")),
    endpoint!(read "flickr.test.null", [], Success),
    // auth
    endpoint!(read "flickr.auth.oauth.checkToken", [], Key("oauth")),
    // people
    endpoint!(read "flickr.people.findByEmail",
        [renamed("email", "find_email", true)],
        Key("user"),
    ),
    endpoint!(read "flickr.people.findByUsername", [req("username")], Key("user")),
    endpoint!(read "flickr.people.getInfo", [req("user_id")], Key("person")),
    endpoint!(read "flickr.people.getGroups",
        [req("user_id"), opt("extras")],
        Key("groups"),
    ),
    endpoint!(read "flickr.people.getLimits", [], Key("person")),
    endpoint!(search "flickr.people.getPhotos",
        [req("user_id"), opt("safe_search"), opt("content_type"), opt("privacy_filter")],
        Key("photos"),
    ),
    endpoint!(read "flickr.people.getPublicPhotos",
        [
            req("user_id"),
            opt("safe_search"),
            PAGING[0],
            PAGING[1],
            PAGING[2],
        ],
        Key("photos"),
    ),
    endpoint!(read "flickr.people.getPublicGroups",
        [req("user_id"), opt("invitation_only")],
        Key("groups"),
    ),
    endpoint!(read "flickr.people.getUploadStatus", [], Key("user")),
    // photos
    endpoint!(write "flickr.photos.addTags",
        [req("photo_id"), req("tags")],
        Success,
    ),
    endpoint!(write "flickr.photos.delete", [req("photo_id")], Success),
    endpoint!(read "flickr.photos.getAllContexts", [req("photo_id")], Whole),
    endpoint!(read "flickr.photos.getContext", [req("photo_id")], Whole),
    endpoint!(read "flickr.photos.getCounts",
        [opt("dates"), opt("taken_dates")],
        Key("photocounts.photocount"),
    ),
    endpoint!(read "flickr.photos.getExif",
        [req("photo_id"), opt("secret")],
        Key("photo"),
    ),
    endpoint!(read "flickr.photos.getFavorites",
        [req("photo_id"), opt("page"), opt("per_page")],
        Key("photo"),
    ),
    endpoint!(read "flickr.photos.getInfo",
        [req("photo_id"), opt("secret")],
        Key("photo"),
    ),
    endpoint!(read "flickr.photos.getPerms", [req("photo_id")], Key("perms")),
    endpoint!(read "flickr.photos.getRecent",
        [PAGING[0], PAGING[1], PAGING[2]],
        Key("photos.photo"),
    ),
    endpoint!(read "flickr.photos.getSizes", [req("photo_id")], Key("sizes")),
    endpoint!(read "flickr.photos.recentlyUpdated",
        [req("min_date"), PAGING[0], PAGING[1], PAGING[2]],
        Key("photos"),
    ),
    endpoint!(write "flickr.photos.removeTag", [req("tag_id")], Success),
    endpoint!(search "flickr.photos.search", [], Key("photos")),
    endpoint!(write "flickr.photos.setContentType",
        [req("photo_id"), req("content_type")],
        Success,
    ),
    endpoint!(write "flickr.photos.setDates",
        [
            req("photo_id"),
            opt("date_posted"),
            opt("date_taken"),
            opt("date_taken_granularity"),
        ],
        Success,
    ),
    endpoint!(write "flickr.photos.setMeta",
        [req("photo_id"), opt("title"), opt("description")],
        Success,
    ),
    endpoint!(write "flickr.photos.setTags",
        [req("photo_id"), req("tags")],
        Success,
    ),
    // photos.comments
    endpoint!(write "flickr.photos.comments.addComment",
        [req("photo_id"), req("comment_text")],
        Key("comment"),
    ),
    endpoint!(write "flickr.photos.comments.deleteComment",
        [req("comment_id")],
        Success,
    ),
    endpoint!(read "flickr.photos.comments.getList",
        [req("photo_id"), opt("min_comment_date"), opt("max_comment_date")],
        Key("comments"),
    ),
    // photosets
    endpoint!(write "flickr.photosets.create",
        [req("title"), opt("description"), req("primary_photo_id")],
        Key("photoset"),
    ),
    endpoint!(write "flickr.photosets.delete", [req("photoset_id")], Success),
    endpoint!(read "flickr.photosets.getInfo",
        [req("photoset_id"), req("user_id")],
        Key("photoset"),
    ),
    endpoint!(read "flickr.photosets.getList",
        [opt("user_id"), opt("page"), opt("per_page")],
        Key("photosets"),
    ),
    endpoint!(read "flickr.photosets.getPhotos",
        [
            req("photoset_id"),
            req("user_id"),
            opt("privacy_filter"),
            opt("media"),
            PAGING[0],
            PAGING[1],
            PAGING[2],
        ],
        Key("photoset"),
    ),
    endpoint!(write "flickr.photosets.addPhoto",
        [req("photoset_id"), req("photo_id")],
        Success,
    ),
    endpoint!(write "flickr.photosets.removePhoto",
        [req("photoset_id"), req("photo_id")],
        Success,
    ),
    // favorites
    endpoint!(write "flickr.favorites.add", [req("photo_id")], Success),
    endpoint!(write "flickr.favorites.remove", [req("photo_id")], Success),
    endpoint!(read "flickr.favorites.getList",
        [
            opt("user_id"),
            opt("min_fave_date"),
            opt("max_fave_date"),
            PAGING[0],
            PAGING[1],
            PAGING[2],
        ],
        Key("photos"),
    ),
    endpoint!(read "flickr.favorites.getPublicList",
        [
            req("user_id"),
            opt("min_fave_date"),
            opt("max_fave_date"),
            PAGING[0],
            PAGING[1],
            PAGING[2],
        ],
        Key("photos"),
    ),
    // tags
    endpoint!(read "flickr.tags.getListPhoto", [req("photo_id")], Key("photo.tags")),
    endpoint!(read "flickr.tags.getListUser", [opt("user_id")], Key("who.tags")),
    endpoint!(read "flickr.tags.getHotList",
        [opt("period"), opt("count")],
        Key("hottags"),
    ),
    endpoint!(read "flickr.tags.getRelated", [req("tag")], Key("tags")),
    endpoint!(read "flickr.tags.getMostFrequentlyUsed", [], Key("who.tags")),
    // urls
    endpoint!(read "flickr.urls.getUserPhotos", [opt("user_id")], Key("user.url")),
    endpoint!(read "flickr.urls.getUserProfile", [opt("user_id")], Key("user.url")),
    endpoint!(read "flickr.urls.lookupUser", [req("url")], Key("user")),
    endpoint!(read "flickr.urls.lookupGroup", [req("url")], Key("group")),
    // groups
    endpoint!(read "flickr.groups.getInfo",
        [req("group_id"), opt("group_path_alias"), opt("lang")],
        Key("group"),
    ),
    endpoint!(read "flickr.groups.search",
        [req("text"), opt("per_page"), opt("page")],
        Key("groups"),
    ),
    endpoint!(write "flickr.groups.join",
        [req("group_id"), opt("accept_rules")],
        Success,
    ),
    endpoint!(write "flickr.groups.leave",
        [req("group_id"), opt("delete_photos")],
        Success,
    ),
    // galleries
    endpoint!(read "flickr.galleries.getInfo",
        [req("gallery_id")],
        Key("gallery"),
    ),
    endpoint!(read "flickr.galleries.getList",
        [req("user_id"), opt("per_page"), opt("page")],
        Key("galleries"),
    ),
    endpoint!(read "flickr.galleries.getPhotos",
        [req("gallery_id"), PAGING[0], PAGING[1], PAGING[2]],
        Key("photos"),
    ),
    // contacts
    endpoint!(read "flickr.contacts.getList",
        [opt("filter"), opt("page"), opt("per_page"), opt("sort")],
        Key("contacts"),
    ),
    endpoint!(read "flickr.contacts.getPublicList",
        [req("user_id"), opt("page"), opt("per_page")],
        Key("contacts"),
    ),
];

/// Finds the endpoint for `method`, with or without the `flickr.` prefix.
pub fn lookup(method: &str) -> Option<&'static Endpoint> {
    let method = namespaced(method);
    ENDPOINTS.iter().find(|e| e.method == method)
}

impl Endpoint {
    /// Maps caller argument names to wire names and checks required arguments are present.
    pub fn wire_params<'a>(
        &self,
        args: &ApiParams<'a>,
    ) -> Result<Vec<(&'a str, ParamValue)>, FlickrError> {
        let mut wire = Vec::with_capacity(args.len());
        for (name, value) in args {
            match self.params.iter().find(|p| p.name == *name) {
                Some(param) => wire.push((param.wire, value.clone())),
                None if self.open => wire.push((*name, value.clone())),
                None => {
                    return Err(FlickrError::UnexpectedParameter(
                        self.method.to_string(),
                        name.to_string(),
                    ));
                }
            }
        }
        for param in self.params.iter().filter(|p| p.required) {
            let supplied = args
                .iter()
                .any(|(name, value)| *name == param.name && !value.is_empty());
            if !supplied {
                return Err(FlickrError::MissingParameter(
                    self.method.to_string(),
                    param.name.to_string(),
                ));
            }
        }
        Ok(wire)
    }
}

impl Client {
    /// Calls a method from the endpoint table and returns the part of the response it names.
    ///
    /// ```no_run
    /// # async fn run(client: flickr::rest::Client) -> Result<(), flickr::rest::FlickrError> {
    /// let user = client
    ///     .call("people.findByUsername", &[("username", "apidemo".into())])
    ///     .await?;
    /// println!("NSID: {}", user["nsid"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(&self, method: &str, args: &ApiParams<'_>) -> Result<Value, FlickrError> {
        let endpoint = lookup(method).ok_or_else(|| FlickrError::UnknownEndpoint(method.into()))?;
        let wire = endpoint.wire_params(args)?;
        let resp = self.send(endpoint.method, &wire, endpoint.mutates).await?;
        endpoint.unwrap.apply(endpoint.method, resp)
    }
}
