/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{StubTransport, stub_client};
    use flickr::rest::endpoints::{ENDPOINTS, Unwrap, lookup};
    use flickr::rest::{FlickrError, MemoryCache, Person, PhotoSearch, PhotoSize, SortMethod};
    use futures::{StreamExt, pin_mut};
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn table_has_unique_namespaced_methods() {
        let mut seen = HashSet::new();
        for endpoint in ENDPOINTS {
            assert!(endpoint.method.starts_with("flickr."), "{}", endpoint.method);
            assert!(seen.insert(endpoint.method), "duplicate {}", endpoint.method);
        }
    }

    #[test]
    fn lookup_accepts_short_names() {
        let endpoint = lookup("people.getInfo").unwrap();
        assert_eq!(endpoint.method, "flickr.people.getInfo");
        assert_eq!(endpoint.unwrap, Unwrap::Key("person"));
        assert!(lookup("people.doesNotExist").is_none());
    }

    #[tokio::test]
    async fn unknown_methods_are_rejected() {
        let stub = StubTransport::replying(r#"{"stat":"ok"}"#);
        let client = stub_client(&stub);

        let err = client.call("photos.teleport", &[]).await.unwrap_err();
        assert!(matches!(err, FlickrError::UnknownEndpoint(_)));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_required_argument_is_rejected() {
        let stub = StubTransport::replying(r#"{"stat":"ok"}"#);
        let client = stub_client(&stub);

        let err = client
            .call("people.getInfo", &[("user_id", "".into())])
            .await
            .unwrap_err();
        assert!(
            matches!(err, FlickrError::MissingParameter(ref m, ref p) if m == "flickr.people.getInfo" && p == "user_id")
        );
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn undeclared_argument_is_rejected() {
        let stub = StubTransport::replying(r#"{"stat":"ok"}"#);
        let client = stub_client(&stub);

        let err = client
            .call(
                "people.getInfo",
                &[("user_id", "12@N01".into()), ("colour", "blue".into())],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FlickrError::UnexpectedParameter(_, ref p) if p == "colour"));
    }

    #[tokio::test]
    async fn arguments_are_renamed_for_the_wire() {
        let stub = StubTransport::replying(
            r#"{"user":{"id":"12037949632@N01","nsid":"12037949632@N01","username":{"_content":"Stewart"}},"stat":"ok"}"#,
        );
        let client = stub_client(&stub);

        let user = client
            .call("people.findByEmail", &[("email", "stewart@example.com".into())])
            .await
            .unwrap();

        assert_eq!(
            user,
            json!({"id": "12037949632@N01", "nsid": "12037949632@N01", "username": "Stewart"})
        );
        let call = &stub.calls()[0];
        assert_eq!(call.form_value("find_email"), Some("stewart@example.com"));
        assert_eq!(call.form_value("email"), None);
    }

    #[tokio::test]
    async fn nested_paths_are_unwrapped() {
        let stub = StubTransport::replying(
            r#"{"photos":{"page":1,"photo":[{"id":"1"},{"id":"2"}]},"stat":"ok"}"#,
        );
        let client = stub_client(&stub);

        let photos = client.call("photos.getRecent", &[]).await.unwrap();
        assert_eq!(photos, json!([{"id": "1"}, {"id": "2"}]));
    }

    #[tokio::test]
    async fn missing_unwrap_key_is_an_error() {
        let stub = StubTransport::replying(r#"{"stat":"ok"}"#);
        let client = stub_client(&stub);

        let err = client
            .call("people.getInfo", &[("user_id", "12@N01".into())])
            .await
            .unwrap_err();
        assert!(matches!(err, FlickrError::ResponseMissing(_)));
    }

    #[tokio::test]
    async fn mutating_methods_skip_the_cache() {
        let stub = StubTransport::replying(r#"{"stat":"ok"}"#);
        let cache = Arc::new(MemoryCache::new());
        let client = stub_client(&stub).with_cache(cache.clone());

        for _ in 0..2 {
            let ok = client
                .call(
                    "photos.addTags",
                    &[("photo_id", "5".into()), ("tags", "sunset".into())],
                )
                .await
                .unwrap();
            assert_eq!(ok, json!(true));
        }
        assert_eq!(stub.call_count(), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn writes_without_an_envelope_are_not_successes() {
        for body in ["{}", "null"] {
            let stub = StubTransport::replying(body);
            let client = stub_client(&stub);

            let err = client
                .call("photos.delete", &[("photo_id", "5".into())])
                .await
                .unwrap_err();
            assert!(matches!(err, FlickrError::ApiResponseMalformed { .. }), "{}", body);
        }
    }

    #[tokio::test]
    async fn search_cannot_override_the_method() {
        let stub = StubTransport::replying(r#"{"stat":"ok","photos":{"page":1,"pages":1,"photo":[]}}"#);
        let client = stub_client(&stub).with_cache(Arc::new(MemoryCache::new()));

        let err = client
            .call(
                "photos.search",
                &[("method", "flickr.photos.delete".into()), ("format", "xml".into())],
            )
            .await
            .unwrap_err();

        assert!(
            matches!(err, FlickrError::ReservedParameter(ref m, _) if m == "flickr.photos.search")
        );
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn read_methods_use_the_cache() {
        let stub = StubTransport::replying(r#"{"stat":"ok","sizes":{"size":[]}}"#);
        let client = stub_client(&stub).with_cache(Arc::new(MemoryCache::new()));

        for _ in 0..2 {
            client
                .call("photos.getSizes", &[("photo_id", "5".into())])
                .await
                .unwrap();
        }
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn search_accepts_any_argument() {
        let stub = StubTransport::replying(r#"{"stat":"ok","photos":{"page":1,"pages":1,"photo":[]}}"#);
        let client = stub_client(&stub);

        client
            .call(
                "photos.search",
                &[("text", "harbour".into()), ("has_geo", true.into())],
            )
            .await
            .unwrap();

        let call = &stub.calls()[0];
        assert_eq!(call.form_value("text"), Some("harbour"));
        assert_eq!(call.form_value("has_geo"), Some("1"));
    }

    #[tokio::test]
    async fn photo_search_streams_every_page() {
        let stub = StubTransport::replying_in_order(&[
            r#"{"photos":{"page":1,"pages":"2","perpage":2,"total":"3","photo":[
                {"id":"1","owner":"a@N01","secret":"s1","server":"65535","farm":66,"title":"One","ispublic":1,"isfriend":0,"isfamily":0,"dateupload":"1700000000"},
                {"id":"2","owner":"a@N01","secret":"s2","server":"65535","farm":66,"title":"Two","ispublic":1,"isfriend":0,"isfamily":0,"dateupload":"1700000100"}
            ]},"stat":"ok"}"#,
            r#"{"photos":{"page":2,"pages":"2","perpage":2,"total":"3","photo":[
                {"id":"3","owner":"a@N01","secret":"s3","server":"65535","farm":66,"title":"Three","ispublic":0,"isfriend":1,"isfamily":0,"dateupload":"1700000200"}
            ]},"stat":"ok"}"#,
        ]);
        let client = stub_client(&stub);

        let photos = PhotoSearch::new()
            .text("harbour")
            .extras(&["date_upload"])
            .sort(SortMethod::DatePostedDesc)
            .per_page(2)
            .stream(client);
        pin_mut!(photos);
        let mut titles = Vec::new();
        while let Some(photo) = photos.next().await {
            let photo = photo.unwrap();
            assert!(photo.date_uploaded.is_some());
            titles.push(photo.title);
        }

        assert_eq!(titles, vec!["One", "Two", "Three"]);
        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].form_value("page"), Some("1"));
        assert_eq!(calls[1].form_value("page"), Some("2"));
        assert_eq!(calls[0].form_value("sort"), Some("date-posted-desc"));
        assert_eq!(calls[0].form_value("per_page"), Some("2"));
    }

    #[tokio::test]
    async fn photo_urls_follow_the_static_pattern() {
        let stub = StubTransport::replying(
            r#"{"photos":{"page":1,"pages":1,"photo":[{"id":"53","secret":"abc","server":"65535","title":"x"}]},"stat":"ok"}"#,
        );
        let photos = PhotoSearch::new().text("x").stream(stub_client(&stub));
        pin_mut!(photos);
        let photo = photos.next().await.unwrap().unwrap();

        assert_eq!(
            photo.source_url(PhotoSize::Medium),
            "https://live.staticflickr.com/65535/53_abc.jpg"
        );
        assert_eq!(
            photo.source_url(PhotoSize::Large),
            "https://live.staticflickr.com/65535/53_abc_b.jpg"
        );
    }

    #[tokio::test]
    async fn person_from_username() {
        let stub = StubTransport::replying_in_order(&[
            r#"{"user":{"id":"12@N01","nsid":"12@N01","username":{"_content":"bees"}},"stat":"ok"}"#,
            r#"{"person":{"id":"12@N01","nsid":"12@N01","ispro":0,"username":{"_content":"bees"},"realname":{"_content":""},"location":{"_content":"Hobart"},"photosurl":{"_content":"https://www.flickr.com/photos/bees/"},"photos":{"count":{"_content":"42"}}},"stat":"ok"}"#,
        ]);
        let client = stub_client(&stub);

        let person = Person::from_username(client, "bees").await.unwrap();

        assert_eq!(person.nsid, "12@N01");
        assert_eq!(person.username.as_deref(), Some("bees"));
        assert_eq!(person.real_name, None);
        assert_eq!(person.location.as_deref(), Some("Hobart"));
        assert!(!person.is_pro);
        assert_eq!(person.photo_count(), Some(42));
        assert_eq!(stub.calls()[1].form_value("user_id"), Some("12@N01"));
    }
}
