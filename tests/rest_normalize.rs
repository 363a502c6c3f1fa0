/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

#[cfg(test)]
mod test {
    use chrono::Duration;
    use flickr::rest::normalize::clean_text_nodes;
    use flickr::rest::{
        CacheBackend, FileCache, MemoryCache, ParamValue, cache_key, comma_list,
        normalize_params, tag_list,
    };
    use serde_json::{Value, json};

    fn samples() -> Vec<Value> {
        vec![
            json!(null),
            json!(42),
            json!("plain"),
            json!({}),
            json!([]),
            json!({"_content": "root"}),
            json!({"_content": {"_content": "nested"}}),
            json!({"_content": {"title": {"_content": "inner"}}}),
            json!({"_content": "x", "other": 1}),
            json!({"photos": {"photo": [{"title": {"_content": "a"}}, {"title": {"_content": ""}}]}}),
            json!({"a": {"b": {"c": {"_content": 1}}}, "d": [{}, []]}),
        ]
    }

    #[test]
    fn text_nodes_collapse_at_every_depth() {
        let resp = json!({
            "stat": "ok",
            "person": {
                "username": {"_content": "bees"},
                "photos": {"count": {"_content": 12}, "firstdate": {"_content": ""}},
            },
            "tags": [{"raw": [{"_content": "sunset"}]}],
        });

        assert_eq!(
            clean_text_nodes(resp),
            json!({
                "stat": "ok",
                "person": {"username": "bees", "photos": {"count": 12, "firstdate": ""}},
                "tags": [{"raw": ["sunset"]}],
            })
        );
    }

    #[test]
    fn root_wrapper_collapses() {
        assert_eq!(clean_text_nodes(json!({"_content": "root"})), json!("root"));
    }

    #[test]
    fn scalars_and_empty_containers_pass_through() {
        for v in [json!(null), json!(true), json!(3.5), json!("s"), json!({}), json!([])] {
            assert_eq!(clean_text_nodes(v.clone()), v);
        }
    }

    #[test]
    fn text_key_with_siblings_is_kept() {
        let v = json!({"_content": "x", "other": {"_content": "y"}});
        assert_eq!(clean_text_nodes(v), json!({"_content": "x", "other": "y"}));
    }

    #[test]
    fn key_order_is_preserved() {
        let v = json!({"zeta": {"_content": 1}, "alpha": 2, "mid": {"_content": 3}});
        let keys: Vec<String> = clean_text_nodes(v)
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        for v in samples() {
            let once = clean_text_nodes(v.clone());
            assert_eq!(clean_text_nodes(once.clone()), once, "input: {}", v);
        }
    }

    #[test]
    fn empty_params_are_dropped() {
        let params: Vec<(&str, ParamValue)> = vec![
            ("user_id", "12@N01".into()),
            ("extras", "".into()),
            ("page", None::<u32>.into()),
            ("per_page", Some(50u32).into()),
            ("is_public", false.into()),
        ];
        let normalized = normalize_params(&params);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized["user_id"], "12@N01");
        assert_eq!(normalized["per_page"], "50");
        assert_eq!(normalized["is_public"], "0");
    }

    #[test]
    fn cache_key_ignores_order_and_empties() {
        let a = normalize_params(&[("a", "1".into()), ("b", "2".into())]);
        let b = normalize_params(&[
            ("b", "2".into()),
            ("skip", "".into()),
            ("a", "1".into()),
            ("gone", ParamValue::none()),
        ]);
        assert_eq!(cache_key("flickr.test.echo", &a), cache_key("flickr.test.echo", &b));
    }

    #[test]
    fn cache_key_depends_on_method_and_values() {
        let p = normalize_params(&[("a", "1".into())]);
        let q = normalize_params(&[("a", "2".into())]);
        assert_ne!(cache_key("flickr.test.echo", &p), cache_key("flickr.test.login", &p));
        assert_ne!(cache_key("flickr.test.echo", &p), cache_key("flickr.test.echo", &q));
        // Field boundaries matter
        let joined = normalize_params(&[("ab", "c".into())]);
        let split = normalize_params(&[("a", "bc".into())]);
        assert_ne!(cache_key("m", &joined), cache_key("m", &split));
        assert_eq!(cache_key("m", &p).len(), 32);
    }

    #[test]
    fn tags_are_quoted_when_needed() {
        assert_eq!(
            tag_list(&["sunset", "new york", "say \"cheese\"", ""]),
            "sunset \"new york\" \"say cheese\""
        );
    }

    #[test]
    fn comma_lists_skip_blanks() {
        assert_eq!(comma_list(&["date_upload", " ", "tags "]), "date_upload,tags");
        assert_eq!(comma_list::<&str>(&[]), "");
    }

    #[test]
    fn memory_cache_honours_ttl() {
        let cache = MemoryCache::new();
        cache.put("live", "body", Duration::seconds(60)).unwrap();
        cache.put("dead", "body", Duration::seconds(-1)).unwrap();

        assert_eq!(cache.get("live").unwrap().as_deref(), Some("body"));
        assert_eq!(cache.get("dead").unwrap(), None);
        assert_eq!(cache.get("never").unwrap(), None);
    }

    #[test]
    fn memory_cache_sweeps_expired_entries_on_write() {
        let cache = MemoryCache::new();
        for key in ["a", "b", "c"] {
            cache.put(key, "body", Duration::seconds(-1)).unwrap();
        }
        cache.put("fresh", "body", Duration::seconds(60)).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh").unwrap().as_deref(), Some("body"));
    }

    #[test]
    fn file_cache_persists_between_instances() {
        let dir = std::env::temp_dir().join(format!("flickr-rs-cache-{}", std::process::id()));
        let key = cache_key("flickr.test.echo", &normalize_params(&[("foo", "bar".into())]));

        FileCache::new(&dir)
            .unwrap()
            .put(&key, r#"{"stat":"ok"}"#, Duration::seconds(60))
            .unwrap();
        let reopened = FileCache::new(&dir).unwrap();
        assert_eq!(reopened.get(&key).unwrap().as_deref(), Some(r#"{"stat":"ok"}"#));

        reopened.put(&key, "stale", Duration::seconds(-1)).unwrap();
        assert_eq!(reopened.get(&key).unwrap(), None);

        std::fs::remove_dir_all(&dir).ok();
    }
}
