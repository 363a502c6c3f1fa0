/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

macro_rules! obj_from_method {
    ( $c:expr, $method:expr, $params:expr, $rt: ty) => {{
        let value = $c.call($method, $params).await?;
        serde_json::from_value::<$rt>(value)
            .map(|mut v| {
                v.client = Some($c.clone());
                v
            })
            .map_err(FlickrError::from)
    }};
}

macro_rules! stream_photo_pages {
    ( $c:expr, $method:expr, $params:expr) => {{
        try_stream! {
            let client = $c.ok_or(FlickrError::ClientNotFound())?;
            let mut page: u64 = 1;
            loop {
                let mut args = $params.clone();
                args.push(("page", page.into()));
                let resp = client.call($method, &args).await?;
                let resp: PhotoPage = serde_json::from_value(resp)?;
                let last_page = resp.pages;
                for mut photo in resp.photo {
                    photo.client = Some(client.clone());
                    yield photo
                }

                if page >= last_page {
                    break;
                }
                page += 1;
            }
        }
    }};
}

pub(crate) use {obj_from_method, stream_photo_pages};
