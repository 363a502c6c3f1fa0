/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::rest::ParamValue;
use serde::Serialize;
use strum_macros::{EnumString, IntoStaticStr};

/// Access level requested during authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Permission {
    #[default]
    Read,
    Write,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr)]
pub enum SafeSearch {
    #[strum(to_string = "1")]
    Safe,
    #[strum(to_string = "2")]
    Moderate,
    #[strum(to_string = "3")]
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr)]
pub enum ContentType {
    #[strum(to_string = "1")]
    Photos,
    #[strum(to_string = "2")]
    Screenshots,
    #[strum(to_string = "3")]
    Other,
    #[strum(to_string = "4")]
    PhotosAndScreenshots,
    #[strum(to_string = "5")]
    ScreenshotsAndOther,
    #[strum(to_string = "6")]
    PhotosAndOther,
    #[strum(to_string = "7")]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum SortMethod {
    #[strum(to_string = "date-posted-asc")]
    DatePostedAsc,
    #[strum(to_string = "date-posted-desc")]
    DatePostedDesc,
    #[strum(to_string = "date-taken-asc")]
    DateTakenAsc,
    #[strum(to_string = "date-taken-desc")]
    DateTakenDesc,
    #[strum(to_string = "interestingness-desc")]
    InterestingnessDesc,
    #[strum(to_string = "interestingness-asc")]
    InterestingnessAsc,
    #[strum(to_string = "relevance")]
    Relevance,
}

/// Size suffixes for static photo urls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, IntoStaticStr)]
pub enum PhotoSize {
    #[strum(to_string = "s")]
    SmallSquare,
    #[strum(to_string = "q")]
    LargeSquare,
    #[strum(to_string = "t")]
    Thumbnail,
    #[strum(to_string = "m")]
    Small,
    #[strum(to_string = "n")]
    Small320,
    #[default]
    #[strum(to_string = "")]
    Medium,
    #[strum(to_string = "z")]
    Medium640,
    #[strum(to_string = "c")]
    Medium800,
    #[strum(to_string = "b")]
    Large,
}

macro_rules! param_value_from_wire_enum {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    let wire: &'static str = v.into();
                    wire.into()
                }
            }
        )*
    };
}

param_value_from_wire_enum!(Permission, SafeSearch, ContentType, SortMethod);
