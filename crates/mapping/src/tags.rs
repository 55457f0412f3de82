//! Type-tag lookup with the recovery policy for unknown or unusable tags.
//!
//! Type tags never fail compilation. Anything that cannot be honoured falls
//! back to a plain string and is reported through `log::warn!`.

use xmlmap_types::{KeyKind, ValueKind};

/// Fallbacks applied when a type tag cannot be used as written.
pub struct TagFallback;

impl TagFallback {
    /// Used for value tags outside the vocabulary.
    pub const UNKNOWN: ValueKind = ValueKind::String;
    /// Used when `valuetype` or `keytype` is missing.
    pub const ABSENT: ValueKind = ValueKind::String;
    /// Used when a key tag names a kind that cannot produce a key.
    pub const NON_KEY: KeyKind = KeyKind::String;
}

/// Maps a `valuetype`/`keytype` tag to its kind, defaulting to `String`.
pub fn parse_type_tag(tag: &str) -> ValueKind {
    ValueKind::from_tag(tag).unwrap_or_else(|| {
        log::warn!(
            "Unknown type tag '{}', treating as '{}'",
            tag,
            TagFallback::UNKNOWN
        );
        TagFallback::UNKNOWN
    })
}

/// Resolves an optional `valuetype` attribute.
pub(crate) fn value_kind(tag: Option<&str>, key: &str) -> ValueKind {
    match tag {
        Some(tag) => parse_type_tag(tag),
        None => {
            log::warn!(
                "Missing valuetype for key '{}', treating as '{}'",
                key,
                TagFallback::ABSENT
            );
            TagFallback::ABSENT
        }
    }
}

/// Resolves an optional `keytype` attribute to a kind that can name a key.
pub(crate) fn key_kind(tag: Option<&str>, key: &str) -> KeyKind {
    let kind = match tag {
        Some(tag) => parse_type_tag(tag),
        None => {
            log::warn!(
                "Missing keytype for key '{}', treating as '{}'",
                key,
                TagFallback::ABSENT
            );
            TagFallback::ABSENT
        }
    };
    KeyKind::from_value_kind(kind).unwrap_or_else(|| {
        log::warn!(
            "Type '{}' cannot be used as keytype for key '{}', treating as '{}'",
            kind,
            key,
            TagFallback::NON_KEY
        );
        TagFallback::NON_KEY
    })
}
