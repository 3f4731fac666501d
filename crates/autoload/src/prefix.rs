//! Prefix derivation from directory names.
//!
//! These are pure string functions; the autoloader feeds them the directory
//! segments of each manifest entry (relative to the loaded directory).

use std::borrow::Cow;

/// Translate one directory name into a prefix segment.
///
/// With `route_params` enabled, `_id` becomes `:id`. A lone `_` has no
/// parameter name and is kept verbatim.
pub fn translate_segment(segment: &str, route_params: bool) -> Cow<'_, str> {
    if route_params {
        if let Some(name) = segment.strip_prefix('_') {
            if !name.is_empty() {
                return Cow::Owned(format!(":{name}"));
            }
        }
    }
    Cow::Borrowed(segment)
}

/// Build the prefix contributed by a chain of directory names.
///
/// Returns an empty string for a module that sits directly in the loaded
/// directory.
pub fn dir_prefix<'a, I>(dirs: I, route_params: bool) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for dir in dirs {
        out.push('/');
        out.push_str(&translate_segment(dir, route_params));
    }
    out
}

/// Join a prefix and a route path into a single router path.
///
/// Empty segments are collapsed and a trailing slash is dropped, so
/// `("/items", "/")` gives `/items` and `("", "/")` gives `/`.
pub fn join_path(prefix: &str, path: &str) -> String {
    let segments: Vec<&str> = prefix
        .split('/')
        .chain(path.split('/'))
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut out = String::with_capacity(prefix.len() + path.len() + 1);
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Whether the router would refuse to hold `a` and `b` at once.
///
/// Parameter names do not matter: `/items/:id` and `/items/:item_id`
/// collide. A catch-all collides with every other segment at its position
/// once the preceding segments match, so `/items/:id` and `/items/*rest`
/// collide too. A catch-all never matches the bare parent, so `/files` and
/// `/files/*rest` can live side by side.
pub fn routes_conflict(a: &str, b: &str) -> bool {
    let mut left = a.trim_end_matches('/').split('/');
    let mut right = b.trim_end_matches('/').split('/');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) => {
                if x.starts_with('*') || y.starts_with('*') {
                    return true;
                }
                let x_param = x.starts_with(':');
                let y_param = y.starts_with(':');
                if x_param != y_param || (!x_param && x != y) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Whether the router accepts `path` as a route.
///
/// Parameters need a name and a catch-all must be the last segment.
pub fn is_valid_route_path(path: &str) -> bool {
    if !path.starts_with('/') {
        return false;
    }
    let segments: Vec<&str> = path.split('/').skip(1).collect();
    segments.iter().enumerate().all(|(idx, segment)| {
        *segment != ":" && *segment != "*" && (!segment.starts_with('*') || idx + 1 == segments.len())
    })
}
