//! Route prefix matching.
//!
//! A pattern matches a route when the route equals the pattern or continues it
//! at a `/` segment boundary, so `/admin` covers `/admin/users` but not
//! `/administrator`. The bare root `/` covers the whole namespace.

use std::borrow::Cow;

/// Strips the query string and fragment, then rebuilds the path from its
/// segments: empty and `.` segments are dropped and `..` pops the previous
/// segment, clamping at the root. The result is absolute with no trailing
/// slash, so `/(tabs)//forum` and `/(tabs)/x/../forum` both read as
/// `/(tabs)/forum`. An empty route normalizes to `/`.
pub fn normalize(route: &str) -> Cow<'_, str> {
    let path = route
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return Cow::Borrowed("/");
    }

    let canonical = format!("/{}", segments.join("/"));
    if canonical == path {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(canonical)
    }
}

/// Returns true when `pattern` covers the already-normalized `route`.
pub fn matches(pattern: &str, route: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    if pattern.is_empty() {
        return true;
    }
    match route.strip_prefix(pattern) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// longest_match
///
/// Finds the most specific pattern in `patterns` covering `route`. Specificity
/// is pattern length; the list's outcome is the same whichever pattern wins, the
/// winner is reported for diagnostics.
pub fn longest_match<'a, I>(patterns: I, route: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    patterns
        .into_iter()
        .filter(|pattern| matches(pattern, route))
        .max_by_key(|pattern| pattern.len())
}
