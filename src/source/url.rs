//! URL helpers shared by the sites.

use std::borrow::Cow;

/// True for `http://` and `https://` URLs.
pub fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// The fragment identifier after `#`, if any.
pub fn fragment(url: &str) -> Option<&str> {
    url.split_once('#').map(|(_, fragment)| fragment)
}

/// The URL without its fragment identifier.
pub fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}

/// Percent-decode, treating `+` as a space. Invalid UTF-8 is left as is.
pub fn decode(text: &str) -> Cow<'_, str> {
    if !text.contains(['%', '+']) {
        return Cow::Borrowed(text);
    }
    let spaced = text.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}

/// True if the text carries a `%XX` escape.
pub fn is_encoded(text: &str) -> bool {
    text.as_bytes()
        .windows(3)
        .any(|w| w[0] == b'%' && w[1].is_ascii_hexdigit() && w[2].is_ascii_hexdigit())
}

/// Percent-encode a query value, spaces as `+`.
pub fn encode_query_value(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Percent-encode the `query` part of `url` unless the URL is already
/// encoded. `+` separators are kept.
pub fn encode_url_query(url: &str, query: &str) -> String {
    if is_encoded(url) || query.is_empty() {
        return url.to_string();
    }
    let encoded = query
        .split('+')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("+");
    url.replacen(query, &encoded, 1)
}

/// Resolve `href` against `base`.
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    let base = reqwest::Url::parse(base).ok()?;
    base.join(href).ok().map(String::from)
}
