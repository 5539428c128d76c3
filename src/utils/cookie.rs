/// Looks up `name` in a `Cookie` header value (`a=1; b=2`) and percent-decodes it.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    let raw = header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))?;

    match urlencoding::decode(raw) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(raw.to_string()),
    }
}
