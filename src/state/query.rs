use std::collections::HashMap;
use url::form_urlencoded;

/// Parses a URL query (`?a=1&b=two+words`) into a flat map. Repeated keys
/// keep their last value.
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let trimmed = raw.trim();
    let query = trimmed.strip_prefix('?').unwrap_or(trimmed);

    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_query;

    #[test]
    fn decodes_percent_escapes_and_plus() {
        let params = parse_query("?school=SMA%20Pasundan%201&campaign=Open+House");
        assert_eq!(params.get("school").map(String::as_str), Some("SMA Pasundan 1"));
        assert_eq!(params.get("campaign").map(String::as_str), Some("Open House"));
    }

    #[test]
    fn last_repeated_key_wins() {
        let params = parse_query("src=a&src=b");
        assert_eq!(params.get("src").map(String::as_str), Some("b"));
    }

    #[test]
    fn tolerates_bare_keys_and_empty_pairs() {
        let params = parse_query("&&wave&ref=");
        assert_eq!(params.get("wave").map(String::as_str), Some(""));
        assert_eq!(params.get("ref").map(String::as_str), Some(""));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn keeps_malformed_escapes_and_decodes_utf8() {
        let params = parse_query("a=100%&b=%zz&c=Bandung%20%E2%9C%93");
        assert_eq!(params.get("a").map(String::as_str), Some("100%"));
        assert_eq!(params.get("b").map(String::as_str), Some("%zz"));
        assert_eq!(params.get("c").map(String::as_str), Some("Bandung ✓"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let params = parse_query("nama=Aul%FFia");
        assert_eq!(params.get("nama").map(String::as_str), Some("Aul\u{FFFD}ia"));
    }

    #[test]
    fn empty_query_yields_nothing() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }
}
