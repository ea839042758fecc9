use std::borrow::Cow;

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .unwrap_or(Cow::Borrowed(spaced.as_str()))
        .into_owned()
}

/// Decoded `key=value` pairs of the query part of `uri`, in order. A key
/// without `=` gets an empty value.
pub fn parse_query_params(uri: &str) -> Vec<(String, String)> {
    let Some((_, query)) = uri.split_once('?') else {
        return Vec::new();
    };
    let query = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

/// First value for `key`, if present.
pub fn query_param(uri: &str, key: &str) -> Option<String> {
    parse_query_params(uri)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes() {
        let params = parse_query_params("/explore?tab=users&q=hello+world%21&flag");
        assert_eq!(
            params,
            vec![
                ("tab".to_string(), "users".to_string()),
                ("q".to_string(), "hello world!".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn first_value_wins() {
        assert_eq!(query_param("/explore?tab=users&tab=posts", "tab").as_deref(), Some("users"));
        assert_eq!(query_param("/explore", "tab"), None);
    }
}
