use super::*;

#[test]
fn spaces_encode_as_percent_twenty() {
    assert_eq!(url_encode_component("test search"), "test%20search");
}

#[test]
fn unreserved_characters_pass_through() {
    assert_eq!(url_encode_component("AZaz09-._~"), "AZaz09-._~");
}

#[test]
fn reserved_and_multibyte_characters_encode_per_byte() {
    assert_eq!(url_encode_component("a&b=c"), "a%26b%3Dc");
    assert_eq!(url_encode_component("café"), "caf%C3%A9");
    assert_eq!(url_encode_component("100%"), "100%25");
}

#[test]
fn decode_reverses_encode() {
    for input in ["test search", "a&b=c", "café", "100%", ""] {
        assert_eq!(url_decode_component(&url_encode_component(input)), input);
    }
}

#[test]
fn malformed_escapes_decode_literally() {
    assert_eq!(url_decode_component("%"), "%");
    assert_eq!(url_decode_component("%2"), "%2");
    assert_eq!(url_decode_component("%zz"), "%zz");
}

#[test]
fn page_url_serializes_base_path_and_query() {
    let mut url = PageUrl::new("https://app.local", "/");
    assert_eq!(url.href(), "https://app.local/");

    url.set_query_param("search", "test search");
    assert_eq!(url.href(), "https://app.local/?search=test%20search");

    url.set_query_param("search", "next");
    url.set_query_param("page", "2");
    assert_eq!(url.href(), "https://app.local/?search=next&page=2");
}

#[test]
fn page_url_parses_an_incoming_query_string() {
    let url = PageUrl::new("https://app.local", "/results?q=a%20b&page=3");
    assert_eq!(url.path, "/results");
    assert_eq!(url.query, vec![
        ("q".to_string(), "a b".to_string()),
        ("page".to_string(), "3".to_string()),
    ]);
}
