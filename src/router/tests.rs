use super::{normalize_path, parse_query_params, Router};

#[test]
fn test_root_path() {
    let (re, params) = Router::path_to_regex("/").unwrap();
    assert!(re.is_match("/"));
    assert!(!re.is_match("/x"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let (re, params) = Router::path_to_regex("/items/{id}").unwrap();
    assert_eq!(re.as_str(), "^/items/([^/]+)$");
    assert!(re.is_match("/items/123"));
    assert!(!re.is_match("/items/123/extra"));
    assert!(!re.is_match("/items/"));
    assert_eq!(params, vec!["id"]);
}

#[test]
fn test_nested_path() {
    let (re, params) = Router::path_to_regex("/a/{b}/c/{d}").unwrap();
    assert!(re.is_match("/a/1/c/2"));
    assert_eq!(params, vec!["b", "d"]);
}

#[test]
fn test_literal_text_is_escaped() {
    let (re, params) = Router::path_to_regex("/v1.0/{x}").unwrap();
    assert!(re.is_match("/v1.0/a"));
    assert!(!re.is_match("/v1x0/a"));
    assert_eq!(params, vec!["x"]);
}

#[test]
fn test_non_placeholder_braces_are_literal() {
    let (re, params) = Router::path_to_regex("/a/{not a name}").unwrap();
    assert!(re.is_match("/a/{not a name}"));
    assert!(params.is_empty());
}

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path("//api//ints/"), "/api/ints");
    assert_eq!(normalize_path("/api/"), "/api");
    assert_eq!(normalize_path("//"), "/");
    assert_eq!(normalize_path(""), "/");
}

#[test]
fn test_full_path_joins_base_and_handler_path() {
    let router = Router::new("api", [("a", "/ints/"), ("b", "path/{pathvar}")]).unwrap();
    let paths: Vec<&str> = router.routes().iter().map(|r| r.full_path()).collect();
    assert_eq!(paths, vec!["/api/ints", "/api/path/{pathvar}"]);
    assert_eq!(router.base_path(), "api");
}

#[test]
fn test_first_registered_match_wins() {
    let router = Router::new("", [("first", "x/{a}"), ("second", "x/{b}")]).unwrap();
    let m = router.route("/x/1").unwrap();
    assert_eq!(m.index, 0);
    assert_eq!(&*m.handler_name, "first");
    assert_eq!(m.get_path_param("a"), Some("1"));
}

#[test]
fn test_repeated_placeholder_last_write_wins() {
    let router = Router::new("", [("h", "org/{id}/user/{id}")]).unwrap();
    let m = router.route("/org/7/user/9").unwrap();
    assert_eq!(m.path_params.len(), 2);
    assert_eq!(m.get_path_param("id"), Some("9"));
}

#[test]
fn test_query_string_parsing_drops_malformed_pairs() {
    let params = parse_query_params(Some("n=2&text=Ha&bad&a=b=c&empty="));
    let pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (&**k, v.as_str())).collect();
    assert_eq!(pairs, vec![("n", "2"), ("text", "Ha"), ("empty", "")]);
    assert!(parse_query_params(None).is_empty());
}
