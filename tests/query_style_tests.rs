use reqwire::{encode_query_param, ParameterStyle};
use serde_json::json;

#[test]
fn test_encode_array_form_exploded() {
    let fragment = encode_query_param("id", &json!([3, 4, 5]), ParameterStyle::Form, true);
    assert_eq!(fragment, "id[]=3&id[]=4&id[]=5");
}

#[test]
fn test_encode_array_pipe() {
    let fragment = encode_query_param("id", &json!([3, 4, 5]), ParameterStyle::PipeDelimited, false);
    assert_eq!(fragment, "id=3|4|5");
}

#[test]
fn test_encode_array_space() {
    let fragment =
        encode_query_param("tag", &json!(["a", "b", "c"]), ParameterStyle::SpaceDelimited, false);
    assert_eq!(fragment, "tag=a%20b%20c");
}

#[test]
fn test_encode_object_deep() {
    let fragment = encode_query_param(
        "filter",
        &json!({"color": "red"}),
        ParameterStyle::DeepObject,
        true,
    );
    assert_eq!(fragment, "filter[color]=red");
}

#[test]
fn test_encode_primitive() {
    let fragment = encode_query_param("limit", &json!(10), ParameterStyle::Form, true);
    assert_eq!(fragment, "limit=10");
}

#[test]
fn test_encode_escapes_reserved_characters() {
    let fragment = encode_query_param("q", &json!("cats & dogs"), ParameterStyle::Form, true);
    assert_eq!(fragment, "q=cats%20%26%20dogs");
}
