use url::form_urlencoded::Serializer;

/// Encodes the non empty parameters as a query string
pub(crate) fn to_query_string(params: &[(&str, Option<String>)]) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}
