use percent_encoding::percent_decode_str;

/// Extract a filename from a `Content-Disposition` header value.
///
/// `filename*` (RFC 5987 extended value) wins over plain `filename`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        match key.as_str() {
            "filename*" => extended = decode_extended(value),
            "filename" => plain = Some(value.trim_matches('"').to_string()),
            _ => {}
        }
    }

    extended.or(plain).filter(|name| !name.trim().is_empty())
}

fn decode_extended(value: &str) -> Option<String> {
    let value = value.trim_matches('"');
    // charset'language'encoded
    let encoded = match value.splitn(3, '\'').collect::<Vec<_>>().as_slice() {
        [_, _, encoded] => *encoded,
        _ => value,
    };
    Some(percent_decode_str(encoded).decode_utf8_lossy().into_owned())
}
