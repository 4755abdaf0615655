use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything outside the RFC 3986 unreserved set.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes one path segment (or a `filename*` value).
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

pub fn device_path(device_id: &str) -> String {
    format!("/device/{}", encode_segment(device_id))
}

/// `Content-Disposition` for a download, with an ASCII fallback name.
pub fn attachment_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        encode_segment(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("wheelchair-01"), "wheelchair-01");
        assert_eq!(encode_segment("輪椅"), "%E8%BC%AA%E6%A4%85");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_segment("front view#1.png"), "front%20view%231.png");
    }

    #[test]
    fn test_device_path() {
        assert_eq!(device_path("walker"), "/device/walker");
        assert_eq!(device_path("bed #2"), "/device/bed%20%232");
        assert_eq!(device_path("a?b"), "/device/a%3Fb");
    }

    #[test]
    fn test_attachment_disposition() {
        assert_eq!(
            attachment_disposition("wheelchair.html"),
            "attachment; filename=\"wheelchair.html\"; filename*=UTF-8''wheelchair.html"
        );
        assert_eq!(
            attachment_disposition("輪椅.html"),
            "attachment; filename=\"__.html\"; filename*=UTF-8''%E8%BC%AA%E6%A4%85.html"
        );
    }
}
