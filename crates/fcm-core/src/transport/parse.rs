//! Parse HTTP response header lines collected by curl.

/// Response metadata the client cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    /// `Retry-After` value if present.
    pub retry_after: Option<String>,
}

/// Parse collected header lines. Only the last response block counts, so an
/// interim `100 Continue` does not leak headers into the final response.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHead {
    let mut head = ResponseHead::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            head = ResponseHead::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("retry-after") {
                head.retry_after = Some(value.trim().to_string());
            }
        }
    }

    head
}
