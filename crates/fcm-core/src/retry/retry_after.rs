//! `Retry-After` header parsing.
//!
//! Two formats:
//! `Retry-After: 120` and `Retry-After: Fri, 31 Dec 1999 23:59:59 GMT`.

use std::time::{Duration, SystemTime};

/// Parse a `Retry-After` value into a wait relative to `now`.
///
/// Returns `None` for a missing, empty, malformed or already-elapsed value, so a
/// bad header only ever falls back to computed backoff and never fails a batch.
pub fn parse_retry_after(value: Option<&str>, now: SystemTime) -> Option<Duration> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    match httpdate::parse_http_date(value) {
        Ok(at) => match at.duration_since(now) {
            Ok(wait) if !wait.is_zero() => Some(wait),
            _ => None,
        },
        Err(_) => {
            tracing::debug!(value, "ignoring unparsable Retry-After");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 1999-12-31T23:59:00Z
    fn new_years_eve() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(946_684_740)
    }

    #[test]
    fn future_date_yields_remaining_seconds() {
        let d = parse_retry_after(Some("Fri, 31 Dec 1999 23:59:59 GMT"), new_years_eve());
        assert_eq!(d, Some(Duration::from_secs(59)));
    }

    #[test]
    fn past_date_is_no_hint() {
        // 2016-12-31T00:00:00Z
        let later = SystemTime::UNIX_EPOCH + Duration::from_secs(1_483_142_400);
        assert_eq!(
            parse_retry_after(Some("Fri, 31 Dec 1999 23:59:59 GMT"), later),
            None
        );
    }

    #[test]
    fn date_equal_to_now_is_no_hint() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(946_684_799);
        assert_eq!(
            parse_retry_after(Some("Fri, 31 Dec 1999 23:59:59 GMT"), now),
            None
        );
    }

    #[test]
    fn integer_seconds() {
        assert_eq!(
            parse_retry_after(Some("5"), new_years_eve()),
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            parse_retry_after(Some(" 120 "), new_years_eve()),
            Some(Duration::from_secs(120))
        );
    }

    #[test]
    fn garbage_and_negative_are_no_hint() {
        assert_eq!(parse_retry_after(Some("5 blab"), new_years_eve()), None);
        assert_eq!(parse_retry_after(Some("-5"), new_years_eve()), None);
        assert_eq!(parse_retry_after(Some("1.5"), new_years_eve()), None);
    }

    #[test]
    fn absent_or_empty_is_no_hint() {
        assert_eq!(parse_retry_after(None, new_years_eve()), None);
        assert_eq!(parse_retry_after(Some(""), new_years_eve()), None);
        assert_eq!(parse_retry_after(Some("   "), new_years_eve()), None);
    }
}
