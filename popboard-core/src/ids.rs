use crate::PopupId;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Hands out millisecond-timestamp ids.
///
/// Ids are strictly increasing for one generator and always land above
/// `floor`, so two creates in the same millisecond (or a clock step back)
/// still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, floor: PopupId) -> PopupId {
        self.next_at(Utc::now().timestamp_millis(), floor)
    }

    fn next_at(&self, now_ms: i64, floor: PopupId) -> PopupId {
        let pick = |prev: i64| {
            now_ms
                .max(prev.saturating_add(1))
                .max(floor.saturating_add(1))
        };
        // fetch_update only fails when the closure returns None
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(pick(prev)))
            .unwrap_or_else(|prev| prev);
        pick(prev)
    }
}

/// Parses a path segment the way loosely-typed clients expect:
/// leading whitespace, optional sign, then as many digits as there are.
/// `"12abc"` is 12, `"abc"` is `None`.
pub fn parse_id_lenient(raw: &str) -> Option<PopupId> {
    let s = raw.trim_start();
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let sign = i == 0 && (c == '-' || c == '+');
        if !(sign || c.is_ascii_digit()) {
            break;
        }
        end = i + c.len_utf8();
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_within_one_millisecond() {
        let ids = IdGenerator::new();
        let a = ids.next_at(1_000, 0);
        let b = ids.next_at(1_000, 0);
        let c = ids.next_at(999, 0);
        assert_eq!(a, 1_000);
        assert_eq!(b, 1_001);
        assert_eq!(c, 1_002);
    }

    #[test]
    fn ids_clear_the_floor() {
        let ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000, 5_000), 5_001);
        assert_eq!(ids.next_at(1_000, i64::MAX), i64::MAX);
    }

    #[test]
    fn lenient_parse() {
        assert_eq!(parse_id_lenient("42"), Some(42));
        assert_eq!(parse_id_lenient("  17x"), Some(17));
        assert_eq!(parse_id_lenient("-3"), Some(-3));
        assert_eq!(parse_id_lenient("abc"), None);
        assert_eq!(parse_id_lenient("-"), None);
        assert_eq!(parse_id_lenient(""), None);
    }
}
