//! Growth tracking shown on the profile page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Elapsed time since a planting, as rendered by the growth tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Growth {
    /// Whole days since planting. Not clamped.
    pub days: i64,
    /// Width of the progress bar, 0–100.
    pub bar_percent: u8,
}

impl Growth {
    pub fn between(planted_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let days = (now - planted_at).num_days().max(0);
        Growth {
            days,
            bar_percent: days.clamp(0, 100) as u8,
        }
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_whole_days() {
        let g = Growth::between(at("2024-01-01T10:00:00Z"), at("2024-01-11T09:59:59Z"));
        assert_eq!(g.days, 9);
        assert_eq!(g.bar_percent, 9);
    }

    #[test]
    fn test_bar_capped_days_not() {
        let planted = at("2023-01-01T00:00:00Z");
        let g = Growth::between(planted, planted + Duration::days(250));
        assert_eq!(g.days, 250);
        assert_eq!(g.bar_percent, 100);
    }

    #[test]
    fn test_future_planting_is_zero() {
        let now = at("2024-01-01T00:00:00Z");
        let g = Growth::between(now + Duration::days(2), now);
        assert_eq!(g, Growth { days: 0, bar_percent: 0 });
    }
}
