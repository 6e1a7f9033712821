use serde::{Deserialize, Serialize};

use crate::core::MILLIS_PER_DAY;

const WEEK_THRESHOLD_MS: i64 = 30 * MILLIS_PER_DAY;
const MONTH_THRESHOLD_MS: i64 = 365 * MILLIS_PER_DAY;

/// Calendar bucket used for time-axis tick generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GranularityUnit {
    Day,
    Week,
    Month,
}

/// Derives the tick unit from a visible span.
///
/// Spans above one year use months, spans above 30 days use weeks and
/// everything else uses days. Both thresholds are inclusive on the lower unit.
#[must_use]
pub fn derive_unit(span_ms: i64) -> GranularityUnit {
    if span_ms > MONTH_THRESHOLD_MS {
        GranularityUnit::Month
    } else if span_ms > WEEK_THRESHOLD_MS {
        GranularityUnit::Week
    } else {
        GranularityUnit::Day
    }
}

#[cfg(test)]
mod tests {
    use super::{GranularityUnit, derive_unit};
    use crate::core::MILLIS_PER_DAY;

    #[test]
    fn thresholds_are_inclusive_on_the_finer_unit() {
        assert_eq!(derive_unit(30 * MILLIS_PER_DAY), GranularityUnit::Day);
        assert_eq!(derive_unit(30 * MILLIS_PER_DAY + 1), GranularityUnit::Week);
        assert_eq!(derive_unit(365 * MILLIS_PER_DAY), GranularityUnit::Week);
        assert_eq!(derive_unit(365 * MILLIS_PER_DAY + 1), GranularityUnit::Month);
    }
}
