// Query parameter shaping
//
// Date range parameters are formatted to match the requested time
// aggregation granularity and appended only when present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Time aggregation granularity for series endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAggregation {
    Day,
    Month,
    Year,
}

impl TimeAggregation {
    /// Path segment used by series endpoints (e.g. `time/day/metrics`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Path segment for the hour-of-day variant (e.g. `time/day_hour/metrics`).
    pub fn hourly_segment(self) -> &'static str {
        match self {
            Self::Day => "day_hour",
            Self::Month => "month_hour",
            Self::Year => "year_hour",
        }
    }

    /// `strftime` format matching this granularity.
    fn date_format(self) -> &'static str {
        match self {
            Self::Day => "%Y-%m-%d",
            Self::Month => "%Y-%m",
            Self::Year => "%Y",
        }
    }

    /// Format a date at this granularity.
    pub fn format_date(self, date: NaiveDate) -> String {
        date.format(self.date_format()).to_string()
    }
}

impl fmt::Display for TimeAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeAggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown time aggregation: {other}")),
        }
    }
}

/// Optional start/end dates for a series or fixed-window request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Append `startdate` / `enddate` query parameters, formatted at the
    /// aggregation's granularity. Absent bounds are omitted entirely.
    pub fn apply(&self, url: &mut Url, aggregation: TimeAggregation) {
        if self.start.is_none() && self.end.is_none() {
            return;
        }
        let mut pairs = url.query_pairs_mut();
        if let Some(start) = self.start {
            pairs.append_pair("startdate", &aggregation.format_date(start));
        }
        if let Some(end) = self.end {
            pairs.append_pair("enddate", &aggregation.format_date(end));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_format_follows_granularity() {
        let d = date(2016, 3, 9);
        assert_eq!(TimeAggregation::Day.format_date(d), "2016-03-09");
        assert_eq!(TimeAggregation::Month.format_date(d), "2016-03");
        assert_eq!(TimeAggregation::Year.format_date(d), "2016");
    }

    #[test]
    fn range_appends_only_present_bounds() {
        let mut url = Url::parse("https://api.example.com/metrics").unwrap();
        let range = DateRange::new(Some(date(2016, 1, 1)), None);
        range.apply(&mut url, TimeAggregation::Day);
        assert_eq!(url.query(), Some("startdate=2016-01-01"));
    }

    #[test]
    fn empty_range_leaves_url_untouched() {
        let mut url = Url::parse("https://api.example.com/metrics").unwrap();
        DateRange::default().apply(&mut url, TimeAggregation::Month);
        // query_pairs_mut leaves an empty query string; both shapes are
        // equivalent for the server.
        assert!(url.query().is_none_or(str::is_empty));
    }

    #[test]
    fn full_range_month_granularity() {
        let mut url = Url::parse("https://api.example.com/metrics").unwrap();
        let range = DateRange::new(Some(date(2015, 10, 1)), Some(date(2016, 2, 1)));
        range.apply(&mut url, TimeAggregation::Month);
        assert_eq!(url.query(), Some("startdate=2015-10&enddate=2016-02"));
    }
}
