//! Upstream URL construction.
//!
//! # Responsibilities
//! - Compute the `[now - days, now]` reporting window
//! - Format and percent-encode the window bounds
//! - Assemble the resource URL with API key and fixed parameters
//!
//! Everything here is a pure function of its inputs; the wall clock is
//! behind [`Clock`] so a fixed instant gives a fixed URL.

use chrono::{DateTime, Duration, Utc};

use crate::calls::kind::CallKind;

/// Timestamp layout expected by the upstream `fromdate`/`todate` parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Everything needed to address one upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery<'a> {
    pub kind: CallKind,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub from_date: DateTime<Utc>,
    pub to_date: DateTime<Utc>,
}

impl<'a> UpstreamQuery<'a> {
    /// Window ending at `now` and starting `days * 24h` earlier.
    pub fn new(kind: CallKind, base_url: &'a str, api_key: &'a str, now: DateTime<Utc>, days: u32) -> Self {
        Self {
            kind,
            base_url,
            api_key,
            from_date: now - Duration::hours(i64::from(days) * 24),
            to_date: now,
        }
    }

    /// Full upstream URL.
    pub fn url(&self) -> String {
        self.render(self.api_key)
    }

    /// URL with the API key masked, for logging.
    pub fn redacted_url(&self) -> String {
        self.render("<redacted>")
    }

    fn render(&self, api_key: &str) -> String {
        format!(
            "{}/{}/{}?v={}&fromdate={}&todate={}&msgtype=simple&protocol=csv",
            self.base_url.trim_end_matches('/'),
            self.kind.resource_path(),
            api_key,
            self.kind.api_version(),
            encode_date(self.from_date),
            encode_date(self.to_date),
        )
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` and percent-encode it.
pub fn encode_date(at: DateTime<Utc>) -> String {
    urlencoding::encode(&at.format(DATE_FORMAT).to_string()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};

    fn at(s: &str) -> DateTime<Utc> {
        Utc.from_utc_datetime(&NaiveDateTime::parse_from_str(s, DATE_FORMAT).unwrap())
    }

    fn query_param<'u>(url: &'u str, name: &str) -> &'u str {
        let query = url.split_once('?').unwrap().1;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(&format!("{}=", name)))
            .unwrap()
    }

    fn decode_param(url: &str, name: &str) -> DateTime<Utc> {
        let raw = urlencoding::decode(query_param(url, name)).unwrap();
        at(&raw)
    }

    #[test]
    fn port_call_url() {
        let now = at("2024-03-10 08:15:30");
        let query = UpstreamQuery::new(CallKind::PortCall, "https://services.example.com/api", "KEY", now, 2);
        assert_eq!(
            query.url(),
            "https://services.example.com/api/portcalls/KEY?v=6\
             &fromdate=2024-03-08%2008%3A15%3A30\
             &todate=2024-03-10%2008%3A15%3A30\
             &msgtype=simple&protocol=csv"
        );
    }

    #[test]
    fn berth_call_url_trims_trailing_slash() {
        let now = at("2024-01-01 00:00:00");
        let query = UpstreamQuery::new(CallKind::BerthCall, "http://upstream/", "abc", now, 1);
        let url = query.url();
        assert!(url.starts_with("http://upstream/berth-calls/abc?v=3&"), "{}", url);
        assert_eq!(query_param(&url, "fromdate"), "2023-12-31%2000%3A00%3A00");
        assert_eq!(query_param(&url, "msgtype"), "simple");
        assert_eq!(query_param(&url, "protocol"), "csv");
    }

    #[test]
    fn window_spans_exactly_days() {
        let clock = FixedClock(at("2024-02-29 23:59:59"));
        for days in 1..=15u32 {
            let query = UpstreamQuery::new(CallKind::PortCall, "http://u", "k", clock.now(), days);
            let url = query.url();
            let from = decode_param(&url, "fromdate");
            let to = decode_param(&url, "todate");
            assert!(from < to);
            assert_eq!(to - from, Duration::days(i64::from(days)));
        }
    }

    #[test]
    fn deterministic_for_a_fixed_clock() {
        let clock = FixedClock(at("2024-06-01 12:00:00"));
        let a = UpstreamQuery::new(CallKind::BerthCall, "http://u", "k", clock.now(), 7).url();
        let b = UpstreamQuery::new(CallKind::BerthCall, "http://u", "k", clock.now(), 7).url();
        assert_eq!(a, b);
    }

    #[test]
    fn redacted_url_hides_key() {
        let query = UpstreamQuery::new(CallKind::PortCall, "http://u", "secret", Utc::now(), 1);
        let redacted = query.redacted_url();
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("/portcalls/<redacted>?"));
    }
}
