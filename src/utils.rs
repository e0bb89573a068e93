use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use futures_timer::Delay;
use thiserror::Error;

/// `max(min, min(max, value))`. Unlike [`Ord::clamp`] this never panics; when
/// `min > max` the result is `min`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: PartialOrd,
{
    let upper = if max < value { max } else { value };
    if upper < min { min } else { upper }
}

/// Up to two uppercase initials, one per space-separated word.
pub fn user_initials(full_name: &str) -> String {
    full_name
        .split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DateFormat {
    /// `15/01/2024`
    #[default]
    Short,
    /// `Monday, January 15, 2024`
    Long,
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Invalid date")]
pub struct InvalidDate;

pub fn format_date(date: NaiveDate, format: DateFormat) -> String {
    match format {
        DateFormat::Short => date.format("%d/%m/%Y").to_string(),
        DateFormat::Long => date.format("%A, %B %-d, %Y").to_string(),
    }
}

/// Accepts `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp or an
/// RFC 3339 timestamp. Timestamps keep their own calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, InvalidDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(date_time.date());
    }
    DateTime::parse_from_rfc3339(input)
        .map(|date_time| date_time.date_naive())
        .map_err(|_| InvalidDate)
}

pub fn format_date_str(input: &str, format: DateFormat) -> Result<String, InvalidDate> {
    parse_date(input).map(|date| format_date(date, format))
}

/// Lets a call through at most once per `delay`. The first call always runs.
#[derive(Clone, Debug)]
pub struct Throttle {
    delay: Duration,
    last_call: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: None,
        }
    }

    pub fn call<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        self.call_at(Instant::now(), f)
    }

    pub fn call_at<R>(&mut self, now: Instant, f: impl FnOnce() -> R) -> Option<R> {
        if let Some(last_call) = self.last_call {
            if now.saturating_duration_since(last_call) < self.delay {
                return None;
            }
        }
        let result = f();
        self.last_call = Some(now);
        Some(result)
    }
}

/// Delays work until calls settle; only the latest pending call runs.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns `None` when a later call superseded this one during the delay.
    pub async fn run<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            Delay::new(self.delay).await;
        }
        if self.latest.load(Ordering::SeqCst) != ticket {
            return None;
        }
        Some(f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::{LocalPool, block_on};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn clamp_bounds_value() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(-3, 0, 10), 0);
        assert_eq!(clamp(42, 0, 10), 10);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn clamp_prefers_min_when_bounds_cross() {
        assert_eq!(clamp(5, 10, 0), 10);
    }

    #[test]
    fn initials_take_first_letter_of_first_two_words() {
        assert_eq!(user_initials("ada lovelace"), "AL");
        assert_eq!(user_initials("Grace Brewster Murray Hopper"), "GB");
        assert_eq!(user_initials("plato"), "P");
        assert_eq!(user_initials(""), "");
    }

    #[test]
    fn throttle_skips_calls_inside_window() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(100));

        assert_eq!(throttle.call_at(start, || 1), Some(1));
        assert_eq!(
            throttle.call_at(start + Duration::from_millis(50), || 2),
            None
        );
        assert_eq!(
            throttle.call_at(start + Duration::from_millis(100), || 3),
            Some(3)
        );
        assert_eq!(
            throttle.call_at(start + Duration::from_millis(150), || 4),
            None
        );
    }

    #[test]
    fn debouncer_runs_only_latest_call() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let mut pool = LocalPool::new();
        let results = Rc::new(RefCell::new(Vec::new()));

        for label in ["first", "second"] {
            let debouncer = debouncer.clone();
            let results = results.clone();
            pool.spawner()
                .spawn_local(async move {
                    let result = debouncer.run(|| label).await;
                    results.borrow_mut().push((label, result));
                })
                .expect("spawn debounced call");
            // Each call takes its ticket on first poll, before the next one starts.
            pool.run_until_stalled();
        }
        pool.run();

        let mut results = results.borrow().clone();
        results.sort();
        assert_eq!(results, vec![("first", None), ("second", Some("second"))]);
    }

    #[test]
    fn debouncer_without_delay_runs_immediately() {
        let debouncer = Debouncer::new(Duration::ZERO);
        assert_eq!(block_on(debouncer.run(|| 7)), Some(7));
    }

    #[test]
    fn short_date_is_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        assert_eq!(format_date(date, DateFormat::Short), "15/01/2024");
        assert_eq!(format_date(date, DateFormat::default()), "15/01/2024");
    }

    #[test]
    fn long_date_spells_out_weekday_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        assert_eq!(
            format_date(date, DateFormat::Long),
            "Monday, January 15, 2024"
        );
    }

    #[test]
    fn date_strings_are_parsed_before_formatting() {
        assert_eq!(
            format_date_str("2024-01-15", DateFormat::Short),
            Ok("15/01/2024".to_string())
        );
        assert_eq!(
            format_date_str("2024-01-15T12:00:00", DateFormat::Short),
            Ok("15/01/2024".to_string())
        );
        assert_eq!(
            format_date_str("2024-03-09T08:30:00Z", DateFormat::Long),
            Ok("Saturday, March 9, 2024".to_string())
        );
    }

    #[test]
    fn invalid_date_strings_are_rejected() {
        assert_eq!(
            format_date_str("invalid", DateFormat::Short),
            Err(InvalidDate)
        );
        assert_eq!(parse_date("2024-02-30"), Err(InvalidDate));
        assert_eq!(InvalidDate.to_string(), "Invalid date");
    }
}
