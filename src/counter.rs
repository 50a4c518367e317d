//! Per-period view counting over a client-side key/value store.
//!
//! Each of the daily, weekly, monthly and yearly buckets is a `{tag, count}`
//! JSON value that restarts at 1 once the stored tag no longer matches the
//! current period. `allTimeViews` only moves when no `lastVisit` marker was
//! present, so it counts first visits per client rather than page loads.

use crate::models::{DailyBucket, MonthlyBucket, ViewCounts, WeeklyBucket, YearlyBucket};
use crate::periods::PeriodTags;
use crate::store::KvStore;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

pub const LAST_VISIT_KEY: &str = "lastVisit";
pub const ALL_TIME_KEY: &str = "allTimeViews";

const LAST_VISIT_TTL_DAYS: i64 = 365;
const ALL_TIME_TTL_DAYS: i64 = 365 * 10;

trait PeriodBucket: Serialize + DeserializeOwned {
    const KEY: &'static str;
    const TTL_DAYS: i64;

    fn for_period(tags: &PeriodTags, count: u64) -> Self;
    fn matches(&self, tags: &PeriodTags) -> bool;
    fn count(&self) -> u64;
}

impl PeriodBucket for DailyBucket {
    const KEY: &'static str = "dailyViews";
    const TTL_DAYS: i64 = 1;

    fn for_period(tags: &PeriodTags, count: u64) -> Self {
        Self {
            date: tags.date.clone(),
            count,
        }
    }

    fn matches(&self, tags: &PeriodTags) -> bool {
        self.date == tags.date
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl PeriodBucket for WeeklyBucket {
    const KEY: &'static str = "weeklyViews";
    const TTL_DAYS: i64 = 7;

    fn for_period(tags: &PeriodTags, count: u64) -> Self {
        Self {
            week: tags.week.clone(),
            count,
        }
    }

    fn matches(&self, tags: &PeriodTags) -> bool {
        self.week == tags.week
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl PeriodBucket for MonthlyBucket {
    const KEY: &'static str = "monthlyViews";
    const TTL_DAYS: i64 = 30;

    fn for_period(tags: &PeriodTags, count: u64) -> Self {
        Self {
            month: tags.month.clone(),
            count,
        }
    }

    fn matches(&self, tags: &PeriodTags) -> bool {
        self.month == tags.month
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl PeriodBucket for YearlyBucket {
    const KEY: &'static str = "yearlyViews";
    const TTL_DAYS: i64 = 365;

    fn for_period(tags: &PeriodTags, count: u64) -> Self {
        Self {
            year: tags.year,
            count,
        }
    }

    fn matches(&self, tags: &PeriodTags) -> bool {
        self.year == tags.year
    }

    fn count(&self) -> u64 {
        self.count
    }
}

/// Records one page load at `now` and returns the counts to display.
///
/// Store write failures are logged and skipped; the returned counts are the
/// values computed for this call either way.
pub fn record_visit<S: KvStore + ?Sized>(store: &mut S, now: DateTime<Utc>) -> ViewCounts {
    let tags = PeriodTags::at(now);
    store.expire(now);

    let first_visit = store.get(LAST_VISIT_KEY).is_none();
    write(
        store,
        LAST_VISIT_KEY,
        &now.to_rfc3339_opts(SecondsFormat::Millis, true),
        now + Duration::days(LAST_VISIT_TTL_DAYS),
    );

    let mut all_time = read_all_time(store);
    if first_visit {
        all_time = all_time.saturating_add(1);
    }
    write(
        store,
        ALL_TIME_KEY,
        &all_time.to_string(),
        now + Duration::days(ALL_TIME_TTL_DAYS),
    );

    let counts = ViewCounts {
        daily: bump::<DailyBucket, _>(store, &tags, now),
        weekly: bump::<WeeklyBucket, _>(store, &tags, now),
        monthly: bump::<MonthlyBucket, _>(store, &tags, now),
        yearly: bump::<YearlyBucket, _>(store, &tags, now),
        all_time,
    };

    debug!(
        first_visit,
        date = %tags.date,
        week = %tags.week,
        daily = counts.daily,
        weekly = counts.weekly,
        monthly = counts.monthly,
        yearly = counts.yearly,
        all_time = counts.all_time,
        "visit recorded"
    );
    counts
}

/// Counts as they stand at `now`, without recording a visit.
pub fn peek_counts<S: KvStore + ?Sized>(store: &S, now: DateTime<Utc>) -> ViewCounts {
    let tags = PeriodTags::at(now);
    ViewCounts {
        daily: current::<DailyBucket, _>(store, &tags),
        weekly: current::<WeeklyBucket, _>(store, &tags),
        monthly: current::<MonthlyBucket, _>(store, &tags),
        yearly: current::<YearlyBucket, _>(store, &tags),
        all_time: read_all_time(store),
    }
}

fn current<B: PeriodBucket, S: KvStore + ?Sized>(store: &S, tags: &PeriodTags) -> u64 {
    store
        .get(B::KEY)
        .and_then(|raw| serde_json::from_str::<B>(&raw).ok())
        .filter(|bucket| bucket.matches(tags))
        .map(|bucket| bucket.count())
        .unwrap_or(0)
}

fn bump<B: PeriodBucket, S: KvStore + ?Sized>(
    store: &mut S,
    tags: &PeriodTags,
    now: DateTime<Utc>,
) -> u64 {
    let count = current::<B, S>(store, tags).saturating_add(1);
    match serde_json::to_string(&B::for_period(tags, count)) {
        Ok(payload) => write(store, B::KEY, &payload, now + Duration::days(B::TTL_DAYS)),
        Err(err) => warn!(key = B::KEY, "failed to encode bucket: {err}"),
    }
    count
}

fn read_all_time<S: KvStore + ?Sized>(store: &S) -> u64 {
    store
        .get(ALL_TIME_KEY)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(0)
}

fn write<S: KvStore + ?Sized>(store: &mut S, key: &str, value: &str, expires_at: DateTime<Utc>) {
    if let Err(err) = store.set(key, value, expires_at) {
        warn!(key, "view counter write skipped: {err}");
    }
}
