//! View aggregates.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::content::ContentKind;
use crate::domain::foundation::ContentItemId;

/// Aggregate counts for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    pub total: u64,
    pub distinct_viewers: u64,
}

/// Result of appending a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new event was written and the counter advanced.
    Recorded,
    /// The window had already admitted a view for this pair; nothing changed.
    AlreadyRecorded,
}

/// Views on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyViewCount {
    pub date: NaiveDate,
    pub views: u64,
    pub distinct_viewers: u64,
}

/// Daily counts for an item over a trailing window, oldest day first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewTrend {
    pub content_item_id: ContentItemId,
    pub days: u32,
    pub daily: Vec<DailyViewCount>,
}

/// Expands sparse per-day counts into `days` consecutive entries ending on
/// `last_day`, with zeros for days without views.
pub fn fill_trend(sparse: &[DailyViewCount], last_day: NaiveDate, days: u32) -> Vec<DailyViewCount> {
    let by_date: HashMap<NaiveDate, &DailyViewCount> =
        sparse.iter().map(|count| (count.date, count)).collect();

    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = last_day - Duration::days(offset);
            by_date
                .get(&date)
                .map(|count| **count)
                .unwrap_or(DailyViewCount {
                    date,
                    views: 0,
                    distinct_viewers: 0,
                })
        })
        .collect()
}

/// An item with its counts, as listed in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemViewSummary {
    pub content_item_id: ContentItemId,
    pub kind: ContentKind,
    pub title: String,
    pub stats: ViewStats,
}

/// Item id with its total, as returned by the view log for top lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedItem {
    pub content_item_id: ContentItemId,
    pub stats: ViewStats,
}
