//! Streak and velocity aggregation over ledger entries.

use std::collections::HashSet;
use chrono::NaiveDate;
use studypath_core::Time;
use super::{EntryKind, LedgerEntry};

/// Days in the velocity window.
const VELOCITY_WINDOW_DAYS: i64 = 28;

/// Consecutive days with at least one entry, counting back from
/// `today`. A streak survives a day without activity only if the most
/// recent active day is yesterday.
pub fn current_streak(entries: &[LedgerEntry], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = entries.iter().map(|e| e.timestamp.date_naive()).collect();

    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

/// Milestone completions per week over the trailing four weeks.
pub fn weekly_velocity(entries: &[LedgerEntry], now: Time) -> f32 {
    let window_start = now - chrono::Duration::days(VELOCITY_WINDOW_DAYS);
    let completions: u32 = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Milestone)
        .filter(|e| e.timestamp > window_start && e.timestamp <= now)
        .map(|e| e.value)
        .sum();

    completions as f32 / (VELOCITY_WINDOW_DAYS as f32 / 7.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use studypath_core::{GoalId, MilestoneId};

    fn entry_at(timestamp: Time) -> LedgerEntry {
        let mut entry = LedgerEntry::milestone(GoalId::new(), MilestoneId::new(), "step");
        entry.timestamp = timestamp;
        entry
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let now = Utc::now();
        let entries = vec![
            entry_at(now),
            entry_at(now - Duration::days(1)),
            entry_at(now - Duration::days(2)),
            // gap at day 3
            entry_at(now - Duration::days(4)),
        ];

        assert_eq!(current_streak(&entries, now.date_naive()), 3);
    }

    #[test]
    fn streak_survives_if_last_activity_was_yesterday() {
        let now = Utc::now();
        let entries = vec![
            entry_at(now - Duration::days(1)),
            entry_at(now - Duration::days(2)),
        ];

        assert_eq!(current_streak(&entries, now.date_naive()), 2);
    }

    #[test]
    fn streak_broken_by_two_idle_days() {
        let now = Utc::now();
        let entries = vec![entry_at(now - Duration::days(2))];

        assert_eq!(current_streak(&entries, now.date_naive()), 0);
    }

    #[test]
    fn streak_empty_ledger_is_zero() {
        assert_eq!(current_streak(&[], Utc::now().date_naive()), 0);
    }

    #[test]
    fn velocity_averages_over_four_weeks() {
        let now = Utc::now();
        let entries: Vec<LedgerEntry> = (0..8)
            .map(|i| entry_at(now - Duration::days(i * 3)))
            .collect();

        let velocity = weekly_velocity(&entries, now);
        assert!((velocity - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn velocity_ignores_entries_outside_window() {
        let now = Utc::now();
        let entries = vec![
            entry_at(now),
            entry_at(now - Duration::days(40)),
        ];

        let velocity = weekly_velocity(&entries, now);
        assert!((velocity - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn velocity_ignores_study_time_entries() {
        let now = Utc::now();
        let entries = vec![LedgerEntry::study_time(GoalId::new(), 120, "session")];

        assert_eq!(weekly_velocity(&entries, now), 0.0);
    }
}
