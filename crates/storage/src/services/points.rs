use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;

use crate::dto::award::{BulkRewardRequest, CompetitionAward, YearlyAward};
use crate::dto::performance::WeeklyScores;
use crate::error::{Result, StorageError};
use crate::models::{Competition, Role, Transaction, TransactionType, WeeklyPerformance, YearlyPerformance};
use crate::repository::ledger::LedgerRepository;
use crate::repository::performance::PerformanceRepository;
use crate::repository::user::UserRepository;

pub fn competition_total(level: i64, quality: i64, place: i64, communication: i64) -> i64 {
    level + quality + place + communication
}

/// Bulk participation rewards score three dimensions only.
pub fn participation_total(level: i64, quality: i64, place: i64) -> i64 {
    level + quality + place
}

pub fn weekly_total(scores: &WeeklyScores) -> i64 {
    scores.academic_performance + scores.mentoring + scores.teamwork + scores.discipline
}

pub fn yearly_total(award: &YearlyAward) -> i64 {
    award.projects_score
        + award.tech_dictation_score
        + award.initial_monitoring_score
        + award.intermediate_certification_score
        + award.final_certification_score
}

/// Monday of the week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - chrono::Days::new(u64::from(date.weekday().num_days_from_monday()))
}

pub fn iso_week_parts(week_start: NaiveDate) -> (i64, i64) {
    let iso = week_start.iso_week();
    (i64::from(iso.week()), i64::from(iso.year()))
}

/// Credit a competition award to its subject user.
pub async fn award_competition(
    pool: &SqlitePool,
    awarded_by_id: i64,
    award: &CompetitionAward,
) -> Result<Competition> {
    let total = competition_total(award.level, award.quality, award.place, award.communication);

    LedgerRepository::new(pool)
        .award_competition(
            award.user_id,
            awarded_by_id,
            &award.name,
            award.level,
            award.quality,
            award.place,
            award.communication,
            total,
        )
        .await
}

/// Reward every selected student for competition participation. Ids that
/// do not resolve to a student account are skipped, matching the form's
/// semantics. Each participant commits independently; a failure partway
/// leaves earlier participants rewarded. Returns the per-student total
/// and how many were rewarded.
pub async fn reward_participants(
    pool: &SqlitePool,
    awarded_by_id: i64,
    request: &BulkRewardRequest,
) -> Result<(i64, usize)> {
    let total = participation_total(request.level, request.quality, request.place);

    let users = UserRepository::new(pool);
    let ledger = LedgerRepository::new(pool);
    let mut rewarded = 0;

    for &student_id in &request.selected_students {
        let student = match users.find_by_id(student_id).await {
            Ok(user) => user,
            Err(StorageError::NotFound) => continue,
            Err(e) => return Err(e),
        };
        if student.role != Role::Student {
            continue;
        }

        ledger
            .reward_for_competition(
                student.id,
                awarded_by_id,
                &request.competition_name,
                request.level,
                request.quality,
                request.place,
                request.comment.as_deref(),
                total,
            )
            .await?;
        rewarded += 1;
    }

    Ok((total, rewarded))
}

/// Write weekly sub-scores, creating the record if the week has none yet.
pub async fn apply_weekly_scores(
    pool: &SqlitePool,
    user_id: i64,
    week_start: NaiveDate,
    scores: &WeeklyScores,
) -> Result<WeeklyPerformance> {
    let repo = PerformanceRepository::new(pool);
    let existing = repo.ensure_weekly(user_id, week_start).await?;
    set_weekly_scores(&repo, existing, scores).await
}

/// Rewrite weekly sub-scores for an existing record; NotFound when the
/// (user, week) pair was never created.
pub async fn update_weekly_scores(
    pool: &SqlitePool,
    user_id: i64,
    week_start: NaiveDate,
    scores: &WeeklyScores,
) -> Result<WeeklyPerformance> {
    let repo = PerformanceRepository::new(pool);
    let existing = repo
        .find_weekly(user_id, week_start)
        .await?
        .ok_or(StorageError::NotFound)?;
    set_weekly_scores(&repo, existing, scores).await
}

async fn set_weekly_scores(
    repo: &PerformanceRepository<'_>,
    existing: WeeklyPerformance,
    scores: &WeeklyScores,
) -> Result<WeeklyPerformance> {
    repo.set_weekly(existing.id, existing.user_id, scores, weekly_total(scores))
        .await
}

pub async fn award_yearly(pool: &SqlitePool, award: &YearlyAward) -> Result<YearlyPerformance> {
    let total = yearly_total(award);

    PerformanceRepository::new(pool)
        .award_yearly(
            award.user_id,
            award.year,
            award.projects_score,
            award.tech_dictation_score,
            award.initial_monitoring_score,
            award.intermediate_certification_score,
            award.final_certification_score,
            total,
        )
        .await
}

/// Record a signed reward/penalty adjustment against one user.
pub async fn adjust_points(
    pool: &SqlitePool,
    user_id: i64,
    delta: i64,
    transaction_type: TransactionType,
    reason: Option<&str>,
    comment: Option<&str>,
    awarded_by_id: Option<i64>,
) -> Result<Transaction> {
    LedgerRepository::new(pool)
        .record(user_id, delta, transaction_type, reason, comment, awarded_by_id)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn competition_total_sums_all_four_dimensions() {
        assert_eq!(competition_total(3, 2, 1, 4), 10);
    }

    #[test]
    fn participation_total_skips_communication() {
        assert_eq!(participation_total(3, 2, 1), 6);
    }

    #[test]
    fn weekly_total_sums_sub_scores() {
        let scores = WeeklyScores {
            academic_performance: 1,
            mentoring: 2,
            teamwork: 3,
            discipline: 4,
        };
        assert_eq!(weekly_total(&scores), 10);
    }

    #[test]
    fn week_start_is_monday() {
        // 2026-08-19 is a Wednesday.
        let date = NaiveDate::from_ymd_opt(2026, 8, 19).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();
        assert_eq!(week_start_of(date), monday);
        assert_eq!(week_start_of(monday), monday);
    }

    #[test]
    fn iso_week_parts_handles_year_boundary() {
        // 2024-12-30 is Monday of ISO week 1 of 2025.
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(iso_week_parts(date), (1, 2025));
    }
}
