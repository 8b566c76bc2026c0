use chrono::NaiveDate;
use sqlx::SqlitePool;
use storage::{
    dto::performance::{
        PerformanceUpdateOutcome, WeeklyAdjustRequest, WeeklyScoresUpdate, WeeklySheetEntry,
        WeeklySheetResponse,
    },
    dto::user::UserResponse,
    models::{TransactionType, User},
    repository::{performance::PerformanceRepository, user::UserRepository},
    services::points,
};

use crate::error::{WebError, WebResult};

/// Build the weekly sheet for the week containing `date`: one row per
/// student, created zeroed when the week has no record yet.
pub async fn weekly_sheet(
    pool: &SqlitePool,
    date: NaiveDate,
    group_id: Option<i64>,
) -> WebResult<WeeklySheetResponse> {
    let week_start = points::week_start_of(date);
    let week_end = week_start + chrono::Days::new(6);

    let students = UserRepository::new(pool).list_students(group_id).await?;
    let performances = PerformanceRepository::new(pool);

    let mut entries = Vec::with_capacity(students.len());
    for student in students {
        let performance = performances.ensure_weekly(student.id, week_start).await?;
        entries.push(WeeklySheetEntry {
            student: UserResponse::from(student),
            performance,
        });
    }

    Ok(WeeklySheetResponse {
        week_start,
        week_end,
        entries,
    })
}

/// Ad-hoc reward or penalty issued from the weekly sheet.
pub async fn adjust_from_sheet(
    pool: &SqlitePool,
    awarder: &User,
    request: &WeeklyAdjustRequest,
) -> WebResult<PerformanceUpdateOutcome> {
    let (delta, transaction_type) = match request.action.as_str() {
        "reward" => (request.points, TransactionType::Reward),
        "penalty" => (-request.points, TransactionType::Penalty),
        _ => return Err(WebError::BadRequest("invalid action".to_string())),
    };

    points::adjust_points(
        pool,
        request.student_id,
        delta,
        transaction_type,
        request.reason.as_deref(),
        None,
        Some(awarder.id),
    )
    .await?;

    let student = UserRepository::new(pool)
        .find_by_id(request.student_id)
        .await?;

    Ok(PerformanceUpdateOutcome {
        success: true,
        new_points: student.points,
    })
}

/// Rewrite a student's weekly sub-scores; 404 when the record is missing.
pub async fn update_weekly(
    pool: &SqlitePool,
    request: &WeeklyScoresUpdate,
) -> WebResult<PerformanceUpdateOutcome> {
    points::update_weekly_scores(pool, request.student_id, request.week_start, &request.scores)
        .await?;

    let student = UserRepository::new(pool)
        .find_by_id(request.student_id)
        .await?;

    Ok(PerformanceUpdateOutcome {
        success: true,
        new_points: student.points,
    })
}
