use sqlx::SqlitePool;
use storage::{
    dto::award::{
        AwardOutcome, AwardRequest, BulkRewardOutcome, BulkRewardRequest, RewardContextResponse,
    },
    dto::ledger::{AdjustOutcome, AdjustPointsRequest},
    dto::user::UserResponse,
    models::{TransactionType, User},
    repository::{group::GroupRepository, user::UserRepository},
    services::points,
};
use validator::Validate;

use crate::error::{WebError, WebResult};

/// Dispatch an award event to its accrual rule.
pub async fn award(pool: &SqlitePool, awarder: &User, request: &AwardRequest) -> WebResult<AwardOutcome> {
    let (user_id, points_awarded) = match request {
        AwardRequest::Competition(award) => {
            award.validate()?;
            let competition = points::award_competition(pool, awarder.id, award).await?;
            (
                award.user_id,
                points::competition_total(
                    competition.level,
                    competition.quality,
                    competition.place,
                    competition.communication,
                ),
            )
        }
        AwardRequest::Weekly(award) => {
            award.validate()?;
            let performance =
                points::apply_weekly_scores(pool, award.user_id, award.week_start, &award.scores)
                    .await?;
            (award.user_id, performance.points)
        }
        AwardRequest::Yearly(award) => {
            award.validate()?;
            let performance = points::award_yearly(pool, award).await?;
            (award.user_id, performance.points)
        }
    };

    let user = UserRepository::new(pool).find_by_id(user_id).await?;

    Ok(AwardOutcome {
        user_id,
        points_awarded,
        new_points: user.points,
    })
}

/// Groups and students shown on the bulk reward form.
pub async fn reward_context(pool: &SqlitePool) -> WebResult<RewardContextResponse> {
    let groups = GroupRepository::new(pool).list().await?;
    let students = UserRepository::new(pool)
        .list_students(None)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(RewardContextResponse { groups, students })
}

pub async fn reward_participants(
    pool: &SqlitePool,
    awarder: &User,
    request: &BulkRewardRequest,
) -> WebResult<BulkRewardOutcome> {
    let (points_each, students_rewarded) =
        points::reward_participants(pool, awarder.id, request).await?;

    Ok(BulkRewardOutcome {
        points_each,
        students_rewarded,
    })
}

/// Manual reward or penalty; the ledger row carries the signed delta.
pub async fn adjust_points(
    pool: &SqlitePool,
    awarder: &User,
    request: &AdjustPointsRequest,
) -> WebResult<AdjustOutcome> {
    let (delta, transaction_type) = match request.transaction_type.as_str() {
        "award" => (request.points, TransactionType::Award),
        "penalty" => (-request.points, TransactionType::Penalty),
        _ => {
            return Err(WebError::BadRequest(
                "invalid transaction type".to_string(),
            ));
        }
    };

    let transaction = points::adjust_points(
        pool,
        request.user_id,
        delta,
        transaction_type,
        request.reason.as_deref(),
        None,
        Some(awarder.id),
    )
    .await?;

    let user = UserRepository::new(pool).find_by_id(request.user_id).await?;

    Ok(AdjustOutcome {
        transaction,
        new_points: user.points,
    })
}
