use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use storage::Database;
use storage::dto::award::{BulkRewardRequest, CompetitionAward, YearlyAward};
use storage::dto::performance::WeeklyScores;
use storage::error::StorageError;
use storage::models::{Role, TransactionType, User};
use storage::repository::competition::CompetitionRepository;
use storage::repository::ledger::LedgerRepository;
use storage::repository::performance::PerformanceRepository;
use storage::repository::user::{NewUser, UserRepository};
use storage::services::points;

async fn test_db() -> Database {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    let db = Database::from_pool(pool);
    db.run_migrations().await.unwrap();
    db
}

async fn seed_user(db: &Database, username: &str, role: Role) -> User {
    UserRepository::new(db.pool())
        .create(&NewUser {
            username,
            full_name: username,
            email: &format!("{username}@example.com"),
            password_hash: "hash",
            role,
            group_id: None,
            is_confirmed: true,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn competition_award_credits_sum_and_creates_one_row() {
    let db = test_db().await;
    let teacher = seed_user(&db, "teacher", Role::Teacher).await;
    let student = seed_user(&db, "student", Role::Student).await;

    let award = CompetitionAward {
        user_id: student.id,
        name: "Hackathon".to_string(),
        level: 3,
        quality: 2,
        place: 1,
        communication: 4,
    };
    let competition = points::award_competition(db.pool(), teacher.id, &award)
        .await
        .unwrap();

    assert_eq!(competition.level, 3);
    assert_eq!(competition.quality, 2);
    assert_eq!(competition.place, 1);
    assert_eq!(competition.communication, 4);
    assert_eq!(competition.awarded_by_id, Some(teacher.id));

    let student = UserRepository::new(db.pool())
        .find_by_id(student.id)
        .await
        .unwrap();
    assert_eq!(student.points, 10);

    let rows = CompetitionRepository::new(db.pool())
        .list_for_user(student.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn award_to_unknown_user_is_not_found() {
    let db = test_db().await;
    let teacher = seed_user(&db, "teacher", Role::Teacher).await;

    let award = CompetitionAward {
        user_id: 9999,
        name: "Hackathon".to_string(),
        level: 1,
        quality: 1,
        place: 1,
        communication: 1,
    };
    let err = points::award_competition(db.pool(), teacher.id, &award)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn weekly_scores_never_double_count_on_edit() {
    let db = test_db().await;
    let student = seed_user(&db, "student", Role::Student).await;
    let week_start = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();

    let first = WeeklyScores {
        academic_performance: 1,
        mentoring: 2,
        teamwork: 3,
        discipline: 4,
    };
    let performance = points::apply_weekly_scores(db.pool(), student.id, week_start, &first)
        .await
        .unwrap();
    assert_eq!(performance.points, 10);

    let users = UserRepository::new(db.pool());
    assert_eq!(users.find_by_id(student.id).await.unwrap().points, 10);

    // Editing the same week replaces the old total instead of adding to it.
    let second = WeeklyScores {
        academic_performance: 2,
        mentoring: 2,
        teamwork: 2,
        discipline: 2,
    };
    let performance = points::update_weekly_scores(db.pool(), student.id, week_start, &second)
        .await
        .unwrap();
    assert_eq!(performance.points, 8);
    assert_eq!(users.find_by_id(student.id).await.unwrap().points, 8);
}

#[tokio::test]
async fn stale_weekly_reads_cannot_diverge_cache_from_row() {
    let db = test_db().await;
    let student = seed_user(&db, "student", Role::Student).await;
    let week_start = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();

    let repo = PerformanceRepository::new(db.pool());
    let row = repo.ensure_weekly(student.id, week_start).await.unwrap();

    // Two editors both read the zeroed row before either writes.
    let first = repo
        .find_weekly(student.id, week_start)
        .await
        .unwrap()
        .unwrap();
    let second = repo
        .find_weekly(student.id, week_start)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.points, row.points);
    assert_eq!(second.points, row.points);

    let scores_a = WeeklyScores {
        academic_performance: 4,
        mentoring: 3,
        teamwork: 2,
        discipline: 1,
    };
    let scores_b = WeeklyScores {
        academic_performance: 2,
        mentoring: 2,
        teamwork: 2,
        discipline: 2,
    };
    repo.set_weekly(first.id, first.user_id, &scores_a, 10)
        .await
        .unwrap();
    let row = repo
        .set_weekly(second.id, second.user_id, &scores_b, 8)
        .await
        .unwrap();
    assert_eq!(row.points, 8);

    // The cached total must match the row, not the sum of both writes.
    let user = UserRepository::new(db.pool())
        .find_by_id(student.id)
        .await
        .unwrap();
    assert_eq!(user.points, 8);
}

#[tokio::test]
async fn weekly_update_without_record_is_not_found() {
    let db = test_db().await;
    let student = seed_user(&db, "student", Role::Student).await;
    let week_start = NaiveDate::from_ymd_opt(2026, 8, 17).unwrap();

    let scores = WeeklyScores {
        academic_performance: 1,
        mentoring: 1,
        teamwork: 1,
        discipline: 1,
    };
    let err = points::update_weekly_scores(db.pool(), student.id, week_start, &scores)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn ledger_sum_matches_cached_points_after_adjustments() {
    let db = test_db().await;
    let teacher = seed_user(&db, "teacher", Role::Teacher).await;
    let student = seed_user(&db, "student", Role::Student).await;

    points::adjust_points(
        db.pool(),
        student.id,
        5,
        TransactionType::Reward,
        Some("good work"),
        None,
        Some(teacher.id),
    )
    .await
    .unwrap();

    let penalty = points::adjust_points(
        db.pool(),
        student.id,
        -3,
        TransactionType::Penalty,
        Some("late"),
        None,
        Some(teacher.id),
    )
    .await
    .unwrap();
    assert_eq!(penalty.points, -3);

    let ledger = LedgerRepository::new(db.pool());
    let student = UserRepository::new(db.pool())
        .find_by_id(student.id)
        .await
        .unwrap();
    assert_eq!(student.points, 2);
    assert_eq!(ledger.sum_for_user(student.id).await.unwrap(), student.points);
    assert_eq!(ledger.list_for_user(student.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn bulk_reward_skips_non_students_and_pairs_rows() {
    let db = test_db().await;
    let teacher = seed_user(&db, "teacher", Role::Teacher).await;
    let s1 = seed_user(&db, "s1", Role::Student).await;
    let s2 = seed_user(&db, "s2", Role::Student).await;

    let request = BulkRewardRequest {
        selected_students: vec![s1.id, s2.id, teacher.id, 9999],
        competition_name: "Robotics Cup".to_string(),
        level: 3,
        quality: 2,
        place: 1,
        comment: Some("finals".to_string()),
    };
    let (total, rewarded) = points::reward_participants(db.pool(), teacher.id, &request)
        .await
        .unwrap();
    assert_eq!(total, 6);
    assert_eq!(rewarded, 2);

    let users = UserRepository::new(db.pool());
    assert_eq!(users.find_by_id(s1.id).await.unwrap().points, 6);
    assert_eq!(users.find_by_id(s2.id).await.unwrap().points, 6);
    assert_eq!(users.find_by_id(teacher.id).await.unwrap().points, 0);

    // Each rewarded student gets a competition row and a ledger row.
    let competitions = CompetitionRepository::new(db.pool());
    let ledger = LedgerRepository::new(db.pool());
    assert_eq!(competitions.list_for_user(s1.id).await.unwrap().len(), 1);
    let transactions = ledger.list_for_user(s1.id).await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].points, 6);
    assert_eq!(transactions[0].transaction_type, TransactionType::Reward);
}

#[tokio::test]
async fn yearly_award_is_unique_per_year() {
    let db = test_db().await;
    let student = seed_user(&db, "student", Role::Student).await;

    let award = YearlyAward {
        user_id: student.id,
        year: 2026,
        projects_score: 1,
        tech_dictation_score: 2,
        initial_monitoring_score: 3,
        intermediate_certification_score: 4,
        final_certification_score: 5,
    };
    let performance = points::award_yearly(db.pool(), &award).await.unwrap();
    assert_eq!(performance.points, 15);

    let users = UserRepository::new(db.pool());
    assert_eq!(users.find_by_id(student.id).await.unwrap().points, 15);

    let err = points::award_yearly(db.pool(), &award).await.unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));

    // The failed insert must not leave a dangling points credit.
    assert_eq!(users.find_by_id(student.id).await.unwrap().points, 15);
}

#[tokio::test]
async fn leaderboard_orders_by_points_descending() {
    let db = test_db().await;
    let a = seed_user(&db, "a", Role::Student).await;
    let b = seed_user(&db, "b", Role::Student).await;
    let c = seed_user(&db, "c", Role::Student).await;

    for (user, delta) in [(&a, 5), (&b, 20), (&c, 10)] {
        points::adjust_points(
            db.pool(),
            user.id,
            delta,
            TransactionType::Reward,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    }

    let users = UserRepository::new(db.pool());
    let page = users.leaderboard_page(10, 0).await.unwrap();
    let totals: Vec<i64> = page.iter().map(|u| u.points).collect();
    assert_eq!(totals, vec![20, 10, 5]);

    assert_eq!(users.rank_of(20).await.unwrap(), 1);
    assert_eq!(users.rank_of(10).await.unwrap(), 2);
    assert_eq!(users.rank_of(5).await.unwrap(), 3);
}

#[tokio::test]
async fn deleting_a_user_cascades_ledger_rows() {
    let db = test_db().await;
    let student = seed_user(&db, "student", Role::Student).await;

    points::adjust_points(
        db.pool(),
        student.id,
        5,
        TransactionType::Reward,
        None,
        None,
        None,
    )
    .await
    .unwrap();

    let users = UserRepository::new(db.pool());
    users.delete(student.id).await.unwrap();

    let ledger = LedgerRepository::new(db.pool());
    assert_eq!(ledger.count().await.unwrap(), 0);
    assert!(matches!(
        users.find_by_id(student.id).await.unwrap_err(),
        StorageError::NotFound
    ));
}
