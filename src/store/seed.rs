//! Mock dataset loaded at startup.
//!
//! Mirrors what a first-week user of the app looks like: seven days of mood
//! entries, four thought records, four behavior records, two PHQ-9 surveys
//! two weeks apart, two generated weekly reports referencing them, and a
//! small community feed.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::models::behavior::{BehaviorRecord, PlannedActivity, Situation};
use crate::models::community::CommunityPost;
use crate::models::mood::{MoodEntry, MOOD_EMOJIS};
use crate::models::report::WeeklyReport;
use crate::models::survey::Phq9Survey;
use crate::models::thought::{Emotion, ThoughtRecord};
use crate::models::user::User;
use crate::store::Store;

/// Seeded login accounts (company id, password, nickname, email).
pub const SEED_ACCOUNTS: [(&str, &str, &str, &str); 2] = [
    ("EMP001", "InitialPass123!", "사용자", "user@example.com"),
    ("EMP002", "Password123!", "희망이", "hope@example.com"),
];

pub async fn seed(store: &Store, now: DateTime<Utc>) -> anyhow::Result<()> {
    let mut user_ids = Vec::new();
    for (company_id, password, nickname, email) in SEED_ACCOUNTS {
        let user = User {
            id: Uuid::new_v4(),
            company_id: company_id.into(),
            nickname: nickname.into(),
            email: email.into(),
            password_hash: hash_password(password)?,
            created_at: now - Duration::days(14),
        };
        user_ids.push(user.id);
        store.insert_user(user).await;
    }
    let primary = user_ids[0];
    let neighbor = user_ids[1];

    // Seven consecutive days of mood entries.
    for (days_ago, mood) in [(7, 6), (6, 5), (5, 7), (4, 4), (3, 6), (2, 7), (1, 8)] {
        store
            .add_mood_entry(MoodEntry {
                id: Uuid::new_v4(),
                user_id: primary,
                date: now - Duration::days(days_ago),
                mood,
                emoji: MOOD_EMOJIS[mood as usize].into(),
            })
            .await;
    }

    let thought = |days_ago: i64,
                   situation: &str,
                   emotions: &[(&str, i32)],
                   automatic: &str,
                   distortions: &[&str],
                   alternative: &str,
                   alternative_distortions: &[&str],
                   shared: bool| ThoughtRecord {
        id: Uuid::new_v4(),
        user_id: primary,
        date: now - Duration::days(days_ago),
        situation: situation.into(),
        emotions: emotions
            .iter()
            .map(|(name, intensity)| Emotion {
                name: (*name).into(),
                intensity: *intensity,
            })
            .collect(),
        automatic_thoughts: automatic.into(),
        cognitive_distortions: distortions.iter().map(|d| (*d).into()).collect(),
        alternative_thought: alternative.into(),
        alternative_distortions: alternative_distortions.iter().map(|d| (*d).into()).collect(),
        shared_to_community: shared,
    };

    let thoughts = [
        thought(
            5,
            "팀 회의에서 내 의견이 받아들여지지 않았다",
            &[("불안", 7), ("좌절", 6)],
            "내 의견은 항상 무시당해. 나는 무능한 사람이야.",
            &["흑백논리 - 극단적 사고", "과잉일반화 - 한 번의 경험을 모든 상황에 적용"],
            "이번 회의에서 내 의견이 채택되지 않았지만, 그건 여러 요인 때문일 수 있어. 다음에 더 나은 방법으로 제안해볼 수 있어.",
            &["균형잡힌 사고", "증거 기반 평가"],
            false,
        ),
        thought(
            4,
            "상사에게 프로젝트 진행 상황을 보고했다",
            &[("불안", 8), ("긴장", 7)],
            "실수하면 큰일 날 거야. 다들 내가 못한다고 생각할 거야.",
            &["파국화 - 최악의 상황만 생각", "독심술 - 타인의 생각을 단정"],
            "완벽하지 않아도 괜찮아. 최선을 다하고 있고, 질문이 있으면 도움을 요청할 수 있어.",
            &["현실적 평가", "자기격려"],
            true,
        ),
        thought(
            3,
            "친구가 약속을 취소했다",
            &[("슬픔", 6), ("외로움", 7)],
            "친구가 나를 싫어하는 것 같아. 나는 중요하지 않은 사람이야.",
            &["독심술 - 타인의 생각을 단정", "개인화 - 모든 것을 자신 탓으로 돌림"],
            "친구에게도 사정이 있을 수 있어. 다음에 다시 만날 수 있어.",
            &["균형잡힌 사고", "증거 기반 평가"],
            false,
        ),
        thought(
            2,
            "새로운 업무를 배정받았다",
            &[("불안", 8), ("두려움", 7)],
            "이건 너무 어려워. 나는 절대 못할 거야.",
            &["흑백논리 - 극단적 사고", "과잉일반화 - 한 번의 경험을 모든 상황에 적용"],
            "처음엔 어렵더라도 배우면서 익숙해질 수 있어. 한 단계씩 나아가면 돼.",
            &["현실적 평가", "자기격려"],
            false,
        ),
    ];
    let thought_ids: Vec<Uuid> = thoughts.iter().map(|t| t.id).collect();
    for record in thoughts {
        store.add_thought_record(record).await;
    }

    let activity = |slot: Situation, text: &str, time: &str| PlannedActivity {
        id: Uuid::new_v4(),
        situation: slot,
        activity: text.into(),
        scheduled_date: Some(now.date_naive()),
        scheduled_time: Some(time.into()),
        completed: None,
    };

    let behavior = |days_ago: i64,
                    moods: (i32, i32, i32),
                    activities: Vec<PlannedActivity>| BehaviorRecord {
        id: Uuid::new_v4(),
        user_id: primary,
        date: now - Duration::days(days_ago),
        morning_mood: moods.0,
        work_mood: moods.1,
        evening_mood: moods.2,
        activities,
        completed: true,
    };

    let behaviors = [
        behavior(
            6,
            (4, 6, 7),
            vec![
                activity(Situation::Morning, "15분 산책하기", "07:30"),
                activity(Situation::Work, "심호흡 5분", "14:00"),
                activity(Situation::Evening, "좋아하는 음악 듣기", "19:00"),
            ],
        ),
        behavior(
            5,
            (3, 5, 6),
            vec![
                activity(Situation::Morning, "스트레칭 10분", "08:00"),
                activity(Situation::Work, "점심시간 산책", "12:30"),
                activity(Situation::Evening, "일기 쓰기", "20:00"),
            ],
        ),
        behavior(
            4,
            (5, 7, 7),
            vec![
                activity(Situation::Morning, "명상 5분", "07:00"),
                activity(Situation::Work, "동료와 가벼운 대화", "15:00"),
                activity(Situation::Evening, "가족과 저녁식사", "18:30"),
            ],
        ),
        behavior(
            3,
            (4, 6, 6),
            vec![
                activity(Situation::Morning, "따뜻한 차 마시기", "07:30"),
                activity(Situation::Work, "정리정돈 10분", "16:00"),
            ],
        ),
    ];
    let behavior_ids: Vec<Uuid> = behaviors.iter().map(|b| b.id).collect();
    for record in behaviors {
        store.add_behavior_record(record).await;
    }

    let surveys = [
        Phq9Survey {
            id: Uuid::new_v4(),
            user_id: primary,
            date: now - Duration::days(14),
            score: 15,
            answers: vec![2, 2, 2, 1, 2, 2, 1, 2, 1],
        },
        Phq9Survey {
            id: Uuid::new_v4(),
            user_id: primary,
            date: now - Duration::days(1),
            score: 10,
            answers: vec![1, 1, 2, 1, 1, 1, 1, 1, 1],
        },
    ];
    let survey_ids: Vec<Uuid> = surveys.iter().map(|s| s.id).collect();
    for survey in surveys {
        store.add_phq9_survey(survey).await;
    }

    store
        .add_weekly_report(WeeklyReport {
            id: Uuid::new_v4(),
            user_id: primary,
            week_label: "11월 1주".into(),
            start_date: now - Duration::days(14),
            end_date: now - Duration::days(7),
            created_at: now - Duration::days(7),
            phq9_survey_ids: vec![survey_ids[0]],
            thought_record_ids: thought_ids[..2].to_vec(),
            behavior_record_ids: behavior_ids[..2].to_vec(),
            mood_entry_count: 5,
            is_viewed: true,
        })
        .await;
    store
        .add_weekly_report(WeeklyReport {
            id: Uuid::new_v4(),
            user_id: primary,
            week_label: "11월 2주".into(),
            start_date: now - Duration::days(7),
            end_date: now,
            created_at: now,
            phq9_survey_ids: survey_ids.clone(),
            thought_record_ids: thought_ids[2..].to_vec(),
            behavior_record_ids: behavior_ids[2..].to_vec(),
            mood_entry_count: 7,
            is_viewed: false,
        })
        .await;

    store
        .add_community_post(CommunityPost {
            id: Uuid::new_v4(),
            user_id: neighbor,
            nickname: "희망이".into(),
            content: "오늘 부정적인 생각을 대안적 사고로 바꿔보니 기분이 조금 나아졌어요. 작은 변화지만 의미있네요.".into(),
            created_at: now - Duration::hours(2),
            liked_by: (0..12).map(|_| Uuid::new_v4()).collect(),
            comment_count: 3,
        })
        .await;
    store
        .add_community_post(CommunityPost {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            nickname: "평온".into(),
            content: "행동 활성화 기록을 2주째 하고 있는데, 확실히 루틴이 생기니까 마음이 안정되는 것 같아요.".into(),
            created_at: now - Duration::hours(5),
            liked_by: (0..8).map(|_| Uuid::new_v4()).collect(),
            comment_count: 2,
        })
        .await;

    tracing::info!("Seeded mock dataset");
    Ok(())
}
