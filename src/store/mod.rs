//! In-memory record store.
//!
//! The single writer is this process; every mutation runs under one write
//! lock acquisition, so concurrent handler invocations serialize cleanly.
//! The store is an explicit value handed to consumers through `AppState`
//! rather than ambient global state, which keeps the eligibility and report
//! logic testable against synthetic datasets.

pub mod draft;
pub mod seed;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::behavior::BehaviorRecord;
use crate::models::community::{CommunityPost, CommunityPostView};
use crate::models::mood::MoodEntry;
use crate::models::report::WeeklyReport;
use crate::models::survey::Phq9Survey;
use crate::models::thought::ThoughtRecord;
use crate::models::user::{RefreshToken, User};
use crate::services::eligibility::RecordCounts;

#[derive(Default)]
struct StoreInner {
    users: Vec<User>,
    mood_entries: Vec<MoodEntry>,
    thought_records: Vec<ThoughtRecord>,
    behavior_records: Vec<BehaviorRecord>,
    phq9_surveys: Vec<Phq9Survey>,
    weekly_reports: Vec<WeeklyReport>,
    community_posts: Vec<CommunityPost>,
    /// viewer -> authors whose posts are hidden for that viewer.
    blocked_users: HashMap<Uuid, HashSet<Uuid>>,
    refresh_tokens: Vec<RefreshToken>,
    /// Session-only alert dismissals. The PHQ-9 set is cleared whenever any
    /// of the four source record lists changes, so the nudge can reappear.
    phq9_alert_dismissed: HashSet<Uuid>,
    report_alert_dismissed: HashSet<Uuid>,
}

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreInner>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Users ────────────────────────────────────────────────────────────

    pub async fn insert_user(&self, user: User) {
        self.inner.write().await.users.push(user);
    }

    pub async fn find_user(&self, id: Uuid) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub async fn find_user_by_company_id(&self, company_id: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.company_id == company_id)
            .cloned()
    }

    // ── Mood entries ─────────────────────────────────────────────────────

    pub async fn add_mood_entry(&self, entry: MoodEntry) {
        let mut inner = self.inner.write().await;
        let user_id = entry.user_id;
        inner.mood_entries.push(entry);
        inner.phq9_alert_dismissed.remove(&user_id);
    }

    /// All of the user's mood entries in chronological order.
    pub async fn mood_entries_for(&self, user_id: Uuid) -> Vec<MoodEntry> {
        let inner = self.inner.read().await;
        let mut entries: Vec<MoodEntry> = inner
            .mood_entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        entries
    }

    // ── Thought records ──────────────────────────────────────────────────

    pub async fn add_thought_record(&self, record: ThoughtRecord) {
        let mut inner = self.inner.write().await;
        let user_id = record.user_id;
        inner.thought_records.push(record);
        inner.phq9_alert_dismissed.remove(&user_id);
    }

    pub async fn thought_records_for(&self, user_id: Uuid) -> Vec<ThoughtRecord> {
        self.inner
            .read()
            .await
            .thought_records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn thought_records_by_ids(&self, user_id: Uuid, ids: &[Uuid]) -> Vec<ThoughtRecord> {
        self.inner
            .read()
            .await
            .thought_records
            .iter()
            .filter(|r| r.user_id == user_id && ids.contains(&r.id))
            .cloned()
            .collect()
    }

    // ── Behavior records ─────────────────────────────────────────────────

    pub async fn add_behavior_record(&self, record: BehaviorRecord) {
        let mut inner = self.inner.write().await;
        let user_id = record.user_id;
        inner.behavior_records.push(record);
        inner.phq9_alert_dismissed.remove(&user_id);
    }

    pub async fn behavior_records_for(&self, user_id: Uuid) -> Vec<BehaviorRecord> {
        self.inner
            .read()
            .await
            .behavior_records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn behavior_records_by_ids(
        &self,
        user_id: Uuid,
        ids: &[Uuid],
    ) -> Vec<BehaviorRecord> {
        self.inner
            .read()
            .await
            .behavior_records
            .iter()
            .filter(|r| r.user_id == user_id && ids.contains(&r.id))
            .cloned()
            .collect()
    }

    /// Idempotent set-true of an activity's completed flag.
    /// Returns the updated record, or None when record/activity is unknown.
    pub async fn complete_activity(
        &self,
        user_id: Uuid,
        record_id: Uuid,
        activity_id: Uuid,
    ) -> Option<BehaviorRecord> {
        let mut inner = self.inner.write().await;
        let record = inner
            .behavior_records
            .iter_mut()
            .find(|r| r.id == record_id && r.user_id == user_id)?;
        let activity = record.activities.iter_mut().find(|a| a.id == activity_id)?;
        activity.completed = Some(true);
        Some(record.clone())
    }

    // ── PHQ-9 surveys ────────────────────────────────────────────────────

    pub async fn add_phq9_survey(&self, survey: Phq9Survey) {
        let mut inner = self.inner.write().await;
        let user_id = survey.user_id;
        inner.phq9_surveys.push(survey);
        inner.phq9_alert_dismissed.remove(&user_id);
    }

    pub async fn phq9_surveys_for(&self, user_id: Uuid) -> Vec<Phq9Survey> {
        let inner = self.inner.read().await;
        let mut surveys: Vec<Phq9Survey> = inner
            .phq9_surveys
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        surveys.sort_by_key(|s| s.date);
        surveys
    }

    pub async fn phq9_surveys_by_ids(&self, user_id: Uuid, ids: &[Uuid]) -> Vec<Phq9Survey> {
        self.inner
            .read()
            .await
            .phq9_surveys
            .iter()
            .filter(|s| s.user_id == user_id && ids.contains(&s.id))
            .cloned()
            .collect()
    }

    pub async fn last_phq9_survey_date(&self, user_id: Uuid) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .await
            .phq9_surveys
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.date)
            .max()
    }

    // ── Eligibility inputs ───────────────────────────────────────────────

    pub async fn record_counts(&self, user_id: Uuid) -> RecordCounts {
        let inner = self.inner.read().await;
        RecordCounts {
            mood_entries: inner
                .mood_entries
                .iter()
                .filter(|e| e.user_id == user_id)
                .count(),
            thought_records: inner
                .thought_records
                .iter()
                .filter(|r| r.user_id == user_id)
                .count(),
            behavior_records: inner
                .behavior_records
                .iter()
                .filter(|r| r.user_id == user_id)
                .count(),
        }
    }

    // ── Weekly reports ───────────────────────────────────────────────────

    pub async fn add_weekly_report(&self, report: WeeklyReport) {
        self.inner.write().await.weekly_reports.push(report);
    }

    pub async fn weekly_reports_for(&self, user_id: Uuid) -> Vec<WeeklyReport> {
        let inner = self.inner.read().await;
        let mut reports: Vec<WeeklyReport> = inner
            .weekly_reports
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }

    pub async fn weekly_report(&self, user_id: Uuid, report_id: Uuid) -> Option<WeeklyReport> {
        self.inner
            .read()
            .await
            .weekly_reports
            .iter()
            .find(|r| r.id == report_id && r.user_id == user_id)
            .cloned()
    }

    /// Idempotent: viewing an already-viewed report is a no-op.
    /// Returns false when the report is unknown.
    pub async fn mark_report_viewed(&self, user_id: Uuid, report_id: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        match inner
            .weekly_reports
            .iter_mut()
            .find(|r| r.id == report_id && r.user_id == user_id)
        {
            Some(report) => {
                report.is_viewed = true;
                true
            }
            None => false,
        }
    }

    // ── Community ────────────────────────────────────────────────────────

    pub async fn add_community_post(&self, post: CommunityPost) {
        self.inner.write().await.community_posts.push(post);
    }

    /// Posts visible to the viewer (blocked authors removed), newest first.
    pub async fn community_posts_for(&self, viewer: Uuid) -> Vec<CommunityPostView> {
        let inner = self.inner.read().await;
        let blocked = inner.blocked_users.get(&viewer);
        let mut posts: Vec<CommunityPostView> = inner
            .community_posts
            .iter()
            .filter(|p| blocked.map_or(true, |b| !b.contains(&p.user_id)))
            .map(|p| p.view_for(viewer))
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// Toggles the viewer's like. Returns the updated view, or None when the
    /// post is unknown.
    pub async fn toggle_like(&self, viewer: Uuid, post_id: Uuid) -> Option<CommunityPostView> {
        let mut inner = self.inner.write().await;
        let post = inner.community_posts.iter_mut().find(|p| p.id == post_id)?;
        if !post.liked_by.insert(viewer) {
            post.liked_by.remove(&viewer);
        }
        Some(post.view_for(viewer))
    }

    /// Deletes the post when owned by `author`. Ok(true) deleted,
    /// Ok(false) already gone, Err(()) owned by someone else.
    pub async fn delete_community_post(&self, author: Uuid, post_id: Uuid) -> Result<bool, ()> {
        let mut inner = self.inner.write().await;
        match inner.community_posts.iter().position(|p| p.id == post_id) {
            Some(idx) if inner.community_posts[idx].user_id == author => {
                inner.community_posts.remove(idx);
                Ok(true)
            }
            Some(_) => Err(()),
            None => Ok(false),
        }
    }

    pub async fn block_user(&self, viewer: Uuid, target: Uuid) {
        self.inner
            .write()
            .await
            .blocked_users
            .entry(viewer)
            .or_default()
            .insert(target);
    }

    // ── Alert dismissals (session-only) ──────────────────────────────────

    pub async fn dismiss_phq9_alert(&self, user_id: Uuid) {
        self.inner.write().await.phq9_alert_dismissed.insert(user_id);
    }

    pub async fn is_phq9_alert_dismissed(&self, user_id: Uuid) -> bool {
        self.inner
            .read()
            .await
            .phq9_alert_dismissed
            .contains(&user_id)
    }

    pub async fn dismiss_report_alert(&self, user_id: Uuid) {
        self.inner
            .write()
            .await
            .report_alert_dismissed
            .insert(user_id);
    }

    pub async fn is_report_alert_dismissed(&self, user_id: Uuid) -> bool {
        self.inner
            .read()
            .await
            .report_alert_dismissed
            .contains(&user_id)
    }

    // ── Refresh tokens ───────────────────────────────────────────────────

    pub async fn insert_refresh_token(&self, token: RefreshToken) {
        self.inner.write().await.refresh_tokens.push(token);
    }

    /// Looks up a live (unrevoked, unexpired) refresh token by hash.
    pub async fn find_live_refresh_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Option<RefreshToken> {
        self.inner
            .read()
            .await
            .refresh_tokens
            .iter()
            .find(|t| t.token_hash == token_hash && !t.revoked && t.expires_at > now)
            .cloned()
    }

    /// Revokes the refresh token with the given hash, if present.
    pub async fn revoke_refresh_token(&self, token_hash: &str) {
        let mut inner = self.inner.write().await;
        if let Some(token) = inner
            .refresh_tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash)
        {
            token.revoked = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(author: Uuid, content: &str) -> CommunityPost {
        CommunityPost {
            id: Uuid::new_v4(),
            user_id: author,
            nickname: "테스트".into(),
            content: content.into(),
            created_at: Utc::now(),
            liked_by: HashSet::new(),
            comment_count: 0,
        }
    }

    #[tokio::test]
    async fn like_toggle_is_viewer_relative() {
        let store = Store::new();
        let author = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        let p = post(author, "hello");
        let post_id = p.id;
        store.add_community_post(p).await;

        let view = store.toggle_like(viewer, post_id).await.unwrap();
        assert!(view.is_liked);
        assert_eq!(view.likes, 1);

        // Another viewer sees the count but not the flag.
        let other = store.community_posts_for(author).await;
        assert_eq!(other[0].likes, 1);
        assert!(!other[0].is_liked);

        let view = store.toggle_like(viewer, post_id).await.unwrap();
        assert!(!view.is_liked);
        assert_eq!(view.likes, 0);
    }

    #[tokio::test]
    async fn delete_post_enforces_ownership() {
        let store = Store::new();
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let p = post(author, "mine");
        let post_id = p.id;
        store.add_community_post(p).await;

        assert!(store.delete_community_post(stranger, post_id).await.is_err());
        assert_eq!(store.delete_community_post(author, post_id).await, Ok(true));
        // Idempotent once gone.
        assert_eq!(
            store.delete_community_post(author, post_id).await,
            Ok(false)
        );
    }

    #[tokio::test]
    async fn blocked_authors_are_filtered_per_viewer() {
        let store = Store::new();
        let author = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        store.add_community_post(post(author, "visible")).await;

        store.block_user(viewer, author).await;
        assert!(store.community_posts_for(viewer).await.is_empty());
        // Other viewers still see the post.
        assert_eq!(store.community_posts_for(author).await.len(), 1);
    }

    #[tokio::test]
    async fn mark_report_viewed_is_idempotent() {
        let store = Store::new();
        let user = Uuid::new_v4();
        let report = crate::models::report::WeeklyReport {
            id: Uuid::new_v4(),
            user_id: user,
            week_label: "11월 2주".into(),
            start_date: Utc::now(),
            end_date: Utc::now(),
            created_at: Utc::now(),
            phq9_survey_ids: vec![],
            thought_record_ids: vec![],
            behavior_record_ids: vec![],
            mood_entry_count: 0,
            is_viewed: false,
        };
        let report_id = report.id;
        store.add_weekly_report(report).await;

        assert!(store.mark_report_viewed(user, report_id).await);
        assert!(store.mark_report_viewed(user, report_id).await);
        let stored = store.weekly_report(user, report_id).await.unwrap();
        assert!(stored.is_viewed);
        // Unknown id is reported, not ignored.
        assert!(!store.mark_report_viewed(user, Uuid::new_v4()).await);
    }

    #[tokio::test]
    async fn phq9_dismissal_resets_when_source_lists_change() {
        let store = Store::new();
        let user = Uuid::new_v4();
        store.dismiss_phq9_alert(user).await;
        assert!(store.is_phq9_alert_dismissed(user).await);

        store
            .add_mood_entry(MoodEntry {
                id: Uuid::new_v4(),
                user_id: user,
                date: Utc::now(),
                mood: 6,
                emoji: "😊".into(),
            })
            .await;
        assert!(!store.is_phq9_alert_dismissed(user).await);
    }
}
