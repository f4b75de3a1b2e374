//! Process-local implementations of the store, auth and session seams.
//!
//! Used by the handler tests and anywhere a database is not available. They
//! mirror the PostgreSQL behavior: ascending ids, cascade from author to
//! stories, and sessions that stop resolving once expired or revoked.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Author, NewStory, Story, StoryFilter, StoryView, UserAccount};
use crate::services::{hash_password, verify_password, AuthProvider, Session, SessionStore, StoryStore};

#[derive(Default)]
struct StoryTables {
    next_author_id: i64,
    next_story_id: i64,
    authors: BTreeMap<i64, Author>,
    stories: BTreeMap<i64, Story>,
}

impl StoryTables {
    fn insert(&mut self, author_id: i64, story: NewStory, date: NaiveDate) -> Result<Story> {
        if !self.authors.contains_key(&author_id) {
            return Err(AppError::Internal(format!("Unknown author id {}", author_id)));
        }

        self.next_story_id += 1;
        let story = Story {
            id: self.next_story_id,
            author_id,
            headline: story.headline,
            category: story.category,
            region: story.region,
            details: story.details,
            date,
        };
        self.stories.insert(story.id, story.clone());
        Ok(story)
    }
}

/// In-memory story store
#[derive(Default)]
pub struct InMemoryStoryStore {
    tables: RwLock<StoryTables>,
}

impl InMemoryStoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an author for a user account
    pub async fn add_author(&self, user_id: Uuid, name: &str) -> Author {
        let mut tables = self.tables.write().await;
        tables.next_author_id += 1;
        let author = Author {
            id: tables.next_author_id,
            user_id,
            name: name.to_string(),
        };
        tables.authors.insert(author.id, author.clone());
        author
    }

    /// Insert a story with an explicit date, for fixtures that need history
    pub async fn insert_story_dated(
        &self,
        author_id: i64,
        story: NewStory,
        date: NaiveDate,
    ) -> Result<Story> {
        self.tables.write().await.insert(author_id, story, date)
    }

    /// Delete an author and every story they wrote; returns the story count removed
    pub async fn remove_author(&self, author_id: i64) -> usize {
        let mut tables = self.tables.write().await;
        if tables.authors.remove(&author_id).is_none() {
            return 0;
        }
        let before = tables.stories.len();
        tables.stories.retain(|_, s| s.author_id != author_id);
        before - tables.stories.len()
    }

    pub async fn story_count(&self) -> usize {
        self.tables.read().await.stories.len()
    }
}

#[async_trait]
impl StoryStore for InMemoryStoryStore {
    async fn create_story(&self, author_id: i64, story: NewStory) -> Result<Story> {
        self.tables
            .write()
            .await
            .insert(author_id, story, Utc::now().date_naive())
    }

    async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<StoryView>> {
        let tables = self.tables.read().await;
        tables
            .stories
            .values()
            .filter(|story| filter.matches(story))
            .map(|story| -> Result<StoryView> {
                let author = tables.authors.get(&story.author_id).ok_or_else(|| {
                    AppError::Internal(format!("Story {} has no author", story.id))
                })?;
                Ok(StoryView::new(story.clone(), author.name.clone()))
            })
            .collect()
    }

    async fn find_author_by_user(&self, user_id: Uuid) -> Result<Option<Author>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .values()
            .find(|a| a.user_id == user_id)
            .cloned())
    }

    async fn find_story(&self, story_id: i64) -> Result<Option<Story>> {
        Ok(self.tables.read().await.stories.get(&story_id).cloned())
    }

    async fn delete_story(&self, story_id: i64) -> Result<bool> {
        Ok(self
            .tables
            .write()
            .await
            .stories
            .remove(&story_id)
            .is_some())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

struct MemoryUser {
    account: UserAccount,
    password_hash: String,
    active: bool,
}

/// In-memory auth provider holding Argon2 hashes
#[derive(Default)]
pub struct InMemoryAuthProvider {
    users: DashMap<String, MemoryUser>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str, password: &str) -> Result<UserAccount> {
        let account = UserAccount {
            id: Uuid::new_v4(),
            username: username.to_string(),
        };
        self.users.insert(
            username.to_string(),
            MemoryUser {
                account: account.clone(),
                password_hash: hash_password(password)?,
                active: true,
            },
        );
        Ok(account)
    }

    /// Disable login for a user without removing it
    pub fn deactivate(&self, username: &str) {
        if let Some(mut user) = self.users.get_mut(username) {
            user.active = false;
        }
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Option<UserAccount>> {
        let Some(user) = self.users.get(username) else {
            return Ok(None);
        };
        if user.active && verify_password(password, &user.password_hash)? {
            Ok(Some(user.account.clone()))
        } else {
            Ok(None)
        }
    }
}

/// In-memory session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<Session> {
        let session = Session::issue(user_id, ttl);
        self.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn resolve(&self, session_id: Uuid) -> Result<Option<Uuid>> {
        let now = Utc::now();
        Ok(self
            .sessions
            .get(&session_id)
            .filter(|s| s.is_live_at(now))
            .map(|s| s.user_id))
    }

    async fn revoke(&self, session_id: Uuid) -> Result<()> {
        self.sessions.remove(&session_id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.is_live_at(now));
        Ok((before - self.sessions.len()) as u64)
    }
}
