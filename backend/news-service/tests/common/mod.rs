//! Shared fixtures for handler tests backed by the in-memory stores
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::web;
use news_service::config::{SessionConfig, StoriesConfig};
use news_service::db::{InMemoryAuthProvider, InMemorySessionStore, InMemoryStoryStore};
use news_service::middleware::session_cookie;
use news_service::models::{Author, UserAccount};
use news_service::services::{SessionStore, StoryStore};
use news_service::AppState;

pub const PASSWORD: &str = "press-pass-42";

pub struct TestEnv {
    pub stories: Arc<InMemoryStoryStore>,
    pub auth: Arc<InMemoryAuthProvider>,
    pub sessions: Arc<InMemorySessionStore>,
    pub session_config: SessionConfig,
    pub stories_config: StoriesConfig,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            stories: Arc::new(InMemoryStoryStore::new()),
            auth: Arc::new(InMemoryAuthProvider::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            session_config: SessionConfig::default(),
            stories_config: StoriesConfig::default(),
        }
    }

    pub fn restrict_delete_to_owner(mut self) -> Self {
        self.stories_config.restrict_delete_to_owner = true;
        self
    }

    pub fn data(&self) -> web::Data<AppState> {
        self.data_with_stories(self.stories.clone())
    }

    pub fn data_with_stories(&self, stories: Arc<dyn StoryStore>) -> web::Data<AppState> {
        web::Data::new(AppState {
            stories,
            auth: self.auth.clone(),
            sessions: self.sessions.clone(),
            session_config: self.session_config.clone(),
            stories_config: self.stories_config.clone(),
        })
    }

    /// User account with a bound author record, password `PASSWORD`
    pub async fn author(&self, username: &str, name: &str) -> (UserAccount, Author) {
        let account = self.auth.add_user(username, PASSWORD).expect("add user");
        let author = self.stories.add_author(account.id, name).await;
        (account, author)
    }

    /// Cookie for a live session owned by `user`
    pub async fn session_for(&self, user: &UserAccount) -> Cookie<'static> {
        let session = self
            .sessions
            .create(user.id, self.session_config.ttl())
            .await
            .expect("create session");
        session_cookie(&self.session_config, &session)
    }
}
