use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Author, NewStory, Story, StoryFilter, StoryView};

/// Persistence for authors and stories.
///
/// Stories are only ever created and deleted. Implementations must make each
/// create and delete atomic on its own row.
#[async_trait]
pub trait StoryStore: Send + Sync {
    /// Insert a story dated today (UTC) and return it with its new id
    async fn create_story(&self, author_id: i64, story: NewStory) -> Result<Story>;

    /// Stories matching `filter` joined with their author's name, ascending id
    async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<StoryView>>;

    async fn find_author_by_user(&self, user_id: Uuid) -> Result<Option<Author>>;

    async fn find_story(&self, story_id: i64) -> Result<Option<Story>>;

    /// Returns false when no story had that id
    async fn delete_story(&self, story_id: i64) -> Result<bool>;

    /// Readiness probe
    async fn ping(&self) -> Result<()>;
}
