/// Story handlers
///
/// Bodies are read as raw bytes and decoded only after the session check, so
/// an unauthenticated write is reported as such even when its body is junk.
use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::parse_json;
use crate::error::{AppError, Result};
use crate::middleware::SessionContext;
use crate::models::{NewStory, StoryFilter, StoryView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PostStoryRequest {
    pub headline: String,
    pub category: String,
    pub region: String,
    pub details: String,
}

#[derive(Debug, Deserialize)]
pub struct GetStoriesRequest {
    pub story_cat: String,
    pub story_region: String,
    pub story_date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoriesResponse {
    pub stories: Vec<StoryView>,
}

/// Story id as sent by clients: a JSON number or a numeric string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoryKey {
    Number(i64),
    Text(String),
}

impl StoryKey {
    fn into_id(self) -> Result<i64> {
        match self {
            StoryKey::Number(id) => Ok(id),
            StoryKey::Text(raw) => raw.trim().parse().map_err(|_| {
                AppError::Validation(format!("Invalid story_key '{}'", raw))
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteStoryRequest {
    story_key: StoryKey,
}

fn text(builder: &mut actix_web::HttpResponseBuilder, message: &'static str) -> HttpResponse {
    builder.content_type(ContentType::plaintext()).body(message)
}

/// Publish a story as the author bound to the session's user
pub async fn post_story(
    state: web::Data<AppState>,
    session: SessionContext,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let user_id = session.require_user()?;

    let req: PostStoryRequest = parse_json(&body)?;
    let new_story = NewStory::parse(&req.headline, &req.category, &req.region, &req.details)?;

    let author = state
        .stories
        .find_author_by_user(user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("User is not registered as an author".into()))?;

    let story = state.stories.create_story(author.id, new_story).await?;

    tracing::info!(
        story_id = story.id,
        author_id = author.id,
        category = %story.category,
        region = %story.region,
        "Story published"
    );

    Ok(text(&mut HttpResponse::Created(), "Story added successfully"))
}

/// List stories matching the category, region and date filters
pub async fn get_stories(state: web::Data<AppState>, body: web::Bytes) -> Result<HttpResponse> {
    let req: GetStoriesRequest = parse_json(&body)?;
    let filter = StoryFilter::parse(&req.story_cat, &req.story_region, &req.story_date)?;

    let stories = state.stories.list_stories(&filter).await?;
    tracing::debug!(?filter, count = stories.len(), "Stories listed");

    Ok(HttpResponse::Ok().json(StoriesResponse { stories }))
}

/// Delete a story by id
pub async fn delete_story(
    state: web::Data<AppState>,
    session: SessionContext,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let user_id = session.require_user()?;

    let req: DeleteStoryRequest = parse_json(&body)?;
    let story_id = req.story_key.into_id()?;
    let not_found = || AppError::NotFound(format!("Story {} not found", story_id));

    if state.stories_config.restrict_delete_to_owner {
        let story = state.stories.find_story(story_id).await?.ok_or_else(not_found)?;
        let owner = state.stories.find_author_by_user(user_id).await?;
        if owner.map(|a| a.id) != Some(story.author_id) {
            tracing::warn!(story_id, %user_id, "Rejected delete of another author's story");
            return Err(AppError::Forbidden(
                "Only the story's author may delete it".into(),
            ));
        }
    }

    if !state.stories.delete_story(story_id).await? {
        return Err(not_found());
    }

    tracing::info!(story_id, %user_id, "Story deleted");

    Ok(text(&mut HttpResponse::Created(), "Story deleted successfully"))
}
