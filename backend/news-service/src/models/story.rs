use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Wildcard accepted by every list filter
pub const ANY: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "pol")]
    Politics,
    #[serde(rename = "art")]
    Art,
    #[serde(rename = "tech")]
    Technology,
    #[serde(rename = "trivia")]
    Trivia,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Politics,
        Category::Art,
        Category::Technology,
        Category::Trivia,
    ];

    /// Wire and storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "pol",
            Category::Art => "art",
            Category::Technology => "tech",
            Category::Trivia => "trivia",
        }
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown category '{}', expected one of pol, art, tech, trivia",
                    s
                ))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "uk")]
    Uk,
    #[serde(rename = "eu")]
    European,
    #[serde(rename = "w")]
    World,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Uk, Region::European, Region::World];

    /// Wire and storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Uk => "uk",
            Region::European => "eu",
            Region::World => "w",
        }
    }
}

impl FromStr for Region {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown region '{}', expected one of uk, eu, w",
                    s
                ))
            })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A published news item as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    pub id: i64,
    pub author_id: i64,
    pub headline: String,
    pub category: Category,
    pub region: Region,
    pub details: String,
    pub date: NaiveDate,
}

/// Write payload for a new story. The date is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewStory {
    #[validate(length(min = 1, max = 64, message = "headline must be 1-64 characters"))]
    pub headline: String,
    pub category: Category,
    pub region: Region,
    #[validate(length(max = 512, message = "details must be at most 512 characters"))]
    pub details: String,
}

impl NewStory {
    /// Parse raw request values and enforce field limits
    pub fn parse(headline: &str, category: &str, region: &str, details: &str) -> crate::Result<Self> {
        let story = NewStory {
            headline: headline.to_string(),
            category: category.parse()?,
            region: region.parse()?,
            details: details.to_string(),
        };
        story.validate()?;
        Ok(story)
    }
}

/// Projection returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryView {
    pub key: i64,
    pub headline: String,
    pub story_cat: Category,
    pub story_region: Region,
    pub author: String,
    pub date: NaiveDate,
    pub details: String,
}

impl StoryView {
    pub fn new(story: Story, author: impl Into<String>) -> Self {
        Self {
            key: story.id,
            headline: story.headline,
            story_cat: story.category,
            story_region: story.region,
            author: author.into(),
            date: story.date,
            details: story.details,
        }
    }
}

/// Story list query. `None` on a field means no filter on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoryFilter {
    pub category: Option<Category>,
    pub region: Option<Region>,
    /// Inclusive lower bound on the story date
    pub since: Option<NaiveDate>,
}

impl StoryFilter {
    /// Build a filter from request values where `*` disables a filter
    pub fn parse(category: &str, region: &str, date: &str) -> crate::Result<Self> {
        Ok(StoryFilter {
            category: wildcard(category).map(str::parse::<Category>).transpose()?,
            region: wildcard(region).map(str::parse::<Region>).transpose()?,
            since: wildcard(date).map(parse_date).transpose()?,
        })
    }

    pub fn matches(&self, story: &Story) -> bool {
        self.category.map_or(true, |c| story.category == c)
            && self.region.map_or(true, |r| story.region == r)
            && self.since.map_or(true, |d| story.date >= d)
    }
}

fn wildcard(value: &str) -> Option<&str> {
    let value = value.trim();
    (value != ANY).then_some(value)
}

fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!(
            "Invalid story_date '{}', expected '*' or YYYY-MM-DD",
            value
        ))
    })
}
