/// Data structures for accounts, authors and stories
pub mod author;
pub mod story;

pub use author::{Author, UserAccount, AUTHOR_NAME_MAX};
pub use story::{Category, NewStory, Region, Story, StoryFilter, StoryView, ANY};
