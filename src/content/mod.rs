use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

pub mod frontmatter;
pub mod markdown_renderer;
pub mod post_file;
pub mod styler;
pub mod toc;

pub const DEFAULT_DESCRIPTION: &str = "No description provided.";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_IMAGE: &str = "/images/blog/default.jpg";
pub const DEFAULT_AUTHOR_NAME: &str = "Editorial Team";
pub const DEFAULT_AUTHOR_TITLE: &str = "Content Team";
pub const DEFAULT_AUTHOR_IMAGE: &str = "/images/authors/default.jpg";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub title: String,
    pub image: String,
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            title: DEFAULT_AUTHOR_TITLE.to_string(),
            image: DEFAULT_AUTHOR_IMAGE.to_string(),
        }
    }
}

/// A fully rendered blog post. Immutable once constructed; rebuilt wholesale
/// from its source file on every cache miss.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
    pub category: String,
    pub image: String,
    pub content: String,
    pub read_time: String,
    pub featured: bool,
    pub tags: Vec<String>,
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_of_contents: Option<String>,
}

/// One document heading, kept only while the table of contents is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

impl Post {
    /// Synthesized post served when no content directory could be resolved,
    /// so list pages always have something to render.
    pub fn placeholder() -> Post {
        Post {
            id: "welcome-post".to_string(),
            slug: "welcome-post".to_string(),
            title: "Welcome to Our Blog".to_string(),
            description: "We're working on adding content. Please check back soon!".to_string(),
            date: Utc::now().naive_utc(),
            modified_date: None,
            category: "Announcements".to_string(),
            image: DEFAULT_IMAGE.to_string(),
            content: "<p>Thank you for visiting our blog! We're currently working on \
                      adding content. Please check back soon for updates.</p>"
                .to_string(),
            read_time: "1 min read".to_string(),
            featured: true,
            tags: vec!["Welcome".to_string()],
            author: Author::default(),
            table_of_contents: None,
        }
    }

    /// Per-file degradation for unreadable or empty sources. The batch keeps
    /// going; the reader sees an apology instead of a 500.
    pub fn load_error(slug: &str) -> Post {
        Post {
            id: slug.to_string(),
            slug: slug.to_string(),
            title: slug.to_string(),
            description: "An error occurred while loading this article.".to_string(),
            date: Utc::now().naive_utc(),
            modified_date: None,
            category: DEFAULT_CATEGORY.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            content: "<p>There was an error loading this article content. \
                      Please try again later.</p>"
                .to_string(),
            read_time: "1 min read".to_string(),
            featured: false,
            tags: vec![],
            author: Author::default(),
            table_of_contents: None,
        }
    }
}
