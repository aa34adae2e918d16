use std::fs;
use std::path::Path;

use chrono::Utc;
use spdlog::error;

use crate::content::{
    frontmatter, markdown_renderer, styler, toc, Author, Post, DEFAULT_CATEGORY,
    DEFAULT_DESCRIPTION, DEFAULT_IMAGE,
};
use crate::text_utils::{parse_date, read_time};

/// Derives the post slug from a file name: the stem with the markdown
/// extension stripped. `2024-03-01-my-post.md` keeps its date prefix here;
/// lookup heuristics deal with that separately.
pub fn slug_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    name.trim_end_matches(".markdown")
        .trim_end_matches(".md")
        .to_string()
}

/// Builds a Post from one markdown file. Never fails: unreadable or empty
/// sources degrade to an error Post so a single bad file cannot abort a
/// batch read.
pub fn load(path: &Path) -> Post {
    let slug = slug_from_path(path);

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            error!("Error reading post file {}: {}", path.display(), e);
            return Post::load_error(&slug);
        }
    };
    if raw.trim().is_empty() {
        error!("Empty post file {}", path.display());
        return Post::load_error(&slug);
    }

    let (meta, body) = frontmatter::parse(&raw);

    let html = match markdown_renderer::to_html(body) {
        Ok(html) => html,
        Err(e) => {
            error!("Error rendering markdown for {}: {}", path.display(), e);
            return Post::load_error(&slug);
        }
    };

    let table_of_contents = toc::render(&toc::assign_heading_ids(&html));
    let content = styler::apply(&html);

    let date = meta
        .date
        .as_deref()
        .and_then(parse_date)
        .unwrap_or_else(|| Utc::now().naive_utc());

    let category = meta
        .tags
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let defaults = Author::default();
    let author = match meta.author {
        Some(author_meta) => Author {
            name: author_meta.name.unwrap_or(defaults.name),
            title: author_meta.title.unwrap_or(defaults.title),
            image: author_meta.image.unwrap_or(defaults.image),
        },
        None => defaults,
    };

    Post {
        id: slug.clone(),
        title: meta.title.unwrap_or_else(|| slug.clone()),
        slug,
        description: meta
            .description
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        date,
        modified_date: meta.modified_date,
        category,
        image: meta.thumbnail.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        content,
        read_time: read_time(body.split_whitespace().count()),
        featured: meta.featured,
        tags: meta.tags,
        author,
        table_of_contents,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::test_data::{POST_NO_FRONTMATTER, POST_WITH_FRONTMATTER};

    fn write_post(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path(Path::new("posts/my-post.md")), "my-post");
        assert_eq!(slug_from_path(Path::new("posts/my-post.markdown")), "my-post");
        assert_eq!(
            slug_from_path(Path::new("posts/2024-03-01-my-post.md")),
            "2024-03-01-my-post"
        );
    }

    #[test]
    fn test_load_full_post() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_post(dir.path(), "seo-checklist.md", POST_WITH_FRONTMATTER);

        let post = load(&path);
        assert_eq!(post.slug, "seo-checklist");
        assert_eq!(post.title, "Technical SEO Checklist");
        assert_eq!(post.category, "SEO");
        assert_eq!(post.date.to_string(), "2024-03-01 00:00:00");
        assert!(post.featured);
        assert_eq!(post.author.name, "Dana O.");
        assert_eq!(post.read_time, "1 min read");
        assert!(post.content.contains("id=\"crawling\""));
        let toc = post.table_of_contents.unwrap();
        assert!(toc.contains("href=\"#crawling\""));
        assert!(toc.contains("href=\"#indexing\""));
    }

    #[test]
    fn test_load_without_frontmatter_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_post(dir.path(), "plain.md", POST_NO_FRONTMATTER);

        let post = load(&path);
        assert_eq!(post.title, "plain");
        assert_eq!(post.description, DEFAULT_DESCRIPTION);
        assert_eq!(post.category, DEFAULT_CATEGORY);
        assert_eq!(post.image, DEFAULT_IMAGE);
        assert!(!post.featured);
        assert!(post.tags.is_empty());
        assert_eq!(post.author, Author::default());
    }

    #[test]
    fn test_load_empty_file_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_post(dir.path(), "empty.md", "   \n");

        let post = load(&path);
        assert_eq!(post.slug, "empty");
        assert_eq!(post.title, "empty");
        assert!(post.content.contains("error loading this article"));
        assert_eq!(post.read_time, "1 min read");
    }

    #[test]
    fn test_load_missing_file_degrades() {
        let post = load(Path::new("/nonexistent/gone.md"));
        assert_eq!(post.slug, "gone");
        assert!(post.content.contains("error loading this article"));
    }

    #[test]
    fn test_malformed_date_falls_back_to_now() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_post(
            dir.path(),
            "bad-date.md",
            "---\ntitle: Bad date\ndate: eventually\n---\n\nBody.\n",
        );

        let before = Utc::now().naive_utc();
        let post = load(&path);
        assert!(post.date >= before);
    }
}
