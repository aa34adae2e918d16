use std::sync::Arc;

use spdlog::{info, warn};

use crate::content::{post_file, Post};
use crate::post_cache::SnapshotCache;
use crate::resolver::DirectoryResolver;
use crate::text_utils::strip_date_prefix;

/// Aggregates the resolved content directory into a sorted post collection
/// and answers lookups against it. List snapshots are memoized per cache
/// epoch; everything degrades to "something renderable" rather than an
/// error.
pub struct Repository {
    resolver: DirectoryResolver,
    cache: SnapshotCache<Vec<Post>>,
}

impl Repository {
    pub fn new(resolver: DirectoryResolver, cache_enabled: bool) -> Repository {
        let cache = if cache_enabled {
            SnapshotCache::new()
        } else {
            SnapshotCache::non_caching()
        };
        Repository { resolver, cache }
    }

    /// All posts, date descending. An unresolvable content directory yields
    /// a single placeholder post, never an error.
    pub fn list_all(&self) -> Arc<Vec<Post>> {
        self.cache.get_or_build(|| self.load_all())
    }

    fn load_all(&self) -> Vec<Post> {
        let Some(resolved) = self.resolver.resolve() else {
            warn!("No blog content found, serving placeholder post");
            return vec![Post::placeholder()];
        };

        info!(
            "Loading {} posts from {}",
            resolved.files.len(),
            resolved.path.display()
        );

        let mut posts: Vec<Post> = resolved
            .files
            .iter()
            .map(|path| post_file::load(path))
            .collect();
        // Stable sort: date ties keep file-enumeration order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// Bumps the cache epoch; the next read re-resolves and re-parses
    /// everything. Returns the new epoch.
    pub fn invalidate(&self) -> u64 {
        let epoch = self.cache.invalidate();
        info!("Post cache invalidated, epoch is now {}", epoch);
        epoch
    }

    pub fn epoch(&self) -> u64 {
        self.cache.epoch()
    }

    /// Direct file probe first, then a cascade of matching heuristics
    /// against the listing. Each cascade step is accepted only when it names
    /// exactly one post. A miss is None, never an error.
    pub fn get_by_slug(&self, slug: &str) -> Option<Post> {
        if slug.is_empty() {
            return None;
        }

        if let Some(resolved) = self.resolver.resolve() {
            for ext in ["md", "markdown"] {
                let candidate = resolved.path.join(format!("{}.{}", slug, ext));
                if candidate.is_file() {
                    return Some(post_file::load(&candidate));
                }
            }
        }

        let posts = self.list_all();
        exactly_one(&posts, |p| p.slug == slug)
            .or_else(|| exactly_one(&posts, |p| strip_date_prefix(&p.slug) == Some(slug)))
            .or_else(|| exactly_one(&posts, |p| p.slug.ends_with(slug)))
            .or_else(|| exactly_one(&posts, |p| p.slug.contains(slug)))
            .cloned()
    }

    pub fn get_featured(&self) -> Vec<Post> {
        self.list_all()
            .iter()
            .filter(|p| p.featured)
            .cloned()
            .collect()
    }

    pub fn get_by_category(&self, category: &str) -> Vec<Post> {
        self.list_all()
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Other posts sharing the category or at least one tag, in date order,
    /// truncated to `limit`. The post itself is never included.
    pub fn get_related(&self, post: &Post, limit: usize) -> Vec<Post> {
        self.list_all()
            .iter()
            .filter(|other| {
                other.slug != post.slug
                    && (other.category == post.category
                        || other.tags.iter().any(|tag| post.tags.contains(tag)))
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over title, description, rendered
    /// content, tags and category.
    pub fn search(&self, query: &str) -> Vec<Post> {
        let term = query.to_lowercase();
        self.list_all()
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
                    || p.content.to_lowercase().contains(&term)
                    || p.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
                    || p.category.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    /// Distinct categories in first-seen (date-descending) order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = vec![];
        for post in self.list_all().iter() {
            if !seen.contains(&post.category) {
                seen.push(post.category.clone());
            }
        }
        seen
    }

    /// Distinct tags in first-seen (date-descending) order.
    pub fn tags(&self) -> Vec<String> {
        let mut seen: Vec<String> = vec![];
        for post in self.list_all().iter() {
            for tag in &post.tags {
                if !seen.contains(tag) {
                    seen.push(tag.clone());
                }
            }
        }
        seen
    }
}

fn exactly_one<F>(posts: &[Post], pred: F) -> Option<&Post>
where
    F: Fn(&Post) -> bool,
{
    let mut matches = posts.iter().filter(|p| pred(p));
    match (matches.next(), matches.next()) {
        (Some(post), None) => Some(post),
        _ => None,
    }
}
