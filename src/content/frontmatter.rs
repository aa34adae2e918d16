use serde::Deserialize;
use spdlog::warn;

/// Frontmatter keys recognized at the top of a post file. Everything is
/// optional; defaults are applied when the post is assembled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "modifiedDate")]
    pub modified_date: Option<String>,
    pub thumbnail: Option<String>,
    pub featured: bool,
    pub tags: Vec<String>,
    pub author: Option<AuthorMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorMeta {
    pub name: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
}

/// Splits a document into its YAML block and body. The block is fenced by
/// `---` lines at the top of the file; anything else means "no frontmatter"
/// and the whole text is body.
pub fn split(text: &str) -> (Option<&str>, &str) {
    let text = text.trim_start_matches('\u{feff}');
    let rest = match text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return (None, text),
    };

    // The closing fence has to sit on its own line
    let mut search = 0;
    while let Some(pos) = rest[search..].find("\n---") {
        let idx = search + pos;
        let after = &rest[idx + 4..];
        let after = after.strip_prefix('\r').unwrap_or(after);
        if after.is_empty() || after.starts_with('\n') {
            let meta = &rest[..idx];
            let body = after.strip_prefix('\n').unwrap_or(after);
            return (Some(meta), body);
        }
        search = idx + 1;
    }

    (None, text)
}

/// Parses frontmatter leniently: absent or malformed metadata degrades to
/// defaults, never to an error.
pub fn parse(text: &str) -> (FrontMatter, &str) {
    let (meta, body) = split(text);
    let Some(raw) = meta else {
        return (FrontMatter::default(), body);
    };

    match serde_yml::from_str::<FrontMatter>(raw) {
        Ok(front_matter) => (front_matter, body),
        Err(e) => {
            warn!("Ignoring malformed frontmatter: {}", e);
            (FrontMatter::default(), body)
        }
    }
}
