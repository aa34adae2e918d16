use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::content::Heading;
use crate::text_utils::slugify;

lazy_static! {
    // Matches only unstyled headings: once the styler has added attributes,
    // the tag no longer matches and neither pass sees it again.
    pub(crate) static ref HEADING_RE: Regex =
        Regex::new(r"(?s)<h([1-6])>(.*?)</h[1-6]>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Walks every heading (levels 1-6) in document order and assigns each an
/// anchor id. Duplicate ids are disambiguated with -2, -3, ... suffixes.
///
/// The styling pass consumes this list positionally and the TOC builder
/// filters it to levels 2-4, so hrefs and ids agree by construction.
pub fn assign_heading_ids(html: &str) -> Vec<Heading> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut headings = vec![];

    for cap in HEADING_RE.captures_iter(html) {
        let level: u8 = cap[1].parse().unwrap_or(2);
        let text = cap[2].trim().to_string();

        let mut base = slugify(&TAG_RE.replace_all(&text, ""));
        if base.is_empty() {
            base = "section".to_string();
        }

        let count = seen.entry(base.clone()).or_insert(0);
        *count += 1;
        let id = if *count == 1 {
            base
        } else {
            format!("{}-{}", base, count)
        };

        headings.push(Heading { level, text, id });
    }

    headings
}

/// Renders the navigable TOC fragment from an assigned outline, keeping only
/// levels 2-4. No retained headings means no fragment at all, not an empty
/// container.
pub fn render(headings: &[Heading]) -> Option<String> {
    let entries: Vec<&Heading> = headings
        .iter()
        .filter(|h| (2..=4).contains(&h.level))
        .collect();
    if entries.is_empty() {
        return None;
    }

    let mut toc = String::from(
        "<div class=\"toc-container bg-gray-50 rounded-lg border border-gray-100 p-5 mb-8\">",
    );
    toc.push_str("<h3 class=\"text-lg font-bold mb-3\">Table of Contents</h3>");
    toc.push_str("<nav class=\"toc mb-2\"><ul class=\"space-y-1 text-sm\">");

    for heading in entries {
        let indent = if heading.level > 2 {
            format!("ml-{}", (heading.level - 2) * 3)
        } else {
            String::new()
        };
        toc.push_str(&format!(
            "<li class=\"{}\"><a href=\"#{}\" class=\"hover:underline transition-colors\">{}</a></li>",
            indent, heading.id, heading.text
        ));
    }

    toc.push_str("</ul></nav></div>");
    Some(toc)
}
