use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::content::toc;

/// Stage 2: cosmetic rewriting of the semantic HTML. Every rule is anchored
/// on the absence of the attribute it introduces (a bare `<p>`, a heading
/// with no attributes, a `class`-less `<a>` or `<img>`), so running the pass
/// over its own output changes nothing. The pipeline may re-style the same
/// source on every cache miss and must not double-wrap.
pub fn apply(html: &str) -> String {
    lazy_static! {
        static ref PRE_CODE_RE: Regex =
            Regex::new(r#"<pre><code(?: class="([^"]*)")?>"#).unwrap();
        static ref A_RE: Regex = Regex::new(r"<a ([^>]*)>").unwrap();
        static ref IMG_RE: Regex = Regex::new(r"<img([^>]*?)\s*/?>").unwrap();
    }

    // Headings: ids come from the shared assignment pass, positionally. The
    // TOC builder reads the same list, which is what keeps anchors working.
    let headings = toc::assign_heading_ids(html);
    let mut next = 0usize;
    let styled = toc::HEADING_RE.replace_all(html, |_caps: &Captures| {
        let heading = &headings[next];
        next += 1;
        let margin = if heading.level == 1 { "mb-8 mt-10" } else { "mb-4 mt-8" };
        format!(
            "<h{level} id=\"{id}\" class=\"{size} font-bold {margin}\">{text}</h{level}>",
            level = heading.level,
            id = heading.id,
            size = size_class(heading.level),
            margin = margin,
            text = heading.text,
        )
    });

    let styled = PRE_CODE_RE.replace_all(&styled, |caps: &Captures| {
        let code_class = match caps.get(1) {
            Some(lang) => format!("text-sm font-mono {}", lang.as_str()),
            None => "text-sm font-mono".to_string(),
        };
        format!(
            "<pre class=\"bg-gray-900 text-gray-100 p-6 rounded-lg overflow-x-auto my-8\"><code class=\"{}\">",
            code_class
        )
    });

    let styled = styled
        .replace(
            "<code>",
            "<code class=\"bg-gray-100 px-1.5 py-0.5 rounded text-sm font-mono\">",
        )
        .replace(
            "<p>",
            "<p class=\"text-gray-800 my-6 leading-relaxed text-base lg:text-lg\">",
        )
        .replace("<em>", "<em class=\"italic\">")
        .replace("<strong>", "<strong class=\"font-bold\">")
        .replace(
            "<blockquote>",
            "<blockquote class=\"border-l-4 border-gray-300 bg-gray-50 py-4 px-6 my-8 rounded-r-lg italic\">",
        )
        .replace("<ul>", "<ul class=\"list-disc pl-6 my-8 space-y-3\">")
        .replace("<ol>", "<ol class=\"list-decimal pl-6 my-8 space-y-3\">")
        .replace("<li>", "<li class=\"pl-2\">")
        .replace("<hr />", "<hr class=\"my-10 border-t border-gray-200\" />")
        .replace("<hr>", "<hr class=\"my-10 border-t border-gray-200\" />");

    let styled = A_RE.replace_all(&styled, |caps: &Captures| {
        let attrs = &caps[1];
        if attrs.contains("class=") {
            return caps[0].to_string();
        }
        format!(
            "<a {} class=\"font-medium underline underline-offset-2 transition-colors\">",
            attrs
        )
    });

    let styled = IMG_RE.replace_all(&styled, |caps: &Captures| {
        let attrs = caps[1].trim();
        if attrs.contains("class=") {
            return caps[0].to_string();
        }
        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs)
        };
        format!(
            "<div class=\"my-10\"><img{} class=\"rounded-lg shadow-md w-full object-cover mx-auto\" loading=\"lazy\" /></div>",
            attrs
        )
    });

    styled.to_string()
}

fn size_class(level: u8) -> &'static str {
    match level {
        1 => "text-4xl",
        2 => "text-3xl pb-2 border-b border-gray-100",
        3 => "text-2xl",
        4 => "text-xl",
        5 => "text-lg",
        _ => "text-base",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::markdown_renderer;
    use crate::test_data::POST_WITH_FRONTMATTER;

    #[test]
    fn test_heading_gets_id_and_class() {
        let styled = apply("<h2>Crawl Budget</h2>");
        assert_eq!(
            styled,
            "<h2 id=\"crawl-budget\" class=\"text-3xl pb-2 border-b border-gray-100 font-bold mb-4 mt-8\">Crawl Budget</h2>"
        );
    }

    #[test]
    fn test_paragraph_and_inline() {
        let styled = apply("<p>Some <em>light</em> and <strong>heavy</strong> text</p>");
        assert!(styled.starts_with("<p class=\"text-gray-800"));
        assert!(styled.contains("<em class=\"italic\">light</em>"));
        assert!(styled.contains("<strong class=\"font-bold\">heavy</strong>"));
    }

    #[test]
    fn test_image_wrapped_and_lazy() {
        let styled = apply(r#"<p><img src="/a.png" alt="a" /></p>"#);
        assert!(styled.contains("<div class=\"my-10\"><img src=\"/a.png\" alt=\"a\" class=\""));
        assert!(styled.contains("loading=\"lazy\""));
    }

    #[test]
    fn test_image_with_class_untouched() {
        let raw = r#"<img src="/a.png" class="hero" />"#;
        assert_eq!(apply(raw), raw);
    }

    #[test]
    fn test_code_block_keeps_language() {
        let styled = apply("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>");
        assert!(styled.contains("<pre class=\"bg-gray-900"));
        assert!(styled.contains("<code class=\"text-sm font-mono language-rust\">"));
    }

    #[test]
    fn test_idempotent_on_full_document() {
        let body = POST_WITH_FRONTMATTER
            .splitn(3, "---")
            .nth(2)
            .unwrap();
        let html = markdown_renderer::to_html(body).unwrap();
        let once = apply(&html);
        let twice = apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_on_mixed_constructs() {
        let md = "## Title\n\nText with [a link](/x) and `code`.\n\n\
                  > quoted\n\n- one\n- two\n\n---\n\n![pic](/p.png)\n";
        let html = markdown_renderer::to_html(md).unwrap();
        let once = apply(&html);
        assert_eq!(apply(&once), once);
    }

    #[test]
    fn test_anchor_ids_agree_with_toc() {
        let html = "<h2>Setup</h2><h3>Setup</h3><h2>Usage</h2>";
        let styled = apply(html);
        for heading in crate::content::toc::assign_heading_ids(html) {
            assert!(
                styled.contains(&format!("id=\"{}\"", heading.id)),
                "missing id {}",
                heading.id
            );
        }
    }
}
