#![cfg(test)]

pub const POST_WITH_FRONTMATTER: &str = r#"---
title: "Technical SEO Checklist"
description: "A practical checklist for technical SEO audits."
date: "2024-03-01"
thumbnail: "/images/blog/seo-checklist.jpg"
featured: true
tags: ["SEO", "Growth"]
author:
  name: "Dana O."
  title: "SEO Lead"
  image: "/images/authors/dana.jpg"
---

# Technical SEO Checklist

A site that cannot be crawled cannot rank. This checklist walks through the
basics in the order a crawler meets them.

## Crawling

Start with what robots see. A clean crawl surface means **fewer wasted
requests** and faster discovery of new content.

### Robots

Check `robots.txt` before anything else, and keep [the sitemap](/sitemap.xml)
referenced from it.

## Indexing

> If a page is not indexed, nothing else about it matters.

- Canonical tags
- Noindex audits
- Pagination handling
"#;

pub const POST_NO_FRONTMATTER: &str = r#"# A Plain Post

This file has no frontmatter block at all, so every metadata field comes
from defaults.

## Still Structured

It still has headings, so it still gets a table of contents.
"#;
