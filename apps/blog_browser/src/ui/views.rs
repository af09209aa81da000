//! Plain-text renderings of the list and detail panes.

use std::fmt::Write as _;

use client_core::DetailState;
use shared::domain::{Blog, BlogId};

pub const LIST_LOADING: &str = "Loading blogs...";
pub const LIST_EMPTY: &str = "No blogs yet";
pub const DETAIL_LOADING: &str = "Loading...";
pub const DETAIL_EMPTY: &str = "Select a blog to view details";

fn pills(categories: &[String]) -> String {
    categories
        .iter()
        .map(|c| format!("[{c}]"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_list(blogs: &[Blog], loading: bool, selected: Option<BlogId>) -> String {
    if loading {
        return LIST_LOADING.to_string();
    }
    if blogs.is_empty() {
        return LIST_EMPTY.to_string();
    }

    let mut out = String::new();
    for blog in blogs {
        let marker = if selected == Some(blog.id) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} #{} {}", blog.id, blog.title);
        if !blog.category.is_empty() {
            let _ = writeln!(out, "    {}", pills(&blog.category));
        }
        if !blog.description.is_empty() {
            let _ = writeln!(out, "    {}", blog.description);
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// Failures fall back to the empty pane; the error itself is reported elsewhere.
pub fn render_detail(detail: &DetailState) -> String {
    let blog = match detail {
        DetailState::Loading(_) => return DETAIL_LOADING.to_string(),
        DetailState::NoSelection | DetailState::Failed(..) => return DETAIL_EMPTY.to_string(),
        DetailState::Loaded(_, blog) => blog,
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", blog.title);
    if !blog.category.is_empty() {
        let _ = writeln!(out, "{}", pills(&blog.category));
    }
    let published = blog
        .published_on()
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| blog.date.clone());
    let _ = writeln!(out, "Published on {published}");
    if !blog.cover_image.is_empty() {
        let _ = writeln!(out, "Cover: {}", blog.cover_image);
    }
    let _ = writeln!(out);
    out.push_str(blog.content.trim_end());
    out
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
