//! Interactive list/detail session driven by line commands.

use std::{io::Write, sync::Arc};

use anyhow::Result;
use chrono::Utc;
use client_core::BlogCoordinator;
use shared::domain::{BlogId, CATEGORY_OPTIONS};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

use crate::ui::{render_detail, render_list, CreateBlogForm};

const HELP: &str = "commands: list | select <id> | clear | refresh | create | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    List,
    Select(BlogId),
    Clear,
    Refresh,
    Create,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(HELP.to_string());
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => BrowseCommand::List,
        "select" | "show" => {
            let raw = parts
                .next()
                .ok_or_else(|| "usage: select <id>".to_string())?;
            let id = raw
                .parse::<i64>()
                .map_err(|_| format!("not a blog id: {raw}"))?;
            BrowseCommand::Select(BlogId(id))
        }
        "clear" => BrowseCommand::Clear,
        "refresh" => BrowseCommand::Refresh,
        "create" | "new" => BrowseCommand::Create,
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{other}'; {HELP}")),
    };
    Ok(command)
}

pub async fn run<R, W>(coordinator: Arc<BlogCoordinator>, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut draft = CreateBlogForm::default();

    if let Err(err) = coordinator.load_blogs().await {
        warn!(error = %err, "browse: initial blog list unavailable");
    }
    print_list(&coordinator, out).await?;
    writeln!(out, "{HELP}")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(BrowseCommand::List) => {
                if let Err(err) = coordinator.load_blogs().await {
                    warn!(error = %err, "browse: blog list unavailable");
                }
                print_list(&coordinator, out).await?;
            }
            Ok(BrowseCommand::Select(id)) => {
                if let Some(fetch) = coordinator.select_blog(id).await {
                    fetch.await?;
                }
                print_detail(&coordinator, out).await?;
            }
            Ok(BrowseCommand::Clear) => {
                coordinator.clear_selection().await;
                print_detail(&coordinator, out).await?;
            }
            Ok(BrowseCommand::Refresh) => {
                if let Err(err) = coordinator.refresh_blogs().await {
                    warn!(error = %err, "browse: refresh failed");
                }
                print_list(&coordinator, out).await?;
            }
            Ok(BrowseCommand::Create) => {
                if !prompt_form(&mut lines, out, &mut draft).await? {
                    break;
                }
                create(&coordinator, &mut draft, out).await?;
            }
            Ok(BrowseCommand::Help) => writeln!(out, "{HELP}")?,
            Ok(BrowseCommand::Quit) => break,
            Err(message) => writeln!(out, "{message}")?,
        }
    }

    Ok(())
}

async fn print_list<W: Write>(coordinator: &BlogCoordinator, out: &mut W) -> Result<()> {
    let snapshot = coordinator.snapshot().await;
    writeln!(
        out,
        "{}",
        render_list(&snapshot.blogs, snapshot.list_loading, snapshot.selected_id)
    )?;
    Ok(())
}

async fn print_detail<W: Write>(coordinator: &BlogCoordinator, out: &mut W) -> Result<()> {
    let snapshot = coordinator.snapshot().await;
    writeln!(out, "{}", render_detail(&snapshot.detail))?;
    Ok(())
}

/// Reads the form fields one line each; a blank answer keeps the draft's
/// current value. Returns `false` when input ends mid-form.
async fn prompt_form<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    form: &mut CreateBlogForm,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    macro_rules! ask {
        ($label:expr, $current:expr) => {{
            if $current.is_empty() {
                write!(out, "{}: ", $label)?;
            } else {
                write!(out, "{} [{}]: ", $label, $current)?;
            }
            out.flush()?;
            match lines.next_line().await? {
                Some(line) if line.trim().is_empty() => None,
                Some(line) => Some(line),
                None => return Ok(false),
            }
        }};
    }

    if let Some(v) = ask!("Title", form.title) {
        form.title = v;
    }
    let checkboxes = CATEGORY_OPTIONS
        .iter()
        .map(|label| {
            let mark = if form.is_checked(label) { 'x' } else { ' ' };
            format!("[{mark}] {label}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    let label = format!("Categories {checkboxes} (+LABEL/-LABEL toggles, or comma separated)");
    if let Some(v) = ask!(label, form.category) {
        form.apply_category_input(&v);
    }
    if let Some(v) = ask!("Cover image URL", form.cover_image) {
        form.cover_image = v;
    }
    if let Some(v) = ask!("Description", form.description) {
        form.description = v;
    }
    if let Some(v) = ask!("Content", form.content) {
        form.content = v;
    }

    Ok(true)
}

/// Submits the draft; it is cleared only when the server accepts it.
async fn create<W: Write>(
    coordinator: &Arc<BlogCoordinator>,
    form: &mut CreateBlogForm,
    out: &mut W,
) -> Result<()> {
    let input = match form.submit(Utc::now()) {
        Ok(input) => input,
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(());
        }
    };
    match coordinator.create_blog(input).await {
        Ok(blog) => {
            form.reset();
            writeln!(out, "Created blog #{} {}", blog.id, blog.title)?;
        }
        Err(err) => writeln!(out, "Could not create blog: {err}")?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/browse_tests.rs"]
mod tests;
