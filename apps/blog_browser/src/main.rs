use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use client_core::{BlogCoordinator, DetailState, HttpBlogClient};
use shared::domain::BlogId;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod browse;
mod config;
mod ui;

use config::{load_settings, DEFAULT_CONFIG_FILE};
use ui::{render_detail, render_list, CreateBlogForm};

#[derive(Parser, Debug)]
#[command(
    name = "blog_browser",
    about = "Browse and publish posts on a blogs REST API"
)]
struct Cli {
    /// Base URL of the blogs API, e.g. http://localhost:3001
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Settings file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every blog
    List,
    /// Print one blog in full
    Show { id: i64 },
    /// Submit a new blog, then print the refreshed list
    Create(CreateArgs),
    /// Interactive list/detail session on stdin
    Browse,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    cover_image: String,
    #[arg(long)]
    content: String,
    /// Check one category option; repeatable
    #[arg(long = "category")]
    category: Vec<String>,
    /// Free-form comma separated categories
    #[arg(long)]
    categories: Option<String>,
}

impl CreateArgs {
    fn into_form(self) -> CreateBlogForm {
        let mut form = CreateBlogForm {
            title: self.title,
            description: self.description,
            cover_image: self.cover_image,
            content: self.content,
            ..CreateBlogForm::default()
        };
        if let Some(text) = self.categories {
            form.set_category_text(text);
        }
        for label in &self.category {
            form.toggle_category(label.trim(), true);
        }
        form
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config);
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let api = HttpBlogClient::new(&settings.api_url)
        .with_context(|| format!("invalid api url '{}'", settings.api_url))?;
    info!(api_url = %api.base_url(), "blog browser starting");
    let coordinator = BlogCoordinator::new(Arc::new(api), settings.coordinator_options());

    match cli.command {
        Command::List => {
            coordinator
                .load_blogs()
                .await
                .context("failed to load blogs")?;
            let snapshot = coordinator.snapshot().await;
            println!("{}", render_list(&snapshot.blogs, false, None));
        }
        Command::Show { id } => {
            if let Some(fetch) = coordinator.select_blog(BlogId(id)).await {
                fetch.await?;
            }
            let snapshot = coordinator.snapshot().await;
            if let DetailState::Failed(_, err) = &snapshot.detail {
                return Err(anyhow!(err.clone()).context(format!("failed to load blog {id}")));
            }
            println!("{}", render_detail(&snapshot.detail));
        }
        Command::Create(args) => {
            let input = args.into_form().submit(Utc::now())?;
            let blog = coordinator
                .create_blog(input)
                .await
                .context("failed to create blog")?;
            println!("Created blog #{} {}", blog.id, blog.title);
            coordinator
                .load_blogs()
                .await
                .context("failed to reload blogs")?;
            let snapshot = coordinator.snapshot().await;
            println!("{}", render_list(&snapshot.blogs, false, Some(blog.id)));
        }
        Command::Browse => {
            let stdin = BufReader::new(tokio::io::stdin());
            browse::run(coordinator, stdin, &mut std::io::stdout()).await?;
        }
    }

    Ok(())
}
