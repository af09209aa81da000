use super::*;
use async_trait::async_trait;
use client_core::{BlogApi, ClientError, CoordinatorOptions};
use shared::domain::{Blog, CreateBlogInput};
use tokio::{io::BufReader, sync::Mutex};

struct InMemoryBlogs {
    blogs: Mutex<Vec<Blog>>,
}

#[async_trait]
impl BlogApi for InMemoryBlogs {
    async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError> {
        Ok(self.blogs.lock().await.clone())
    }

    async fn get_blog(&self, id: BlogId) -> Result<Blog, ClientError> {
        self.blogs
            .lock()
            .await
            .iter()
            .find(|blog| blog.id == id)
            .cloned()
            .ok_or(ClientError::NotFound { id })
    }

    async fn create_blog(&self, input: &CreateBlogInput) -> Result<Blog, ClientError> {
        let mut blogs = self.blogs.lock().await;
        let id = BlogId(blogs.len() as i64 + 1);
        let blog = input.clone().into_blog(id);
        blogs.push(blog.clone());
        Ok(blog)
    }
}

fn coordinator_with_one_blog() -> Arc<BlogCoordinator> {
    let api = InMemoryBlogs {
        blogs: Mutex::new(vec![Blog {
            id: BlogId(1),
            title: "A".to_string(),
            category: vec!["TECH".to_string()],
            description: "first post".to_string(),
            date: "2024-03-05T10:00:00.000Z".to_string(),
            cover_image: "https://img.example/a.png".to_string(),
            content: "hello".to_string(),
        }]),
    };
    BlogCoordinator::new(Arc::new(api), CoordinatorOptions::default())
}

async fn run_script(coordinator: Arc<BlogCoordinator>, script: &str) -> String {
    let mut out = Vec::new();
    run(coordinator, BufReader::new(script.as_bytes()), &mut out)
        .await
        .expect("browse session");
    String::from_utf8(out).expect("utf8 output")
}

#[test]
fn parses_commands_and_reports_bad_input() {
    assert_eq!(parse_command("list"), Ok(BrowseCommand::List));
    assert_eq!(parse_command("  SELECT 12 "), Ok(BrowseCommand::Select(BlogId(12))));
    assert_eq!(parse_command("q"), Ok(BrowseCommand::Quit));
    assert_eq!(parse_command("new"), Ok(BrowseCommand::Create));
    assert_eq!(
        parse_command("select"),
        Err("usage: select <id>".to_string())
    );
    assert_eq!(
        parse_command("select one"),
        Err("not a blog id: one".to_string())
    );
    assert!(parse_command("delete 1")
        .expect_err("unknown")
        .starts_with("unknown command 'delete'"));
}

#[tokio::test]
async fn session_selects_creates_and_relists() {
    let coordinator = coordinator_with_one_blog();
    let output = run_script(
        coordinator.clone(),
        "select 1\ncreate\nB\n+finance +career\nx\ny\nz\nlist\nquit\n",
    )
    .await;

    assert!(output.contains("  #1 A"));
    assert!(output.contains("Published on March 5, 2024"));
    assert!(output.contains("Created blog #2 B"));
    assert!(output.contains("#2 B\n    [FINANCE] [CAREER]\n    y"));
    assert!(output.contains("> #1 A"));

    let snapshot = coordinator.snapshot().await;
    assert_eq!(snapshot.selected_id, Some(BlogId(1)));
    assert_eq!(snapshot.blogs.len(), 2);
}

#[tokio::test]
async fn blank_form_is_rejected_without_calling_the_server() {
    let coordinator = coordinator_with_one_blog();
    let output = run_script(coordinator.clone(), "create\n\n\n\n\n\nlist\n").await;

    assert!(output.contains("title is required"));
    assert_eq!(coordinator.snapshot().await.blogs.len(), 1);
}

#[tokio::test]
async fn missing_blog_and_unknown_commands_do_not_end_the_session() {
    let coordinator = coordinator_with_one_blog();
    let output = run_script(coordinator, "select 9\nfrobnicate\nclear\nhelp\n").await;

    assert!(output.contains("Select a blog to view details"));
    assert!(output.contains("unknown command 'frobnicate'"));
    assert!(output.matches(HELP).count() >= 2);
}
