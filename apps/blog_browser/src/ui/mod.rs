//! Presentation: pure renderings of coordinator state and the creation form.

pub mod form;
pub mod views;

pub use form::CreateBlogForm;
pub use views::{render_detail, render_list};
