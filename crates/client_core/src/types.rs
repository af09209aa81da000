use std::time::Duration;

use shared::domain::{Blog, BlogId};

use crate::{cache::DEFAULT_STALE_TIME, error::ClientError};

#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub stale_time: Duration,
    /// Refetch a stale list when the host regains focus.
    pub refetch_on_focus: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
            refetch_on_focus: false,
        }
    }
}

/// Detail query state. Only [`crate::BlogCoordinator::select_blog`] and
/// [`crate::BlogCoordinator::clear_selection`] move it out of `NoSelection`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    NoSelection,
    Loading(BlogId),
    Loaded(BlogId, Blog),
    Failed(BlogId, ClientError),
}

impl DetailState {
    pub fn blog(&self) -> Option<&Blog> {
        match self {
            Self::Loaded(_, blog) => Some(blog),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorEvent {
    ListUpdated,
    DetailUpdated(BlogId),
    BlogCreated(Blog),
    Error(String),
}

/// Point-in-time view of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinatorSnapshot {
    /// Last fetched list; empty until the first successful fetch.
    pub blogs: Vec<Blog>,
    /// First load in flight with nothing to show yet.
    pub list_loading: bool,
    /// Any list request in flight, including background refetches.
    pub list_fetching: bool,
    pub list_error: Option<ClientError>,
    pub selected_id: Option<BlogId>,
    pub detail: DetailState,
    pub creating: bool,
}

impl CoordinatorSnapshot {
    pub fn detail_loading(&self) -> bool {
        self.detail.is_loading()
    }

    pub fn selected_blog(&self) -> Option<&Blog> {
        self.detail.blog()
    }
}
