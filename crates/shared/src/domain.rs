use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(BlogId);

/// Checkbox options offered by the creation form.
pub const CATEGORY_OPTIONS: [&str; 6] = [
    "FINANCE",
    "TECH",
    "CAREER",
    "EDUCATION",
    "REGULATIONS",
    "LIFESTYLE",
];

/// A blog post as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    #[serde(default)]
    pub category: Vec<String>,
    pub description: String,
    /// ISO-8601 timestamp, kept verbatim.
    pub date: String,
    pub cover_image: String,
    pub content: String,
}

impl Blog {
    /// Calendar date of `date`, if it parses as RFC 3339.
    pub fn published_on(&self) -> Option<NaiveDate> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|ts| ts.date_naive())
    }
}

/// Payload for `POST /blogs`; the server assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogInput {
    pub title: String,
    pub category: Vec<String>,
    pub description: String,
    pub date: String,
    pub cover_image: String,
    pub content: String,
}

impl CreateBlogInput {
    /// The record the server is expected to return once it assigns `id`.
    pub fn into_blog(self, id: BlogId) -> Blog {
        Blog {
            id,
            title: self.title,
            category: self.category,
            description: self.description,
            date: self.date,
            cover_image: self.cover_image,
            content: self.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_uses_camel_case_wire_names() {
        let raw = r#"{
            "id": 1,
            "title": "A",
            "category": ["TECH"],
            "description": "short",
            "date": "2024-03-05T10:00:00.000Z",
            "coverImage": "https://img.example/a.png",
            "content": "body"
        }"#;
        let blog: Blog = serde_json::from_str(raw).expect("decode blog");
        assert_eq!(blog.id, BlogId(1));
        assert_eq!(blog.cover_image, "https://img.example/a.png");

        let encoded = serde_json::to_value(&blog).expect("encode blog");
        assert_eq!(encoded["coverImage"], "https://img.example/a.png");
        assert!(encoded.get("cover_image").is_none());
    }

    #[test]
    fn missing_category_decodes_as_empty() {
        let raw = r#"{"id":2,"title":"B","description":"d","date":"x","coverImage":"c","content":"z"}"#;
        let blog: Blog = serde_json::from_str(raw).expect("decode blog");
        assert!(blog.category.is_empty());
    }

    #[test]
    fn published_on_parses_iso_timestamps() {
        let input = CreateBlogInput {
            title: "A".into(),
            category: Vec::new(),
            description: "d".into(),
            date: "2024-03-05T23:30:00.000Z".into(),
            cover_image: "c".into(),
            content: "z".into(),
        };
        let blog = input.into_blog(BlogId(3));
        assert_eq!(
            blog.published_on(),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );

        let mut broken = blog;
        broken.date = "yesterday".into();
        assert_eq!(broken.published_on(), None);
    }
}
