//! Local state of the "create blog" form.

use chrono::{DateTime, SecondsFormat, Utc};
use shared::domain::CreateBlogInput;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Field values as typed. `category` is the comma-separated text the
/// checkboxes and the free-form input both edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateBlogForm {
    pub title: String,
    pub category: String,
    pub description: String,
    pub cover_image: String,
    pub content: String,
}

impl CreateBlogForm {
    pub fn set_category_text(&mut self, text: impl Into<String>) {
        self.category = text.into();
    }

    pub fn is_checked(&self, label: &str) -> bool {
        self.categories().iter().any(|c| c == label)
    }

    pub fn toggle_category(&mut self, label: &str, checked: bool) {
        let mut current = self.categories();
        if checked {
            if !current.iter().any(|c| c == label) {
                current.push(label.to_string());
            }
        } else {
            current.retain(|c| c != label);
        }
        self.category = current.join(", ");
    }

    /// Applies one line of category input: `+LABEL`/`-LABEL` tokens toggle
    /// checkboxes, anything else replaces the text.
    pub fn apply_category_input(&mut self, line: &str) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let all_toggles = !tokens.is_empty()
            && tokens
                .iter()
                .all(|t| t.len() > 1 && (t.starts_with('+') || t.starts_with('-')));
        if !all_toggles {
            self.set_category_text(line.trim());
            return;
        }
        for token in tokens {
            let (sign, label) = token.split_at(1);
            self.toggle_category(&label.to_ascii_uppercase(), sign == "+");
        }
    }

    /// Trimmed, non-empty labels in first-seen order without repeats.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for label in self.category.split(',').map(str::trim) {
            if !label.is_empty() && !out.iter().any(|c| c == label) {
                out.push(label.to_string());
            }
        }
        out
    }

    pub fn submit(&self, now: DateTime<Utc>) -> Result<CreateBlogInput, FormError> {
        let required = [
            ("title", &self.title),
            ("cover image url", &self.cover_image),
            ("description", &self.description),
            ("content", &self.content),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(name));
            }
        }

        Ok(CreateBlogInput {
            title: self.title.trim().to_string(),
            category: self.categories(),
            description: self.description.clone(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            cover_image: self.cover_image.trim().to_string(),
            content: self.content.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
