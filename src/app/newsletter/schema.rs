use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::newsletter::NewNewsletter;

#[derive(serde::Deserialize)]
pub struct CreateNewsletterBody {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl TryFrom<CreateNewsletterBody> for NewNewsletter {
    type Error = String;

    fn try_from(value: CreateNewsletterBody) -> Result<Self, Self::Error> {
        let title = value.title.ok_or("title is required")?.try_into()?;
        let body = value.body.ok_or("body is required")?.try_into()?;

        Ok(Self { title, body })
    }
}

/// Raw PATCH form fields, keyed by field name. The set of keys stays open
/// until the allow-list behind `NewsletterUpdate` has vetted them.
pub type UpdateNewsletterBody = HashMap<String, String>;

/// The entity mapping returned by every endpoint that serializes a record.
/// All five keys are present on every response.
#[derive(serde::Serialize)]
pub struct NewsletterResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

#[derive(serde::Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}
