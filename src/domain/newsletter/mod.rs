pub mod body;
pub mod title;

use std::collections::HashMap;

use self::body::Body;
use self::title::Title;

/// A validated create payload.
pub struct NewNewsletter {
    pub title: Title,
    pub body: Body,
}

/// A validated partial update. A field that is `None` was not supplied and
/// must be left untouched on the row.
#[derive(Default)]
pub struct NewsletterUpdate {
    pub title: Option<Title>,
    pub body: Option<Body>,
}

/// The allow-list of mutable fields. Anything else submitted in a PATCH
/// payload (`id`, timestamps, typos) is rejected instead of silently applied.
impl TryFrom<HashMap<String, String>> for NewsletterUpdate {
    type Error = String;

    fn try_from(fields: HashMap<String, String>) -> Result<Self, Self::Error> {
        let mut update = NewsletterUpdate::default();

        for (field, value) in fields {
            match field.as_str() {
                "title" => update.title = Some(value.try_into()?),
                "body" => update.body = Some(value.try_into()?),
                _ => return Err(format!("field `{}` cannot be updated", field)),
            }
        }

        Ok(update)
    }
}
