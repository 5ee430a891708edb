use derive_more::Display;

#[derive(Display)]
#[display(fmt = "{}", _0)]
pub struct Body(String);

impl TryFrom<String> for Body {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("body is empty".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Body {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
