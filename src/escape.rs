//! Output sanitisers referenced by generated code
//!
//! Generated functions write `html(&value)` and `url(&value)` through
//! `format_args!`, so both adapters only need the value to be [`Display`].

use std::fmt::{self, Display};

/// HTML-escapes the display text of a value
#[derive(Debug, Clone, Copy)]
pub struct Html<'a, T: ?Sized>(&'a T);

/// URL-query-encodes the display text of a value
#[derive(Debug, Clone, Copy)]
pub struct Url<'a, T: ?Sized>(&'a T);

pub fn html<T: Display + ?Sized>(value: &T) -> Html<'_, T> {
    Html(value)
}

pub fn url<T: Display + ?Sized>(value: &T) -> Url<'_, T> {
    Url(value)
}

impl<T: Display + ?Sized> Display for Html<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        f.write_str(&html_escape::encode_quoted_attribute(&text))
    }
}

impl<T: Display + ?Sized> Display for Url<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        for chunk in url::form_urlencoded::byte_serialize(text.as_bytes()) {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
