//! URL templating for drive endpoints.
//!
//! Only request URLs the client originates are built here. Continuation and
//! delta links returned by the service are used verbatim.

use std::fmt;

/// Optional relationships to inline in a metadata or listing response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expand {
    Children,
    Thumbnails,
}

impl Expand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Expand::Children => "children",
            Expand::Thumbnails => "thumbnails",
        }
    }
}

impl fmt::Display for Expand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters; values are percent-encoded on render
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    params: Vec<(&'static str, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    /// Adds `$expand` unless `expands` is empty
    pub fn expand(self, expands: &[Expand]) -> Self {
        if expands.is_empty() {
            return self;
        }
        let joined = expands
            .iter()
            .map(Expand::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.set("$expand", joined)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn render(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs = self
            .params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", pairs)
    }
}

/// Joins a connection base URL, an API path and a query string
pub fn build_url(base_url: &str, path: &str, query: &QueryString) -> String {
    format!(
        "{}{}{}",
        base_url.trim_end_matches('/'),
        path,
        query.render()
    )
}

/// Percent-encodes every segment of a drive path, keeping the separators
pub fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Quotes a value for an OData function argument such as `search(q='...')`
pub fn odata_string(value: &str) -> String {
    urlencoding::encode(&value.replace('\'', "''")).into_owned()
}
