//! Instrument codes sent to code-bearing endpoints.

/// One code or an ordered list of codes.
///
/// A single code is never split, even if it contains commas; callers that
/// already hold a comma-joined string get it forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Codes {
    Single(String),
    Many(Vec<String>),
}

impl Codes {
    /// The codes in request order.
    pub fn keys(&self) -> &[String] {
        match self {
            Codes::Single(code) => std::slice::from_ref(code),
            Codes::Many(codes) => codes,
        }
    }

    /// The comma-joined form the gateway expects.
    pub fn joined(&self) -> String {
        self.keys().join(",")
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

impl From<&str> for Codes {
    fn from(value: &str) -> Self {
        Codes::Single(value.to_string())
    }
}

impl From<String> for Codes {
    fn from(value: String) -> Self {
        Codes::Single(value)
    }
}

impl From<Vec<String>> for Codes {
    fn from(value: Vec<String>) -> Self {
        Codes::Many(value)
    }
}

impl From<Vec<&str>> for Codes {
    fn from(value: Vec<&str>) -> Self {
        Codes::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Codes {
    fn from(value: &[&str]) -> Self {
        Codes::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[String]> for Codes {
    fn from(value: &[String]) -> Self {
        Codes::Many(value.to_vec())
    }
}
