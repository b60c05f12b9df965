use std::fmt;

/// A file-system-relative path taken from a request line's target.
///
/// The leading `/` of the target has already been stripped, so
/// `GET /img/logo.gif HTTP/1.1` yields `img/logo.gif`. No normalization is
/// applied; confinement to the serving root is the file loader's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath(String);

impl ResourcePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the last `.` in the path, if any.
    ///
    /// ```
    /// # use webserver::http::request::ResourcePath;
    /// assert_eq!(ResourcePath::new("a/b.tar.gz").extension(), Some("gz"));
    /// assert_eq!(ResourcePath::new("README").extension(), None);
    /// ```
    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The parts of a request the server acts on.
///
/// Only the request line is looked at; headers and body are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The method token as sent (`GET`, `HEAD`, ...). Used for logging only.
    pub method: String,
    /// The requested file
    pub path: ResourcePath,
}
