/// Content types the server knows how to label.
///
/// Anything not listed here goes out as `application/octet-stream`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextHtml,
    ImageJpeg,
    ImageGif,
    OctetStream,
}

impl ContentType {
    /// Picks the content type for a file extension (without the dot).
    ///
    /// Matching is exact and case-sensitive: `html` and `txt` are served as
    /// HTML, `jpeg` and `gif` as images, everything else (including `HTML`,
    /// `jpg` or no extension at all) falls back to octet-stream.
    ///
    /// # Example
    ///
    /// ```
    /// # use webserver::http::mime::ContentType;
    /// assert_eq!(ContentType::from_extension(Some("txt")), ContentType::TextHtml);
    /// assert_eq!(ContentType::from_extension(Some("JPEG")), ContentType::OctetStream);
    /// assert_eq!(ContentType::from_extension(None), ContentType::OctetStream);
    /// ```
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("html") | Some("txt") => ContentType::TextHtml,
            Some("jpeg") => ContentType::ImageJpeg,
            Some("gif") => ContentType::ImageGif,
            _ => ContentType::OctetStream,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html",
            ContentType::ImageJpeg => "image/jpeg",
            ContentType::ImageGif => "image/gif",
            ContentType::OctetStream => "application/octet-stream",
        }
    }
}
