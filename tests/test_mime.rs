use webserver::http::mime::ContentType;

#[test]
fn test_known_extensions() {
    assert_eq!(ContentType::from_extension(Some("html")), ContentType::TextHtml);
    assert_eq!(ContentType::from_extension(Some("txt")), ContentType::TextHtml);
    assert_eq!(ContentType::from_extension(Some("jpeg")), ContentType::ImageJpeg);
    assert_eq!(ContentType::from_extension(Some("gif")), ContentType::ImageGif);
}

#[test]
fn test_missing_extension_is_octet_stream() {
    assert_eq!(ContentType::from_extension(None), ContentType::OctetStream);
}

#[test]
fn test_matching_is_case_sensitive() {
    for ext in ["HTML", "Txt", "JPEG", "GIF"] {
        assert_eq!(ContentType::from_extension(Some(ext)), ContentType::OctetStream);
    }
}

#[test]
fn test_mime_strings() {
    assert_eq!(ContentType::TextHtml.as_str(), "text/html");
    assert_eq!(ContentType::ImageJpeg.as_str(), "image/jpeg");
    assert_eq!(ContentType::ImageGif.as_str(), "image/gif");
    assert_eq!(ContentType::OctetStream.as_str(), "application/octet-stream");
}

#[test]
fn test_everything_else_is_default() {
    let known = ["html", "txt", "jpeg", "gif"];
    let candidates = [
        "htm", "jpg", "png", "css", "js", "json", "xhtml", "gifs", "txt2", "ht ml", "", ".html",
    ];
    for ext in candidates {
        assert!(!known.contains(&ext));
        assert_eq!(ContentType::from_extension(Some(ext)), ContentType::OctetStream);
    }
}
