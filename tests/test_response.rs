use bytes::Bytes;
use webserver::files::FileContent;
use webserver::http::mime::ContentType;
use webserver::http::response::{Response, ResponseBuilder, StatusCode, NOT_FOUND_BODY};
use webserver::http::writer::{serialize_response, ResponseWriter};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body(body.clone())
        .build();

    assert_eq!(response.header("Content-length"), Some("16"));
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("content-length"), Some("999"));
    assert_eq!(response.headers.len(), 1);
}

#[test]
fn test_response_builder_keeps_header_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("B", "2")
        .header("A", "1")
        .header("C", "3")
        .build();

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, ["B", "A", "C", "Content-length"]);
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("X-One", "a")
        .header("X-Two", "b")
        .header("x-one", "c")
        .build();

    assert_eq!(response.headers[0], ("X-One".to_string(), "c".to_string()));
    assert_eq!(response.header("X-One"), Some("c"));
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Ok).build();

    assert_eq!(response.body.len(), 0);
    assert_eq!(response.header("Content-length"), Some("0"));
}

#[test]
fn test_response_file_wire_format() {
    let content = FileContent {
        bytes: Bytes::from_static(b"hello\n"),
    };
    let response = Response::file(content, ContentType::TextHtml);

    assert_eq!(
        serialize_response(&response),
        b"HTTP/1.1 200 OK\r\n\
Connection: close\r\n\
Content-type: text/html\r\n\
Content-length: 6\r\n\
\r\n\
hello\n"
            .to_vec()
    );
}

#[test]
fn test_response_file_binary_body_untouched() {
    let raw: Vec<u8> = (0..=255u8).collect();
    let content = FileContent {
        bytes: Bytes::from(raw.clone()),
    };
    let response = Response::file(content, ContentType::OctetStream);
    let wire = serialize_response(&response);

    assert!(wire.ends_with(&raw));
    assert_eq!(response.header("Content-type"), Some("application/octet-stream"));
    assert_eq!(response.header("Content-length"), Some("256"));
}

#[test]
fn test_response_not_found_is_byte_exact() {
    let expected = b"HTTP/1.1 404 Not Found\r\n\
Content-type: text/html\r\n\
Content-length: 112\r\n\
Connection: close\r\n\
\r\n\
<html><head><title>Not Found</title></head><body>\r\n\
The requested URL was not found on this server\r\n\
</body><html>";

    assert_eq!(serialize_response(&Response::not_found()), expected.to_vec());
    assert_eq!(NOT_FOUND_BODY.len(), 112);
}

#[tokio::test]
async fn test_writer_sends_whole_response() {
    let response = Response::not_found();
    let mut writer = ResponseWriter::new(&response);
    let mut out: Vec<u8> = Vec::new();

    writer.write_to_stream(&mut out).await.unwrap();

    let expected = serialize_response(&response);
    assert_eq!(out, expected);
    assert_eq!(writer.written(), expected.len());
}

#[tokio::test]
async fn test_writer_completes_short_writes() {
    // A tiny duplex buffer forces many partial writes
    let (mut client, mut server) = tokio::io::duplex(7);
    let content = FileContent {
        bytes: Bytes::from(vec![b'x'; 5000]),
    };
    let response = Response::file(content, ContentType::ImageGif);
    let expected = serialize_response(&response);

    let reader = tokio::spawn(async move {
        let mut got = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut client, &mut got)
            .await
            .unwrap();
        got
    });

    let mut writer = ResponseWriter::new(&response);
    writer.write_to_stream(&mut server).await.unwrap();
    drop(server);

    assert_eq!(reader.await.unwrap(), expected);
}

#[tokio::test]
async fn test_writer_fails_when_peer_is_gone() {
    let (client, mut server) = tokio::io::duplex(16);
    drop(client);

    let mut writer = ResponseWriter::new(&Response::not_found());
    assert!(writer.write_to_stream(&mut server).await.is_err());
}
