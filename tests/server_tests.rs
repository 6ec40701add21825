//! # Server Tests
//!
//! Drives the `/print` router in-process with `tower::ServiceExt::oneshot`
//! and a stubbed printer.

mod common;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{BROKEN_MESSAGE, Broken, Recorder, encode, gradient, half_transparent};
use image::{ColorType, ImageFormat};
use serde_json::Value;
use tempfile::TempDir;
use thermoprint::{
    Printer, PrinterConfig, Transport,
    server::{self, AppState, NO_FILE_SELECTED, NO_IMAGE_PART, PRINTED, ServerConfig},
};
use tower::ServiceExt;

const BOUNDARY: &str = "----thermoprint-test-boundary";

struct Part<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    body: &'a [u8],
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend(format!("--{}\r\n", BOUNDARY).into_bytes());
        match part.filename {
            Some(filename) => {
                body.extend(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, filename
                    )
                    .into_bytes(),
                );
                body.extend(b"Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.extend(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .into_bytes(),
                );
            }
        }
        body.extend(b"\r\n");
        body.extend_from_slice(part.body);
        body.extend(b"\r\n");
    }
    body.extend(format!("--{}--\r\n", BOUNDARY).into_bytes());
    body
}

fn multipart_request(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/print")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        listen_addr: "127.0.0.1:0".to_string(),
        upload_dir: dir.path().join("uploads"),
        temp_path: dir.path().join("temp.png"),
        ..ServerConfig::default()
    }
}

fn app(dir: &TempDir, transport: Box<dyn Transport>) -> Router {
    let printer = Printer::new(transport, PrinterConfig::POS58);
    server::router(Arc::new(AppState::new(config(dir), printer)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();

    let request = multipart_request(&[Part {
        name: "photo",
        filename: Some("cat.png"),
        body: b"whatever",
    }]);
    let (status, body) = send(app(&dir, Box::new(recorder.clone())), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], NO_IMAGE_PART);
    assert!(recorder.bytes().is_empty());
}

#[tokio::test]
async fn image_form_field_without_file_is_not_an_image_part() {
    let dir = tempfile::tempdir().unwrap();

    let request = multipart_request(&[Part {
        name: "image",
        filename: None,
        body: b"just text",
    }]);
    let (status, body) = send(app(&dir, Box::new(Recorder::default())), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], NO_IMAGE_PART);
}

#[tokio::test]
async fn non_multipart_request_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/print")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"image\": \"cat.png\"}"))
        .unwrap();
    let (status, body) = send(app(&dir, Box::new(Recorder::default())), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], NO_IMAGE_PART);
}

#[tokio::test]
async fn empty_filename_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();

    let request = multipart_request(&[Part {
        name: "image",
        filename: Some(""),
        body: b"",
    }]);
    let (status, body) = send(app(&dir, Box::new(recorder.clone())), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], NO_FILE_SELECTED);
    assert!(recorder.bytes().is_empty());
}

#[tokio::test]
async fn valid_upload_is_saved_converted_and_printed() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    let png = encode(&half_transparent(600, 300), ImageFormat::Png);

    let request = multipart_request(&[
        Part {
            name: "caption",
            filename: None,
            body: b"ignored",
        },
        Part {
            name: "image",
            filename: Some("../my logo.png"),
            body: &png,
        },
    ]);
    let (status, body) = send(app(&dir, Box::new(recorder.clone())), request).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], PRINTED);

    // Saved under a sanitized name inside the upload directory
    let saved = dir.path().join("uploads").join("my_logo.png");
    assert_eq!(std::fs::read(&saved).unwrap(), png);

    // 384 wide grayscale copy, round(300 * 384 / 600) = 192 rows
    let converted = image::open(dir.path().join("temp.png")).unwrap();
    assert_eq!(converted.color(), ColorType::L8);
    assert_eq!((converted.width(), converted.height()), (384, 192));
    assert_eq!(converted.to_luma8().get_pixel(10, 100).0[0], 255);

    let out = recorder.bytes();
    assert_eq!(&out[..8], &[0x1D, 0x76, 0x30, 0, 48, 0, 192, 0]);
    assert_eq!(out.len(), 8 + 48 * 192);
}

#[tokio::test]
async fn unusable_filename_gets_generated_name() {
    let dir = tempfile::tempdir().unwrap();
    let png = encode(&gradient(50, 50), ImageFormat::Png);

    let request = multipart_request(&[Part {
        name: "image",
        filename: Some("../.."),
        body: &png,
    }]);
    let (status, _) = send(app(&dir, Box::new(Recorder::default())), request).await;

    assert_eq!(status, StatusCode::OK);
    let saved: Vec<_> = std::fs::read_dir(dir.path().join("uploads"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("upload-"), "{:?}", saved);
}

#[tokio::test]
async fn device_error_is_reported_as_500_with_its_text() {
    let dir = tempfile::tempdir().unwrap();
    let png = encode(&gradient(384, 20), ImageFormat::Png);

    let request = multipart_request(&[Part {
        name: "image",
        filename: Some("photo.png"),
        body: &png,
    }]);
    let (status, body) = send(app(&dir, Box::new(Broken)), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains(BROKEN_MESSAGE), "{}", message);

    // The upload stays on disk even though printing failed
    assert!(dir.path().join("uploads").join("photo.png").exists());
}

#[tokio::test]
async fn undecodable_upload_is_reported_as_500() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();

    let request = multipart_request(&[Part {
        name: "image",
        filename: Some("resume.pdf"),
        body: b"%PDF-1.4 not really",
    }]);
    let (status, body) = send(app(&dir, Box::new(recorder.clone())), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("decode"), "{}", body);
    assert!(recorder.bytes().is_empty());
}

#[tokio::test]
async fn upload_too_tall_to_print_is_reported_as_500() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Recorder::default();
    // A few hundred bytes on the wire, 15 million rows once scaled to 384 dots
    let png = encode(&gradient(1, 40_000), ImageFormat::Png);

    let request = multipart_request(&[Part {
        name: "image",
        filename: Some("strip.png"),
        body: &png,
    }]);
    let (status, body) = send(app(&dir, Box::new(recorder.clone())), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("rows"), "{}", body);
    assert!(recorder.bytes().is_empty());
    assert!(!dir.path().join("temp.png").exists());
}

#[tokio::test]
async fn oversized_upload_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        max_upload_bytes: 1024,
        ..config(&dir)
    };
    let printer = Printer::new(
        Box::new(Recorder::default()) as Box<dyn Transport>,
        PrinterConfig::POS58,
    );
    let app = server::router(Arc::new(AppState::new(config, printer)));

    let big = vec![0u8; 64 * 1024];
    let request = multipart_request(&[Part {
        name: "image",
        filename: Some("big.png"),
        body: &big,
    }]);
    let (status, _) = send(app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
