#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use dialogue::FailurePolicy;
use extract::testing::ScriptedModel;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use podcast_api::{AppConfig, AppState, SharedState, build_router};
use serde_json::Value;
use std::sync::Arc;

pub const BOUNDARY: &str = "podcast-test-boundary";

pub const METADATA_REPLY: &str = "Title: Foo\nTopic: Bar";
pub const KEY_POINTS_REPLY: &str =
    "Point1: goal\nPoint2: method\nPoint3: result\nPoint4: impact\nPoint5: next";

/// A model that answers both extraction prompts and numbers every other reply.
pub fn paper_model() -> ScriptedModel {
    ScriptedModel::new()
        .reply_when("title and topic", METADATA_REPLY)
        .reply_when("five key discussion points", KEY_POINTS_REPLY)
}

/// Default config with millisecond retry backoff.
pub fn test_config(policy: FailurePolicy) -> AppConfig {
    let mut config = AppConfig::default();
    config.failure_policy = policy;
    config.retry.max_retries = 1;
    config.retry.initial_backoff_ms = 1;
    config.retry.max_backoff_ms = 1;
    config
}

pub fn state_with(model: Arc<ScriptedModel>, policy: FailurePolicy) -> SharedState {
    Arc::new(AppState::with_model(test_config(policy), model))
}

pub fn router_with(model: Arc<ScriptedModel>, policy: FailurePolicy) -> Router {
    build_router(state_with(model, policy))
}

pub fn json_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate-podcast")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/generate-podcast")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Single-page PDF; `None` leaves the page without a content stream.
pub fn pdf(text: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut page = dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    if let Some(text) = text {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        page.set("Contents", content_id);
    }
    let page_id = doc.add_object(page);

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
