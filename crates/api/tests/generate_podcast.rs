mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::Part;
use dialogue::{FALLBACK_MESSAGE, FailurePolicy};
use extract::testing::ScriptedModel;
use podcast_api::AppState;
use podcast_api::error::{EXTRACTION_FAILED, GENERATION_FAILED, NO_FILENAME, NO_PDF};
use serde_json::json;
use std::sync::Arc;
use tower::util::ServiceExt;

#[tokio::test]
async fn json_text_produces_full_conversation() {
    let model = Arc::new(common::paper_model());
    let app = common::router_with(model.clone(), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::json_request(json!({ "text": "A paper about foo." })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_json(resp).await;
    assert_eq!(body["title"], "Foo");
    assert_eq!(body["topic"], "Bar");

    let conversation = body["conversation"].as_array().unwrap();
    assert_eq!(conversation.len(), 11);
    assert_eq!(conversation[0]["speaker"], "Host");
    assert_eq!(conversation[1]["speaker"], "Guest");
    assert_eq!(conversation[10]["speaker"], "Host");
    assert!(conversation.iter().all(|t| t.get("degraded").is_none()));
    assert_eq!(model.calls(), 13);
}

#[tokio::test]
async fn uploaded_pdf_is_read_and_scripted() {
    let model = Arc::new(common::paper_model());
    let app = common::router_with(model.clone(), FailurePolicy::Abort);
    let pdf = common::pdf(Some("Attention Is All You Need"));

    let resp = app
        .oneshot(common::multipart_request(&[
            Part::File { name: "pdf", filename: "paper.pdf", bytes: &pdf },
            Part::Text { name: "preferences", value: r#"{"tone": "academic"}"# },
        ]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_json(resp).await;
    assert_eq!(body["title"], "Foo");
    assert_eq!(body["conversation"].as_array().unwrap().len(), 11);

    let prompts = model.prompts();
    assert!(prompts[0].contains("Attention Is All You Need"));
    assert!(prompts[2].contains("scholarly tone"));
}

#[tokio::test]
async fn pdf_without_text_layer_is_rejected() {
    let model = Arc::new(common::paper_model());
    let app = common::router_with(model.clone(), FailurePolicy::Abort);
    let pdf = common::pdf(None);

    let resp = app
        .oneshot(common::multipart_request(&[Part::File {
            name: "pdf",
            filename: "scan.pdf",
            bytes: &pdf,
        }]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(resp).await["error"], EXTRACTION_FAILED);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn garbage_upload_is_rejected() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::multipart_request(&[Part::File {
            name: "pdf",
            filename: "paper.pdf",
            bytes: b"this is not a pdf",
        }]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(resp).await["error"], EXTRACTION_FAILED);
}

#[tokio::test]
async fn missing_pdf_part_is_rejected() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::multipart_request(&[Part::Text {
            name: "preferences",
            value: "{}",
        }]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(resp).await["error"], NO_PDF);
}

#[tokio::test]
async fn empty_filename_is_rejected() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);
    let pdf = common::pdf(Some("text"));

    let resp = app
        .oneshot(common::multipart_request(&[Part::File {
            name: "pdf",
            filename: "",
            bytes: &pdf,
        }]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(common::body_json(resp).await["error"], NO_FILENAME);
}

#[tokio::test]
async fn multipart_text_part_stands_in_for_pdf() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::multipart_request(&[Part::Text {
            name: "text",
            value: "A pasted abstract.",
        }]))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_preference_names_the_field() {
    let model = Arc::new(common::paper_model());
    let app = common::router_with(model.clone(), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::json_request(json!({
            "text": "A paper about foo.",
            "preferences": { "speakingPace": "ludicrous" }
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let error = common::body_json(resp).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("speakingPace"));
    assert!(error.contains("ludicrous"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::json_request(json!({ "text": "   " })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unsupported_content_type_is_rejected() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);

    let req = Request::builder()
        .method("POST")
        .uri("/api/generate-podcast")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("A paper about foo."))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn skipped_sections_shorten_the_script() {
    let app = common::router_with(Arc::new(common::paper_model()), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::json_request(json!({
            "text": "A paper about foo.",
            "preferences": {
                "includedSections": { "methodology": false, "results": false, "implications": false }
            }
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_json(resp).await;
    assert_eq!(body["conversation"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn oversized_json_body_is_rejected() {
    let model = Arc::new(common::paper_model());
    let mut config = common::test_config(FailurePolicy::Abort);
    config.server.max_body_bytes = 64;
    let app = podcast_api::build_router(Arc::new(AppState::with_model(config, model.clone())));

    let resp = app
        .oneshot(common::json_request(json!({ "text": "x".repeat(1024) })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let error = common::body_json(resp).await["error"].as_str().unwrap().to_string();
    assert!(error.contains("length limit"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let model = Arc::new(common::paper_model());
    let mut config = common::test_config(FailurePolicy::Abort);
    config.server.max_body_bytes = 256;
    let app = podcast_api::build_router(Arc::new(AppState::with_model(config, model.clone())));
    let pdf = common::pdf(Some(&"A long abstract. ".repeat(64)));

    let resp = app
        .oneshot(common::multipart_request(&[Part::File {
            name: "pdf",
            filename: "paper.pdf",
            bytes: &pdf,
        }]))
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
    assert!(common::body_json(resp).await["error"].is_string());
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn model_failure_aborts_with_generic_error() {
    let app = common::router_with(Arc::new(ScriptedModel::failing()), FailurePolicy::Abort);

    let resp = app
        .oneshot(common::json_request(json!({ "text": "A paper about foo." })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(resp).await;
    assert_eq!(body["error"], GENERATION_FAILED);
    assert!(body.get("conversation").is_none());
}

#[tokio::test]
async fn model_failure_degrades_turns_when_configured() {
    let app = common::router_with(Arc::new(ScriptedModel::failing()), FailurePolicy::Degrade);

    let resp = app
        .oneshot(common::json_request(json!({ "text": "A paper about foo." })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = common::body_json(resp).await;
    assert_eq!(body["title"], extract::DEFAULT_TITLE);

    let conversation = body["conversation"].as_array().unwrap();
    assert_eq!(conversation.len(), 11);
    assert!(conversation.iter().all(|t| t["degraded"] == true));
    assert!(conversation.iter().all(|t| t["message"] == FALLBACK_MESSAGE));
}

#[tokio::test]
async fn metrics_track_requests_and_model_calls() {
    let state = common::state_with(Arc::new(common::paper_model()), FailurePolicy::Abort);
    let app = podcast_api::build_router(state);

    let ok = app
        .clone()
        .oneshot(common::json_request(json!({ "text": "A paper about foo." })))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);

    let rejected = app
        .clone()
        .oneshot(common::json_request(json!({ "text": "" })))
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .oneshot(Request::builder().uri("/api/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let metrics = common::body_json(resp).await;

    assert_eq!(metrics["total_requests"], 2);
    assert_eq!(metrics["successful_requests"], 1);
    assert_eq!(metrics["failed_requests"], 1);
    assert_eq!(metrics["transcripts_generated"], 1);
    assert_eq!(metrics["turns_generated"], 11);
    assert_eq!(metrics["model_calls"], 13);
}
