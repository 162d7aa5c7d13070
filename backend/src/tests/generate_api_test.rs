//! Endpoint tests for POST /api/generate

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::common::{StubClient, StubReply, create_test_router, post_json, send};
use crate::models::LengthMode;
use crate::services::fallback::{SatireCategory, WORD_SLOT, templates};
use crate::utils::Locale;

fn is_template_for(
    satire: &str,
    locale: Locale,
    length: LengthMode,
    category: SatireCategory,
    word: &str,
) -> bool {
    templates(locale, length, category).iter().any(|t| t.replacen(WORD_SLOT, word, 1) == satire)
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_empty_word_is_rejected() {
    let (status, body) = post_json(create_test_router(None), json!({"word": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "word is required"}));
}

#[tokio::test]
async fn test_missing_word_is_rejected() {
    let (status, body) = post_json(create_test_router(None), json!({"length": "short"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "word is required"}));
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let (status, body) = send(create_test_router(None), Method::POST, "word=上司").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "word is required");
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, body) = send(create_test_router(None), method, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Only POST"}));
    }
}

#[tokio::test]
async fn test_rejected_request_never_calls_upstream() {
    let client = StubClient::content(r#"{"satire":"x","type":"y"}"#);
    let (status, _) = post_json(create_test_router(Some(client.clone())), json!({"word": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(client.calls(), 0);
}

// ============================================================================
// Fallback without credential
// ============================================================================

#[tokio::test]
async fn test_workplace_word_without_credential() {
    let (status, body) = post_json(create_test_router(None), json!({"word": "上司"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "仕事風刺");
    let satire = body["satire"].as_str().unwrap();
    assert!(is_template_for(satire, Locale::Ja, LengthMode::Long, SatireCategory::Work, "上司"), "{satire}");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_english_tech_word_without_credential() {
    let (status, body) = post_json(create_test_router(None), json!({"word": "AI", "lang": "en"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Tech satire");
    let satire = body["satire"].as_str().unwrap();
    assert!(is_template_for(satire, Locale::En, LengthMode::Long, SatireCategory::Tech, "AI"), "{satire}");
}

#[tokio::test]
async fn test_short_marker_selects_short_templates() {
    let (status, body) = post_json(create_test_router(None), json!({"word": "会議 (short)"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "仕事風刺");
    let satire = body["satire"].as_str().unwrap();
    assert!(is_template_for(satire, Locale::Ja, LengthMode::Short, SatireCategory::Work, "会議"), "{satire}");
    assert!(!satire.contains("(short)"));
}

#[tokio::test]
async fn test_short_marker_survives_trailing_annotations() {
    for word in ["上司 (short) smile", "上司 (short)："] {
        let (status, body) = post_json(create_test_router(None), json!({"word": word})).await;
        assert_eq!(status, StatusCode::OK);
        let satire = body["satire"].as_str().unwrap();
        assert!(is_template_for(satire, Locale::Ja, LengthMode::Short, SatireCategory::Work, "上司"), "{satire}");
    }
}

#[tokio::test]
async fn test_unknown_lang_uses_default_locale() {
    let (status, body) = post_json(create_test_router(None), json!({"word": "天気", "lang": "xx-YY"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "社会風刺");
    let satire = body["satire"].as_str().unwrap();
    assert!(is_template_for(satire, Locale::Ja, LengthMode::Long, SatireCategory::Society, "天気"), "{satire}");
}

#[tokio::test]
async fn test_every_locale_answers_without_credential() {
    for lang in ["ja", "en", "zh-CN", "zh-TW", "ko", "zh_Hant"] {
        let (status, body) =
            post_json(create_test_router(None), json!({"word": "恋", "lang": lang, "length": "short"})).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["satire"].as_str().unwrap().is_empty());
        assert!(!body["type"].as_str().unwrap().is_empty());
        assert!(body["satire"].as_str().unwrap().contains('恋'));
    }
}

// ============================================================================
// Upstream paths
// ============================================================================

#[tokio::test]
async fn test_model_reply_is_returned() {
    let client = StubClient::content(r#"{"satire":"上司：責任の避雷針。","type":"仕事風刺"}"#);
    let (status, body) = post_json(create_test_router(Some(client.clone())), json!({"word": "上司"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"satire": "上司：責任の避雷針。", "type": "仕事風刺"}));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_upstream_error_is_advisory() {
    let client = StubClient::new(StubReply::Status(500, "upstream down".to_string()));
    let (status, body) = post_json(create_test_router(Some(client)), json!({"word": "AI", "lang": "en"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Tech satire");
    assert_eq!(body["error"], "OpenAI error: 500 upstream down");
    let satire = body["satire"].as_str().unwrap();
    assert!(is_template_for(satire, Locale::En, LengthMode::Long, SatireCategory::Tech, "AI"), "{satire}");
}

#[tokio::test]
async fn test_unusable_reply_falls_back_silently() {
    for content in ["{}", "not json at all", r#"{"satire":"  ","type":"仕事風刺"}"#] {
        let client = StubClient::content(content);
        let (status, body) = post_json(create_test_router(Some(client)), json!({"word": "上司"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "仕事風刺");
        assert!(body.get("error").is_none());
        let satire = body["satire"].as_str().unwrap();
        assert!(is_template_for(satire, Locale::Ja, LengthMode::Long, SatireCategory::Work, "上司"), "{satire}");
    }
}

#[tokio::test]
async fn test_client_panic_is_recovered() {
    let client = StubClient::new(StubReply::Panic);
    let (status, body) = post_json(create_test_router(Some(client)), json!({"word": "お金"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["satire"].as_str().unwrap().is_empty());
    assert_eq!(body["type"], "社会風刺");
    assert!(body["error"].as_str().unwrap().contains("panicked"));
}
