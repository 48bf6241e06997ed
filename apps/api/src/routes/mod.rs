pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{assistant, jobs, sections, session};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume analysis
        .route(
            "/api/v1/sections",
            post(sections::handlers::handle_segment),
        )
        .route(
            "/api/v1/documents",
            post(sections::handlers::handle_upload_documents),
        )
        // Conversation
        .route("/api/v1/query", post(session::handlers::handle_query))
        .route("/api/v1/history", get(session::handlers::handle_history))
        // Job listings
        .route("/api/v1/jobs", get(jobs::handlers::handle_job_search))
        // Assistant provisioning
        .route(
            "/api/v1/assistant",
            post(assistant::handlers::handle_provision_assistant),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::state::testing::{test_state, FakeChat, FakeJobs};

    const BOUNDARY: &str = "X-TAILOR-BOUNDARY";

    struct Harness {
        app: Router,
        chat: Arc<FakeChat>,
        _dir: tempfile::TempDir,
        cache_path: PathBuf,
    }

    fn harness_with(chat: FakeChat, jobs: FakeJobs, knowledge: KnowledgeBase) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("assistant.json");
        let chat = Arc::new(chat);
        let state = test_state(chat.clone(), Arc::new(jobs), knowledge, cache_path.clone());
        Harness {
            app: build_router(state),
            chat,
            _dir: dir,
            cache_path,
        }
    }

    fn harness() -> Harness {
        harness_with(FakeChat::default(), FakeJobs::default(), KnowledgeBase::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn upload(files: &[(&str, &str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (file_name, content_type, contents) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{contents}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Request::builder()
            .method("POST")
            .uri("/api/v1/documents")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = send(&h.app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "tailor-api");
    }

    #[tokio::test]
    async fn test_segment_endpoint_default_policy() {
        let h = harness();
        let (status, body) = send(
            &h.app,
            post_json(
                "/api/v1/sections",
                json!({"text": "Skills\nPython\nEducation\nMIT"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["sections"],
            json!({"Education": "MIT", "Skills": "Python"})
        );
    }

    #[tokio::test]
    async fn test_segment_endpoint_whole_document_policy() {
        let h = harness();
        let (_, body) = send(
            &h.app,
            post_json(
                "/api/v1/sections",
                json!({"text": "Skills\nPython\nEducation\nMIT", "boundary": "whole_document"}),
            ),
        )
        .await;
        assert_eq!(body["sections"]["Education"], "");
        assert_eq!(body["sections"]["Skills"], "Python");
    }

    #[tokio::test]
    async fn test_segment_endpoint_empty_text() {
        let h = harness();
        let (status, body) =
            send(&h.app, post_json("/api/v1/sections", json!({"text": ""}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"], json!({}));
    }

    #[tokio::test]
    async fn test_upload_then_query_matched_section() {
        let h = harness();
        let resume = "Objective\nICU nurse\nSkills\nTriage, charting";
        let (status, body) = send(&h.app, upload(&[("cv.txt", "text/plain", resume)])).await;
        assert_eq!(status, StatusCode::OK);
        let document = &body["documents"][0];
        assert_eq!(document["file_name"], "cv.txt");
        assert_eq!(document["format"], "plain_text");
        assert_eq!(document["sections"]["Skills"], "Triage, charting");
        assert_eq!(document["suggestions"][0]["section"], "Objective");
        assert_eq!(
            document["suggestions"][0]["suggestion"],
            "Consider making your objective more concise and focused."
        );

        let (status, body) = send(
            &h.app,
            post_json("/api/v1/query", json!({"query": "SKILLS please"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"], "cv.txt");
        assert_eq!(body["section_label"], "Skills");
        assert_eq!(body["section"], "Triage, charting");
        assert_eq!(body["answer"], "Quantify your ICU outcomes.");
        assert_eq!(body["history"].as_array().unwrap().len(), 2);
        assert_eq!(body["history"][0]["role"], "user");
        assert_eq!(body["history"][1]["role"], "ai");

        let prompts = h.chat.prompts.lock().unwrap();
        assert_eq!(
            prompts[0],
            "Based on the nursing resume knowledge base:\n\nTriage, charting\n\nUser: SKILLS please\nAI:"
        );
    }

    #[tokio::test]
    async fn test_query_without_match_sends_whole_document() {
        let h = harness();
        let resume = "Objective\nICU nurse";
        send(&h.app, upload(&[("cv.txt", "text/plain", resume)])).await;

        let (status, body) = send(
            &h.app,
            post_json("/api/v1/query", json!({"query": "How do I apply in Ontario?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["section"], Value::Null);
        assert_eq!(body["section_label"], Value::Null);
        assert!(h.chat.prompts.lock().unwrap()[0].contains("Objective\nICU nurse"));
    }

    #[tokio::test]
    async fn test_query_with_empty_section_sends_whole_document() {
        let h = harness();
        let resume = "Objective\nSkills\nTriage";
        send(&h.app, upload(&[("cv.txt", "text/plain", resume)])).await;

        let (status, body) = send(
            &h.app,
            post_json("/api/v1/query", json!({"query": "Is my objective ok?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["section_label"], "Objective");
        assert_eq!(body["section"], "");
        assert_eq!(
            h.chat.prompts.lock().unwrap()[0],
            "Based on the nursing resume knowledge base:\n\nObjective\nSkills\nTriage\n\nUser: Is my objective ok?\nAI:"
        );
    }

    #[tokio::test]
    async fn test_query_includes_knowledge_reference() {
        let mut knowledge = KnowledgeBase::default();
        knowledge.add_text("hv3", "Skills\nUse Canadian charting terms");
        let h = harness_with(FakeChat::default(), FakeJobs::default(), knowledge);
        send(&h.app, upload(&[("cv.txt", "text/plain", "Skills\nTriage")])).await;

        send(&h.app, post_json("/api/v1/query", json!({"query": "skills?"}))).await;

        let prompts = h.chat.prompts.lock().unwrap();
        assert!(prompts[0]
            .starts_with("Reference guidance (Skills):\nUse Canadian charting terms\n\n"));
        assert!(prompts[0].contains("\n\nTriage\n\n"));
    }

    #[tokio::test]
    async fn test_last_uploaded_file_becomes_current_document() {
        let h = harness();
        let (status, body) = send(
            &h.app,
            upload(&[
                ("first.txt", "text/plain", "Awards\nFirst"),
                ("second.txt", "text/plain", "Awards\nSecond"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["documents"].as_array().unwrap().len(), 2);

        let (_, body) = send(&h.app, post_json("/api/v1/query", json!({"query": "awards"}))).await;
        assert_eq!(body["document"], "second.txt");
        assert_eq!(body["section"], "Second");
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_previous_document() {
        let h = harness();
        let first = upload(&[("first.txt", "text/plain", "Awards\nFirst")]);
        let (status, _) = send(&h.app, first).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &h.app,
            upload(&[
                ("second.txt", "text/plain", "Awards\nSecond"),
                ("bad.png", "image/png", "xx"),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_DOCUMENT");

        let (_, body) = send(&h.app, post_json("/api/v1/query", json!({"query": "awards"}))).await;
        assert_eq!(body["document"], "first.txt");
        assert_eq!(body["section"], "First");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let h = harness();
        let (status, body) = send(&h.app, upload(&[("photo.png", "image/png", "xx")])).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_DOCUMENT");
    }

    #[tokio::test]
    async fn test_upload_without_files_is_validation_error() {
        let h = harness();
        let (status, body) = send(&h.app, upload(&[])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let h = harness();
        let (status, _) = send(&h.app, post_json("/api/v1/query", json!({"query": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(h.chat.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_failure_keeps_user_turn_only() {
        let h = harness_with(
            FakeChat {
                fail: true,
                ..Default::default()
            },
            FakeJobs::default(),
            KnowledgeBase::default(),
        );
        let (status, body) =
            send(&h.app, post_json("/api/v1/query", json!({"query": "skills"}))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(body["error"]["message"], "No response received from the AI.");

        let (_, history) = send(&h.app, get("/api/v1/history")).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["role"], "user");
        assert_eq!(history[0]["text"], "skills");
    }

    #[tokio::test]
    async fn test_job_search_requires_query_and_location() {
        let h = harness();
        let (status, body) = send(&h.app, get("/api/v1/jobs?query=nurse")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Please enter both a job title and location."
        );
    }

    #[tokio::test]
    async fn test_job_search_returns_listings() {
        let h = harness();
        let (status, body) = send(&h.app, get("/api/v1/jobs?query=nurse&location=Toronto")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"][0]["title"], "nurse");
        assert_eq!(body["jobs"][0]["location"], "Toronto");
        assert_eq!(body["jobs"][0]["company"], "Toronto General");
    }

    #[tokio::test]
    async fn test_job_search_failure_reports_status() {
        let h = harness_with(
            FakeChat::default(),
            FakeJobs { fail: true },
            KnowledgeBase::default(),
        );
        let (status, body) = send(&h.app, get("/api/v1/jobs?query=nurse&location=Toronto")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "JOB_SEARCH_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("status code 403"));
    }

    #[tokio::test]
    async fn test_assistant_created_then_reused() {
        let h = harness();
        let request = json!({
            "name": "Nursing Resume Assistant",
            "description": "Tailors resumes.",
        });

        let (status, body) = send(&h.app, post_json("/api/v1/assistant", request.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "created");
        assert_eq!(body["assistant_id"], "asst_fake");
        assert!(h.cache_path.exists());

        let (status, body) = send(&h.app, post_json("/api/v1/assistant", request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "existing");
        assert_eq!(body["assistant_id"], "asst_fake");
    }
}
