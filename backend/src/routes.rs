use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{info, warn};
use serde_json::json;

use crate::analysis;
use crate::classifier::ClassifierHandle;
use crate::config::AppConfig;
use crate::error::ApiError;

struct Upload {
    file_name: String,
    data: Vec<u8>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/images").route(web::post().to(handle_preview)))
        .service(web::resource("/api/analyze").route(web::post().to(handle_analyze)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_preview(
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_upload(payload, config.server.max_upload_bytes).await?;
    let preview = analysis::preview(&upload.file_name, &upload.data).inspect_err(|e| {
        warn!("Preview of {} failed: {}", upload.file_name, e);
    })?;

    Ok(HttpResponse::Ok().json(preview))
}

async fn handle_analyze(
    handle: web::Data<ClassifierHandle>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_upload(payload, config.server.max_upload_bytes).await?;
    info!("Analysis requested for {}", upload.file_name);

    let outcome = analysis::analyze(handle.get_ref(), &upload.file_name, &upload.data).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn health(handle: web::Data<ClassifierHandle>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "classifier_ready": handle.is_ready(),
    }))
}

/// First file field of the form. Other fields are drained and ignored.
async fn read_upload(mut payload: Multipart, max_bytes: usize) -> Result<Upload, ApiError> {
    while let Some(mut field) = payload.try_next().await? {
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_owned);

        let Some(file_name) = file_name else {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if data.len() + chunk.len() > max_bytes {
                warn!("Rejected {}: larger than {} bytes", file_name, max_bytes);
                return Err(ApiError::Upload(format!(
                    "file is larger than {} bytes",
                    max_bytes
                )));
            }
            data.extend_from_slice(&chunk);
        }

        info!("Received {} ({} bytes)", file_name, data.len());
        return Ok(Upload { file_name, data });
    }

    Err(ApiError::Upload("no image file in request".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::tests::{FailingClassifier, StubClassifier};
    use crate::imaging::loader::tests::{gif_bytes, oversized_screen_gif, png_bytes};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use shared::{ANIMATED_NOTICE, AnalysisOutcome, ErrorResponse, ImagePreview};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    const BOUNDARY: &str = "emotion-test-boundary";

    fn multipart_body(name: &str, file_name: Option<&str>, data: &[u8]) -> Vec<u8> {
        let disposition = match file_name {
            Some(file_name) => format!("form-data; name=\"{}\"; filename=\"{}\"", name, file_name),
            None => format!("form-data; name=\"{}\"", name),
        };
        let mut body = format!(
            "--{}\r\nContent-Disposition: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, disposition
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(uri: &str, body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.max_upload_bytes = 64 * 1024;
        config
    }

    #[actix_web::test]
    async fn analyze_returns_outcome() {
        let classifier = Arc::new(StubClassifier::new(&[
            ("happy", 0.962),
            ("neutral", 0.03),
            ("sad", 0.008),
        ]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(classifier.clone())))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        let body = multipart_body("image", Some("face.png"), &png_bytes(4, 4, [5, 5, 5, 255]));
        let resp = test::call_service(&app, upload_request("/api/analyze", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let outcome: AnalysisOutcome = test::read_body_json(resp).await;
        let labels: Vec<&str> = outcome.result.scores().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["happy", "neutral", "sad"]);
        assert_eq!(outcome.advice, shared::resolve_advice("happy"));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn corrupted_upload_is_unprocessable() {
        let classifier = Arc::new(StubClassifier::new(&[("happy", 1.0)]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(classifier.clone())))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        let body = multipart_body("image", Some("face.png"), b"\x89PNG\r\n\x1a\nbroken");
        let resp = test::call_service(&app, upload_request("/api/analyze", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error: ErrorResponse = test::read_body_json(resp).await;
        assert!(error.error.starts_with("Analysis failed: "));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn classifier_failure_is_bad_gateway_and_app_stays_up() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(Arc::new(FailingClassifier))))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        for _ in 0..2 {
            let body = multipart_body("image", Some("face.png"), &png_bytes(2, 2, [0, 0, 0, 255]));
            let resp = test::call_service(&app, upload_request("/api/analyze", body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
            let error: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(
                error.error,
                "Analysis failed: classifier returned 500: no face detected"
            );
        }

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn preview_flags_animation_without_classifying() {
        let classifier = Arc::new(StubClassifier::new(&[("happy", 1.0)]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(classifier.clone())))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        let gif = gif_bytes(&[[255, 0, 0, 255], [0, 255, 0, 255]]);
        let body = multipart_body("image", Some("loop.gif"), &gif);
        let resp = test::call_service(&app, upload_request("/api/images", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let preview: ImagePreview = test::read_body_json(resp).await;
        assert!(preview.animated);
        assert_eq!(preview.format, "gif");
        assert_eq!(preview.notice(), Some(ANIMATED_NOTICE));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn missing_file_field_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(Arc::new(FailingClassifier))))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        let body = multipart_body("comment", None, b"hello");
        let resp = test::call_service(&app, upload_request("/api/analyze", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(error.error, "Analysis failed: no image file in request");
    }

    #[actix_web::test]
    async fn oversize_upload_is_rejected() {
        let mut small = config();
        small.server.max_upload_bytes = 16;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(Arc::new(FailingClassifier))))
                .app_data(web::Data::new(small))
                .configure(configure_api),
        )
        .await;

        let body = multipart_body("image", Some("face.png"), &png_bytes(8, 8, [0, 0, 0, 255]));
        let resp = test::call_service(&app, upload_request("/api/images", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn gif_with_huge_screen_is_unprocessable() {
        let classifier = Arc::new(StubClassifier::new(&[("happy", 1.0)]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(classifier.clone())))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        for uri in ["/api/images", "/api/analyze"] {
            let body = multipart_body("image", Some("bomb.gif"), &oversized_screen_gif());
            let resp = test::call_service(&app, upload_request(uri, body).to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn still_preview_has_no_notice() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::ready(Arc::new(FailingClassifier))))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        let body = multipart_body("image", Some("face.png"), &png_bytes(3, 3, [0, 0, 0, 255]));
        let resp = test::call_service(&app, upload_request("/api/images", body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let preview: ImagePreview = test::read_body_json(resp).await;
        assert!(!preview.animated);
        assert_eq!(preview.notice(), None);
    }

    #[actix_web::test]
    async fn health_reports_lazy_classifier_state() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ClassifierHandle::lazy(|| {
                    Err(crate::classifier::ClassificationError::Init("offline".into()))
                })))
                .app_data(web::Data::new(config()))
                .configure(configure_api),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["classifier_ready"], false);
    }
}
