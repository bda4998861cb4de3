use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use shared::{AnalysisOutcome, ErrorResponse, ImagePreview, failure_message};
use web_sys::FormData;

pub async fn preview_image(file: &GlooFile) -> Result<ImagePreview, String> {
    post_image("/api/images", file).await
}

pub async fn analyze_image(file: &GlooFile) -> Result<AnalysisOutcome, String> {
    post_image("/api/analyze", file).await
}

/// Every failure comes back as the single "Analysis failed: ..." message.
async fn post_image<T: DeserializeOwned>(path: &str, file: &GlooFile) -> Result<T, String> {
    let form_data =
        FormData::new().map_err(|_| failure_message("could not prepare the upload form"))?;
    let blob: &web_sys::Blob = file.as_ref();
    form_data
        .append_with_blob_and_filename("image", blob, &file.name())
        .map_err(|_| failure_message("could not attach the selected file"))?;

    let request = Request::post(path)
        .body(form_data)
        .map_err(|e| failure_message(format!("could not build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| failure_message(format!("Network error: {}", e)))?;

    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| failure_message(format!("Failed to parse response: {}", e)))
    } else {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(failure_message(format!("Server error: {}", status))),
        }
    }
}
