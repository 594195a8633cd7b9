use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client as S3Client;
use lambda_http::{http::StatusCode, Body, Error, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const UPLOAD_URL_TTL: Duration = Duration::from_secs(900);

#[derive(Deserialize)]
pub struct InitiateAttachmentRequest {
    pub problema_id: String,
    pub file_name: String,
    pub content_type: String,
}

#[derive(Serialize)]
struct InitiateAttachmentResponse {
    upload_url: String,
    attachment_url: String,
}

/// Hand out a presigned PUT URL for a problema attachment. The stored
/// `archivos_urls` entry is the object key, served back through the bucket.
pub async fn initiate_attachment_upload(
    s3_client: &S3Client,
    bucket_name: &str,
    request: InitiateAttachmentRequest,
) -> Result<Response<Body>, Error> {
    let key = format!(
        "problemas/{}/{}-{}",
        request.problema_id,
        uuid::Uuid::new_v4(),
        request.file_name
    );

    let presigning = PresigningConfig::expires_in(UPLOAD_URL_TTL).map_err(Box::new)?;
    let presigned = s3_client
        .put_object()
        .bucket(bucket_name)
        .key(&key)
        .content_type(&request.content_type)
        .presigned(presigning)
        .await
        .map_err(Box::new)?;

    let response = InitiateAttachmentResponse {
        upload_url: presigned.uri().to_string(),
        attachment_url: format!("https://{}.s3.amazonaws.com/{}", bucket_name, key),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(&response)?.into())
        .map_err(Box::new)?)
}
