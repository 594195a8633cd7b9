use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;

pub mod attachments;
pub mod auth;
pub mod email;
pub mod types;

pub use salvay_atoms as atoms;

/// AWS clients shared across invocations of the lambda.
pub struct AppState {
    pub dynamo_client: DynamoClient,
    pub ses_client: SesClient,
    pub s3_client: S3Client,
}

impl AppState {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        AppState {
            dynamo_client: DynamoClient::new(config),
            ses_client: SesClient::new(config),
            s3_client: S3Client::new(config),
        }
    }
}
