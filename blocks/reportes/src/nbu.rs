use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

use salvay_atoms::nbu::service as nbu_service;
use salvay_atoms::obras::service as obras_service;

use crate::types::CurrentNbu;

/// GET /nbu/current - the latest value per provider, joined with provider
/// names. Providers without a published value still appear, value-less.
pub async fn current_nbu_table(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Response<Body>, Error> {
    let obras = obras_service::list_obras_sociales(client, table_name)
        .await
        .map_err(|e| Error::from(e.to_string()))?;

    let mut rows = Vec::with_capacity(obras.len());
    for obra in obras {
        let latest = nbu_service::latest_nbu(client, table_name, obra.id)
            .await
            .map_err(|e| Error::from(e.to_string()))?;
        rows.push(CurrentNbu {
            id_obrasocial: obra.id,
            nameprovider: obra.nameprovider,
            value: latest.as_ref().map(|n| n.value),
            effective_date: latest.as_ref().map(|n| n.effective_date),
        });
    }

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(&rows)?.into())
        .map_err(Box::new)?)
}
