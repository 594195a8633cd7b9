use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_sesv2::types::{Body as EmailBody, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;

use salvay_atoms::notificaciones::service as notificaciones_service;
use salvay_atoms::recesos::model::Receso;
use salvay_atoms::users::model::User;

async fn send_email(
    ses_client: &SesClient,
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<(), String> {
    let subject = Content::builder()
        .data(subject)
        .build()
        .map_err(|e| e.to_string())?;
    let text = Content::builder()
        .data(body)
        .build()
        .map_err(|e| e.to_string())?;
    let message = Message::builder()
        .subject(subject)
        .body(EmailBody::builder().text(text).build())
        .build();

    ses_client
        .send_email()
        .from_email_address(from)
        .destination(Destination::builder().to_addresses(to).build())
        .content(EmailContent::builder().simple(message).build())
        .send()
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Mail the configured address about a new leave request. Best-effort: the
/// request already succeeded, so failures are only logged.
pub async fn notify_new_receso(
    dynamo_client: &DynamoClient,
    ses_client: &SesClient,
    table_name: &str,
    from_address: &str,
    receso: &Receso,
    requester: &User,
) {
    let settings = match notificaciones_service::get_settings(dynamo_client, table_name).await {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("could not load notification settings: {}", e);
            return;
        }
    };
    if !settings.is_active {
        return;
    }
    let Some(to) = settings.notification_email.as_deref() else {
        return;
    };

    let subject = format!("Nueva solicitud de receso de {}", requester.user_name);
    let body = format!(
        "{} solicitó un receso del {} al {}.\n\nComentarios: {}",
        requester.user_name,
        receso.start_date,
        receso.end_date,
        receso.comments.as_deref().unwrap_or("-")
    );

    match send_email(ses_client, from_address, to, &subject, &body).await {
        Ok(()) => tracing::info!(receso_id = %receso.id, "notification email sent"),
        Err(e) => tracing::warn!("failed to send notification email: {}", e),
    }
}
