use lambda_http::{
    http::header::{HeaderValue, SET_COOKIE, VARY},
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use salvay_atoms as atoms;
use salvay_shared::{attachments, auth, email, AppState};
use std::env;
use std::sync::Arc;

use atoms::authz;
use atoms::users::model::Role;

const DEFAULT_MAX_DIAS_HABILES: i64 = 3;

fn with_set_cookies(mut resp: Response<Body>, cookies: &[String]) -> Response<Body> {
    let headers = resp.headers_mut();
    for cookie in cookies {
        if let Ok(v) = HeaderValue::from_str(cookie) {
            headers.append(SET_COOKIE, v);
        }
    }
    resp
}

fn with_cors_headers(mut resp: Response<Body>, request_origin: Option<&str>) -> Response<Body> {
    let allowed = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());
    let origin = match (allowed.as_str(), request_origin) {
        ("*", _) => "*".to_string(),
        (configured, Some(req)) if configured == req => configured.to_string(),
        (configured, _) => configured.to_string(),
    };

    let headers = resp.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_str(&origin).unwrap_or_else(|_| HeaderValue::from_static("*")),
    );
    headers.insert(
        "Access-Control-Allow-Credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("GET,POST,PUT,PATCH,DELETE,OPTIONS"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type,Authorization,Cookie"),
    );
    headers.append(VARY, HeaderValue::from_static("Origin"));

    resp
}

fn finalize_response(
    resp: Result<Response<Body>, Error>,
    request_origin: Option<&str>,
    cookies: &[String],
) -> Result<Response<Body>, Error> {
    resp.map(|r| with_cors_headers(with_set_cookies(r, cookies), request_origin))
}

fn max_dias_habiles() -> i64 {
    env::var("RECESO_MAX_DIAS_HABILES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_DIAS_HABILES)
}

fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(serde_json::json!({"error": "Not found"}).to_string().into())
        .map_err(Box::new)?)
}

fn method_not_allowed() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .body(
            serde_json::json!({"error": "Method not allowed"})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}

/// Main Lambda handler - routes requests to the portal endpoints.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body = event.body();
    let request_origin = event.headers().get("Origin").and_then(|v| v.to_str().ok());
    let cookie_header = event.headers().get("Cookie").and_then(|v| v.to_str().ok());
    tracing::info!("API invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == "OPTIONS" {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::Empty)
            .map_err(Box::new)?;
        return Ok(with_cors_headers(resp, request_origin));
    }

    let table_name = env::var("TABLE_NAME").unwrap_or_else(|_| "salvay".to_string());

    // Auth endpoints (no session required)
    if path == "/login" {
        return match method {
            &Method::POST => finalize_response(
                auth::login(&state.dynamo_client, &table_name, body).await,
                request_origin,
                &[],
            ),
            _ => finalize_response(method_not_allowed(), request_origin, &[]),
        };
    }

    if path == "/logout" {
        return match method {
            &Method::POST => finalize_response(
                auth::logout(&state.dynamo_client, &table_name, cookie_header).await,
                request_origin,
                &[],
            ),
            _ => finalize_response(method_not_allowed(), request_origin, &[]),
        };
    }

    // Everything else requires a session
    let auth_ctx =
        match auth::authenticate_request(&state.dynamo_client, &table_name, cookie_header).await {
            Ok(ctx) => ctx,
            Err(resp) => return Ok(with_cors_headers(resp, request_origin)),
        };
    let current_user = &auth_ctx.user;

    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let resp = match (method, parts.as_slice()) {
        // --- USERS ---
        (&Method::POST, ["users"]) => {
            atoms::users::http::create_user_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                body,
            )
            .await
        }
        (&Method::GET, ["users", "me"]) => atoms::users::http::get_me_handler(current_user).await,
        (&Method::GET, ["users"]) => {
            atoms::users::http::list_users_handler(&state.dynamo_client, &table_name, current_user)
                .await
        }

        // --- RECESOS ---
        (&Method::GET, ["recesos"]) => {
            atoms::recesos::http::list_recesos_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
            )
            .await
        }
        (&Method::POST, ["recesos"]) => {
            let (resp, created) = atoms::recesos::http::create_receso_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                max_dias_habiles(),
                body,
            )
            .await?;
            if let Some(receso) = created {
                let from = env::var("NOTIFICATION_FROM_EMAIL")
                    .unwrap_or_else(|_| "no-reply@ieasalvay.example".to_string());
                email::notify_new_receso(
                    &state.dynamo_client,
                    &state.ses_client,
                    &table_name,
                    &from,
                    &receso,
                    current_user,
                )
                .await;
            }
            Ok(resp)
        }
        (&Method::PATCH, ["recesos", id]) => {
            atoms::recesos::http::update_receso_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                id,
                max_dias_habiles(),
                body,
            )
            .await
        }
        (&Method::DELETE, ["recesos", id]) => {
            atoms::recesos::http::delete_receso_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                id,
            )
            .await
        }

        // --- CAPACITACIONES ---
        (&Method::GET, ["capacitaciones", "reporte"]) => {
            let owner_filter = match current_user.user_type {
                Role::Admin => None,
                Role::Bioquimica => Some(current_user.user_id.as_str()),
            };
            reportes_block::capacitaciones::capacitaciones_report(
                &state.dynamo_client,
                &table_name,
                owner_filter,
            )
            .await
        }
        (&Method::GET, ["capacitaciones"]) => {
            atoms::capacitaciones::http::list_capacitaciones_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
            )
            .await
        }
        (&Method::POST, ["capacitaciones"]) => {
            atoms::capacitaciones::http::create_capacitacion_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                body,
            )
            .await
        }
        (&Method::PATCH, ["capacitaciones", id]) => {
            atoms::capacitaciones::http::update_capacitacion_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                id,
                body,
            )
            .await
        }
        (&Method::DELETE, ["capacitaciones", id]) => {
            atoms::capacitaciones::http::delete_capacitacion_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                id,
            )
            .await
        }

        // --- OBRAS SOCIALES ---
        (&Method::GET, ["obras-sociales"]) => {
            atoms::obras::http::list_obras_handler(&state.dynamo_client, &table_name).await
        }
        (&Method::POST, ["obras-sociales"]) => {
            atoms::obras::http::create_obra_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                body,
            )
            .await
        }

        // --- NBU ---
        (&Method::POST, ["nbu"]) => {
            atoms::nbu::http::create_nbu_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                body,
            )
            .await
        }
        (&Method::GET, ["nbu", "current"]) => {
            reportes_block::nbu::current_nbu_table(&state.dynamo_client, &table_name).await
        }
        (&Method::GET, ["nbu", id_obrasocial, "history"]) => match id_obrasocial.parse() {
            Ok(id) => {
                atoms::nbu::http::nbu_history_handler(&state.dynamo_client, &table_name, id).await
            }
            Err(_) => not_found(),
        },

        // --- PROBLEMAS ---
        (&Method::GET, ["problemas"]) => {
            atoms::problemas::http::list_problemas_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
            )
            .await
        }
        (&Method::POST, ["problemas", "attachments"]) => {
            match authz::require_role(Some(current_user), Role::Admin) {
                Ok(()) => {
                    let bucket_name = env::var("S3_BUCKET_NAME")
                        .unwrap_or_else(|_| "salvay-adjuntos".to_string());
                    let request: attachments::InitiateAttachmentRequest =
                        serde_json::from_slice(body)?;
                    attachments::initiate_attachment_upload(&state.s3_client, &bucket_name, request)
                        .await
                }
                Err(e) => atoms::error::auth_response(&e),
            }
        }
        (&Method::POST, ["problemas"]) => {
            atoms::problemas::http::create_problema_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                body,
            )
            .await
        }
        (&Method::DELETE, ["problemas", id]) => {
            atoms::problemas::http::delete_problema_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                id,
            )
            .await
        }

        // --- NOTIFICACIONES ---
        (&Method::GET, ["notificaciones"]) => {
            atoms::notificaciones::http::get_settings_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
            )
            .await
        }
        (&Method::PUT, ["notificaciones"]) => {
            atoms::notificaciones::http::update_settings_handler(
                &state.dynamo_client,
                &table_name,
                current_user,
                body,
            )
            .await
        }

        // --- DASHBOARD ---
        (&Method::GET, ["dashboard"]) => {
            match authz::require_role(Some(current_user), Role::Admin) {
                Ok(()) => {
                    reportes_block::dashboard::dashboard_stats(&state.dynamo_client, &table_name)
                        .await
                }
                Err(e) => atoms::error::auth_response(&e),
            }
        }

        _ => {
            tracing::warn!("No route matched - Method: {} Path: {}", method, path);
            not_found()
        }
    };

    finalize_response(resp, request_origin, &auth_ctx.set_cookies)
}
