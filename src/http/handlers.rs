use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use askama::Template;
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;

use crate::domain::theme::{ThemeCommand, ThemeError, ThemeEvent, ThemeService};
use crate::event_sourcing::serialize_event;
use crate::metrics::Metrics;
use super::css::ThemeCss;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/theme", web::post().to(create_theme))
        .route("/theme/{name}", web::get().to(get_theme))
        .route("/theme/{name}", web::post().to(post_to_theme))
        .route("/theme/{name}/css", web::get().to(get_theme_css))
        .route("/theme/{name}/events", web::get().to(list_events))
        .route("/theme/{name}/undo", web::get().to(get_undo_preview))
        .route("/theme/{name}/version/{version}", web::get().to(get_theme_version))
        .route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(health_handler));
}

impl ResponseError for ThemeError {
    fn status_code(&self) -> StatusCode {
        match self {
            ThemeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ThemeError::NotFound(_) => StatusCode::NOT_FOUND,
            ThemeError::Conflict { .. } => StatusCode::CONFLICT,
            ThemeError::UnknownEvent(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ThemeError::StorageFailure(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct CreateThemeQuery {
    name: String,
}

/// What a `POST /theme/{name}` asks for, taken from its content type
#[derive(Debug, PartialEq)]
enum PostAction {
    Event(String),
    Command(String),
}

/// `application/json;event=<Kind>` or `application/json;command=<Name>`
fn parse_action(content_type: &str) -> Result<PostAction, ThemeError> {
    let mut parts = content_type.split(';').map(str::trim);

    if parts.next() != Some("application/json") {
        return Err(ThemeError::InvalidInput(format!("unsupported content type: {}", content_type)));
    }

    for param in parts {
        match param.split_once('=') {
            Some(("event", kind)) => return Ok(PostAction::Event(kind.trim().to_string())),
            Some(("command", name)) => return Ok(PostAction::Command(name.trim().to_string())),
            _ => {}
        }
    }

    Err(ThemeError::InvalidInput(format!("unsupported content type: {}", content_type)))
}

async fn create_theme(
    service: web::Data<ThemeService>,
    query: web::Query<CreateThemeQuery>,
) -> Result<HttpResponse, ThemeError> {
    service.create_theme(&query.name).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/theme/{}", query.name)))
        .finish())
}

async fn get_theme(
    service: web::Data<ThemeService>,
    name: web::Path<String>,
) -> Result<HttpResponse, ThemeError> {
    let theme = service.load_theme(&name)?;
    Ok(HttpResponse::Ok().json(theme.state()))
}

async fn get_theme_css(
    service: web::Data<ThemeService>,
    name: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let theme = service.load_theme(&name)?;
    let css = ThemeCss::new(theme.state())
        .render()
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().content_type("text/css").body(css))
}

async fn post_to_theme(
    service: web::Data<ThemeService>,
    name: web::Path<String>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, ThemeError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match parse_action(content_type)? {
        PostAction::Event(kind) => {
            let json = std::str::from_utf8(&body)
                .map_err(|e| ThemeError::InvalidInput(format!("body is not UTF-8: {}", e)))?;
            let event = ThemeEvent::decode(&kind, json)?;
            service.apply_change(&name, event).await?;
        }
        PostAction::Command(command) => {
            let command = ThemeCommand::parse(&command)
                .ok_or_else(|| ThemeError::InvalidInput(format!("unknown command: {}", command)))?;
            match command {
                ThemeCommand::Activate => service.activate(&name).await?,
            };
        }
    }

    Ok(HttpResponse::Ok().content_type("text/plain").body("OK"))
}

/// One event per line: sequence number, timestamp, type, JSON payload
async fn list_events(
    service: web::Data<ThemeService>,
    name: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    let mut body = String::new();
    for envelope in service.events(&name)? {
        let payload = serialize_event(&envelope.event_data)
            .map_err(actix_web::error::ErrorInternalServerError)?;
        body.push_str(&format!(
            "{} {} {} {}\n",
            envelope.sequence_number,
            envelope.recorded_at.to_rfc3339(),
            envelope.event_type,
            payload
        ));
    }

    Ok(HttpResponse::Ok().content_type("text/plain").body(body))
}

async fn get_undo_preview(
    service: web::Data<ThemeService>,
    name: web::Path<String>,
) -> Result<HttpResponse, ThemeError> {
    let theme = service.undo_preview(&name)?;
    Ok(HttpResponse::Ok().json(theme.state()))
}

async fn get_theme_version(
    service: web::Data<ThemeService>,
    path: web::Path<(String, usize)>,
) -> Result<HttpResponse, ThemeError> {
    let (name, version) = path.into_inner();
    let theme = service.theme_at_version(&name, version)?;
    Ok(HttpResponse::Ok().json(theme.state()))
}

async fn metrics_handler(metrics: web::Data<Metrics>) -> actix_web::Result<HttpResponse> {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "theme-designer"
    }))
}

// ============================================================================
// Unit Tests
// ============================================================================
