//! Handlers for shortlink creation, lookup and redirect.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::info;
use url::Url;
use validator::{Validate, ValidationErrors};

use crate::api::dto::shortlink::{
    CreateErrorResponse, CreateShortLinkRequest, CreateShortLinkResponse, DecodeResponse,
};
use crate::domain::repositories::ShortLinkRepository;
use crate::domain::resolver::HostResolver;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortlink.
///
/// # Endpoint
///
/// `POST /api/encode`
///
/// # Request Body
///
/// ```json
/// { "url": "github.com", "slug": "gh" }
/// ```
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "slug": "gh",
///   "short_url": "https://sho.rt/gh",
///   "destination": "https://github.com",
///   "created_at": "2026-01-16T10:00:00Z"
/// }
/// ```
///
/// On failure, `{ "error": "Failed to create shortlink", "messages": [...] }`
/// with the status of the underlying [`AppError`].
pub async fn encode_handler<L, R>(
    State(state): State<AppState<L, R>>,
    Json(request): Json<CreateShortLinkRequest>,
) -> Result<(StatusCode, Json<CreateShortLinkResponse>), (StatusCode, Json<CreateErrorResponse>)>
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    let request = request.normalized();

    if let Err(errors) = request.validate() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(CreateErrorResponse::new(validation_messages(&errors))),
        ));
    }

    let service = &state.service;
    match service.create(&request.url, request.slug.as_deref()).await {
        Ok(link) => {
            let response = CreateShortLinkResponse::new(&link, service.short_url(&link.slug));
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => Err((
            e.status_code(),
            Json(CreateErrorResponse::new(vec![e.public_message().into_owned()])),
        )),
    }
}

/// Looks up a shortlink.
///
/// # Endpoint
///
/// `GET /api/decode/{slug}`
///
/// # Response
///
/// `200 OK` with `{slug, destination, custom, created_at}`, or
/// `404 Not Found` with `{ "error": "Shortlink not found" }`.
pub async fn decode_handler<L, R>(
    State(state): State<AppState<L, R>>,
    Path(slug): Path<String>,
) -> Result<Json<DecodeResponse>, AppError>
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    let link = state.service.resolve(&slug).await?;
    Ok(Json(DecodeResponse::from(link)))
}

/// Redirects a slug to its destination.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Response
///
/// `302 Found` with the destination as `Location`, or `404 Not Found`.
/// Non-ASCII destinations are re-serialized through [`Url`] so the header
/// carries their punycode and percent-encoded form.
pub async fn redirect_handler<L, R>(
    State(state): State<AppState<L, R>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    L: ShortLinkRepository + 'static,
    R: HostResolver + 'static,
{
    let link = state.service.resolve(&slug).await?;
    info!(slug = %link.slug, "Redirecting");

    let location = if link.destination.is_ascii() {
        link.destination
    } else {
        Url::parse(&link.destination)
            .map(String::from)
            .unwrap_or(link.destination)
    };

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// Flattens validator output into sorted `"Field message"` lines.
fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = capitalize(&field);
            field_errors.iter().map(move |e| match &e.message {
                Some(message) => format!("{field} {message}"),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    messages.sort();
    messages
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
