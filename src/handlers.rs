//! Routes and request handlers.
//!
//! Every handler reloads the full collection from the store; mutating handlers
//! write the whole collection back. There is no lock across load and save, so
//! overlapping writers race and the last save wins.

use crate::error::ApiError;
use crate::models::prompt::Prompt;
use crate::storage::PromptStore;
use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{guard, web, HttpResponse};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const INDEX_FILE: &str = "index.html";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PromptStore>,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(store: Arc<dyn PromptStore>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            static_dir: static_dir.into(),
        }
    }
}

/// Mounts the prompt API and the static front-end on an actix `App`.
///
/// The static mount at `/` is registered last so it only sees paths the API
/// did not claim. It is skipped when the asset directory does not exist.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let static_dir = state.static_dir.clone();
        cfg.app_data(web::Data::new(state))
            .service(web::resource("/").route(web::get().to(index)))
            .service(
                web::resource("/prompts")
                    .route(web::get().to(list_prompts))
                    .route(web::post().to(create_prompt)),
            )
            .service(
                // Guarded so that other methods fall through to `/prompts/{id}`.
                web::resource("/prompts/search")
                    .guard(guard::Get())
                    .route(web::get().to(search_prompts)),
            )
            .service(web::resource("/prompts/{id}").route(web::delete().to(delete_prompt)));
        if static_dir.is_dir() {
            cfg.service(Files::new("/", static_dir));
        }
    }
}

/// Cross-origin requests are accepted from anywhere.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .send_wildcard()
}

async fn index(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(state.static_dir.join(INDEX_FILE)).await?)
}

#[instrument(skip(state), name = "list_prompts")]
async fn list_prompts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let prompts = state.store.load().await?;
    debug!(count = prompts.len(), "Listing prompts");
    Ok(HttpResponse::Ok().json(prompts))
}

#[instrument(skip(state, body), name = "create_prompt")]
async fn create_prompt(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    match insert_prompt(&*state.store, &body).await {
        Ok(prompt) => {
            info!(id = prompt.id().unwrap_or_default(), "Prompt created");
            Ok(HttpResponse::Created().json(prompt))
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "Error creating prompt");
            Err(ApiError::BadRequest(message))
        }
    }
}

/// Decodes, stamps and appends a new prompt, then rewrites the store.
async fn insert_prompt(store: &dyn PromptStore, body: &[u8]) -> Result<Prompt> {
    let payload: Value =
        serde_json::from_slice(body).context("Failed to decode request body as JSON")?;
    let mut prompt = Prompt::from_value(payload)?;
    let mut prompts = store.load().await?;

    prompt.stamp();
    prompts.push(prompt.clone());
    store.save(&prompts).await?;
    Ok(prompt)
}

#[instrument(skip(state), name = "delete_prompt")]
async fn delete_prompt(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let mut prompts = state.store.load().await?;
    let before = prompts.len();
    prompts.retain(|p| p.id() != Some(id.as_str()));
    // Saved even when nothing matched; unknown ids are not an error.
    state.store.save(&prompts).await?;

    if prompts.len() < before {
        info!(removed = before - prompts.len(), "Prompt deleted");
    } else {
        debug!("No prompt with that id");
    }
    Ok(HttpResponse::NoContent().finish())
}

#[instrument(skip(state), name = "search_prompts")]
async fn search_prompts(
    state: web::Data<AppState>,
    params: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    // The first `q` wins when the key is repeated.
    let needle = params
        .iter()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.to_lowercase())
        .unwrap_or_default();
    let prompts = state.store.load().await?;
    if needle.is_empty() {
        return Ok(HttpResponse::Ok().json(prompts));
    }

    let matches: Vec<Prompt> = prompts.into_iter().filter(|p| p.matches(&needle)).collect();
    debug!(count = matches.len(), "Search finished");
    Ok(HttpResponse::Ok().json(matches))
}
