use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use log::{error, info, warn};
use tokio::net::TcpListener;

use crate::app::App;
use crate::error::CookmateError;
use crate::model::RecipeRequest;
use crate::presenter::{render_page, Banner, PageView};

/// Routes of the web UI
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/reset", post(reset))
        .route("/recipe.json", get(download))
        .route("/health", get(health_check))
        .with_state(app)
}

/// Bind to `bind` and serve until the process is stopped
pub async fn serve(app: Arc<App>, bind: &str) -> Result<(), CookmateError> {
    let listener = TcpListener::bind(bind).await?;
    info!("COOKMATE listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(app)).await?;
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn index(State(app): State<Arc<App>>) -> Html<String> {
    let form = app.last_request().unwrap_or_default();
    page(&app, &form, None)
}

async fn generate(
    State(app): State<Arc<App>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> (StatusCode, Html<String>) {
    let request = match RecipeRequest::from_form_pairs(&fields) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected form submission: {}", e);
            let banner = Banner::from_error(&e);
            let form = RecipeRequest::refill_from_form_pairs(&fields);
            return (status_for(&e), page(&app, &form, Some(banner)));
        }
    };

    match app.generate(&request).await {
        Ok(_) => {
            let banner = Banner::Success("Recipe generated successfully!".to_string());
            (StatusCode::OK, page(&app, &request, Some(banner)))
        }
        Err(e) => (
            status_for(&e),
            page(&app, &request, Some(Banner::from_error(&e))),
        ),
    }
}

async fn reset(State(app): State<Arc<App>>) -> Redirect {
    app.reset();
    Redirect::to("/")
}

async fn download(State(app): State<Arc<App>>) -> Response {
    match app.export() {
        Ok(Some(exported)) => (
            [
                (header::CONTENT_TYPE, "application/json".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", exported.file_name),
                ),
            ],
            exported.json,
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "No recipe to download yet").into_response(),
        Err(e) => {
            error!("Export failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn page(app: &App, form: &RecipeRequest, banner: Option<Banner>) -> Html<String> {
    let store = app.snapshot();
    let advisories = app.advisories();
    let configuration_error = app.configuration_error();
    Html(render_page(&PageView {
        store: &store,
        form,
        banner,
        advisories: &advisories,
        configuration_error: configuration_error.as_deref(),
    }))
}

fn status_for(error: &CookmateError) -> StatusCode {
    match error {
        CookmateError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CookmateError::Busy => StatusCode::CONFLICT,
        CookmateError::Configuration(_) | CookmateError::ConfigLoad(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        CookmateError::Transport(_) | CookmateError::Service { .. } | CookmateError::Parse(_) => {
            StatusCode::BAD_GATEWAY
        }
        CookmateError::Serialization(_) | CookmateError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_for(&CookmateError::Validation("x".to_string())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for(&CookmateError::Busy), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&CookmateError::Parse("x".to_string())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&CookmateError::Configuration("x".to_string())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let serde_failure = serde_json::from_str::<u32>("[]").unwrap_err();
        assert_eq!(
            status_for(&CookmateError::Serialization(serde_failure)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
