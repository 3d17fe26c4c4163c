use axum::{extract::State, response::Html};
use tracing::warn;

use crate::api::{state::AppState, types::ResultsView, views};

/// GET / -- the input form
pub async fn index() -> Html<String> {
    Html(views::render_index())
}

/// GET /results -- evaluation table with the best model highlighted
pub async fn results(State(state): State<AppState>) -> Html<String> {
    let view = match state.results.load().await {
        Ok(Some(table)) => ResultsView::Table(table),
        Ok(None) => ResultsView::Missing,
        Err(e) => {
            warn!(
                path = %state.results.path().display(),
                error = %e,
                "could not read evaluation results"
            );
            ResultsView::Unreadable(e.to_string())
        }
    };
    Html(views::render_results(&view))
}
