use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use tracing::warn;

use crate::api::{state::AppState, views};
use crate::domain::{PredictionForm, PredictionOutcome};

/// POST /predict
///
/// Always answers 200 with a rendered page; failures are shown in-page,
/// including bodies the form extractor cannot decode.
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let outcome = match form {
        Ok(Form(pairs)) => {
            let form = PredictionForm::from_pairs(pairs);
            state.predictions.predict(&form).await
        }
        Err(rejection) => {
            warn!(status = %rejection.status(), "undecodable predict body: {}", rejection);
            PredictionOutcome::Failed {
                reason: rejection.body_text(),
            }
        }
    };
    tracing::debug!(outcome = outcome.as_str(), "predict request handled");
    Html(views::render_prediction(&state.model_label, &outcome))
}
