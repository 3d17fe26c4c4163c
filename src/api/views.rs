//! Server-side HTML pages.
//!
//! Every value that originates outside the binary goes through
//! [`escape_html`] before it is written into markup.

use std::fmt::Write;

use crate::api::types::ResultsView;
use crate::domain::{format_grouped, EvaluationTable, PredictionOutcome, MAE_COLUMN, R2_COLUMN, RMSE_COLUMN};

pub const VALIDATION_WARNING: &str = "Please enter valid positive values.";
pub const NO_RESULTS_MESSAGE: &str = "No evaluation results found.";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 52rem; color: #222; }
nav a { margin-right: 1rem; }
form label { display: block; margin-top: 0.75rem; }
form input { width: 100%; padding: 0.4rem; }
button { margin-top: 1rem; padding: 0.5rem 1.5rem; }
table { border-collapse: collapse; width: 100%; text-align: center; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; }
tr:nth-child(even) { background: #f7f7f7; }
tr.highlight, tr.highlight:nth-child(even) { background: #d4edda; font-weight: bold; }
.prediction { font-size: 2rem; font-weight: bold; }
.warning { color: #8a6d3b; }
.error { color: #a94442; }
"#;

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href="/">Predict</a><a href="/results">Model results</a></nav>
{body}
</body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn render_index() -> String {
    let fields = [
        ("avg_income", "Avg. Area Income", "65000"),
        ("house_age", "Avg. Area House Age", "6"),
        ("rooms", "Avg. Area Number of Rooms", "7"),
        ("bedrooms", "Avg. Area Number of Bedrooms", "4"),
        ("population", "Area Population", "35000"),
    ];

    let mut body = String::from("<h1>House Price Prediction</h1>\n<form method=\"post\" action=\"/predict\">\n");
    for (name, label, placeholder) in fields {
        let _ = writeln!(
            body,
            r#"<label for="{name}">{label}</label><input type="number" step="any" min="0" id="{name}" name="{name}" placeholder="{placeholder}" required>"#
        );
    }
    body.push_str("<button type=\"submit\">Predict</button>\n</form>\n");
    page("House Price Prediction", &body)
}

pub fn render_prediction(model_label: &str, outcome: &PredictionOutcome) -> String {
    let mut body = String::from("<h1>Prediction</h1>\n");
    let _ = writeln!(body, "<p>Model: {}</p>", escape_html(model_label));

    match outcome {
        PredictionOutcome::Predicted { record, formatted } => {
            let _ = writeln!(
                body,
                "<p class=\"prediction\">Predicted price: {}</p>",
                escape_html(formatted)
            );
            body.push_str("<h2>Inputs</h2>\n<table>\n");
            let _ = writeln!(
                body,
                "<tr><th>timestamp</th><td>{}</td></tr>",
                escape_html(&record.timestamp)
            );
            for (name, value) in record.echoed_inputs() {
                let _ = writeln!(body, "<tr><th>{}</th><td>{}</td></tr>", escape_html(name), value);
            }
            body.push_str("</table>\n");
        }
        PredictionOutcome::Rejected => {
            let _ = writeln!(body, "<p class=\"warning\">{VALIDATION_WARNING}</p>");
        }
        PredictionOutcome::Failed { reason } => {
            let _ = writeln!(body, "<p class=\"error\">Error: {}</p>", escape_html(reason));
        }
    }

    body.push_str("<p><a href=\"/\">Make another prediction</a></p>\n");
    page("Prediction", &body)
}

pub fn render_results(view: &ResultsView) -> String {
    let mut body = String::from("<h1>Model Evaluation Results</h1>\n");
    match view {
        ResultsView::Table(table) => {
            if let Some(best) = table.best() {
                let _ = writeln!(
                    body,
                    "<p class=\"best\">Best model: <strong>{}</strong> ({R2_COLUMN} {:.4}, {MAE_COLUMN} {}, {RMSE_COLUMN} {})</p>",
                    escape_html(&best.model),
                    best.r2,
                    format_grouped(best.mae, 2),
                    format_grouped(best.rmse, 2),
                );
            }
            body.push_str(&render_table(table));
        }
        ResultsView::Missing => {
            let _ = writeln!(body, "<p>{NO_RESULTS_MESSAGE}</p>");
        }
        ResultsView::Unreadable(reason) => {
            let _ = writeln!(
                body,
                "<p class=\"error\">Could not read evaluation results: {}</p>",
                escape_html(reason)
            );
        }
    }
    page("Model Evaluation Results", &body)
}

/// Evaluation table; the best row carries `class="highlight"`.
pub fn render_table(table: &EvaluationTable) -> String {
    let mut html = String::from("<table class=\"table table-striped table-bordered text-center\">\n<thead>\n<tr>");
    for column in table.columns() {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in table.display_rows() {
        html.push_str(if row.is_best {
            "<tr class=\"highlight\">"
        } else {
            "<tr>"
        });
        for cell in &row.cells {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
    html
}
