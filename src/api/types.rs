use serde::Serialize;

// ============================================================================
// Health Check Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub uptime_secs: i64,
}

// ============================================================================
// Results Page Types
// ============================================================================

/// What `GET /results` has to show.
#[derive(Debug, Clone)]
pub enum ResultsView {
    Table(crate::domain::EvaluationTable),
    /// No evaluation file on disk
    Missing,
    /// File present but could not be read as an evaluation table
    Unreadable(String),
}
