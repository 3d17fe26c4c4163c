use chrono::NaiveDateTime;

/// Feature columns in the order the model was trained on.
pub const FEATURE_COLUMNS: [&str; 5] = [
    "Avg. Area Income",
    "Avg. Area House Age",
    "Avg. Area Number of Rooms",
    "Avg. Area Number of Bedrooms",
    "Area Population",
];

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const PREDICTION_COLUMN: &str = "Predicted Price";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw form submission for `POST /predict`.
///
/// Every field is optional here so a missing field surfaces as an in-page
/// error rather than an extractor rejection.
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    pub avg_income: Option<String>,
    pub house_age: Option<String>,
    pub rooms: Option<String>,
    pub bedrooms: Option<String>,
    pub population: Option<String>,
}

impl PredictionForm {
    /// Build a form from decoded `key=value` pairs.
    ///
    /// The first value wins when a key repeats; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "avg_income" => &mut form.avg_income,
                "house_age" => &mut form.house_age,
                "rooms" => &mut form.rooms,
                "bedrooms" => &mut form.bedrooms,
                "population" => &mut form.population,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        form
    }

    /// Form field names paired with their submitted values, in feature order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("avg_income", self.avg_income.as_deref()),
            ("house_age", self.house_age.as_deref()),
            ("rooms", self.rooms.as_deref()),
            ("bedrooms", self.bedrooms.as_deref()),
            ("population", self.population.as_deref()),
        ]
    }
}

/// Parsed prediction inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRequest {
    pub avg_income: f64,
    pub house_age: f64,
    pub rooms: f64,
    pub bedrooms: f64,
    pub population: f64,
}

impl PredictionRequest {
    pub fn from_features(features: [f64; 5]) -> Self {
        let [avg_income, house_age, rooms, bedrooms, population] = features;
        Self {
            avg_income,
            house_age,
            rooms,
            bedrooms,
            population,
        }
    }

    /// Feature vector in `FEATURE_COLUMNS` order.
    pub fn features(&self) -> [f64; 5] {
        [
            self.avg_income,
            self.house_age,
            self.rooms,
            self.bedrooms,
            self.population,
        ]
    }
}

/// One served prediction, as appended to the prediction log.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub timestamp: String,
    pub request: PredictionRequest,
    /// Clamped, unformatted prediction
    pub predicted_price: f64,
}

impl PredictionRecord {
    pub fn new(request: PredictionRequest, predicted_price: f64, at: NaiveDateTime) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            request,
            predicted_price,
        }
    }

    pub fn header() -> Vec<String> {
        std::iter::once(TIMESTAMP_COLUMN)
            .chain(FEATURE_COLUMNS)
            .chain(std::iter::once(PREDICTION_COLUMN))
            .map(ToString::to_string)
            .collect()
    }

    /// Row values aligned with [`PredictionRecord::header`].
    pub fn fields(&self) -> Vec<String> {
        std::iter::once(self.timestamp.clone())
            .chain(self.request.features().iter().map(f64::to_string))
            .chain(std::iter::once(self.predicted_price.to_string()))
            .collect()
    }

    /// Feature names paired with the submitted values, for echoing back.
    pub fn echoed_inputs(&self) -> Vec<(&'static str, f64)> {
        FEATURE_COLUMNS
            .into_iter()
            .zip(self.request.features())
            .collect()
    }
}

/// Result of the predict flow, rendered by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// Prediction served and logged
    Predicted {
        record: PredictionRecord,
        formatted: String,
    },
    /// Inputs parsed but at least one was not positive
    Rejected,
    /// Parsing, inference or logging failed
    Failed { reason: String },
}

impl PredictionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predicted { .. } => "predicted",
            Self::Rejected => "rejected",
            Self::Failed { .. } => "failed",
        }
    }
}
