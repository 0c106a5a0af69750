//! Column names of a survey record set.
//!
//! Raw survey files carry the first block of columns; the correctors
//! add or refresh the derived block.

pub const ID: &str = "id";
pub const AGE: &str = "age";
pub const GENDER: &str = "gender";
pub const HEIGHT: &str = "height";
pub const WEIGHT: &str = "weight";
pub const AP_HI: &str = "ap_hi";
pub const AP_LO: &str = "ap_lo";
pub const CHOLESTEROL: &str = "cholesterol";
pub const GLUC: &str = "gluc";
pub const SMOKE: &str = "smoke";
pub const ALCO: &str = "alco";
pub const ACTIVE: &str = "active";
/// Target label in the public training set.
pub const CARDIO: &str = "cardio";

pub const BMI: &str = "bmi";
pub const WEIGHT_BUCKET: &str = "weight_bucket";
pub const HEIGHT_BUCKET: &str = "height_bucket";
/// Sum of systolic and diastolic pressure.
pub const AP: &str = "ap";

/// Columns every input record set must provide.
pub const REQUIRED: [&str; 6] = [HEIGHT, WEIGHT, AP_HI, AP_LO, CHOLESTEROL, GENDER];

/// Column layout consumed by the risk model, in order.
pub const MODEL_FEATURES: [&str; 11] = [
    AGE,
    WEIGHT,
    BMI,
    AP_HI,
    AP_LO,
    CHOLESTEROL,
    GLUC,
    GENDER,
    SMOKE,
    ALCO,
    ACTIVE,
];
