use serde::Serialize;
use utoipa::ToSchema;

/// Fixed payload returned by the liveness probe
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(serde::Deserialize, Debug, PartialEq, Eq))]
pub struct HealthzResponse {
    #[schema(example = "OK")]
    pub message: String,
}

impl HealthzResponse {
    pub fn ok() -> Self {
        HealthzResponse {
            message: "OK".to_owned(),
        }
    }
}
