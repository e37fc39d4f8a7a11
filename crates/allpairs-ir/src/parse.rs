use crate::types::ParameterSpace;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_space(json: &str) -> Result<ParameterSpace, ParseError> {
    Ok(serde_json::from_str(json)?)
}
