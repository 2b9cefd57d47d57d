use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::AppError;

/// Caller-declared signer arrangement.
///
/// Carried into the notification payload only; both modes run the same
/// strictly sequential gateway chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowMode {
    Parallel,
    Sequential,
}

impl WorkflowMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowMode::Parallel => "parallel",
            WorkflowMode::Sequential => "sequential",
        }
    }

    /// Parse an optional raw value; absence is rejected like any other invalid value.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        raw.unwrap_or_default().parse()
    }
}

impl FromStr for WorkflowMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parallel" => Ok(WorkflowMode::Parallel),
            "sequential" => Ok(WorkflowMode::Sequential),
            _ => Err(AppError::InvalidInput(
                "workflow must be 'parallel' or 'sequential'.".to_string(),
            )),
        }
    }
}

impl Display for WorkflowMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
