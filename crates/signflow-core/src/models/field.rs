use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_PAGE_NUMBER: i32 = 0;
pub const DEFAULT_X: i32 = 100;
pub const DEFAULT_Y: i32 = 150;
pub const DEFAULT_WIDTH: i32 = 150;
pub const DEFAULT_HEIGHT: i32 = 40;
pub const DEFAULT_ROLE: &str = "Signer 1";
pub const DEFAULT_LABEL: &str = "signature_field";

/// Geometry and ownership of the signature field placed on an uploaded document.
///
/// `page_number` is 0-based, as the provider expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignatureFieldSpec {
    pub page_number: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub role: String,
    pub label: String,
    pub required: bool,
}

impl Default for SignatureFieldSpec {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            role: DEFAULT_ROLE.to_string(),
            label: DEFAULT_LABEL.to_string(),
            required: true,
        }
    }
}

/// Caller overrides for individual field properties (query string of the fields route).
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SignatureFieldOverrides {
    /// 0-based page index (default 0)
    #[validate(range(min = 0))]
    pub page_number: Option<i32>,
    /// Horizontal offset (default 100)
    #[validate(range(min = 0))]
    pub x: Option<i32>,
    /// Vertical offset (default 150)
    #[validate(range(min = 0))]
    pub y: Option<i32>,
    /// Field width (default 150)
    #[validate(range(min = 1))]
    pub width: Option<i32>,
    /// Field height (default 40)
    #[validate(range(min = 1))]
    pub height: Option<i32>,
    /// Signer role label (default "Signer 1")
    #[validate(length(min = 1))]
    pub role: Option<String>,
    /// Field label (default "signature_field")
    #[validate(length(min = 1))]
    pub label: Option<String>,
}

impl SignatureFieldOverrides {
    /// Validate the overrides and merge them onto the default spec.
    pub fn into_spec(self) -> Result<SignatureFieldSpec, AppError> {
        self.validate()?;

        let defaults = SignatureFieldSpec::default();
        Ok(SignatureFieldSpec {
            page_number: self.page_number.unwrap_or(defaults.page_number),
            x: self.x.unwrap_or(defaults.x),
            y: self.y.unwrap_or(defaults.y),
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            role: self.role.unwrap_or(defaults.role),
            label: self.label.unwrap_or(defaults.label),
            required: defaults.required,
        })
    }
}
