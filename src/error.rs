// Errors surfaced by the animator. Converted to JsValue at the wasm boundary.

use std::error::Error;
use std::fmt;
use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum AnimatorError {
    // The drawing surface has a non-positive, infinite or NaN dimension.
    InvalidSurface { width: f64, height: f64 },
    InvalidConfig(String),
    ConfigParse(serde_json::Error),
    // No window or no 2d context to draw into.
    SurfaceUnavailable(String),
}

impl fmt::Display for AnimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatorError::InvalidSurface { width, height } => write!(
                f,
                "invalid drawing surface {}x{}: both dimensions must be positive",
                width, height
            ),
            AnimatorError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            AnimatorError::ConfigParse(err) => write!(f, "failed to parse config: {}", err),
            AnimatorError::SurfaceUnavailable(reason) => {
                write!(f, "drawing surface unavailable: {}", reason)
            }
        }
    }
}

impl Error for AnimatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AnimatorError::ConfigParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        AnimatorError::ConfigParse(err)
    }
}

impl From<AnimatorError> for JsValue {
    fn from(err: AnimatorError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
