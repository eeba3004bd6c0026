//! Errors raised while resolving, configuring or rendering a component.

use crate::component::ComponentError;
use crate::value::ParamKind;

/// Errors that can occur during a render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Cannot convert argument {param}={value} to {target} for {component}")]
    ArgumentConversion {
        component: String,
        param: String,
        target: ParamKind,
        value: String,
    },

    #[error("Failed to render {component}: {source}")]
    RenderFailure {
        component: String,
        #[source]
        source: ComponentError,
    },
}

impl RenderError {
    /// Whether this error should surface as a "not found" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RenderError::ComponentNotFound(_))
    }
}
