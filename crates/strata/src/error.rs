//! Error types for the compilation engine.
//!
//! Only setup-time misconfiguration is fatal. The compile path itself is
//! total: an unrecognized class contributes nothing to the stylesheet and is
//! never reported through this type.

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two plugins were registered under the same name.
    #[error("Duplicate plugin '{name}'")]
    DuplicatePlugin { name: String },

    /// Plugin theme-extension dependencies form a cycle.
    #[error("Circular plugin dependency: {}", path.join(" -> "))]
    CircularDependency { path: Vec<String> },

    /// A plugin declared a dependency on a plugin that was never registered.
    #[error("Plugin '{plugin}' depends on unknown plugin '{dependency}'")]
    UnknownDependency { plugin: String, dependency: String },

    /// A theme extension had an invalid shape.
    #[error("Invalid theme extension from plugin '{plugin}': {message}")]
    InvalidThemeExtension { plugin: String, message: String },

    /// A utility or variant definition was rejected by the registry.
    #[error("Invalid registration '{name}': {message}")]
    InvalidRegistration { name: String, message: String },

    /// Input CSS source failed to parse during `compile`.
    #[error("CSS source error: {message}")]
    CssSource { message: String },
}

impl Error {
    /// Create a duplicate-plugin error.
    pub fn duplicate_plugin(name: impl Into<String>) -> Self {
        Self::DuplicatePlugin { name: name.into() }
    }

    /// Create an invalid-theme-extension error.
    pub fn invalid_theme_extension(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidThemeExtension {
            plugin: plugin.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-registration error.
    pub fn invalid_registration(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegistration {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a CSS-source error.
    pub fn css_source(message: impl Into<String>) -> Self {
        Self::CssSource {
            message: message.into(),
        }
    }
}
