use miette::Diagnostic;
use thiserror::Error;

/// Main error type for glint operations
#[derive(Error, Diagnostic, Debug)]
pub enum GlintError {
    #[error("IO error: {0}")]
    #[diagnostic(code(glint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(glint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Definition error: {message}")]
    #[diagnostic(code(glint::def))]
    Def {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(glint::render))]
    Render { message: String },

    #[error("Encode error: {message}")]
    #[diagnostic(code(glint::encode))]
    Encode {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(glint::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, GlintError>;
