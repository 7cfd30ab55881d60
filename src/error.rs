use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanDocError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Scan error: {0}")]
    ScanError(String),

    #[error("OCR error: {0}")]
    OcrError(String),

    #[error("Compression error: {0}")]
    CompressError(String),

    #[error("Finalize error: {0}")]
    FinalizeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Generates factory methods for [`ScanDocError`] variants that wrap a `String`.
macro_rules! error_constructors {
    ($(
        $(#[doc = $doc:expr])*
        $method:ident => $variant:ident
    ),* $(,)?) => {
        impl ScanDocError {
            $(
                $(#[doc = $doc])*
                pub fn $method(msg: impl Into<String>) -> Self {
                    Self::$variant(msg.into())
                }
            )*
        }
    };
}

error_constructors! {
    /// Create a configuration error.
    config => ConfigError,
    /// Create a scan stage error.
    scan => ScanError,
    /// Create an OCR stage error.
    ocr => OcrError,
    /// Create a compression stage error.
    compress => CompressError,
    /// Create a finalize stage error.
    finalize => FinalizeError,
}

impl From<serde_yml::Error> for ScanDocError {
    fn from(e: serde_yml::Error) -> Self {
        Self::ConfigError(e.to_string())
    }
}

impl From<serde_json::Error> for ScanDocError {
    fn from(e: serde_json::Error) -> Self {
        Self::CompressError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanDocError>;
