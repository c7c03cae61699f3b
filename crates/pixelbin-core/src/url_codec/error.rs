//! Error type shared by the URL parser, builder and pattern grammar.

/// Coarse classification of a codec failure, for callers that branch on the
/// kind of problem rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unparseable URL or a required object field is missing.
    MalformedInput,
    /// None of the known path shapes matched.
    UnrecognizedShape,
    /// `dpr` or `f_auto` failed validation.
    InvalidOptionValue,
    /// A transformation argument is missing its key or value.
    MalformedPatternParameter,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UrlError {
    #[error("malformed url: {0}")]
    Malformed(#[from] url::ParseError),
    #[error("invalid url: cloud name segment {0:?} is too short")]
    CloudNameTooShort(String),
    #[error("invalid pixelbin url. Please make sure the url is correct")]
    UnrecognizedShape,
    #[error("malformed transformation {0:?}")]
    MalformedOperation(String),
    #[error("cloudName should be defined")]
    MissingCloudName,
    #[error("cloudName is not valid for custom domains")]
    CloudNameOnCustomDomain,
    #[error("filePath should be defined")]
    MissingFilePath,
    #[error("workerPath should be defined")]
    MissingWorkerPath,
    #[error("DPR value should be between 0.1 to 5.0")]
    InvalidDpr,
    #[error("F_auto value should be boolean")]
    InvalidFAuto,
    #[error("key not specified")]
    KeyNotSpecified,
    #[error("value not specified for {0}")]
    ValueNotSpecified(String),
}

impl UrlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UrlError::Malformed(_)
            | UrlError::CloudNameTooShort(_)
            | UrlError::MalformedOperation(_)
            | UrlError::MissingCloudName
            | UrlError::CloudNameOnCustomDomain
            | UrlError::MissingFilePath
            | UrlError::MissingWorkerPath => ErrorKind::MalformedInput,
            UrlError::UnrecognizedShape => ErrorKind::UnrecognizedShape,
            UrlError::InvalidDpr | UrlError::InvalidFAuto => ErrorKind::InvalidOptionValue,
            UrlError::KeyNotSpecified | UrlError::ValueNotSpecified(_) => {
                ErrorKind::MalformedPatternParameter
            }
        }
    }

    /// True for every failure raised while parsing a URL string.
    pub fn is_invalid_url(&self) -> bool {
        matches!(
            self,
            UrlError::Malformed(_)
                | UrlError::CloudNameTooShort(_)
                | UrlError::UnrecognizedShape
                | UrlError::MalformedOperation(_)
        )
    }
}
