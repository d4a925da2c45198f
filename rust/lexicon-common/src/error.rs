use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn corrupt_structure(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::CorruptStructure {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_utf8(context: impl Into<String>, source: std::str::Utf8Error) -> Error {
        Error(
            ErrorKind::InvalidUtf8 {
                context: context.into(),
                source,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("corrupt structure at '{element}': {message}")]
    CorruptStructure { element: String, message: String },

    #[error("invalid UTF-8 input for '{context}': {source}")]
    InvalidUtf8 {
        context: String,
        source: std::str::Utf8Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::invalid_utf8("", e)
    }
}
