use quick_xml::events::attributes::AttrError;
use std::fmt;
use std::string::FromUtf8Error;

/// An error raised while decoding or encoding a report document.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Malformed(quick_xml::Error),
    Attribute(AttrError),
    Encoding(FromUtf8Error),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Malformed(err) => Some(err),
            Error::Attribute(err) => Some(err),
            Error::Encoding(err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Malformed(err) => write!(f, "malformed report document: {}", err),
            Error::Attribute(err) => write!(f, "malformed attribute: {}", err),
            Error::Encoding(err) => write!(f, "document is not valid UTF-8: {}", err),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Malformed(err)
    }
}

impl From<AttrError> for Error {
    fn from(err: AttrError) -> Self {
        Error::Attribute(err)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(err: FromUtf8Error) -> Self {
        Error::Encoding(err)
    }
}
