use std::error::Error as StdError;
use std::fmt;

/// `WindowManagerResult<T>` provides a simplified result type with a common error type
pub type WindowManagerResult<T> = std::result::Result<T, ErrorWrapper>;

/// WindowManagerError defines all the internal errors that `libewmh` might return
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum WindowManagerError {
    BadValue,
    BadWindow(u32),
    ClientListNotFound,
    Unsupported,
}
impl std::error::Error for WindowManagerError {}
impl fmt::Display for WindowManagerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WindowManagerError::BadValue => write!(f, "Bad Value"),
            WindowManagerError::BadWindow(ref win) => write!(f, "Bad Window: {}", win),
            WindowManagerError::ClientListNotFound => write!(f, "Could not get client list"),
            WindowManagerError::Unsupported => write!(f, "Your window manager is not supported by this program"),
        }
    }
}

/// ErrorWrapper provides wrapper around all the underlying library dependencys that `libewmh` uses
/// such that we can easily surface all errors from `libewmh` in a single easy way.
#[derive(Debug)]
pub enum ErrorWrapper {
    WindowManager(WindowManagerError),

    // std::io::Error
    Io(std::io::Error),

    // x11rb errors
    Connect(x11rb::errors::ConnectError),
    Connection(x11rb::errors::ConnectionError),
    Reply(x11rb::errors::ReplyError),
}
impl ErrorWrapper {
    /// Get the domain error if this wraps one
    pub fn wm_error(&self) -> Option<&WindowManagerError> {
        match *self {
            ErrorWrapper::WindowManager(ref err) => Some(err),
            _ => None,
        }
    }
}
impl StdError for ErrorWrapper {}

impl fmt::Display for ErrorWrapper {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorWrapper::WindowManager(ref err) => write!(f, "{}", err),
            ErrorWrapper::Io(ref err) => write!(f, "{}", err),
            ErrorWrapper::Connect(ref err) => write!(f, "{}", err),
            ErrorWrapper::Connection(ref err) => write!(f, "{}", err),
            ErrorWrapper::Reply(ref err) => write!(f, "{}", err),
        }
    }
}

impl From<WindowManagerError> for ErrorWrapper {
    fn from(err: WindowManagerError) -> ErrorWrapper {
        ErrorWrapper::WindowManager(err)
    }
}

impl From<std::io::Error> for ErrorWrapper {
    fn from(err: std::io::Error) -> ErrorWrapper {
        ErrorWrapper::Io(err)
    }
}

// x11rb errors
//--------------------------------------------------------------------------------------------------
impl From<x11rb::errors::ConnectError> for ErrorWrapper {
    fn from(err: x11rb::errors::ConnectError) -> ErrorWrapper {
        ErrorWrapper::Connect(err)
    }
}

impl From<x11rb::errors::ConnectionError> for ErrorWrapper {
    fn from(err: x11rb::errors::ConnectionError) -> ErrorWrapper {
        ErrorWrapper::Connection(err)
    }
}

impl From<x11rb::errors::ReplyError> for ErrorWrapper {
    fn from(err: x11rb::errors::ReplyError) -> ErrorWrapper {
        ErrorWrapper::Reply(err)
    }
}
