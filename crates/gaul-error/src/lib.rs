use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;

pub type GaulResult<T> = Result<T, GaulError>;

/// Stable classification of a [`GaulError`], independent of its message text.
/// Mirrors the taxonomy in the error-handling design: misconfiguration,
/// capacity, callback failure, and transport (worker) failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Misconfiguration,
    Capacity,
    CallbackFailure,
    WorkerFailure,
    Registry,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// The error type shared across the GAUL workspace.
///
/// Variants line up with the error taxonomy: a [`GaulError::Misconfiguration`]
/// is a fatal assertion raised before an engine starts (missing operator
/// binding, empty population, an out-of-range ratio); [`GaulError::Capacity`]
/// is raised by the entity pool when an allocation would exceed `max_size`;
/// [`GaulError::CallbackFailure`] wraps a user callback reporting failure
/// (e.g. `seed`); [`GaulError::WorkerFailure`] is raised by the parallel
/// evaluators when a worker process, thread, or MPI rank is lost mid-phase.
#[derive(Debug)]
pub enum GaulError {
    Misconfiguration {
        message: ErrString,
    },
    Capacity {
        message: ErrString,
    },
    CallbackFailure {
        message: ErrString,
    },
    WorkerFailure {
        message: ErrString,
    },
    Registry {
        message: ErrString,
    },
    Context {
        context: ErrorContext,
        source: Box<GaulError>,
        #[cfg(feature = "backtrace")]
        backtrace: Backtrace,
    },
}

impl GaulError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Misconfiguration { .. } => ErrorCode::Misconfiguration,
            Self::Capacity { .. } => ErrorCode::Capacity,
            Self::CallbackFailure { .. } => ErrorCode::CallbackFailure,
            Self::WorkerFailure { .. } => ErrorCode::WorkerFailure,
            Self::Registry { .. } => ErrorCode::Registry,
            Self::Context { .. } => ErrorCode::Context,
        }
    }

    pub fn with_context(self, msg: impl Into<String>) -> Self {
        GaulError::Context {
            context: ErrorContext::new(msg),
            source: Box::new(self),
            #[cfg(feature = "backtrace")]
            backtrace: Backtrace::capture(),
        }
    }
}

impl Display for GaulError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misconfiguration { message } => write!(f, "misconfiguration: {}", message),
            Self::Capacity { message } => write!(f, "capacity exceeded: {}", message),
            Self::CallbackFailure { message } => write!(f, "callback failed: {}", message),
            Self::WorkerFailure { message } => write!(f, "worker failed: {}", message),
            Self::Registry { message } => write!(f, "registry error: {}", message),
            Self::Context {
                context, source, ..
            } => write!(f, "{}\nCaused by: {}", context, source),
        }
    }
}

impl std::error::Error for GaulError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorContext {
    message: String,
}

impl ErrorContext {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorContext {}

pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> GaulResult<T>;
    fn with_context<F: FnOnce() -> String>(self, f: F) -> GaulResult<T>;
}

impl<T, E: Into<GaulError>> ResultExt<T> for Result<T, E> {
    fn context(self, msg: impl Into<String>) -> GaulResult<T> {
        self.map_err(|e| e.into().with_context(msg))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> GaulResult<T> {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[doc(hidden)]
pub mod __private {
    #[inline]
    #[cold]
    #[must_use]
    pub fn must_use<E>(e: E) -> E {
        e
    }
}

/// Build a [`GaulError`] of the named variant from a format string, e.g.
/// `gaul_err!(Capacity: "pool at {}", max_size)`.
#[macro_export]
macro_rules! gaul_err {
    (Misconfiguration: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GaulError::Misconfiguration { message: format!($fmt, $($arg),*).into() })
    };
    (Capacity: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GaulError::Capacity { message: format!($fmt, $($arg),*).into() })
    };
    (CallbackFailure: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GaulError::CallbackFailure { message: format!($fmt, $($arg),*).into() })
    };
    (WorkerFailure: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GaulError::WorkerFailure { message: format!($fmt, $($arg),*).into() })
    };
    (Registry: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::GaulError::Registry { message: format!($fmt, $($arg),*).into() })
    };
}

#[macro_export]
macro_rules! gaul_bail {
    ($($tt:tt)+) => { return Err($crate::gaul_err!($($tt)+)) };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond { $crate::gaul_bail!($($tt)+); }
    };
}
