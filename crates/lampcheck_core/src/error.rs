use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// How loudly an error is reported; see [`crate::logging::log_core_error`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// Part of the rig an error belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Verification,
    Config,
    Board,
    Other,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    ChannelFault,
    Io,
    Other,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Which field, component or script entry was at fault.
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// A light/sensor channel and the reading that condemned it.
    Channel { index: u8, reading: u16 },

    /// Raw number from a driver or an out-of-range index.
    Code(u32),
}

/// Error shared by the monitor, its board and the configuration.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    pub fn info() -> CoreErrorBuilder {
        CoreErrorBuilder::new(Severity::Info)
    }

    pub fn warn() -> CoreErrorBuilder {
        CoreErrorBuilder::new(Severity::Warn)
    }

    pub fn error() -> CoreErrorBuilder {
        CoreErrorBuilder::new(Severity::Error)
    }

    /// A configuration value that the monitor cannot run with.
    pub fn invalid_config(field: &'static str, message: &'static str) -> Self {
        CoreError::error()
            .domain(Domain::Config)
            .kind(ErrorKind::InvalidArgument)
            .msg(message)
            .payload(Payload::Context {
                key: "field",
                value: Cow::Borrowed(field),
            })
            .build()
    }

    /// A board component refused a read or write.
    pub fn io(component: &'static str, detail: impl Into<Cow<'static, str>>) -> Self {
        CoreError::error()
            .domain(Domain::Board)
            .kind(ErrorKind::Io)
            .msgf(format_args!("{component} i/o failed"))
            .payload(Payload::Context {
                key: component,
                value: detail.into(),
            })
            .build()
    }

    /// A channel index outside the rig's four light/sensor pairs.
    pub fn unknown_channel(index: usize) -> Self {
        CoreError::error()
            .domain(Domain::Board)
            .kind(ErrorKind::InvalidArgument)
            .msg("unknown channel")
            .payload(Payload::Code(index as u32))
            .build()
    }
}

/// Chained construction of a [`CoreError`]; unset parts stay `Other`,
/// empty or `Payload::None`.
#[derive(Debug, Clone)]
pub struct CoreErrorBuilder {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl CoreErrorBuilder {
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    pub fn domain(mut self, domain: Domain) -> Self {
        self.domain = domain;
        self
    }

    pub fn kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn msg(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}
