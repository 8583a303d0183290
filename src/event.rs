//! Log events as seen by the rule matcher.

use crate::level::Level;
use std::fmt::{self, Write as _};

/// A captured exception, including its cause chain.
///
/// The exception dimension of a rule is matched against
/// [`stack_trace`](Self::stack_trace), the conventional multi-line rendering:
///
/// ```text
/// java.io.IOException: disk full
/// 	at com.example.Store.flush(Store.java:42)
/// Caused by: java.lang.IllegalStateException: closed
/// 	at com.example.Channel.write(Channel.java:7)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    pub class_name: String,
    pub message: Option<String>,
    pub frames: Vec<String>,
    pub cause: Option<Box<ExceptionInfo>>,
}

impl ExceptionInfo {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: None,
            frames: Vec::new(),
            cause: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }

    pub fn with_cause(mut self, cause: ExceptionInfo) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Build from a Rust error, following its `source()` chain as causes.
    ///
    /// The class name is the error's type as reported by `Debug` up to the
    /// first `(` or `{`, which is the variant or struct name for derived impls.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use event_rule_engine::ExceptionInfo;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// let info = ExceptionInfo::from_error(&io);
    /// assert!(info.stack_trace().contains("disk full"));
    /// ```
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut info = Self::new(error_class_name(error)).with_message(error.to_string());
        if let Some(source) = error.source() {
            info.cause = Some(Box::new(Self::from_error(source)));
        }
        info
    }

    /// Render the exception and its causes as one stack trace string.
    pub fn stack_trace(&self) -> String {
        let mut rendered = String::new();
        let mut current = Some(self);
        let mut first = true;
        while let Some(exception) = current {
            if !first {
                rendered.push_str("Caused by: ");
            }
            first = false;
            // Writing into a String cannot fail.
            let _ = writeln!(rendered, "{exception}");
            for frame in &exception.frames {
                let _ = writeln!(rendered, "\tat {frame}");
            }
            current = exception.cause.as_deref();
        }
        rendered
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.class_name, message),
            None => f.write_str(&self.class_name),
        }
    }
}

fn error_class_name(error: &dyn std::error::Error) -> String {
    let debug = format!("{error:?}");
    let name = debug
        .split(|c: char| c == '(' || c == '{' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    if name.is_empty() {
        "Error".to_string()
    } else {
        name.to_string()
    }
}

/// One event to classify. Only the level is mandatory.
///
/// # Examples
///
/// ```rust
/// use event_rule_engine::{Level, LogEvent};
///
/// let event = LogEvent::new(Level::Error)
///     .message("Could not pass event PlayerJoinEvent")
///     .thread_name("Server thread")
///     .logger_name("Minecraft");
/// assert_eq!(event.level, Level::Error);
/// assert!(event.exception.is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogEvent<'a> {
    pub level: Level,
    pub message: Option<&'a str>,
    pub exception: Option<&'a ExceptionInfo>,
    pub thread_name: Option<&'a str>,
    pub logger_name: Option<&'a str>,
}

impl<'a> LogEvent<'a> {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            message: None,
            exception: None,
            thread_name: None,
            logger_name: None,
        }
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn exception(mut self, exception: &'a ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn thread_name(mut self, thread_name: &'a str) -> Self {
        self.thread_name = Some(thread_name);
        self
    }

    pub fn logger_name(mut self, logger_name: &'a str) -> Self {
        self.logger_name = Some(logger_name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.inner)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn test_stack_trace_rendering() {
        let exception = ExceptionInfo::new("java.io.IOException")
            .with_message("disk full")
            .with_frame("com.example.Store.flush(Store.java:42)")
            .with_cause(
                ExceptionInfo::new("java.lang.IllegalStateException")
                    .with_message("closed")
                    .with_frame("com.example.Channel.write(Channel.java:7)"),
            );

        assert_eq!(
            exception.stack_trace(),
            "java.io.IOException: disk full\n\
             \tat com.example.Store.flush(Store.java:42)\n\
             Caused by: java.lang.IllegalStateException: closed\n\
             \tat com.example.Channel.write(Channel.java:7)\n"
        );
    }

    #[test]
    fn test_display_without_message() {
        let exception = ExceptionInfo::new("java.lang.NullPointerException");
        assert_eq!(exception.to_string(), "java.lang.NullPointerException");
        assert_eq!(exception.stack_trace(), "java.lang.NullPointerException\n");
    }

    #[test]
    fn test_from_error_follows_source_chain() {
        let error = Outer { inner: Inner };
        let info = ExceptionInfo::from_error(&error);

        assert_eq!(info.class_name, "Outer");
        assert_eq!(info.message.as_deref(), Some("request failed"));
        let cause = info.cause.as_deref().unwrap();
        assert_eq!(cause.class_name, "Inner");
        assert!(info
            .stack_trace()
            .contains("Caused by: Inner: connection reset"));
    }

    #[test]
    fn test_event_builder() {
        let exception = ExceptionInfo::new("Boom");
        let event = LogEvent::new(Level::Warn)
            .message("hello")
            .exception(&exception)
            .thread_name("main")
            .logger_name("root");

        assert_eq!(event.level, Level::Warn);
        assert_eq!(event.message, Some("hello"));
        assert_eq!(event.exception.map(|e| e.class_name.as_str()), Some("Boom"));
        assert_eq!(event.thread_name, Some("main"));
        assert_eq!(event.logger_name, Some("root"));
    }
}
