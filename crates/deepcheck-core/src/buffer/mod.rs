//! Diagnostic buffer
//!
//! Accumulates the text produced by failed comparisons until the owner
//! drains it. The backing [`Sink`] decides between a growable heap store and
//! a fixed inline array; the contract is the same for both.
//!
//! A buffer that still holds text when dropped is a usage error and panics.
//! Call [`DiagnosticBuffer::drain`] or [`DiagnosticBuffer::discard`] first.

pub mod separator;
pub mod sink;
pub mod style;

pub use separator::{titled_rule, RuleWeight};
pub use sink::{FixedSink, GrowableSink, Sink, SinkMode};
pub use style::{strip_ansi, Color, Style};

use crate::config::RenderConfig;
use crate::errors::{CheckError, CheckErrorKind, Result};
use std::fmt;

/// Severity label prefixed to each logged line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warning,
    Info,
    Debug,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Level::Error => "error:",
            Level::Warning => "warning:",
            Level::Info => "info:",
            Level::Debug => "debug:",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Level::Error => Style::new().fg(Color::Red).bold(),
            Level::Warning => Style::new().fg(Color::Yellow).bold(),
            Level::Info => Style::new().fg(Color::Cyan).bold(),
            Level::Debug => Style::new().fg(Color::BrightBlack),
        }
    }
}

pub struct DiagnosticBuffer<S: Sink = GrowableSink> {
    sink: S,
    config: RenderConfig,
    colors: bool,
}

impl DiagnosticBuffer<GrowableSink> {
    pub fn new(config: RenderConfig) -> Self {
        Self::with_sink(GrowableSink::new(), config)
    }
}

impl<const N: usize> DiagnosticBuffer<FixedSink<N>> {
    /// A buffer over an `N`-byte inline array
    pub fn fixed(config: RenderConfig) -> Self {
        Self::with_sink(FixedSink::new(), config)
    }
}

impl<S: Sink> DiagnosticBuffer<S> {
    pub fn with_sink(sink: S, config: RenderConfig) -> Self {
        let colors = config.colors_enabled();
        Self {
            sink,
            config,
            colors,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Whether styled output is being produced
    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn mode(&self) -> SinkMode {
        self.sink.mode()
    }

    pub fn len(&self) -> usize {
        self.sink.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sink.is_empty()
    }

    /// Append raw bytes
    ///
    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.append(bytes)
    }

    /// Append formatted text
    ///
    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn print(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        let mark = self.sink.len();
        let result = self.print_unchecked(args);
        self.rollback_on_error(mark, result)
    }

    fn print_unchecked(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        if let Some(text) = args.as_str() {
            return self.write(text.as_bytes());
        }
        let mut adapter = SinkWriter {
            sink: &mut self.sink,
            error: None,
        };
        match fmt::write(&mut adapter, args) {
            Ok(()) => Ok(()),
            Err(_) => Err(adapter.error.take().unwrap_or_else(|| {
                CheckError::new(CheckErrorKind::Internal)
                    .with_op("print")
                    .with_message("formatter returned an error")
            })),
        }
    }

    /// Append one line: styled level label, a space, the message, a newline
    ///
    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn log(&mut self, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        let mark = self.sink.len();
        let label = level.style().paint(level.label(), self.colors);
        let result = self
            .write(label.as_bytes())
            .and_then(|()| self.write(b" "))
            .and_then(|()| self.print_unchecked(args))
            .and_then(|()| self.write(b"\n"));
        self.rollback_on_error(mark, result)
    }

    /// A line either lands whole or not at all
    fn rollback_on_error(&mut self, mark: usize, result: Result<()>) -> Result<()> {
        if result.is_err() {
            self.sink.truncate(mark);
        }
        result
    }

    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn error(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Error, args)
    }

    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn warning(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Warning, args)
    }

    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn info(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Info, args)
    }

    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn debug(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Debug, args)
    }

    /// Append a full-width titled rule and a newline
    ///
    /// # Errors
    ///
    /// `BufferOverflow` from a fixed sink.
    pub fn separator(&mut self, title: &str, weight: RuleWeight) -> Result<()> {
        let rule = titled_rule(title, weight, self.config.width);
        let rule = Style::new().dim().paint(&rule, self.colors);
        let mark = self.sink.len();
        let result = self
            .write(rule.as_bytes())
            .and_then(|()| self.write(b"\n"));
        self.rollback_on_error(mark, result)
    }

    /// Take the accumulated text, leaving the buffer empty
    pub fn drain(&mut self) -> String {
        let text = String::from_utf8_lossy(self.sink.contents()).into_owned();
        self.sink.reset();
        text
    }

    /// Drop accumulated text without reading it
    pub fn clear(&mut self) {
        self.sink.reset();
    }

    /// Release the buffer, throwing away anything unread
    pub fn discard(mut self) {
        self.sink.reset();
    }
}

impl<S: Sink> Drop for DiagnosticBuffer<S> {
    fn drop(&mut self) {
        if self.sink.is_empty() || std::thread::panicking() {
            return;
        }
        let err = CheckError::new(CheckErrorKind::UndrainedBuffer)
            .with_op("drop")
            .with_message(format!(
                "diagnostic buffer dropped holding {} undrained bytes",
                self.sink.len()
            ));
        tracing::error!(
            err.code = err.code(),
            buffer.len = self.sink.len(),
            "undrained diagnostic buffer"
        );
        panic!("{}", err);
    }
}

impl<S: Sink> fmt::Debug for DiagnosticBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticBuffer")
            .field("mode", &self.sink.mode())
            .field("len", &self.sink.len())
            .field("config", &self.config)
            .finish()
    }
}

struct SinkWriter<'a, S: Sink> {
    sink: &'a mut S,
    error: Option<CheckError>,
}

impl<S: Sink> fmt::Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.append(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

/// `print!`-style formatting into a [`DiagnosticBuffer`]
///
/// ```
/// use deepcheck_core::buffer::DiagnosticBuffer;
/// use deepcheck_core::config::RenderConfig;
/// use deepcheck_core::diag_print;
///
/// let mut buffer = DiagnosticBuffer::new(RenderConfig::plain());
/// diag_print!(buffer, "{} + {} = {}\n", 1, 2, 3).unwrap();
/// assert_eq!(buffer.drain(), "1 + 2 = 3\n");
/// ```
#[macro_export]
macro_rules! diag_print {
    ($buffer:expr, $($arg:tt)*) => {
        $buffer.print(format_args!($($arg)*))
    };
}
