//! Assembling `tracing` output into whole lines for the browser console.

use tracing::Level;

/// Console method a record is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Error,
    Warn,
    Log,
}

impl ConsoleLevel {
    pub fn for_level(level: &Level) -> Self {
        if *level == Level::ERROR {
            Self::Error
        } else if *level == Level::WARN {
            Self::Warn
        } else {
            Self::Log
        }
    }
}

/// Bytes of one formatted record.
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8>,
}

impl LineBuffer {
    pub fn push(&mut self, buf: &[u8]) {
        self.bytes.extend_from_slice(buf);
    }

    /// The buffered record without its trailing newline, if it has any content.
    pub fn take_line(&mut self) -> Option<String> {
        let line = String::from_utf8_lossy(&self.bytes).trim_end().to_string();
        self.bytes.clear();
        (!line.is_empty()).then_some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_levels_to_console_methods() {
        assert_eq!(ConsoleLevel::for_level(&Level::ERROR), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::for_level(&Level::WARN), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::for_level(&Level::INFO), ConsoleLevel::Log);
        assert_eq!(ConsoleLevel::for_level(&Level::TRACE), ConsoleLevel::Log);
    }

    #[test]
    fn joins_fragments_and_strips_newline() {
        let mut buffer = LineBuffer::default();
        buffer.push(b" INFO page_controller: ");
        buffer.push(b"page controller initialized\n");
        assert_eq!(
            buffer.take_line().as_deref(),
            Some(" INFO page_controller: page controller initialized")
        );
        assert_eq!(buffer.take_line(), None);
    }
}
