//! Command table and frame matching
//!
//! The table is fixed at build time. Exact entries are tried before prefix
//! entries and the first match wins.

use crate::decimal::{parse_decimal, ParseError};

/// Acknowledgment sent after every executed command
pub const REPLY_DONE: &[u8] = b"[DONE]";

/// Closing delimiter of every request
const CLOSE: u8 = b']';

/// A digital output, named the way the board silkscreen names it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    /// GPIO port letter (`b'A'`..)
    pub port: u8,
    /// Pin number within the port (0-15)
    pub number: u8,
}

impl PinId {
    /// Green user LED on the STM32F4-Discovery board
    pub const PD12: Self = Self {
        port: b'D',
        number: 12,
    };
}

/// DAC output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// DAC channel 1 (PA4)
    Ch1,
    /// DAC channel 2 (PA5)
    Ch2,
}

/// A 12-bit DAC code, `0..=4095`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacValue(u16);

impl DacValue {
    /// Full-scale code
    pub const MAX: Self = Self(4095);

    /// Create a value, rejecting anything wider than 12 bits
    pub fn new(raw: u32) -> Option<Self> {
        if raw <= u32::from(Self::MAX.0) {
            Some(Self(raw as u16))
        } else {
            None
        }
    }

    /// Get the raw code
    pub fn get(self) -> u16 {
        self.0
    }
}

/// How an entry's pattern is compared against a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchKind {
    /// The whole frame must equal the pattern
    Exact,
    /// The frame starts with the pattern and carries exactly `param_len`
    /// parameter bytes at `param_offset`, followed by a closing `]`
    Prefix {
        param_offset: usize,
        param_len: usize,
    },
}

/// What a matched entry does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Flip a digital output
    Toggle(PinId),
    /// Write the decoded parameter to a DAC channel
    SetAnalogOutput(AnalogChannel),
}

/// One row of the command table
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    /// Literal bytes identifying the command
    pub pattern: &'static [u8],
    /// Exact or prefix comparison
    pub kind: MatchKind,
    /// Action bound to the command
    pub action: Action,
    /// Fixed reply sent after the action
    pub reply: &'static [u8],
}

/// The complete command set
pub static COMMAND_TABLE: [CommandEntry; 3] = [
    CommandEntry {
        pattern: b"[PD12_TOGGLE]",
        kind: MatchKind::Exact,
        action: Action::Toggle(PinId::PD12),
        reply: REPLY_DONE,
    },
    CommandEntry {
        pattern: b"[DAC1 ",
        kind: MatchKind::Prefix {
            param_offset: 6,
            param_len: 4,
        },
        action: Action::SetAnalogOutput(AnalogChannel::Ch1),
        reply: REPLY_DONE,
    },
    CommandEntry {
        pattern: b"[DAC2 ",
        kind: MatchKind::Prefix {
            param_offset: 6,
            param_len: 4,
        },
        action: Action::SetAnalogOutput(AnalogChannel::Ch2),
        reply: REPLY_DONE,
    },
];

/// A fully decoded command, ready to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Flip a digital output
    Toggle(PinId),
    /// Write a DAC channel
    SetAnalogOutput {
        channel: AnalogChannel,
        value: DacValue,
    },
}

/// Result of a successful match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matched {
    /// Decoded command
    pub command: Command,
    /// Reply to send once the command has run
    pub reply: &'static [u8],
}

/// Why a frame produced no command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatchError {
    /// No table entry matches the frame
    UnknownCommand,
    /// An entry matched but its parameter is malformed
    Parse(ParseError),
}

impl From<ParseError> for MatchError {
    fn from(e: ParseError) -> Self {
        MatchError::Parse(e)
    }
}

impl CommandEntry {
    /// Check whether `frame` selects this entry, ignoring the parameter
    /// contents. Returns the parameter field for prefix entries.
    fn select<'f>(&self, frame: &'f [u8]) -> Option<&'f [u8]> {
        match self.kind {
            MatchKind::Exact => (frame == self.pattern).then_some(&[][..]),
            MatchKind::Prefix {
                param_offset,
                param_len,
            } => {
                let end = param_offset + param_len;
                if frame.len() != end + 1
                    || !frame.starts_with(self.pattern)
                    || frame[end] != CLOSE
                {
                    return None;
                }
                Some(&frame[param_offset..end])
            }
        }
    }

    /// Build the command for this entry from its parameter field
    fn decode(&self, field: &[u8]) -> Result<Command, ParseError> {
        match self.action {
            Action::Toggle(pin) => Ok(Command::Toggle(pin)),
            Action::SetAnalogOutput(channel) => {
                let raw = parse_decimal(field)?;
                let value = DacValue::new(raw).ok_or(ParseError::OutOfRange)?;
                Ok(Command::SetAnalogOutput { channel, value })
            }
        }
    }
}

/// Match a completed frame against [`COMMAND_TABLE`]
pub fn match_frame(frame: &[u8]) -> Result<Matched, MatchError> {
    let exact = COMMAND_TABLE
        .iter()
        .filter(|e| e.kind == MatchKind::Exact);
    let prefix = COMMAND_TABLE
        .iter()
        .filter(|e| matches!(e.kind, MatchKind::Prefix { .. }));

    for entry in exact.chain(prefix) {
        if let Some(field) = entry.select(frame) {
            let command = entry.decode(field)?;
            return Ok(Matched {
                command,
                reply: entry.reply,
            });
        }
    }

    Err(MatchError::UnknownCommand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_exact_match() {
        let matched = match_frame(b"[PD12_TOGGLE]").unwrap();
        assert_eq!(matched.command, Command::Toggle(PinId::PD12));
        assert_eq!(matched.reply, b"[DONE]");
    }

    #[test]
    fn test_toggle_requires_whole_frame() {
        assert_eq!(
            match_frame(b"[PD12_TOGGLE]x"),
            Err(MatchError::UnknownCommand)
        );
        assert_eq!(match_frame(b"[PD12_TOGGLE"), Err(MatchError::UnknownCommand));
        assert_eq!(
            match_frame(b" [PD12_TOGGLE]"),
            Err(MatchError::UnknownCommand)
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(match_frame(b"[pd12_toggle]"), Err(MatchError::UnknownCommand));
        assert_eq!(match_frame(b"[dac1 0100]"), Err(MatchError::UnknownCommand));
    }

    #[test]
    fn test_dac1_parameter() {
        let matched = match_frame(b"[DAC1 2048]").unwrap();
        assert_eq!(
            matched.command,
            Command::SetAnalogOutput {
                channel: AnalogChannel::Ch1,
                value: DacValue::new(2048).unwrap(),
            }
        );
        assert_eq!(matched.reply, REPLY_DONE);
    }

    #[test]
    fn test_dac2_parameter_limits() {
        let low = match_frame(b"[DAC2 0000]").unwrap();
        assert_eq!(
            low.command,
            Command::SetAnalogOutput {
                channel: AnalogChannel::Ch2,
                value: DacValue::new(0).unwrap(),
            }
        );

        let high = match_frame(b"[DAC2 4095]").unwrap();
        assert_eq!(
            high.command,
            Command::SetAnalogOutput {
                channel: AnalogChannel::Ch2,
                value: DacValue::MAX,
            }
        );
    }

    #[test]
    fn test_non_digit_parameter_is_parse_error() {
        assert_eq!(
            match_frame(b"[DAC2 abcd]"),
            Err(MatchError::Parse(ParseError::InvalidDigit {
                index: 0,
                byte: b'a'
            }))
        );
    }

    #[test]
    fn test_out_of_range_parameter() {
        assert_eq!(
            match_frame(b"[DAC1 4096]"),
            Err(MatchError::Parse(ParseError::OutOfRange))
        );
        assert_eq!(
            match_frame(b"[DAC1 9999]"),
            Err(MatchError::Parse(ParseError::OutOfRange))
        );
    }

    #[test]
    fn test_parameter_must_be_four_digits() {
        for frame in [
            &b"[DAC1 ]"[..],
            b"[DAC1 7]",
            b"[DAC1 204]",
            b"[DAC1 12345]",
            b"[DAC2 000002048]",
        ] {
            assert_eq!(match_frame(frame), Err(MatchError::UnknownCommand));
        }
    }

    #[test]
    fn test_closing_bracket_must_follow_parameter() {
        assert_eq!(match_frame(b"[DAC1 0100x]"), Err(MatchError::UnknownCommand));
        assert_eq!(match_frame(b"[DAC1 0100]]"), Err(MatchError::UnknownCommand));
        assert_eq!(
            match_frame(b"[DAC1 01]0]"),
            Err(MatchError::Parse(ParseError::InvalidDigit {
                index: 2,
                byte: b']'
            }))
        );
    }

    #[test]
    fn test_prefix_without_closing_bracket_is_unknown() {
        assert_eq!(match_frame(b"[DAC1 "), Err(MatchError::UnknownCommand));
        assert_eq!(match_frame(b"[DAC1 1234"), Err(MatchError::UnknownCommand));
    }

    #[test]
    fn test_unknown_frames() {
        assert_eq!(match_frame(b""), Err(MatchError::UnknownCommand));
        assert_eq!(match_frame(b"[DONE]"), Err(MatchError::UnknownCommand));
        assert_eq!(match_frame(b"[DAC3 0001]"), Err(MatchError::UnknownCommand));
    }

    #[test]
    fn test_prefix_offsets_follow_patterns() {
        for entry in &COMMAND_TABLE {
            if let MatchKind::Prefix {
                param_offset,
                param_len,
            } = entry.kind
            {
                assert_eq!(param_offset, entry.pattern.len());
                assert_eq!(param_len, 4);
            }
        }
    }

    #[test]
    fn test_dac_value_bounds() {
        assert_eq!(DacValue::new(4095).map(DacValue::get), Some(4095));
        assert_eq!(DacValue::new(4096), None);
    }
}
