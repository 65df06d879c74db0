//! Command dispatcher
//!
//! One call to [`Dispatcher::poll`] is one pass of the main loop: take the
//! pending frame if there is one, match it, run the action, acknowledge.

use embassy_sync::blocking_mutex::raw::RawMutex;
use idlelink_hal::UartTx;
use idlelink_protocol::{match_frame, Command, MatchError, Matched, ParseError};

use crate::link::{FrameMailbox, TransmitPath};
use crate::traits::PeripheralBridge;

/// What happened to one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchOutcome {
    /// The command ran and its reply was started
    Executed(Command),
    /// Unknown frame: no action, no reply
    Unknown,
    /// Known command with a bad parameter: no action, no reply
    Rejected(ParseError),
}

/// Dispatch statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchStats {
    /// Commands executed
    pub executed: u32,
    /// Frames matching no command
    pub unknown: u32,
    /// Frames rejected for a malformed parameter
    pub parse_errors: u32,
}

/// Protocol layer between the mailbox and the peripherals
pub struct Dispatcher<B: PeripheralBridge, T: UartTx> {
    bridge: B,
    tx: TransmitPath<T>,
    stats: DispatchStats,
}

impl<B: PeripheralBridge, T: UartTx> Dispatcher<B, T> {
    /// Create a dispatcher driving `bridge` and replying through `tx`
    pub fn new(bridge: B, tx: TransmitPath<T>) -> Self {
        Self {
            bridge,
            tx,
            stats: DispatchStats::default(),
        }
    }

    /// Run one polling pass
    ///
    /// Returns `Ok(None)` immediately when no frame is pending. Otherwise
    /// the frame is taken (clearing the slot) and dispatched.
    pub async fn poll<M: RawMutex, const N: usize>(
        &mut self,
        mailbox: &FrameMailbox<M, N>,
    ) -> Result<Option<DispatchOutcome>, T::Error> {
        let Some(frame) = mailbox.try_take() else {
            return Ok(None);
        };
        self.dispatch(&frame).await.map(Some)
    }

    /// Dispatch one complete frame
    ///
    /// Dispatching the same frame twice performs the same action and sends
    /// the same reply twice.
    pub async fn dispatch(&mut self, frame: &[u8]) -> Result<DispatchOutcome, T::Error> {
        match self.execute(frame) {
            Ok(matched) => {
                self.tx.send(matched.reply).await?;
                Ok(DispatchOutcome::Executed(matched.command))
            }
            Err(MatchError::UnknownCommand) => Ok(DispatchOutcome::Unknown),
            Err(MatchError::Parse(e)) => Ok(DispatchOutcome::Rejected(e)),
        }
    }

    /// Match a frame and run its action, without replying
    pub fn execute(&mut self, frame: &[u8]) -> Result<Matched, MatchError> {
        let matched = match match_frame(frame) {
            Ok(matched) => matched,
            Err(e) => {
                match e {
                    MatchError::UnknownCommand => {
                        self.stats.unknown = self.stats.unknown.wrapping_add(1)
                    }
                    MatchError::Parse(_) => {
                        self.stats.parse_errors = self.stats.parse_errors.wrapping_add(1)
                    }
                }
                return Err(e);
            }
        };

        match matched.command {
            Command::Toggle(pin) => self.bridge.toggle(pin),
            Command::SetAnalogOutput { channel, value } => {
                self.bridge.set_analog_output(channel, value)
            }
        }
        self.stats.executed = self.stats.executed.wrapping_add(1);

        Ok(matched)
    }

    /// Dispatch statistics since boot
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Access the peripheral bridge
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Mutable access to the peripheral bridge
    pub fn bridge_mut(&mut self) -> &mut B {
        &mut self.bridge
    }

    /// Access the transmit path
    pub fn transmit(&self) -> &TransmitPath<T> {
        &self.tx
    }
}
