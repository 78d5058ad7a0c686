//! Alert notification system
//!
//! Fans a raised alert out to a visible channel and an audible one. Each
//! side is gated by its settings flag, and channel failures are logged and
//! swallowed so they never interrupt evaluation.

use super::types::{AlertKind, Timestamp};
use crate::error::NotifyError;
use crate::settings::ThresholdConfig;
use std::io::{self, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Visible notification channel
pub trait Notifier: Send + Sync {
    /// Show a notification styled for `kind`
    fn notify(&self, kind: AlertKind, message: &str) -> Result<(), NotifyError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Audible notification channel
pub trait TonePlayer: Send + Sync {
    /// Play a tone sequence
    fn play(&self, tones: &ToneSequence) -> Result<(), NotifyError>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Length of each tone in a sequence
pub const TONE_DURATION: Duration = Duration::from_millis(150);

/// A short sequence of tones identifying an alert kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneSequence {
    /// Frequencies in Hz, played in order
    pub frequencies: Vec<u32>,
    /// Duration of each tone
    pub tone_duration: Duration,
}

impl ToneSequence {
    /// Tones for an alert kind
    ///
    /// error: high-low-high, warning: low-high, info: a single tone.
    pub fn for_kind(kind: AlertKind) -> Self {
        let frequencies = match kind {
            AlertKind::Error => vec![880, 660, 880],
            AlertKind::Warning => vec![660, 880],
            AlertKind::Info => vec![440],
        };

        Self {
            frequencies,
            tone_duration: TONE_DURATION,
        }
    }

    /// Total playing time
    pub fn total_duration(&self) -> Duration {
        self.tone_duration * self.frequencies.len() as u32
    }
}

/// Terminal/console notifier
///
/// Outputs alerts to stdout/stderr with colored formatting
pub struct TerminalNotifier {
    /// Use stderr instead of stdout
    use_stderr: bool,
    /// Use colors (ANSI escape codes)
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier that uses stdout
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier without colors
    pub fn no_color() -> Self {
        Self {
            use_stderr: true,
            use_colors: false,
        }
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
            && std::env::var_os("NO_COLOR").is_none()
    }

    fn format_message(&self, kind: AlertKind, message: &str, now: Timestamp) -> String {
        format!(
            "[{}] {} {}",
            format_clock(now),
            self.format_kind(kind),
            message
        )
    }

    fn format_kind(&self, kind: AlertKind) -> String {
        if !self.use_colors {
            return format!("{}", kind);
        }

        let color_code = match kind {
            AlertKind::Info => "\x1b[36m",          // Cyan
            AlertKind::Warning => "\x1b[33m",       // Yellow
            AlertKind::Error => "\x1b[31m\x1b[1m", // Bold red
        };

        format!("{}{}\x1b[0m", color_code, kind)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, kind: AlertKind, message: &str) -> Result<(), NotifyError> {
        let line = self.format_message(kind, message, super::types::now_millis());

        if self.use_stderr {
            let stderr = io::stderr();
            let mut handle = stderr.lock();
            writeln!(handle, "{}", line)?;
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", line)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// Terminal bell tone player
///
/// Terminals cannot play pitches, so each tone becomes one BEL spaced by
/// the tone duration; the count still tells the kinds apart. Sequences are
/// queued to a player thread, so `play` returns immediately.
pub struct TerminalBell {
    queue: Mutex<Option<Sender<ToneSequence>>>,
    handle: Option<JoinHandle<()>>,
}

impl TerminalBell {
    /// Create a bell that paces tones in real time
    pub fn new() -> Self {
        Self::spawn(true)
    }

    /// Create a bell that rings without pausing between tones
    pub fn immediate() -> Self {
        Self::spawn(false)
    }

    fn spawn(pause: bool) -> Self {
        let (tx, rx) = mpsc::channel::<ToneSequence>();
        let handle = thread::spawn(move || {
            for tones in rx {
                if let Err(e) = ring(&tones, pause) {
                    log::warn!("Terminal bell failed: {}", e);
                }
            }
            log::debug!("Bell player stopped");
        });

        Self {
            queue: Mutex::new(Some(tx)),
            handle: Some(handle),
        }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalBell {
    fn drop(&mut self) {
        // Closing the queue lets the player finish what is pending and exit
        if let Ok(queue) = self.queue.get_mut() {
            queue.take();
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl TonePlayer for TerminalBell {
    fn play(&self, tones: &ToneSequence) -> Result<(), NotifyError> {
        let stopped = || NotifyError::ChannelFailed {
            channel: "bell".to_string(),
            message: "player thread stopped".to_string(),
        };

        let queue = self.queue.lock().map_err(|_| stopped())?;
        match queue.as_ref() {
            Some(tx) => tx.send(tones.clone()).map_err(|_| stopped()),
            None => Err(stopped()),
        }
    }

    fn name(&self) -> &str {
        "bell"
    }
}

fn ring(tones: &ToneSequence, pause: bool) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    for (i, _) in tones.frequencies.iter().enumerate() {
        if i > 0 && pause {
            thread::sleep(tones.tone_duration);
        }
        write!(handle, "\x07")?;
        handle.flush()?;
    }
    Ok(())
}

/// Notification manager
///
/// Dispatches alerts to the visible channels when alerts are enabled and
/// to the tone player when sound is enabled.
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
    tone_player: Option<Box<dyn TonePlayer>>,
}

impl NotificationManager {
    /// Create a notification manager without channels
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
            tone_player: None,
        }
    }

    /// Add a visible channel
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Set the audible channel
    pub fn set_tone_player(&mut self, player: Box<dyn TonePlayer>) {
        self.tone_player = Some(player);
    }

    /// Builder: add a visible channel
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.add_notifier(notifier);
        self
    }

    /// Builder: set the audible channel
    pub fn with_tone_player(mut self, player: Box<dyn TonePlayer>) -> Self {
        self.set_tone_player(player);
        self
    }

    /// Dispatch one alert
    ///
    /// Never fails; channel errors are logged.
    pub fn notify(&self, kind: AlertKind, message: &str, settings: &ThresholdConfig) {
        if settings.alerts_enabled {
            for notifier in &self.notifiers {
                if let Err(e) = notifier.notify(kind, message) {
                    log::warn!("Failed to notify via {}: {}", notifier.name(), e);
                }
            }
        }

        if settings.sound_enabled {
            if let Some(player) = &self.tone_player {
                if let Err(e) = player.play(&ToneSequence::for_kind(kind)) {
                    log::warn!("Audio via {} unavailable: {}", player.name(), e);
                }
            }
        }
    }

    /// Get number of visible channels
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }

    /// Whether an audible channel is configured
    pub fn has_tone_player(&self) -> bool {
        self.tone_player.is_some()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
            .with_notifier(Box::new(TerminalNotifier::new()))
            .with_tone_player(Box::new(TerminalBell::new()))
    }
}

/// `HH:MM:SS` (UTC) of a timestamp
pub fn format_clock(timestamp: Timestamp) -> String {
    let secs = timestamp / 1000;
    let hours = (secs / 3600) % 24;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}
