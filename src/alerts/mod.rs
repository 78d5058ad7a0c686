//! Alert and notification system
//!
//! Threshold evaluation, alert lifecycle (cooldown, deduplication,
//! auto-clear) and notification fan-out.

mod evaluator;
mod manager;
mod notifier;
mod types;

pub use evaluator::AlertEvaluator;
pub use manager::{AlertManager, AlertManagerConfig, COOLDOWN_WINDOW, MAX_ALERTS};
pub use notifier::{
    format_clock, NotificationManager, Notifier, TerminalBell, TerminalNotifier, TonePlayer,
    ToneSequence, TONE_DURATION,
};
pub use types::{now_millis, Alert, AlertKind, ConditionResult, Timestamp};
