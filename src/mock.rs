//! Mock implementations for testing
//!
//! Recording notification channels and a scripted snapshot source, so the
//! alert pipeline can be exercised without a terminal or a controller.

use crate::alerts::{AlertKind, Notifier, TonePlayer, ToneSequence};
use crate::domain::ParameterSnapshot;
use crate::error::{NotifyError, SnapshotError};
use crate::source::SnapshotSource;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Notifier that records every message
///
/// Clones share the same log, so keep one clone for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<(AlertKind, String)>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages received so far
    pub fn messages(&self) -> Vec<(AlertKind, String)> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: AlertKind, message: &str) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap()
            .push((kind, message.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Notifier that always fails
#[derive(Debug, Clone, Copy)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _kind: AlertKind, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::ChannelFailed {
            channel: "failing".to_string(),
            message: "unavailable".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Tone player that records played sequences
#[derive(Debug, Clone, Default)]
pub struct RecordingTonePlayer {
    played: Arc<Mutex<Vec<Vec<u32>>>>,
    fail: bool,
}

impl RecordingTonePlayer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Player that reports audio as unsupported
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Frequencies of every sequence played so far
    pub fn played(&self) -> Vec<Vec<u32>> {
        self.played.lock().unwrap().clone()
    }
}

impl TonePlayer for RecordingTonePlayer {
    fn play(&self, tones: &ToneSequence) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::ChannelFailed {
                channel: "recording-tones".to_string(),
                message: "audio not supported".to_string(),
            });
        }
        self.played.lock().unwrap().push(tones.frequencies.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording-tones"
    }
}

/// Snapshot source that replays a fixed script
///
/// Each read consumes one entry; an exhausted script reports the source as
/// unavailable.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<ParameterSnapshot, String>>>,
    reads: AtomicUsize,
}

impl ScriptedSource {
    /// Create a source from readings or error messages
    pub fn new(script: Vec<Result<ParameterSnapshot, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of reads performed
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl SnapshotSource for ScriptedSource {
    fn read(&self) -> Result<ParameterSnapshot, SnapshotError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(snapshot)) => Ok(snapshot),
            Some(Err(message)) => Err(SnapshotError::Unavailable(message)),
            None => Err(SnapshotError::Unavailable("script exhausted".to_string())),
        }
    }

    fn describe(&self) -> String {
        "scripted readings".to_string()
    }
}
