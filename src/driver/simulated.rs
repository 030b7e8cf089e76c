// Simulated driver
//
// Records actions instead of touching a desktop. Serves hosts without
// an automation backend and the test suite, which inspects the recording.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

use super::{DesktopDriver, DriverError, Key, MouseButton, ScreenSize};

const SIMULATED_SCREEN: ScreenSize = ScreenSize {
    width: 1920,
    height: 1080,
};

/// Most recent driver calls retained by the recording
const MAX_RECORDED_ACTIONS: usize = 256;

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedAction {
    MouseMove {
        x: i32,
        y: i32,
    },
    Click {
        position: Option<(i32, i32)>,
        button: MouseButton,
    },
    TypeText {
        text: String,
        interval: Duration,
    },
    PressKey {
        key: Key,
    },
    OpenUrl {
        url: String,
    },
}

/// Driver that only pretends.
///
/// Clones share the recording, so tests can keep a handle while the server
/// owns the driver. The recording is bounded; once full, the oldest
/// actions are dropped.
#[derive(Clone, Default)]
pub struct SimulatedDriver {
    actions: Arc<Mutex<VecDeque<RecordedAction>>>,
}

impl SimulatedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the retained recording, in call order.
    pub fn actions(&self) -> Vec<RecordedAction> {
        self.actions.lock().unwrap().iter().cloned().collect()
    }

    fn record(&self, action: RecordedAction) {
        debug!(?action, "simulated driver call");
        let mut actions = self.actions.lock().unwrap();
        if actions.len() == MAX_RECORDED_ACTIONS {
            actions.pop_front();
        }
        actions.push_back(action);
    }
}

#[async_trait]
impl DesktopDriver for SimulatedDriver {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn screen_size(&self) -> Result<ScreenSize, DriverError> {
        Ok(SIMULATED_SCREEN)
    }

    async fn move_mouse(&self, x: i32, y: i32) -> Result<(), DriverError> {
        self.record(RecordedAction::MouseMove { x, y });
        Ok(())
    }

    async fn click(
        &self,
        position: Option<(i32, i32)>,
        button: MouseButton,
    ) -> Result<(), DriverError> {
        self.record(RecordedAction::Click { position, button });
        Ok(())
    }

    async fn type_text(&self, text: &str, interval: Duration) -> Result<(), DriverError> {
        self.record(RecordedAction::TypeText {
            text: text.to_string(),
            interval,
        });
        Ok(())
    }

    async fn press_key(&self, key: Key) -> Result<(), DriverError> {
        self.record(RecordedAction::PressKey { key });
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), DriverError> {
        self.record(RecordedAction::OpenUrl {
            url: url.to_string(),
        });
        Ok(())
    }
}
