//! In-process doubles for the orchestrator's collaborators

use async_trait::async_trait;
use netboot_console::actions::{ActionOrchestrator, Confirmer, PageReloader};
use netboot_console::errors::TransportError;
use netboot_console::feedback::{BlockingOverlay, NotificationFeed};
use netboot_console::http::{ActionRequest, ControlPlane, HttpControlPlane, RawResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Answers prompts from a script and remembers what it was asked.
/// Once the script runs out every further prompt is approved.
#[derive(Default)]
pub struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub fn approving() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_answers(answers: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(true)
    }
}

/// Records scheduled reloads instead of performing them
#[derive(Default)]
pub struct RecordingReloader {
    scheduled: Mutex<Vec<Duration>>,
}

impl RecordingReloader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn scheduled(&self) -> Vec<Duration> {
        self.scheduled.lock().unwrap().clone()
    }
}

impl PageReloader for RecordingReloader {
    fn schedule_reload(&self, delay: Duration) {
        self.scheduled.lock().unwrap().push(delay);
    }
}

/// Never produces a response
pub struct FailingControlPlane {
    pub reason: String,
}

impl FailingControlPlane {
    pub fn connection_reset() -> Arc<Self> {
        Arc::new(Self {
            reason: "connection reset by peer".to_string(),
        })
    }
}

#[async_trait]
impl ControlPlane for FailingControlPlane {
    async fn send(&self, request: &ActionRequest) -> Result<RawResponse, TransportError> {
        Err(TransportError {
            url: request.path.clone(),
            reason: self.reason.clone(),
        })
    }
}

/// Holds every request until the test opens the gate, then answers with a
/// canned response. Counts requests it has received.
pub struct GatedControlPlane {
    gate: Notify,
    response: RawResponse,
    received: Mutex<Vec<ActionRequest>>,
}

impl GatedControlPlane {
    pub fn answering(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            gate: Notify::new(),
            response: RawResponse {
                status,
                body: body.to_string(),
            },
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn open(&self) {
        self.gate.notify_waiters();
    }

    pub fn received(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Paths of the requests received so far
    pub fn received_paths(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }

    pub async fn wait_for_requests(&self, count: usize) {
        while self.received() < count {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    /// Open the gate in the background once `count` requests are parked
    pub fn open_when_received(self: &Arc<Self>, count: usize) {
        let plane = self.clone();
        tokio::spawn(async move {
            plane.wait_for_requests(count).await;
            plane.open();
        });
    }
}

#[async_trait]
impl ControlPlane for GatedControlPlane {
    async fn send(&self, request: &ActionRequest) -> Result<RawResponse, TransportError> {
        let opened = self.gate.notified();
        self.received.lock().unwrap().push(request.clone());
        opened.await;
        Ok(self.response.clone())
    }
}

/// Orchestrator wired to test doubles
pub struct Harness {
    pub orchestrator: ActionOrchestrator,
    pub confirmer: Arc<ScriptedConfirmer>,
    pub reloader: Arc<RecordingReloader>,
    pub notifications: NotificationFeed,
    pub overlay: BlockingOverlay,
}

impl Harness {
    pub fn new(control_plane: Arc<dyn ControlPlane>, confirmer: Arc<ScriptedConfirmer>) -> Self {
        let reloader = RecordingReloader::new();
        let notifications = NotificationFeed::new();
        let overlay = BlockingOverlay::new();
        let orchestrator = ActionOrchestrator::new(
            control_plane,
            confirmer.clone(),
            reloader.clone(),
            notifications.clone(),
            overlay.clone(),
        );
        Self {
            orchestrator,
            confirmer,
            reloader,
            notifications,
            overlay,
        }
    }

    /// Harness talking HTTP to `base_url`, approving every prompt
    pub fn over_http(base_url: &str) -> Self {
        let plane = HttpControlPlane::new(base_url, None).expect("Failed to build control plane");
        Self::new(Arc::new(plane), ScriptedConfirmer::approving())
    }
}
