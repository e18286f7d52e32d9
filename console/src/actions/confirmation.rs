// File: console/src/actions/confirmation.rs
//! Operator consent before an action runs
//!
//! Confirmation is an asynchronous step of its own: the orchestrator awaits a
//! `Confirmer` and never cares whether the answer came from a terminal, a
//! modal dialog or a fixed policy.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask the operator; `true` means proceed
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (`--yes`, headless use)
pub struct StaticConfirmer {
    answer: bool,
}

impl StaticConfirmer {
    pub fn approve() -> Self {
        Self { answer: true }
    }

    pub fn decline() -> Self {
        Self { answer: false }
    }
}

#[async_trait]
impl Confirmer for StaticConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        debug!("Auto-answering '{}' with {}", prompt, self.answer);
        self.answer
    }
}

struct PromptIo<R, W> {
    reader: BufReader<R>,
    writer: W,
}

/// Writes the prompt and reads a y/N answer line. Prompts are serialized so
/// two actions never interleave their questions.
pub struct LineConfirmer<R, W> {
    io: Mutex<PromptIo<R, W>>,
}

impl<R, W> LineConfirmer<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: Mutex::new(PromptIo {
                reader: BufReader::new(reader),
                writer,
            }),
        }
    }

    async fn ask(&self, prompt: &str) -> std::io::Result<bool> {
        let mut io = self.io.lock().await;
        io.writer
            .write_all(format!("{} [y/N] ", prompt).as_bytes())
            .await?;
        io.writer.flush().await?;

        let mut line = String::new();
        io.reader.read_line(&mut line).await?;
        Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl LineConfirmer<tokio::io::Stdin, tokio::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

#[async_trait]
impl<R, W> Confirmer for LineConfirmer<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&self, prompt: &str) -> bool {
        match self.ask(prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                // Without an answer there is no consent
                warn!("Confirmation prompt failed, treating as declined: {}", e);
                false
            }
        }
    }
}
