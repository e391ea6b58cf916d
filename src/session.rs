//! Session state shared by the detector page and the chat panel.
//!
//! `SessionController` is plain data driven by [`Trigger`]s. It never does
//! I/O itself: a trigger that needs the backend returns an [`Outbound`]
//! request, and the caller feeds the result back in as another trigger.

use crate::commands::{DetectResponse, ModelReplies};
use crate::context_router::{self, RoutedPrompt};
use crate::detection::{self, Detection};
use crate::overlay::{self, DisplayFrame, DrawCommand, TextMeasure};

pub const GREETING: &str =
    "Hello! I am connected to GPT-4o, Gemini, Llama 3, and Claude. Ask me anything!";

/// An uploaded image, kept base64 encoded for the detect request.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub base64: String,
    /// `data:` URL used as the `<img>` source.
    pub preview_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    Text { sender: Sender, body: String },
    MultiReply(ModelReplies),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub image_name: String,
    pub count: usize,
    pub analyzed_at: String,
}

/// Identifies one detect request. Sequence numbers never repeat within a
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub seq: u64,
    pub image_generation: u64,
}

#[derive(Debug, Clone)]
pub enum Trigger {
    ImageSelected(SelectedImage),
    AnalyzeRequested,
    DetectCompleted {
        ticket: RequestTicket,
        outcome: Result<DetectResponse, String>,
    },
    ChatSubmitted(String),
    ChatCompleted(Result<ModelReplies, String>),
    FrameResized(DisplayFrame),
}

/// Backend work requested by a trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Detect {
        ticket: RequestTicket,
        image_base64: String,
        file_name: String,
    },
    Chat {
        prompt: RoutedPrompt,
    },
}

#[derive(Debug, Clone)]
pub struct SessionController {
    image: Option<SelectedImage>,
    image_generation: u64,
    next_seq: u64,
    /// Latest ticket issued for the current image, until it resolves.
    awaiting: Option<u64>,
    /// Latest ticket whose outcome was applied for the current image.
    applied: Option<u64>,
    detections: Vec<Detection>,
    frame: Option<DisplayFrame>,
    messages: Vec<ChatMessage>,
    log: Vec<LogEntry>,
    notice: Option<String>,
    pending_chats: usize,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            image: None,
            image_generation: 0,
            next_seq: 1,
            awaiting: None,
            applied: None,
            detections: Vec::new(),
            frame: None,
            messages: vec![ChatMessage::Text {
                sender: Sender::Bot,
                body: GREETING.to_string(),
            }],
            log: Vec::new(),
            notice: None,
            pending_chats: 0,
        }
    }

    pub fn dispatch(&mut self, trigger: Trigger) -> Option<Outbound> {
        match trigger {
            Trigger::ImageSelected(image) => {
                self.image = Some(image);
                self.image_generation += 1;
                self.awaiting = None;
                self.applied = None;
                self.detections.clear();
                self.frame = None;
                self.notice = None;
                None
            }
            Trigger::AnalyzeRequested => {
                let image = self.image.as_ref()?;
                let ticket = RequestTicket {
                    seq: self.next_seq,
                    image_generation: self.image_generation,
                };
                self.next_seq += 1;
                self.awaiting = Some(ticket.seq);
                self.notice = None;
                Some(Outbound::Detect {
                    ticket,
                    image_base64: image.base64.clone(),
                    file_name: image.file_name.clone(),
                })
            }
            Trigger::DetectCompleted { ticket, outcome } => {
                self.complete_detect(ticket, outcome);
                None
            }
            Trigger::ChatSubmitted(text) => {
                if text.trim().is_empty() {
                    return None;
                }
                let prompt = context_router::route(&text, &self.context_snippet());
                self.messages.push(ChatMessage::Text {
                    sender: Sender::User,
                    body: text,
                });
                self.pending_chats += 1;
                Some(Outbound::Chat { prompt })
            }
            Trigger::ChatCompleted(outcome) => {
                self.pending_chats = self.pending_chats.saturating_sub(1);
                let message = match outcome {
                    Ok(replies) => ChatMessage::MultiReply(replies),
                    Err(e) => ChatMessage::Text {
                        sender: Sender::Bot,
                        body: format!("Error communicating with server: {}", e),
                    },
                };
                self.messages.push(message);
                None
            }
            Trigger::FrameResized(frame) => {
                self.frame = Some(frame);
                None
            }
        }
    }

    fn is_stale(&self, ticket: &RequestTicket) -> bool {
        ticket.image_generation != self.image_generation
            || self.applied.is_some_and(|applied| ticket.seq <= applied)
    }

    fn complete_detect(&mut self, ticket: RequestTicket, outcome: Result<DetectResponse, String>) {
        if self.is_stale(&ticket) {
            return;
        }
        self.applied = Some(ticket.seq);
        if self.awaiting.is_some_and(|seq| ticket.seq >= seq) {
            self.awaiting = None;
        }

        match outcome {
            Ok(response) => {
                let image_name = self
                    .image
                    .as_ref()
                    .map(|i| i.file_name.clone())
                    .unwrap_or_default();
                self.log.insert(
                    0,
                    LogEntry {
                        image_name,
                        count: response.count,
                        analyzed_at: response.analyzed_at,
                    },
                );
                self.detections = response.detections;
                self.notice = None;
            }
            Err(e) => {
                self.notice = Some(format!("Analysis failed: {}", e));
            }
        }
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    /// Bumped on every image selection.
    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn frame(&self) -> Option<DisplayFrame> {
        self.frame
    }

    /// Drawing commands for the current detections on the current frame.
    /// Empty until the image has been laid out.
    pub fn overlay<M: TextMeasure + ?Sized>(&self, measure: &M) -> Vec<DrawCommand> {
        match &self.frame {
            Some(frame) => overlay::render(&self.detections, frame, measure),
            None => Vec::new(),
        }
    }

    pub fn context_snippet(&self) -> String {
        detection::context_snippet(&self.detections)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Newest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn pending_chats(&self) -> usize {
        self.pending_chats
    }
}
