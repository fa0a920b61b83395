use tracing::{info, warn};

use crate::chat::{ChatTurn, CompletionService, RemoteCompletion};
use crate::config::Config;
use crate::error::Error;
use crate::export;
use crate::matcher::{self, ExtractedRow};
use crate::pdf_text;
use crate::session::{ChatSession, derive_fields};

/// A document handed over by the hosting UI, kept for the session lifetime.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// UI interactions the controller understands. The hosting framework maps
/// its widgets onto these and calls [`SessionState::dispatch`].
#[derive(Debug, Clone)]
pub enum UiEvent {
    TextSubmitted(String),
    ExtractionTriggered,
}

/// What the hosting UI should surface after an event is handled.
#[derive(Debug)]
pub enum Outcome {
    /// A new assistant reply; the transcript from `history()` is current.
    AssistantReply(String),
    /// Extraction produced data; offer `bytes` for download as `filename`.
    ExportReady { filename: String, bytes: Vec<u8> },
    /// Extraction ran but produced no rows. A warning, not an error.
    NothingExtracted,
}

/// All mutable state of one interactive session: the conversation plus the
/// uploaded documents. Created at session start, dropped or [`reset`] at
/// session end; there is no terminal state in between.
///
/// [`reset`]: SessionState::reset
pub struct SessionState<S> {
    session: ChatSession<S>,
    documents: Vec<UploadedDocument>,
    download_name: String,
}

impl SessionState<RemoteCompletion> {
    /// Wire up a production session from config: remote completion client,
    /// fresh history, configured download filename.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let service = RemoteCompletion::from_config(&config.llm)?;
        let session = ChatSession::new(service, config.llm.system_prompt.clone());
        Ok(Self::new(session, config.export.download_name.clone()))
    }
}

impl<S: CompletionService> SessionState<S> {
    pub fn new(session: ChatSession<S>, download_name: impl Into<String>) -> Self {
        Self {
            session,
            documents: Vec::new(),
            download_name: download_name.into(),
        }
    }

    /// Transcript for rendering, in submission order.
    pub fn history(&self) -> &[ChatTurn] {
        self.session.history()
    }

    pub fn documents(&self) -> &[UploadedDocument] {
        &self.documents
    }

    /// Register an uploaded document. Upload order is export row order.
    pub fn upload(&mut self, document: UploadedDocument) {
        info!(
            filename = %document.filename,
            bytes = document.bytes.len(),
            "Document uploaded"
        );
        self.documents.push(document);
    }

    /// Clear conversation and documents at session end.
    pub fn reset(&mut self) {
        self.session.clear();
        self.documents.clear();
    }

    /// Single entry point for UI interactions: one synchronous pass through
    /// the component chain per event.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<Outcome, Error> {
        match event {
            UiEvent::TextSubmitted(text) => {
                let reply = self.session.submit(&text).await?;
                Ok(Outcome::AssistantReply(reply))
            }
            UiEvent::ExtractionTriggered => self.run_extraction(),
        }
    }

    /// One extraction run over all uploaded documents. A parse failure on
    /// any document aborts the whole batch.
    fn run_extraction(&self) -> Result<Outcome, Error> {
        if self.documents.is_empty() {
            return Err(Error::NoDocuments);
        }

        let fields = derive_fields(self.session.history());
        info!(
            fields = ?fields,
            documents = self.documents.len(),
            "Starting extraction run"
        );

        let mut rows: Vec<ExtractedRow> = Vec::with_capacity(self.documents.len());
        for document in &self.documents {
            let span = tracing::info_span!("extract", filename = %document.filename);
            let _guard = span.enter();

            let text = pdf_text::extract_text(&document.bytes).map_err(|source| {
                Error::DocumentParse {
                    filename: document.filename.clone(),
                    source,
                }
            })?;
            rows.push(matcher::match_fields(&text, &fields, &document.filename));
        }

        match export::build_spreadsheet(&rows)? {
            Some(bytes) => Ok(Outcome::ExportReady {
                filename: self.download_name.clone(),
                bytes,
            }),
            None => {
                warn!("Extraction produced no rows");
                Ok(Outcome::NothingExtracted)
            }
        }
    }
}
