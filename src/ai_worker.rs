use crate::ai::{generate_quiz, summarize_document, CompletionBackend, ModelConfig, OpenRouterClient};
use crate::models::{AiRequest, AiResponse};
use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

/// Run AI requests on a dedicated thread with its own tokio runtime.
///
/// The worker exits when the request channel disconnects.
pub fn spawn_ai_worker(
    ai_tx: Sender<AiResponse>,
    ai_rx: Receiver<AiRequest>,
    config: ModelConfig,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("study-aid::ai_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to start AI runtime: {}", e);
                    // Answer every request with the error instead of leaving the UI waiting.
                    while let Ok(request) = ai_rx.recv() {
                        let _ = ai_tx.send(AiResponse::Error {
                            request: request.kind(),
                            error: format!("Failed to start AI runtime: {}", e),
                        });
                    }
                    return;
                }
            };

            let mut client: Option<OpenRouterClient> = None;

            while let Ok(request) = ai_rx.recv() {
                let kind = request.kind();
                log::debug!("Worker received {:?} request", kind);

                if client.is_none() {
                    match OpenRouterClient::new() {
                        Ok(c) => client = Some(c),
                        Err(e) => {
                            log::error!("Worker error: {}", e);
                            let _ = ai_tx.send(AiResponse::Error {
                                request: kind,
                                error: e.to_string(),
                            });
                            continue;
                        }
                    }
                }

                if let Some(client) = client.as_ref() {
                    let response = rt.block_on(handle_request(client, request, &config));
                    if ai_tx.send(response).is_err() {
                        break;
                    }
                }
            }

            log::debug!("Worker channel disconnected, exiting");
        })
}

/// Execute one request against `backend`, folding failures into [`AiResponse::Error`].
pub async fn handle_request(
    backend: &dyn CompletionBackend,
    request: AiRequest,
    config: &ModelConfig,
) -> AiResponse {
    let kind = request.kind();
    let result = match request {
        AiRequest::Summarize { document } => summarize_document(backend, &document, config)
            .await
            .map(AiResponse::Summary),
        AiRequest::GenerateQuiz {
            content,
            num_questions,
        } => generate_quiz(backend, &content, num_questions, config)
            .await
            .map(AiResponse::Quiz),
    };

    match result {
        Ok(response) => {
            log::debug!("Worker sending {:?} success", kind);
            response
        }
        Err(e) => {
            log::warn!("{:?} request failed: {}", kind, e);
            AiResponse::Error {
                request: kind,
                error: e.to_string(),
            }
        }
    }
}
