//! The orchestrator loop: drives poll cycles, executes effects, waits.

use std::pin::pin;

use chrono::Utc;
use reviewbot_core::{update, AgentState, CycleError, Effect, Msg};
use reviewbot_engine::{
    ApiError, ApiFailure, ClientSettings, Notifier, NotifierSettings, ReqwestStatusApi, StatusApi,
    TelegramNotifier,
};

use crate::config::Config;

/// Failures that prevent the agent from starting; nothing inside a running
/// cycle produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to build the status API client: {0}")]
    Api(String),
    #[error("failed to build the Telegram client: {0}")]
    Telegram(#[from] reviewbot_engine::DeliveryError),
    #[error("failed to build the tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Runs the poll loop until the process is interrupted.
pub fn run(config: Config) -> Result<(), StartupError> {
    let api = ReqwestStatusApi::new(ClientSettings::default(), &config.practicum_token)
        .map_err(|err| StartupError::Api(format!("{}: {}", err.kind, err.message)))?;
    let notifier = TelegramNotifier::new(
        NotifierSettings::default(),
        &config.telegram_token,
        &config.telegram_chat_id,
    )?;

    // One cycle at a time: the whole agent runs on a current-thread runtime.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(poll_loop(&config, &api, &notifier));
    Ok(())
}

async fn poll_loop(config: &Config, api: &dyn StatusApi, notifier: &dyn Notifier) {
    let mut state = AgentState::new(Utc::now().timestamp());
    let mut shutdown = pin!(tokio::signal::ctrl_c());
    log::info!(
        "watching homework statuses from {} every {:?}",
        state.cursor(),
        config.poll_interval
    );

    loop {
        let msg = match api.fetch_statuses(state.cursor()).await {
            Ok(payload) => Msg::PollCompleted(Ok(payload)),
            Err(error) => Msg::PollCompleted(Err(map_api_error(error))),
        };
        state = dispatch(state, msg, notifier).await;

        tokio::select! {
            _ = &mut shutdown => {
                log::info!("interrupt received; shutting down");
                break;
            }
            _ = tokio::time::sleep(config.poll_interval) => {}
        }
    }
}

/// Applies a message, executes the effects it produced, and feeds delivery
/// results back into the state machine.
async fn dispatch(state: AgentState, msg: Msg, notifier: &dyn Notifier) -> AgentState {
    let (mut state, effects) = update(state, msg);
    for effect in effects {
        match effect {
            Effect::Notify(notice) => {
                let feedback = match notifier.send(&notice.to_text()).await {
                    Ok(()) => Msg::NoticeDelivered { notice },
                    Err(error) => Msg::NoticeFailed {
                        notice,
                        reason: error.to_string(),
                    },
                };
                let (next, followups) = update(state, feedback);
                debug_assert!(followups.is_empty());
                state = next;
            }
        }
    }
    state
}

/// Maps the engine's transport failure onto the cycle error the state
/// machine de-duplicates on.
fn map_api_error(error: ApiError) -> CycleError {
    match error.kind {
        ApiFailure::Network => CycleError::Transport(error.message),
        ApiFailure::Timeout => CycleError::Transport(format!("timed out: {}", error.message)),
        ApiFailure::HttpStatus(status) => CycleError::HttpStatus {
            status,
            body: error.message,
        },
        ApiFailure::Decode => CycleError::Decode(error.message),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use reviewbot_engine::DeliveryError;

    use super::*;

    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        outcome: Result<(), DeliveryError>,
    }

    impl RecordingNotifier {
        fn delivering() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                outcome: Ok(()),
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                outcome: Err(DeliveryError::Transport("chat unreachable".to_string())),
            }
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), DeliveryError> {
            self.sent.lock().unwrap().push(text.to_string());
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn delivered_failure_notice_is_remembered() {
        let notifier = RecordingNotifier::delivering();
        let error = CycleError::Transport("connection refused".to_string());

        let state = AgentState::new(100);
        let state = dispatch(state, Msg::PollCompleted(Err(error.clone())), &notifier).await;

        assert_eq!(state.last_failure(), Some(&error));
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with("Сбой в работе программы:"));
    }

    #[tokio::test]
    async fn undelivered_failure_notice_is_not_remembered() {
        let notifier = RecordingNotifier::failing();
        let error = CycleError::Transport("connection refused".to_string());

        let state = AgentState::new(100);
        let state = dispatch(state, Msg::PollCompleted(Err(error)), &notifier).await;

        assert_eq!(state.last_failure(), None);
    }

    #[tokio::test]
    async fn status_change_text_reaches_the_notifier() {
        let notifier = RecordingNotifier::delivering();
        let payload = serde_json::json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": 1_700_000_000,
        });

        let state = AgentState::new(100);
        let state = dispatch(state, Msg::PollCompleted(Ok(payload)), &notifier).await;

        assert_eq!(state.cursor(), 1_700_000_000);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            "Изменился статус проверки работы \"hw1\". Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn timeout_and_network_both_map_to_transport() {
        let timeout = ApiError {
            kind: ApiFailure::Timeout,
            message: "deadline elapsed".to_string(),
        };
        let network = ApiError {
            kind: ApiFailure::Network,
            message: "dns failure".to_string(),
        };

        assert_eq!(
            map_api_error(timeout),
            CycleError::Transport("timed out: deadline elapsed".to_string())
        );
        assert_eq!(
            map_api_error(network),
            CycleError::Transport("dns failure".to_string())
        );
    }
}
