//! WebSocket upgrade + page session loop.
//!
//! One connection is one page. The loop owns the socket and the `PageState`;
//! client messages and finished background jobs (backend calls, timers) are
//! both turned into `PageEvent`s and fed through `PageState::update`, so the
//! session state is only ever touched from this loop.

use std::sync::Arc;

use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info, instrument, Instrument};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::{Effect, PageEvent, PageState};
use crate::state::AppState;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "quiz_front", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| {
    let session = Uuid::new_v4();
    handle_ws(socket, state).instrument(tracing::info_span!("page", %session))
  })
}

enum Step {
  Client(Option<Result<Message, axum::Error>>),
  Job(PageEvent),
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "quiz_front", "WebSocket connected");
  let (tx, mut rx) = mpsc::unbounded_channel::<PageEvent>();
  let mut page = PageState::new(state.config.decline_redirect_url.clone());

  let mut effects = page.update(PageEvent::Opened);
  loop {
    for effect in effects.drain(..) {
      if let Some(msg) = dispatch(effect, &state.api, &tx) {
        if let Err(e) = send_json(&mut socket, &msg).await {
          error!(target: "quiz_front", error = %e, "WS send error");
          info!(target: "quiz_front", "WebSocket disconnected");
          return;
        }
      }
    }

    let step = tokio::select! {
      incoming = socket.recv() => Step::Client(incoming),
      Some(event) = rx.recv() => Step::Job(event),
    };

    let event = match step {
      Step::Job(event) => event,
      Step::Client(Some(Ok(Message::Text(txt)))) => match serde_json::from_str::<ClientWsMessage>(&txt) {
        Ok(incoming) => match client_event(incoming) {
          Some(event) => event,
          None => {
            effects.push(Effect::Send(ServerWsMessage::Pong));
            continue;
          }
        },
        Err(e) => {
          effects.push(Effect::Send(ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) }));
          continue;
        }
      },
      Step::Client(Some(Ok(Message::Ping(payload)))) => {
        let _ = socket.send(Message::Pong(payload)).await;
        continue;
      }
      Step::Client(Some(Ok(Message::Close(_)))) | Step::Client(None) => break,
      Step::Client(Some(Err(e))) => {
        debug!(target: "quiz_front", error = %e, "WS receive error");
        break;
      }
      Step::Client(Some(Ok(_))) => continue,
    };

    effects = page.update(event);
  }
  info!(
    target: "quiz_front",
    selected = ?page.selected_task(),
    checking = page.is_checking(),
    "WebSocket disconnected"
  );
}

/// Map a browser message to a session event. `None` for keep-alives.
fn client_event(msg: ClientWsMessage) -> Option<PageEvent> {
  match msg {
    ClientWsMessage::Ping => None,
    ClientWsMessage::AcceptConsent => Some(PageEvent::AcceptConsent),
    ClientWsMessage::DeclineConsent => Some(PageEvent::DeclineConsent),
    ClientWsMessage::SelectTask { value } => Some(PageEvent::TaskSelected(value)),
    ClientWsMessage::SubmitAnswer { answer } => Some(PageEvent::SubmitAnswer(answer)),
  }
}

/// Run one effect. UI messages are handed back for the caller to send; jobs
/// are spawned and report their outcome on `tx`.
fn dispatch(effect: Effect, api: &ApiClient, tx: &UnboundedSender<PageEvent>) -> Option<ServerWsMessage> {
  match effect {
    Effect::Send(msg) => return Some(msg),
    Effect::Schedule { after, timer } => {
      let tx = tx.clone();
      tokio::spawn(
        async move {
          tokio::time::sleep(after).await;
          let _ = tx.send(PageEvent::Timer(timer));
        }
        .in_current_span(),
      );
    }
    Effect::ListTasks => {
      let (api, tx) = (api.clone(), tx.clone());
      tokio::spawn(
        async move {
          let result = api.list_tasks().await;
          let _ = tx.send(PageEvent::TasksListed(result));
        }
        .in_current_span(),
      );
    }
    Effect::LoadTask { task_id, seq } => {
      let (api, tx) = (api.clone(), tx.clone());
      tokio::spawn(
        async move {
          let result = api.fetch_task(task_id).await;
          let _ = tx.send(PageEvent::TaskLoaded { task_id, seq, result });
        }
        .in_current_span(),
      );
    }
    Effect::CheckAnswer { task_id, answer } => {
      let (api, tx) = (api.clone(), tx.clone());
      tokio::spawn(
        async move {
          let result = api.check_answer(task_id, &answer).await;
          let _ = tx.send(PageEvent::AnswerChecked(result));
        }
        .in_current_span(),
      );
    }
  }
  None
}

async fn send_json(socket: &mut WebSocket, msg: &ServerWsMessage) -> Result<(), axum::Error> {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  socket.send(Message::Text(out)).await
}
