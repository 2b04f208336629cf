//! Public protocol structs for the page WebSocket and the HTTP fragment
//! endpoints (serde ready). The browser script only understands these.

use serde::{Deserialize, Serialize};

/// Page elements the session may touch. Serialized as the element id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
  DisclaimerModal,
  TimerInfo,
  AcceptButton,
  TaskSelect,
  TaskContent,
  CheckButton,
  ResultsSection,
  ResultsContent,
}

/// Messages the browser sends over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
  Ping,
  AcceptConsent,
  DeclineConsent,
  /// Raw `value` of the task selector.
  SelectTask { value: String },
  SubmitAnswer { answer: String },
}

/// Messages the server sends back over WebSocket.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
  Pong,
  /// Replace the element's content with markup.
  Html { target: Region, html: String },
  /// Replace the element's content with plain text.
  Text { target: Region, text: String },
  /// Enable/disable a button and set its label.
  Control { target: Region, disabled: bool, label: String },
  Show { target: Region, visible: bool },
  Remove { target: Region },
  Scroll { target: Region },
  Alert { message: String },
  Redirect { url: String },
  Error { message: String },
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct CheckAnswerForm {
  pub answer: String,
  pub task_id: i64,
}

#[derive(Serialize)]
pub struct HealthOut {
  pub ok: bool,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn client_messages_parse() {
    let m: ClientWsMessage = serde_json::from_value(json!({ "type": "select_task", "value": "3" })).unwrap();
    assert!(matches!(m, ClientWsMessage::SelectTask { value } if value == "3"));
    let m: ClientWsMessage = serde_json::from_value(json!({ "type": "accept_consent" })).unwrap();
    assert!(matches!(m, ClientWsMessage::AcceptConsent));
  }

  #[test]
  fn server_messages_use_element_ids() {
    let v = serde_json::to_value(ServerWsMessage::Control {
      target: Region::CheckButton,
      disabled: true,
      label: "x".into(),
    })
    .unwrap();
    assert_eq!(v, json!({ "type": "control", "target": "check-button", "disabled": true, "label": "x" }));
  }
}
