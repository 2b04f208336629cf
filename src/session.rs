//! Per-page session logic.
//!
//! `PageState` holds everything the page needs to remember (selected task,
//! pending check, consent) and `update` turns one event into a list of
//! effects. No I/O happens here: network calls and timers are requested as
//! effects and their outcomes come back as events, so the whole page flow is
//! testable without a browser or a backend.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::consent::{
  countdown_message, ConsentGate, TickOutcome, DECLINED_ALERT, NOTICE_LINGER, TICK, UNLOCKED_NOTICE,
};
use crate::domain::{GradingResult, TaskSummary};
use crate::error::ApiError;
use crate::protocol::{Region, ServerWsMessage};
use crate::report;
use crate::views::{self, ALERT_NO_ANSWER, ALERT_NO_TASK, CHECK_LABEL_BUSY, CHECK_LABEL_IDLE};

/// Timers the session can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
  ConsentTick,
  HideNotice,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
  Opened,
  Timer(Timer),
  AcceptConsent,
  DeclineConsent,
  TasksListed(Result<Vec<TaskSummary>, ApiError>),
  TaskSelected(String),
  TaskLoaded { task_id: i64, seq: u64, result: Result<String, ApiError> },
  SubmitAnswer(String),
  AnswerChecked(Result<GradingResult, ApiError>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
  Send(ServerWsMessage),
  Schedule { after: Duration, timer: Timer },
  ListTasks,
  /// `seq` comes back on the matching `TaskLoaded`.
  LoadTask { task_id: i64, seq: u64 },
  CheckAnswer { task_id: i64, answer: String },
}

#[derive(Clone, Debug)]
pub struct PageState {
  selected_task: Option<i64>,
  /// Bumped on every selection change; only the newest load is shown.
  load_seq: u64,
  checking: bool,
  consent: ConsentGate,
  consented: bool,
  decline_redirect_url: String,
}

impl PageState {
  pub fn new(decline_redirect_url: impl Into<String>) -> Self {
    Self {
      selected_task: None,
      load_seq: 0,
      checking: false,
      consent: ConsentGate::default(),
      consented: false,
      decline_redirect_url: decline_redirect_url.into(),
    }
  }

  pub fn selected_task(&self) -> Option<i64> {
    self.selected_task
  }

  pub fn is_checking(&self) -> bool {
    self.checking
  }

  #[cfg(test)]
  pub fn consent(&self) -> ConsentGate {
    self.consent
  }

  #[instrument(level = "debug", skip(self, event), fields(selected = ?self.selected_task, checking = self.checking))]
  pub fn update(&mut self, event: PageEvent) -> Vec<Effect> {
    match event {
      PageEvent::Opened => self.on_opened(),
      PageEvent::Timer(Timer::ConsentTick) => self.on_consent_tick(),
      PageEvent::Timer(Timer::HideNotice) => vec![send(ServerWsMessage::Remove { target: Region::TimerInfo })],
      PageEvent::AcceptConsent => self.on_accept(),
      PageEvent::DeclineConsent => {
        info!(target: "session", "Consent declined");
        vec![
          send(ServerWsMessage::Alert { message: DECLINED_ALERT.into() }),
          send(ServerWsMessage::Redirect { url: self.decline_redirect_url.clone() }),
        ]
      }
      PageEvent::TasksListed(result) => {
        let html = match &result {
          Ok(tasks) => views::task_options(tasks),
          Err(e) => {
            warn!(target: "session", error = %e, "Task list unavailable");
            views::task_options_error(e)
          }
        };
        vec![send(ServerWsMessage::Html { target: Region::TaskSelect, html })]
      }
      PageEvent::TaskSelected(value) => self.on_task_selected(&value),
      PageEvent::TaskLoaded { task_id, seq, result } => self.on_task_loaded(task_id, seq, result),
      PageEvent::SubmitAnswer(answer) => self.on_submit(&answer),
      PageEvent::AnswerChecked(result) => self.on_checked(result),
    }
  }

  fn on_opened(&mut self) -> Vec<Effect> {
    let mut out = vec![
      send(ServerWsMessage::Show { target: Region::DisclaimerModal, visible: true }),
      send(ServerWsMessage::Control {
        target: Region::AcceptButton,
        disabled: true,
        label: self.consent.accept_label().into(),
      }),
    ];
    if let Some(seconds) = self.consent.start() {
      out.push(send(ServerWsMessage::Text { target: Region::TimerInfo, text: countdown_message(seconds) }));
      out.push(Effect::Schedule { after: TICK, timer: Timer::ConsentTick });
    }
    out.push(Effect::ListTasks);
    out
  }

  fn on_consent_tick(&mut self) -> Vec<Effect> {
    match self.consent.tick() {
      TickOutcome::Remaining(seconds) => vec![
        send(ServerWsMessage::Text { target: Region::TimerInfo, text: countdown_message(seconds) }),
        Effect::Schedule { after: TICK, timer: Timer::ConsentTick },
      ],
      TickOutcome::Unlocked => {
        debug!(target: "session", "Consent countdown finished");
        vec![
          send(ServerWsMessage::Text { target: Region::TimerInfo, text: UNLOCKED_NOTICE.into() }),
          send(ServerWsMessage::Control {
            target: Region::AcceptButton,
            disabled: false,
            label: self.consent.accept_label().into(),
          }),
          Effect::Schedule { after: NOTICE_LINGER, timer: Timer::HideNotice },
        ]
      }
      TickOutcome::Idle => Vec::new(),
    }
  }

  fn on_accept(&mut self) -> Vec<Effect> {
    if !self.consent.is_unlocked() {
      warn!(target: "session", state = ?self.consent, "Accept before countdown finished; ignored");
      return Vec::new();
    }
    if self.consented {
      return Vec::new();
    }
    self.consented = true;
    info!(target: "session", "Consent accepted");
    vec![send(ServerWsMessage::Show { target: Region::DisclaimerModal, visible: false })]
  }

  fn on_task_selected(&mut self, value: &str) -> Vec<Effect> {
    if !self.consented {
      warn!(target: "session", "Task selection before consent; ignored");
      return Vec::new();
    }
    self.load_seq += 1;
    match parse_task_id(value) {
      Some(task_id) => {
        self.selected_task = Some(task_id);
        vec![Effect::LoadTask { task_id, seq: self.load_seq }]
      }
      None => {
        self.selected_task = None;
        vec![send(ServerWsMessage::Html { target: Region::TaskContent, html: views::task_prompt().into() })]
      }
    }
  }

  fn on_task_loaded(&mut self, task_id: i64, seq: u64, result: Result<String, ApiError>) -> Vec<Effect> {
    if seq != self.load_seq || self.selected_task != Some(task_id) {
      debug!(target: "session", task_id, seq, current = self.load_seq, "Dropping superseded task load");
      return Vec::new();
    }
    match result {
      Ok(text) => vec![send(ServerWsMessage::Text { target: Region::TaskContent, text })],
      Err(e) => {
        warn!(target: "session", task_id, error = %e, "Task load failed");
        vec![send(ServerWsMessage::Html { target: Region::TaskContent, html: views::task_error(&e) })]
      }
    }
  }

  fn on_submit(&mut self, answer: &str) -> Vec<Effect> {
    if !self.consented {
      warn!(target: "session", "Submit before consent; ignored");
      return Vec::new();
    }
    if self.checking {
      warn!(target: "session", "Submit while a check is pending; ignored");
      return Vec::new();
    }
    let task_id = match self.selected_task {
      Some(id) => id,
      None => return vec![send(ServerWsMessage::Alert { message: ALERT_NO_TASK.into() })],
    };
    let answer = answer.trim();
    if answer.is_empty() {
      return vec![send(ServerWsMessage::Alert { message: ALERT_NO_ANSWER.into() })];
    }

    self.checking = true;
    info!(target: "session", task_id, answer_len = answer.len(), "Answer submitted");
    vec![
      send(ServerWsMessage::Control { target: Region::CheckButton, disabled: true, label: CHECK_LABEL_BUSY.into() }),
      send(ServerWsMessage::Show { target: Region::ResultsSection, visible: false }),
      Effect::CheckAnswer { task_id, answer: answer.to_string() },
    ]
  }

  fn on_checked(&mut self, result: Result<GradingResult, ApiError>) -> Vec<Effect> {
    if !self.checking {
      warn!(target: "session", "Grading result without a pending check; ignored");
      return Vec::new();
    }
    self.checking = false;

    let mut out = Vec::with_capacity(5);
    match result {
      Ok(r) => {
        info!(target: "session", overall_score = r.overall_score, band = r.band().css_class(), "Answer graded");
        out.push(send(ServerWsMessage::Html { target: Region::ResultsContent, html: report::render(&r) }));
        out.push(send(ServerWsMessage::Show { target: Region::ResultsSection, visible: true }));
        out.push(send(ServerWsMessage::Scroll { target: Region::ResultsSection }));
      }
      Err(e) => {
        warn!(target: "session", error = %e, "Answer check failed");
        out.push(send(ServerWsMessage::Html { target: Region::ResultsContent, html: views::check_error(&e) }));
        out.push(send(ServerWsMessage::Show { target: Region::ResultsSection, visible: true }));
      }
    }
    out.push(send(ServerWsMessage::Control {
      target: Region::CheckButton,
      disabled: false,
      label: CHECK_LABEL_IDLE.into(),
    }));
    out
  }
}

fn send(msg: ServerWsMessage) -> Effect {
  Effect::Send(msg)
}

/// Selector value -> task id. Blank, non-numeric and zero mean "nothing
/// selected".
pub fn parse_task_id(value: &str) -> Option<i64> {
  value.trim().parse::<i64>().ok().filter(|id| *id != 0)
}
