//! Timed consent gate shown before first use.
//!
//! The accept button stays disabled for a fixed countdown. The gate itself has
//! no clock: the session schedules one `tick` per second and the gate only
//! tracks where it is, which keeps it testable without real delays.

use std::time::Duration;

use crate::util::plural_ru;

pub const CONSENT_SECONDS: u32 = 10;
pub const TICK: Duration = Duration::from_secs(1);
/// How long the "you may accept now" notice lingers after unlocking.
pub const NOTICE_LINGER: Duration = Duration::from_secs(2);

pub const ACCEPT_LABEL_LOCKED: &str = "Я согласен и обязуюсь соблюдать условия (ожидайте 10 секунд)";
pub const ACCEPT_LABEL_READY: &str = "Я согласен и обязуюсь соблюдать условия";
pub const UNLOCKED_NOTICE: &str = "Теперь вы можете принять условия";
pub const DECLINED_ALERT: &str = "Вы не согласились с условиями использования. Доступ к сайту запрещен.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsentGate {
  #[default]
  Locked,
  Counting(u32),
  Unlocked,
}

/// What a tick changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
  /// Still counting; the payload is the number of seconds left.
  Remaining(u32),
  /// The countdown just reached zero.
  Unlocked,
  /// Not counting (never started, or already unlocked).
  Idle,
}

impl ConsentGate {
  /// Begin the countdown. Only valid from `Locked`; returns the seconds left.
  pub fn start(&mut self) -> Option<u32> {
    match self {
      ConsentGate::Locked => {
        *self = ConsentGate::Counting(CONSENT_SECONDS);
        Some(CONSENT_SECONDS)
      }
      _ => None,
    }
  }

  pub fn tick(&mut self) -> TickOutcome {
    match *self {
      ConsentGate::Counting(n) if n > 1 => {
        *self = ConsentGate::Counting(n - 1);
        TickOutcome::Remaining(n - 1)
      }
      ConsentGate::Counting(_) => {
        *self = ConsentGate::Unlocked;
        TickOutcome::Unlocked
      }
      _ => TickOutcome::Idle,
    }
  }

  pub fn is_unlocked(&self) -> bool {
    matches!(self, ConsentGate::Unlocked)
  }

  pub fn accept_label(&self) -> &'static str {
    if self.is_unlocked() { ACCEPT_LABEL_READY } else { ACCEPT_LABEL_LOCKED }
  }
}

/// Countdown notice shown above the accept button.
pub fn countdown_message(seconds: u32) -> String {
  format!(
    "Пожалуйста, прочитайте условия. Кнопка будет доступна через {} {}...",
    seconds,
    plural_ru(seconds, "секунду", "секунды", "секунд")
  )
}
