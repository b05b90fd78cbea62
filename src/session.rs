use chrono::{DateTime, Utc};
use rand::Rng;

use crate::bank::CardBank;
use crate::errors::StateError;
use crate::item::{ItemGenerator, QuizItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Result of polling the session clock. `Expired` means the caller must
/// invoke `finish`; the engine never finishes itself mid-poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Remaining(u32),
    Expired,
}

/// What happened to the answered item, reported before it was replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub was_correct: bool,
    pub correct_definition: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub set_name: String,
    pub duration_secs: u32,
    pub score: u32,
    pub attempted: u32,
    pub percent: f64,
}

impl Summary {
    /// Percent formatted the way the score store records it.
    pub fn percent_label(&self) -> String {
        format!("{:.1}", self.percent)
    }
}

/// The timed drill session: idle until started, running until the caller
/// observes expiry (or gives up) and finishes it, then frozen for summary.
///
/// Wall-clock time is always passed in, never read, so the timing logic is
/// deterministic under test. One engine holds one session at a time; `start`
/// replaces everything wholesale.
pub struct SessionEngine<R: Rng> {
    generator: ItemGenerator<R>,
    phase: Phase,
    bank: Option<CardBank>,
    started_at: Option<DateTime<Utc>>,
    duration_secs: u32,
    score: u32,
    attempted: u32,
    current_item: Option<QuizItem>,
    set_name: String,
}

impl<R: Rng> SessionEngine<R> {
    pub fn new(generator: ItemGenerator<R>) -> Self {
        Self {
            generator,
            phase: Phase::Idle,
            bank: None,
            started_at: None,
            duration_secs: 0,
            score: 0,
            attempted: 0,
            current_item: None,
            set_name: String::new(),
        }
    }

    /// Begins a fresh session, abandoning any prior one. Valid from any
    /// phase. The bank was validated at load, so the initial draw cannot
    /// fail.
    pub fn start(
        &mut self,
        bank: CardBank,
        duration_secs: u32,
        set_name: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.current_item = Some(self.generator.draw(&bank));
        self.bank = Some(bank);
        self.phase = Phase::Running;
        self.started_at = Some(now);
        self.duration_secs = duration_secs;
        self.score = 0;
        self.attempted = 0;
        self.set_name = set_name.into();
    }

    /// Pure clock poll; mutates nothing. On `Expired` the caller is expected
    /// to call `finish`.
    pub fn tick(&self, now: DateTime<Utc>) -> Result<TickStatus, StateError> {
        if self.phase != Phase::Running {
            return Err(StateError::NotRunning);
        }
        let started_at = self
            .started_at
            .expect("a running session has a start time");

        let elapsed = now.signed_duration_since(started_at).num_seconds();
        if elapsed >= i64::from(self.duration_secs) {
            return Ok(TickStatus::Expired);
        }
        let remaining = i64::from(self.duration_secs) - elapsed.max(0);
        Ok(TickStatus::Remaining(remaining as u32))
    }

    /// Judges the current item against the learner's call, then draws its
    /// replacement. Fails atomically outside `Running`.
    pub fn answer(&mut self, user_says_true: bool) -> Result<AnswerOutcome, StateError> {
        if self.phase != Phase::Running {
            return Err(StateError::NotRunning);
        }
        let bank = self.bank.as_ref().expect("a running session has a bank");
        let item = self
            .current_item
            .as_ref()
            .expect("a running session has a current item");

        let was_correct = user_says_true == item.is_true_statement;
        let correct_definition = item.correct_definition.clone();

        self.attempted += 1;
        if was_correct {
            self.score += 1;
        }
        self.current_item = Some(self.generator.draw(bank));

        Ok(AnswerOutcome {
            was_correct,
            correct_definition,
        })
    }

    /// Freezes the session. The last item is retained for inspection. A
    /// second call while already finished is a no-op.
    pub fn finish(&mut self) -> Result<(), StateError> {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Finished;
                Ok(())
            }
            Phase::Finished => Ok(()),
            Phase::Idle => Err(StateError::NotRunning),
        }
    }

    pub fn summary(&self) -> Result<Summary, StateError> {
        if self.phase != Phase::Finished {
            return Err(StateError::NotFinished);
        }
        let percent = if self.attempted > 0 {
            f64::from(self.score) * 100.0 / f64::from(self.attempted)
        } else {
            0.0
        };
        Ok(Summary {
            set_name: self.set_name.clone(),
            duration_secs: self.duration_secs,
            score: self.score,
            attempted: self.attempted,
            percent,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    pub fn current_item(&self) -> Option<&QuizItem> {
        self.current_item.as_ref()
    }
}
