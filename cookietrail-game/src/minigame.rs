//! Timed arithmetic minigames (baking = division, cleaning = multiplication).
//!
//! The session is timer-free: the frontend owns the 1 Hz countdown timer and
//! the short answer-feedback delay, and drives the session through
//! [`MinigameSession::tick_second`] and [`MinigameSession::next_problem`].
//! The completion outcome is produced exactly once by consuming the session,
//! so a finished game can never report twice.
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GameConfig;
use crate::constants::{
    ANSWER_BUFFER_MAX_LEN, COUNTDOWN_CRITICAL_SECS, COUNTDOWN_WARNING_SECS, PROBLEM_DIVISOR_MIN,
    PROBLEM_FACTOR_MAX, PROBLEM_FACTOR_MIN,
};

/// Which drill a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinigameKind {
    /// Division drill, used while baking.
    Division,
    /// Multiplication drill, used while cleaning dishes.
    Multiplication,
}

/// One arithmetic problem with an exact integer answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub lhs: u32,
    pub rhs: u32,
    pub kind: MinigameKind,
    answer: u32,
}

impl Problem {
    /// Roll a new problem. Division problems are composed from a
    /// divisor/quotient pair so the answer is always an exact integer.
    pub fn generate(kind: MinigameKind, rng: &mut impl Rng) -> Self {
        match kind {
            MinigameKind::Multiplication => {
                let a = rng.gen_range(PROBLEM_FACTOR_MIN..=PROBLEM_FACTOR_MAX);
                let b = rng.gen_range(PROBLEM_FACTOR_MIN..=PROBLEM_FACTOR_MAX);
                Self {
                    lhs: a,
                    rhs: b,
                    kind,
                    answer: a * b,
                }
            }
            MinigameKind::Division => {
                let divisor = rng.gen_range(PROBLEM_DIVISOR_MIN..=PROBLEM_FACTOR_MAX);
                let quotient = rng.gen_range(PROBLEM_FACTOR_MIN..=PROBLEM_FACTOR_MAX);
                Self {
                    lhs: divisor * quotient,
                    rhs: divisor,
                    kind,
                    answer: quotient,
                }
            }
        }
    }

    /// The expected integer answer.
    #[must_use]
    pub const fn answer(&self) -> u32 {
        self.answer
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            MinigameKind::Multiplication => '\u{d7}',
            MinigameKind::Division => '\u{f7}',
        };
        write!(f, "{} {op} {}", self.lhs, self.rhs)
    }
}

/// Keyboard input a session understands; everything else is dropped by the
/// frontend before it reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Digit(u8),
    Backspace,
    Enter,
}

/// Result of evaluating a submitted answer, displayed by the frontend during
/// the feedback delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub expected: u32,
}

/// Countdown display urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownUrgency {
    Calm,
    Warning,
    Critical,
}

/// Score record handed back to the controller when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameResult {
    /// Problems answered correctly.
    pub correct_answers: u32,
    /// Attempts actually made, not the theoretical maximum.
    pub total_problems: u32,
    /// Seconds left when the session ended; 0 when time ran out.
    pub time_remaining: u32,
}

/// Completion record: the score plus whether the player skipped instead of
/// playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameOutcome {
    pub result: MinigameResult,
    pub skipped: bool,
}

/// Static parameters for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinigameSpec {
    pub kind: MinigameKind,
    pub duration_secs: u32,
    /// Correct answers that end the session early.
    pub quota: u32,
}

impl MinigameSpec {
    /// Baking drill: division, sized to the day's cookie demand.
    #[must_use]
    pub fn baking(cfg: &GameConfig, demand: u32) -> Self {
        Self {
            kind: MinigameKind::Division,
            duration_secs: cfg.baking_time_secs.max(1),
            quota: fallback_quota(demand, cfg.division_problems),
        }
    }

    /// Cleaning drill: multiplication, sized to the dishes left to clean.
    #[must_use]
    pub fn cleaning(cfg: &GameConfig, dishes: u32) -> Self {
        Self {
            kind: MinigameKind::Multiplication,
            duration_secs: cfg.cleaning_time_secs.max(1),
            quota: fallback_quota(dishes, cfg.multiplication_problems),
        }
    }
}

/// The day target when there is one, otherwise the configured problem count.
const fn fallback_quota(target: u32, configured: u32) -> u32 {
    if target > 0 {
        target
    } else if configured > 0 {
        configured
    } else {
        1 // quota 0 would end instantly
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SessionState {
    Idle,
    Running,
    Finished,
}

/// A single minigame run: `idle -> running -> {completed | skipped}`.
#[derive(Debug, Clone)]
pub struct MinigameSession {
    spec: MinigameSpec,
    state: SessionState,
    time_remaining: u32,
    problem: Problem,
    buffer: String,
    feedback: Option<AnswerFeedback>,
    correct_answers: u32,
    total_problems: u32,
    outcome: Option<MinigameOutcome>,
    rng: ChaCha20Rng,
}

impl MinigameSession {
    /// Construct an idle session; the countdown starts on [`Self::start`].
    #[must_use]
    pub fn new(spec: MinigameSpec, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let problem = Problem::generate(spec.kind, &mut rng);
        Self {
            spec,
            state: SessionState::Idle,
            time_remaining: spec.duration_secs,
            problem,
            buffer: String::new(),
            feedback: None,
            correct_answers: 0,
            total_problems: 0,
            outcome: None,
            rng,
        }
    }

    /// Begin playing. No-op unless the session is idle.
    pub fn start(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::Running;
        }
    }

    /// Decline to play. Only available before the countdown starts; yields a
    /// zero-score outcome with the full time budget intact.
    pub fn skip(&mut self) {
        if self.state != SessionState::Idle {
            return;
        }
        self.state = SessionState::Finished;
        self.outcome = Some(MinigameOutcome {
            result: MinigameResult {
                correct_answers: 0,
                total_problems: 0,
                time_remaining: self.time_remaining,
            },
            skipped: true,
        });
    }

    /// Advance the countdown by one second. A session that starts with `N`
    /// seconds finishes on exactly the `N`th tick.
    pub fn tick_second(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.finish();
        }
    }

    /// Feed one key into the answer buffer.
    ///
    /// Ignored while idle, finished, or during the answer-feedback window.
    /// Submitting an empty buffer is a no-op and does not count as an attempt.
    pub fn handle_key(&mut self, key: InputKey) {
        if self.state != SessionState::Running || self.feedback.is_some() {
            return;
        }
        match key {
            InputKey::Digit(d) if d <= 9 => {
                if self.buffer.len() < ANSWER_BUFFER_MAX_LEN {
                    self.buffer.push(char::from(b'0' + d));
                }
            }
            InputKey::Digit(_) => {}
            InputKey::Backspace => {
                self.buffer.pop();
            }
            InputKey::Enter => self.submit_answer(),
        }
    }

    /// Clear the feedback window and roll the next problem. Called by the
    /// frontend once its feedback delay elapses.
    pub fn next_problem(&mut self) {
        if self.state != SessionState::Running || self.feedback.is_none() {
            return;
        }
        self.feedback = None;
        self.buffer.clear();
        self.problem = Problem::generate(self.spec.kind, &mut self.rng);
    }

    fn submit_answer(&mut self) {
        let Ok(entered) = self.buffer.parse::<u32>() else {
            // Empty (or overflowed) buffer: not an attempt.
            return;
        };
        let correct = entered == self.problem.answer();
        self.total_problems += 1;
        if correct {
            self.correct_answers += 1;
        }
        self.feedback = Some(AnswerFeedback {
            correct,
            expected: self.problem.answer(),
        });
        if self.correct_answers >= self.spec.quota {
            // Quota met early: keep the seconds still on the clock.
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.state = SessionState::Finished;
        self.outcome = Some(MinigameOutcome {
            result: MinigameResult {
                correct_answers: self.correct_answers,
                total_problems: self.total_problems,
                time_remaining: self.time_remaining,
            },
            skipped: false,
        });
    }

    /// Whether the session has produced its outcome.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Consume the session, yielding the outcome if the run ended.
    #[must_use]
    pub fn into_outcome(self) -> Option<MinigameOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn kind(&self) -> MinigameKind {
        self.spec.kind
    }

    #[must_use]
    pub const fn quota(&self) -> u32 {
        self.spec.quota
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Current problem on display.
    #[must_use]
    pub const fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Digits typed so far.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Pending answer feedback, if the frontend is inside the feedback delay.
    #[must_use]
    pub const fn feedback(&self) -> Option<AnswerFeedback> {
        self.feedback
    }

    #[must_use]
    pub const fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub const fn total_problems(&self) -> u32 {
        self.total_problems
    }

    /// Display urgency for the countdown label.
    #[must_use]
    pub const fn urgency(&self) -> CountdownUrgency {
        if self.time_remaining <= COUNTDOWN_CRITICAL_SECS {
            CountdownUrgency::Critical
        } else if self.time_remaining <= COUNTDOWN_WARNING_SECS {
            CountdownUrgency::Warning
        } else {
            CountdownUrgency::Calm
        }
    }
}

/// Type the digits of `answer` into the session, then submit. Test/bot helper.
pub fn type_answer(session: &mut MinigameSession, answer: u32) {
    for ch in answer.to_string().bytes() {
        session.handle_key(InputKey::Digit(ch - b'0'));
    }
    session.handle_key(InputKey::Enter);
}
