use crate::ai::TurnResolver;
use crate::ai_response::TurnOutcome;
use crate::error::AIError;
use crate::message::Message;
use crate::meter::MeterState;
use uuid::Uuid;

pub const OPENING_LINE: &str = "ああ、君。ちょうどいいところに。例の「Aプロジェクト」の件なんだけど、クライアントから大クレームが入っていてねぇ。……これ、君が独断で進めた結果だよね？ 僕はそんな指示、出した覚えがないんだけどなぁ……。";
pub const CONNECTION_ERROR_NOTICE: &str = "エラーが発生しました。接続を確認してください。";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Playing,
    Won,
    Lost,
    ComplianceReported,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Playing)
    }
}

/// Everything the resolver needs for one turn, captured when the turn starts.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    session_id: Uuid,
    turn: u32,
    pub input: String,
    // Transcript before the new player line.
    pub history: Vec<Message>,
    pub meters: MeterState,
}

impl PendingTurn {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }
}

/// One play-through: meters, transcript and status, plus the in-flight flag
/// that keeps turns strictly one at a time.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    meters: MeterState,
    messages: Vec<Message>,
    status: SessionStatus,
    in_flight: bool,
    turns: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        let id = Uuid::new_v4();
        log::info!("New session {id}");
        GameSession {
            id,
            meters: MeterState::default(),
            messages: vec![Message::boss(OPENING_LINE)],
            status: SessionStatus::Playing,
            in_flight: false,
            turns: 0,
        }
    }

    /// Starts from an arbitrary meter state, with the usual opening line.
    pub fn with_meters(meters: MeterState) -> Self {
        GameSession {
            meters,
            ..Self::new()
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn meters(&self) -> MeterState {
        self.meters
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn turn_count(&self) -> u32 {
        self.turns
    }

    pub fn accepts_input(&self) -> bool {
        self.status == SessionStatus::Playing && !self.in_flight
    }

    pub fn can_report(&self) -> bool {
        self.status == SessionStatus::Playing && self.meters.can_report()
    }

    /// Appends the player line and marks the session in flight.
    ///
    /// Returns `None` without touching anything when the input is blank, a
    /// turn is already pending, or the game is over.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        let input = input.trim();
        if input.is_empty() || !self.accepts_input() {
            log::debug!(
                "Submission rejected (blank: {}, in flight: {}, status: {:?})",
                input.is_empty(),
                self.in_flight,
                self.status
            );
            return None;
        }

        let history = self.messages.clone();
        self.messages.push(Message::player(input));
        self.in_flight = true;
        self.turns += 1;

        Some(PendingTurn {
            session_id: self.id,
            turn: self.turns,
            input: input.to_string(),
            history,
            meters: self.meters,
        })
    }

    /// Merges a resolved turn. Returns whether the result was applied.
    pub fn complete_turn(
        &mut self,
        pending: PendingTurn,
        result: Result<TurnOutcome, AIError>,
    ) -> bool {
        if pending.session_id != self.id || pending.turn != self.turns || !self.in_flight {
            log::debug!(
                "Dropping stale turn {} of session {}",
                pending.turn,
                pending.session_id
            );
            return false;
        }
        self.in_flight = false;

        if self.status.is_terminal() {
            log::info!(
                "Session {} ended with {:?} while turn {} was pending, result dropped",
                self.id,
                self.status,
                pending.turn
            );
            return false;
        }

        match result {
            Ok(outcome) => {
                self.meters = self.meters.apply(outcome.deltas());
                self.messages.push(Message::boss(outcome.dialogue));
                self.evaluate_status();
                log::info!(
                    "Session {} turn {}: {:?}, {:?}",
                    self.id,
                    pending.turn,
                    self.meters,
                    self.status
                );
            }
            Err(e) => {
                log::error!("Session {} turn {} failed: {e}", self.id, pending.turn);
                self.messages.push(Message::system(CONNECTION_ERROR_NOTICE));
            }
        }
        true
    }

    /// Runs a whole turn against the resolver. Returns whether a turn happened.
    pub async fn submit(&mut self, resolver: &TurnResolver, input: &str) -> bool {
        let Some(pending) = self.begin_turn(input) else {
            return false;
        };
        let result = resolver
            .resolve(&pending.input, &pending.history, &pending.meters)
            .await;
        self.complete_turn(pending, result)
    }

    pub fn report_compliance(&mut self) -> bool {
        if !self.can_report() {
            log::debug!(
                "Compliance report refused (evidence {}, status {:?})",
                self.meters.evidence(),
                self.status
            );
            return false;
        }
        self.status = SessionStatus::ComplianceReported;
        log::info!("Session {} reported to compliance", self.id);
        true
    }

    pub fn reset(&mut self) {
        log::info!("Session {} reset", self.id);
        *self = Self::new();
    }

    // Mental exhaustion is checked first, so it wins a tie.
    fn evaluate_status(&mut self) {
        if self.meters.is_exhausted() {
            self.status = SessionStatus::Lost;
        } else if self.meters.is_boss_broken() {
            self.status = SessionStatus::Won;
        }
    }
}
