use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

pub const METER_MIN: i32 = 0;
pub const METER_MAX: i32 = 100;

/// The three gauges of a session. Every field stays within
/// [`METER_MIN`, `METER_MAX`]; the fields are private so nothing can store an
/// out-of-range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterState {
    agitation: i32,
    mental: i32,
    evidence: i32,
}

/// Signed per-turn changes. No magnitude bound: only the resulting meters are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeterDeltas {
    pub agitation: i32,
    pub mental: i32,
    pub evidence: i32,
}

impl Default for MeterState {
    fn default() -> Self {
        MeterState {
            agitation: METER_MIN,
            mental: METER_MAX,
            evidence: METER_MIN,
        }
    }
}

impl MeterState {
    pub fn new(agitation: i32, mental: i32, evidence: i32) -> Self {
        MeterState {
            agitation: clamp_meter(agitation),
            mental: clamp_meter(mental),
            evidence: clamp_meter(evidence),
        }
    }

    pub fn agitation(&self) -> i32 {
        self.agitation
    }

    pub fn mental(&self) -> i32 {
        self.mental
    }

    pub fn evidence(&self) -> i32 {
        self.evidence
    }

    pub fn apply(self, deltas: MeterDeltas) -> MeterState {
        MeterState {
            agitation: clamp_meter(self.agitation.saturating_add(deltas.agitation)),
            mental: clamp_meter(self.mental.saturating_add(deltas.mental)),
            evidence: clamp_meter(self.evidence.saturating_add(deltas.evidence)),
        }
    }

    pub fn value(&self, meter: Meter) -> i32 {
        match meter {
            Meter::Agitation => self.agitation,
            Meter::Mental => self.mental,
            Meter::Evidence => self.evidence,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.mental <= METER_MIN
    }

    pub fn is_boss_broken(&self) -> bool {
        self.agitation >= METER_MAX
    }

    pub fn can_report(&self) -> bool {
        self.evidence >= METER_MAX
    }
}

fn clamp_meter(value: i32) -> i32 {
    value.clamp(METER_MIN, METER_MAX)
}

// region:  --- Gauges

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Meter {
    Agitation,
    Mental,
    Evidence,
}

impl Meter {
    pub fn label(&self) -> &'static str {
        match self {
            Meter::Agitation => "上司の動揺",
            Meter::Mental => "メンタル",
            Meter::Evidence => "証拠蓄積",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Meter::Agitation => "😰",
            Meter::Mental => "🧠",
            Meter::Evidence => "📁",
        }
    }

    // What happens when the threshold is reached.
    pub fn caption(&self) -> &'static str {
        match self {
            Meter::Agitation => "100で自爆勝利",
            Meter::Mental => "0でストレス退職",
            Meter::Evidence => "100でコンプラ通報可能",
        }
    }
}

// endregion:  --- Gauges
