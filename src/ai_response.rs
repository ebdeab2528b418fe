// src/ai_response.rs
use crate::error::AIError;
use crate::message::{Message, format_transcript};
use crate::meter::{MeterDeltas, MeterState};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value, json};

pub const FALLBACK_DIALOGUE: &str = "えっ、何かな？ ちょっとよく聞こえなかったんだけど……君の伝え方の問題じゃないかなぁ？";
pub const FALLBACK_MENTAL_DELTA: i32 = -5;

pub const SCHEMA_NAME: &str = "boss_response";

pub const BOSS_INSTRUCTION: &str = r#"
あなたは、部下のミスは自分の手柄、自分のミスは部下の責任にする「責任 逃男（せきにん のがしお）」という係長です。

# 特徴・口癖
- 「それ、君の判断でやったんだよね？」が最大の攻撃。
- 「僕は聞いてないよ」「適宜進めておいてって言ったよね？」と、常に逃げ道を用意する。
- 自分が指示したことでも、問題が起きると「解釈を間違えた君の責任」にする。
- 語尾に「〜だよね？」「〜じゃないかなぁ」と、断定を避ける卑怯な言い回しを多用する。
- どんなに追い詰められても、セリフは必ず責任転嫁の言い回しにすること。

# ゲームルール
1. 各ターンのやり取りから、以下の数値を算出し、JSON形式で返してください。
   - agitationUpdate: 上司の動揺への変化量（加算・減算）。プレイヤーが「過去のメール」「具体的な指示日」「チャットのスクリーンショット」「録音」などを引き合いに出すと、30〜50の大幅アップ。
   - mentalUpdate: プレイヤーのメンタルへの変化量（通常は負の数）。上司が責任を押し付けたり、人格を否定したり、はぐらかすと-5〜-20。
   - evidenceUpdate: 証拠蓄積への変化量。具体的な矛盾や過去の事実を指摘すると10〜30アップ。
2. ロジック
   - プレイヤーが単に怒ったり感情的になると、上司は「怖いなぁ、落ち着いてよ」とかわし、プレイヤーのメンタルを削り、動揺はしません。
   - プレイヤーが冷静に証拠を突きつけると、上司はしどろもどろになり、動揺が上がります。

# 返却フォーマット
JSON形式で、以下のプロパティを含めてください。
- dialogue: 上司のセリフ（日本語）
- agitationUpdate: 数値
- mentalUpdate: 数値
- evidenceUpdate: 数値
"#;

/// One resolved turn as returned by the generator, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    pub dialogue: String,
    #[serde(rename = "agitationUpdate")]
    pub agitation_delta: i32,
    #[serde(rename = "mentalUpdate")]
    pub mental_delta: i32,
    #[serde(rename = "evidenceUpdate")]
    pub evidence_delta: i32,
    // Declared in the schema, never consulted by the controller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_compliance_triggered: Option<bool>,
}

// Wire shape. `Number` rejects strings, booleans and nulls.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTurnOutcome {
    dialogue: String,
    agitation_update: Number,
    mental_update: Number,
    evidence_update: Number,
    // Reserved, so a malformed value is ignored rather than failing the turn.
    #[serde(default)]
    is_compliance_triggered: Option<Value>,
}

impl TurnOutcome {
    pub fn new(dialogue: impl Into<String>, agitation: i32, mental: i32, evidence: i32) -> Self {
        TurnOutcome {
            dialogue: dialogue.into(),
            agitation_delta: agitation,
            mental_delta: mental,
            evidence_delta: evidence,
            is_compliance_triggered: None,
        }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_DIALOGUE, 0, FALLBACK_MENTAL_DELTA, 0)
    }

    pub fn from_json(json: &str) -> Result<Self, AIError> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(AIError::ReplyParse("reply is not a JSON object".to_string()));
        }
        let raw: RawTurnOutcome = serde_json::from_value(value)?;

        let dialogue = raw.dialogue.trim();
        if dialogue.is_empty() {
            return Err(AIError::ReplyParse("dialogue is empty".to_string()));
        }

        Ok(TurnOutcome {
            dialogue: dialogue.to_string(),
            agitation_delta: number_to_delta(&raw.agitation_update),
            mental_delta: number_to_delta(&raw.mental_update),
            evidence_delta: number_to_delta(&raw.evidence_update),
            is_compliance_triggered: raw
                .is_compliance_triggered
                .as_ref()
                .and_then(Value::as_bool),
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn deltas(&self) -> MeterDeltas {
        MeterDeltas {
            agitation: self.agitation_delta,
            mental: self.mental_delta,
            evidence: self.evidence_delta,
        }
    }
}

// Fractions round half away from zero, anything beyond i32 saturates.
fn number_to_delta(number: &Number) -> i32 {
    if let Some(value) = number.as_i64() {
        return value.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    }
    number.as_f64().map(|value| value.round() as i32).unwrap_or(0)
}

/// The user part of a generation request: meter snapshot, transcript so far,
/// and the new player line last.
pub fn create_turn_prompt(player_input: &str, history: &[Message], meters: &MeterState) -> String {
    let state = serde_json::to_string(meters).unwrap_or_else(|_| {
        format!(
            r#"{{"agitation":{},"mental":{},"evidence":{}}}"#,
            meters.agitation(),
            meters.mental(),
            meters.evidence()
        )
    });

    format!(
        "現在のゲーム状態: {state}\nこれまでの会話:\n{}\n\n以下のユーザーの新しいメッセージに対する「責任 逃男」としての反応を生成してください。\nユーザーの新しいメッセージ: {player_input}",
        format_transcript(history)
    )
}

pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "dialogue": { "type": "string" },
            "agitationUpdate": { "type": "number" },
            "mentalUpdate": { "type": "number" },
            "evidenceUpdate": { "type": "number" },
            "isComplianceTriggered": { "type": "boolean" }
        },
        "required": ["dialogue", "agitationUpdate", "mentalUpdate", "evidenceUpdate"],
        "additionalProperties": false
    })
}
