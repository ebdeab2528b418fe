// ui/constants.rs

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 24;

pub const BOSS_NAME: &str = "👔 責任 逃男 (45)";
pub const BOSS_TITLE: &str = "営業二課 係長";
pub const BOSS_STATUS: &str = "Active Blaming...";

pub const INPUT_PLACEHOLDER: &str = "証拠を突きつけるか、反論してください...";
pub const REPORT_BUTTON: &str = "📢 コンプラ委員会に通報する (決定打)  [Ctrl+R]";

pub const HINT: &str = "💡 ヒント: 「◯日のメール」「チャット履歴」などは有効です";
pub const WARNING: &str = "⚠️ 注意: 感情的になるとメンタルが削られます";
pub const KEY_HINTS: &str = "Enter: 送信  ↑↓/PgUp/PgDn: スクロール  Ctrl+N: やり直す  Esc: 終了";

pub const RESET_ACTION: &str = "もう一度やり直す [Enter]   終了 [q]";
