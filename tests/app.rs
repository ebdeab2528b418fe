mod common;

use common::{reply, resolver_with};
use nogashio::app::{Action, App};
use nogashio::message::Message;
use nogashio::ui::{self, game::transcript_lines, overlay::Ending};
use nogashio::{SessionStatus, Settings, TurnResolver};
use ratatui::{
    Terminal,
    backend::TestBackend,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::Alignment,
    style::Color,
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert!(app.on_key(key(KeyCode::Char(c))).is_none());
    }
}

fn app_with(resolver: TurnResolver) -> App {
    App::with_resolver(Settings::default(), resolver)
}

// Joins each buffer row into a string.
fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| ui::draw(frame, app)).unwrap();
    screen(&terminal)
}

async fn play_turn(app: &mut App, text: &str) {
    type_text(app, text);
    let action = app.on_key(key(KeyCode::Enter)).unwrap();
    assert!(matches!(action, Action::Submit));
    app.handle_action(action);

    let resolved = app.recv_action().await.unwrap();
    assert!(matches!(resolved, Action::TurnResolved(_)));
    app.handle_action(resolved);
}

#[tokio::test]
async fn test_submitting_a_turn_through_the_app() {
    let (resolver, generator) = resolver_with(vec![reply("えっ、そうだっけ？", 30, -10, 20)]);
    let mut app = app_with(resolver);

    type_text(&mut app, "メールがあります");
    assert_eq!(app.input_text(), "メールがあります");

    let action = app.on_key(key(KeyCode::Enter)).unwrap();
    app.handle_action(action);
    assert!(app.session().is_in_flight());
    assert!(app.input_text().is_empty());

    // Typing is ignored until the boss answers.
    type_text(&mut app, "x");
    assert!(app.input_text().is_empty());

    let resolved = app.recv_action().await.unwrap();
    app.handle_action(resolved);

    assert!(!app.session().is_in_flight());
    assert_eq!(app.session().meters().agitation(), 30);
    assert_eq!(app.session().meters().mental(), 90);
    assert_eq!(app.session().meters().evidence(), 20);
    assert_eq!(app.session().messages().len(), 3);
    assert_eq!(generator.requests().len(), 1);
}

#[tokio::test]
async fn test_empty_submit_does_nothing() {
    let (resolver, generator) = resolver_with(vec![]);
    let mut app = app_with(resolver);

    let action = app.on_key(key(KeyCode::Enter)).unwrap();
    app.handle_action(action);

    assert!(!app.session().is_in_flight());
    assert_eq!(app.session().messages().len(), 1);
    assert!(generator.requests().is_empty());
}

#[tokio::test]
async fn test_report_and_reset_keys() {
    let (resolver, _) = resolver_with(vec![reply("そ、それは……", 0, 0, 100)]);
    let mut app = app_with(resolver);

    let action = app.on_key(ctrl('r')).unwrap();
    app.handle_action(action);
    assert_eq!(app.session().status(), SessionStatus::Playing);

    play_turn(&mut app, "全部記録してあります").await;
    assert!(app.session().can_report());

    let action = app.on_key(ctrl('r')).unwrap();
    app.handle_action(action);
    assert_eq!(app.session().status(), SessionStatus::ComplianceReported);

    // The ending only knows reset and quit.
    assert!(app.on_key(key(KeyCode::Char('x'))).is_none());
    let action = app.on_key(key(KeyCode::Enter)).unwrap();
    assert!(matches!(action, Action::Reset));
    app.handle_action(action);
    assert_eq!(app.session().status(), SessionStatus::Playing);
    assert_eq!(app.session().messages().len(), 1);
}

#[tokio::test]
async fn test_quit_keys() {
    let (resolver, _) = resolver_with(vec![]);
    let mut app = app_with(resolver);
    assert!(app.is_running());

    let action = app.on_key(ctrl('c')).unwrap();
    assert!(matches!(action, Action::Quit));
    app.handle_action(action);
    assert!(!app.is_running());

    let (resolver, _) = resolver_with(vec![]);
    let mut app = app_with(resolver);
    let action = app.on_key(key(KeyCode::Esc)).unwrap();
    app.handle_action(action);
    assert!(!app.is_running());
}

#[tokio::test]
async fn test_report_button_only_with_full_evidence() {
    let (resolver, _) = resolver_with(vec![reply("ま、待ってよ", 0, 0, 100)]);
    let mut app = app_with(resolver);

    let before = render(&mut app, 80, 30);
    assert!(!before.iter().any(|row| row.contains("[Ctrl+R]")));

    play_turn(&mut app, "証拠です").await;

    let after = render(&mut app, 80, 30);
    assert!(after.iter().any(|row| row.contains("[Ctrl+R]")));
}

#[tokio::test]
async fn test_ending_overlay_is_drawn() {
    let (resolver, _) = resolver_with(vec![reply("もう無理だ……", 100, 0, 0)]);
    let mut app = app_with(resolver);

    play_turn(&mut app, "録音です").await;
    assert_eq!(app.session().status(), SessionStatus::Won);

    let rows = render(&mut app, 80, 30);
    assert!(rows.iter().any(|row| row.contains("[Enter]")));
}

#[tokio::test]
async fn test_small_terminal_warning() {
    let (resolver, _) = resolver_with(vec![]);
    let mut app = app_with(resolver);

    let rows = render(&mut app, 40, 10);
    assert!(rows.iter().any(|row| row.contains("Terminal too small")));
}

#[test]
fn test_transcript_alignment() {
    let messages = vec![
        Message::boss("君の判断だよね？"),
        Message::player("違います"),
        Message::system("エラー"),
    ];
    let lines = transcript_lines(&messages, 40);

    // heading, body, spacer per message
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[1].alignment, Some(Alignment::Left));
    assert_eq!(lines[4].alignment, Some(Alignment::Right));
    assert_eq!(lines[7].alignment, Some(Alignment::Center));
}

#[test]
fn test_long_lines_are_wrapped() {
    let messages = vec![Message::boss("a ".repeat(60))];
    let lines = transcript_lines(&messages, 40);
    assert!(lines.len() > 3);
    assert!(lines.iter().all(|line| line.width() <= 40));
}

#[test]
fn test_endings() {
    assert_eq!(Ending::for_status(SessionStatus::Playing), None);
    assert_eq!(Ending::for_status(SessionStatus::Won).unwrap().color, Color::Green);
    assert_eq!(Ending::for_status(SessionStatus::Lost).unwrap().color, Color::Red);
    let reported = Ending::for_status(SessionStatus::ComplianceReported).unwrap();
    assert_eq!(reported.color, Color::Blue);
    assert_eq!(reported.title, "完全勝利：コンプラ通報");
}
