//! End-to-end tests over a real websocket.

use actix_web::{web, App};
use awc::error::WsProtocolError;
use awc::ws::{Frame, Message};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::path::PathBuf;
use std::time::Duration;

use random_opponent_chess::config::AppConfig;
use random_opponent_chess::game::{Side, START_FEN};
use random_opponent_chess::models::{AppState, ServerMessage};
use random_opponent_chess::routes::configure_routes;

fn test_server(reply_delay_ms: u64) -> actix_test::TestServer {
    test_server_with_state(reply_delay_ms).0
}

fn test_server_with_state(reply_delay_ms: u64) -> (actix_test::TestServer, web::Data<AppState>) {
    let config = AppConfig {
        reply_delay: Duration::from_millis(reply_delay_ms),
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"),
        ..AppConfig::default()
    };
    let static_dir = config.static_dir.clone();
    let app_state = web::Data::new(AppState::new(config));
    let shared = app_state.clone();

    let srv = actix_test::start(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(app_state.clone())
            .configure(move |cfg| configure_routes(cfg, &static_dir))
    });
    (srv, shared)
}

async fn next_message<S>(framed: &mut S) -> ServerMessage
where
    S: Stream<Item = Result<Frame, WsProtocolError>> + Unpin,
{
    loop {
        let frame = actix_rt::time::timeout(Duration::from_secs(5), framed.next())
            .await
            .expect("timed out waiting for a server message")
            .expect("socket closed")
            .expect("protocol error");
        if let Frame::Text(bytes) = frame {
            return serde_json::from_slice(&bytes).expect("server sent invalid json");
        }
    }
}

async fn send_json<S>(framed: &mut S, json: &str)
where
    S: Sink<Message, Error = WsProtocolError> + Unpin,
{
    framed
        .send(Message::Text(json.to_string().into()))
        .await
        .expect("failed to send");
}

#[actix_rt::test]
async fn index_page_is_served() {
    let srv = test_server(20);

    let response = srv.get("/").send().await.unwrap();

    assert!(response.status().is_success());
}

#[actix_rt::test]
async fn board_script_is_served() {
    let srv = test_server(20);

    let mut response = srv.get("/static/app.js").send().await.unwrap();
    assert!(response.status().is_success());

    let body = response.body().await.unwrap();
    let script = String::from_utf8_lossy(&body);
    assert!(script.contains("get_moves"));
    assert!(script.contains("last_move"));
}

#[actix_rt::test]
async fn connect_sends_initial_state() {
    let mut srv = test_server(20);
    let mut framed = srv.ws_at("/ws").await.unwrap();

    let msg = next_message(&mut framed).await;

    assert_eq!(msg.message_type, "state");
    assert_eq!(msg.fen.as_deref(), Some(START_FEN));
    assert_eq!(msg.turn, Some(Side::White));
    assert_eq!(msg.turn_indicator.as_deref(), Some("Your Turn"));
    assert_eq!(msg.game_status.as_deref(), Some("in_progress"));
}

#[actix_rt::test]
async fn human_move_is_followed_by_opponent_reply() {
    let mut srv = test_server(20);
    let mut framed = srv.ws_at("/ws").await.unwrap();
    next_message(&mut framed).await;

    send_json(&mut framed, r#"{"message_type":"move","move_from":"e2","move_to":"e4"}"#).await;

    let after_human = next_message(&mut framed).await;
    assert_eq!(after_human.message_type, "state");
    assert_eq!(after_human.turn, Some(Side::Black));
    assert_eq!(after_human.turn_indicator.as_deref(), Some("Opponent's Turn"));
    let last = after_human.last_move.unwrap();
    assert_eq!((last.from.as_str(), last.to.as_str()), ("e2", "e4"));

    let after_reply = next_message(&mut framed).await;
    assert_eq!(after_reply.message_type, "state");
    assert_eq!(after_reply.turn, Some(Side::White));
    assert!(after_reply.last_move.is_some());
}

#[actix_rt::test]
async fn illegal_move_is_rejected_with_current_position() {
    let mut srv = test_server(20);
    let mut framed = srv.ws_at("/ws").await.unwrap();
    next_message(&mut framed).await;

    send_json(&mut framed, r#"{"message_type":"move","move_from":"e2","move_to":"e5"}"#).await;

    let msg = next_message(&mut framed).await;
    assert_eq!(msg.message_type, "move_rejected");
    assert_eq!(msg.fen.as_deref(), Some(START_FEN));
    assert!(msg.error.is_some());
}

#[actix_rt::test]
async fn restart_cancels_pending_reply() {
    let mut srv = test_server(300);
    let mut framed = srv.ws_at("/ws").await.unwrap();
    next_message(&mut framed).await;

    send_json(&mut framed, r#"{"message_type":"move","move_from":"d2","move_to":"d4"}"#).await;
    send_json(&mut framed, r#"{"message_type":"restart"}"#).await;

    let after_human = next_message(&mut framed).await;
    assert_eq!(after_human.turn, Some(Side::Black));

    let after_restart = next_message(&mut framed).await;
    assert_eq!(after_restart.fen.as_deref(), Some(START_FEN));
    assert_eq!(after_restart.turn_indicator.as_deref(), Some("Your Turn"));

    let late = actix_rt::time::timeout(Duration::from_millis(600), framed.next()).await;
    assert!(late.is_err(), "a cancelled reply still reached the client");
}

#[actix_rt::test]
async fn get_moves_lists_destinations() {
    let mut srv = test_server(20);
    let mut framed = srv.ws_at("/ws").await.unwrap();
    next_message(&mut framed).await;

    send_json(&mut framed, r#"{"message_type":"get_moves","move_from":"g1"}"#).await;

    let msg = next_message(&mut framed).await;
    assert_eq!(msg.message_type, "available_moves");
    let mut moves = msg.available_moves.unwrap();
    moves.sort();
    assert_eq!(moves, vec!["f3".to_string(), "h3".to_string()]);
}

#[actix_rt::test]
async fn malformed_and_unknown_messages_get_errors() {
    let mut srv = test_server(20);
    let mut framed = srv.ws_at("/ws").await.unwrap();
    next_message(&mut framed).await;

    send_json(&mut framed, "not json").await;
    let msg = next_message(&mut framed).await;
    assert_eq!(msg.message_type, "error");

    send_json(&mut framed, r#"{"message_type":"resign"}"#).await;
    let msg = next_message(&mut framed).await;
    assert_eq!(msg.message_type, "error");
    assert!(msg.error.unwrap().contains("resign"));

    send_json(&mut framed, r#"{"message_type":"move","move_from":"e2"}"#).await;
    let msg = next_message(&mut framed).await;
    assert_eq!(msg.message_type, "error");
}

#[actix_rt::test]
async fn closed_sessions_leave_the_registry() {
    let (mut srv, app_state) = test_server_with_state(20);
    let mut framed = srv.ws_at("/ws").await.unwrap();
    next_message(&mut framed).await;

    assert_eq!(app_state.active_sessions(), 1);

    framed.send(Message::Close(None)).await.expect("failed to close");
    drop(framed);

    let mut remaining = app_state.active_sessions();
    for _ in 0..50 {
        if remaining == 0 {
            break;
        }
        actix_rt::time::sleep(Duration::from_millis(20)).await;
        remaining = app_state.active_sessions();
    }
    assert_eq!(remaining, 0);
}
