use actix::*;
use actix_web::web;
use actix_web_actors::ws;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::time::Duration;

use crate::game::{ChessRules, GameOrchestrator, ReplyOutcome};
use crate::models::{AppState, ClientMessage, ServerMessage};

pub type Game = GameOrchestrator<ChessRules, StdRng>;

/// WebSocket session: one browser tab playing one game
pub struct ChessWebSocket {
    pub id: String,
    pub app_state: web::Data<AppState>,
    pub game: Game,
    pub reply_delay: Duration,
    /// Timer for the opponent's delayed reply, if one is pending
    pub pending_reply: Option<SpawnHandle>,
}

impl Actor for ChessWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let total_sessions = self.app_state.register_session(&self.id);
        info!("WebSocket connection started: {}", self.id);
        info!("Total active sessions: {}", total_sessions);

        self.send_state(ctx);
    }

    fn stopping(&mut self, ctx: &mut Self::Context) -> Running {
        self.cancel_pending_reply(ctx);

        let total_sessions = self.app_state.unregister_session(&self.id);
        info!("WebSocket connection closed: {}", self.id);
        info!("Total active sessions: {}", total_sessions);

        Running::Stop
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ChessWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                debug!("Received text message from {}: {}", self.id, text);
                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => self.handle_message(client_msg, ctx),
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        self.send(ctx, &ServerMessage::error(format!("Invalid message format: {e}")));
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                self.send(ctx, &ServerMessage::error("Binary messages are not supported"));
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                warn!("WebSocket protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }
}

impl ChessWebSocket {
    pub fn new(id: String, app_state: web::Data<AppState>, game: Game) -> Self {
        let reply_delay = app_state.config.reply_delay;
        Self {
            id,
            app_state,
            game,
            reply_delay,
            pending_reply: None,
        }
    }

    pub fn send(&self, ctx: &mut ws::WebsocketContext<Self>, message: &ServerMessage) {
        match serde_json::to_string(message) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("Failed to serialize response: {}", e);
                ctx.text("{\"message_type\": \"error\", \"error\": \"Internal server error\"}");
            }
        }
    }

    pub fn send_state(&self, ctx: &mut ws::WebsocketContext<Self>) {
        self.send(ctx, &ServerMessage::state(&self.game.view()));
    }

    /// Arm the opponent's reply timer if it is the opponent's turn.
    ///
    /// Any previously armed timer is dropped first, so at most one reply is
    /// ever pending.
    pub fn schedule_reply(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        self.cancel_pending_reply(ctx);

        let Some(ticket) = self.game.schedule_reply() else {
            return;
        };
        debug!("Scheduling opponent reply in {:?}", self.reply_delay);
        let handle = ctx.run_later(self.reply_delay, move |act, ctx| {
            act.pending_reply = None;
            match act.game.play_reply(ticket) {
                Ok(ReplyOutcome::Played(_)) | Ok(ReplyOutcome::GameOver(_)) => act.send_state(ctx),
                Ok(ReplyOutcome::Skipped) | Ok(ReplyOutcome::Stale) => {}
                Err(e) => warn!("Opponent reply failed in session {}: {}", act.id, e),
            }
        });
        self.pending_reply = Some(handle);
    }

    pub fn cancel_pending_reply(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        if let Some(handle) = self.pending_reply.take() {
            debug!("Cancelling pending opponent reply");
            ctx.cancel_future(handle);
        }
    }

    pub fn handle_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match msg.message_type.as_str() {
            "move" => self.handle_move(msg, ctx),
            "restart" => self.handle_restart(ctx),
            "get_moves" => self.handle_get_moves(msg, ctx),
            "sync" => self.send_state(ctx),
            _ => {
                info!("Unknown message type: {}", msg.message_type);
                self.send(ctx, &ServerMessage::error(format!("Unknown message type: {}", msg.message_type)));
            }
        }
    }
}
