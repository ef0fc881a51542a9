use actix_web_actors::ws;
use chess::Square;
use log::{info, warn};
use std::str::FromStr;

use crate::game::GameError;
use crate::models::{ClientMessage, ServerMessage};
use crate::websocket::handler::ChessWebSocket;

fn parse_square(raw: &str) -> Result<Square, GameError> {
    let name = raw.trim().to_ascii_lowercase();
    // The crate indexes the first two chars, so anything else is refused up front
    if name.len() != 2 || !name.is_ascii() {
        return Err(GameError::InvalidSquare(raw.to_string()));
    }
    Square::from_str(&name).map_err(|_| GameError::InvalidSquare(raw.to_string()))
}

impl ChessWebSocket {
    pub fn handle_move(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let (from, to) = match (msg.move_from, msg.move_to) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                info!("Move action missing from or to");
                self.send(ctx, &ServerMessage::error("Move requires from and to positions"));
                return;
            }
        };

        let result = parse_square(&from)
            .and_then(|from| parse_square(&to).map(|to| (from, to)))
            .and_then(|(from, to)| self.game.attempt_human_move(from, to));

        match result {
            Ok(mv) => {
                info!("Session {} played {}", self.id, mv);
                self.send_state(ctx);
                self.schedule_reply(ctx);
            }
            Err(e) => {
                warn!("Rejected move {}-{} in session {}: {}", from, to, self.id, e);
                self.send(ctx, &ServerMessage::move_rejected(self.game.fen(), e.to_string()));
            }
        }
    }

    pub fn handle_restart(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        info!("Session {} restarting", self.id);
        self.cancel_pending_reply(ctx);
        self.game.restart();
        self.send_state(ctx);
    }

    pub fn handle_get_moves(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let Some(from) = msg.move_from else {
            self.send(ctx, &ServerMessage::error("Get moves requires from position"));
            return;
        };

        match parse_square(&from) {
            Ok(square) => {
                let moves = self
                    .game
                    .legal_destinations(square)
                    .into_iter()
                    .map(|dest| dest.to_string())
                    .collect();
                self.send(ctx, &ServerMessage::available_moves(moves));
            }
            Err(e) => self.send(ctx, &ServerMessage::error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_square_accepts_any_case() {
        assert_eq!(parse_square("E2").unwrap(), Square::E2);
        assert_eq!(parse_square(" h8 ").unwrap(), Square::H8);
    }

    #[test]
    fn parse_square_rejects_nonsense() {
        assert_eq!(
            parse_square("z9"),
            Err(GameError::InvalidSquare("z9".to_string()))
        );
    }
}
