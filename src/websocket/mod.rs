pub mod game_handlers;
pub mod handler;

use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::game::{ChessRules, GameOrchestrator};
use crate::models::AppState;

pub use handler::ChessWebSocket;

// WebSocket connection handler
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let id = Uuid::new_v4().to_string();
    info!("New WebSocket connection: {}", id);

    let game = GameOrchestrator::new(ChessRules, StdRng::from_entropy(), app_state.config.scoring);
    let session = ChessWebSocket::new(id, app_state.clone(), game);

    ws::start(session, &req, stream)
}
