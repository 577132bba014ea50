//! Websocket session actor.
//!
//! One actor per connection. Inbound frames are parsed into [`ClientMsg`] and
//! handed to the dispatcher; outbound [`RoomEvent`]s arrive through the
//! actor's mailbox and are written as JSON text frames. A malformed frame
//! earns a `game-error` without closing the connection.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::ErrorCode;
use crate::services::game_flow::GameFlow;
use crate::state::app_state::AppState;
use crate::ws::hub::{GameHub, RoomEvent};
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

/// HTTP upgrade handler for the realtime endpoint.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state.hub.clone(), app_state.flow.clone());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    hub: Arc<GameHub>,
    flow: Arc<GameFlow>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(hub: Arc<GameHub>, flow: Arc<GameFlow>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            hub,
            flow,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn reject_frame(ctx: &mut ws::WebsocketContext<Self>, message: String) {
        // Bad frames are per-message failures; the connection stays open.
        Self::send_json(
            ctx,
            &ServerMsg::GameError {
                message,
                code: ErrorCode::BadRequest.as_str().to_string(),
            },
        );
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "session started");
        self.hub.register(self.conn_id, ctx.address().recipient());
        self.start_heartbeat(ctx);
        Self::send_json(
            ctx,
            &ServerMsg::Connected {
                session_id: self.conn_id,
            },
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "session stopped");
        let flow = self.flow.clone();
        let conn_id = self.conn_id;
        actix::spawn(async move {
            flow.disconnect(conn_id).await;
        });
    }
}

impl Handler<RoomEvent> for WsSession {
    type Result = ();

    fn handle(&mut self, event: RoomEvent, ctx: &mut Self::Context) {
        Self::send_json(ctx, &event.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => {
                        let flow = self.flow.clone();
                        let conn_id = self.conn_id;
                        ctx.spawn(
                            async move {
                                flow.dispatch(conn_id, cmd).await;
                            }
                            .into_actor(self),
                        );
                    }
                    Err(err) => {
                        warn!(conn_id = %self.conn_id, error = %err, "malformed frame");
                        Self::reject_frame(ctx, format!("Malformed message: {err}"));
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                Self::reject_frame(ctx, "Binary frames are not supported".to_string());
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "protocol error");
                ctx.stop();
            }
        }
    }
}
