use super::turn::{TurnOrchestrator, TurnOutcome};
use crate::ai::TurnStrategy;
use crate::error::SessionError;
use crate::game::SessionState;
use crate::net::Transport;
use crate::protocol::{Card, Codec, Frame, ServerCall};
use log::{debug, error, info, warn};
use serde_json::{Value, json};

/// 一局遊戲的總結
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    /// GameOver 的 params 原樣保留
    pub result: Value,
    pub turns: u32,
    pub acquired: Vec<Card>,
}

/// Session 迴圈 - 在一局遊戲期間獨佔連線並分派伺服器訊息
pub struct Session<T: Transport, S: TurnStrategy> {
    codec: Codec<T>,
    state: SessionState,
    strategy: S,
    turns: u32,
}

impl<T: Transport, S: TurnStrategy> Session<T, S> {
    pub fn new(transport: T, strategy: S) -> Self {
        Self {
            codec: Codec::new(transport),
            state: SessionState::new(),
            strategy,
            turns: 0,
        }
    }

    /// 執行到遊戲結束或發生致命錯誤，結束時關閉連線
    pub fn run(mut self) -> Result<GameSummary, SessionError> {
        let outcome = self.drive();

        if let Err(e) = self.codec.close() {
            warn!("[SESSION] Failed to close connection: {}", e);
        }

        outcome
    }

    fn drive(&mut self) -> Result<GameSummary, SessionError> {
        info!("[SESSION] Waiting for server messages");

        loop {
            let frame = self
                .codec
                .read_frame()?
                .ok_or(SessionError::ConnectionClosed)?;

            match frame {
                Frame::Call(call) => {
                    if let Some(result) = self.dispatch(call)? {
                        return Ok(self.finish(result));
                    }
                }
                Frame::Error { id, error } => {
                    error!("[SESSION] Error response {:?}: {}", id, error);
                    return Err(SessionError::Protocol { id, error });
                }
                Frame::Result { id, .. } => {
                    debug!("[SESSION] Ignoring unsolicited result {:?}", id);
                }
                Frame::Ignored => {}
            }
        }
    }

    /// 處理伺服器發起的呼叫，遊戲結束時回傳 GameOver 的 params
    fn dispatch(&mut self, call: ServerCall) -> Result<Option<Value>, SessionError> {
        match call {
            ServerCall::StartGame { id, kingdom } => {
                self.codec.send_reply(id, json!({}))?;
                info!("[SESSION] Kingdom: {}", kingdom);
                Ok(None)
            }

            ServerCall::StartTurn(update) => {
                self.turns += 1;
                self.state.begin_turn(update);
                info!("[SESSION] Turn {} | {}", self.turns, self.state);

                let outcome =
                    TurnOrchestrator::new(&mut self.codec, &mut self.state, &self.strategy).run()?;

                match outcome {
                    TurnOutcome::Ended(report) => {
                        debug!(
                            "[SESSION] Turn {} ended: played {:?}, bought {:?}",
                            self.turns, report.played, report.bought
                        );
                        Ok(None)
                    }
                    TurnOutcome::GameOver(result) => Ok(Some(result)),
                }
            }

            ServerCall::GameOver(result) => Ok(Some(result)),

            ServerCall::FatalError(message) => {
                error!("[SESSION] Fatal error: {}", message);
                Err(SessionError::Fatal(message))
            }

            ServerCall::Unknown(method) => {
                debug!("[SESSION] Ignoring unknown method {}", method);
                Ok(None)
            }
        }
    }

    fn finish(&self, result: Value) -> GameSummary {
        info!("[SESSION] Game over after {} turns: {}", self.turns, result);
        GameSummary {
            result,
            turns: self.turns,
            acquired: self.state.acquired_cards.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Strategy;
    use crate::net::testing::ScriptedTransport;

    fn frame(value: Value) -> String {
        value.to_string()
    }

    fn start_turn(params: Value) -> String {
        frame(json!({"jsonrpc": "2.0", "id": 0, "method": "StartTurn", "params": params}))
    }

    fn game_over() -> String {
        frame(json!({"method": "GameOver", "params": {"scores": {"player1": 12}}}))
    }

    #[test]
    fn test_start_game_reply_echoes_id() {
        let (transport, log) = ScriptedTransport::new(vec![
            frame(json!({"jsonrpc": "2.0", "id": 42, "method": "StartGame", "params": {"kingdom": ["Smithy"]}})),
            game_over(),
        ]);

        let summary = Session::new(transport, Strategy::Default).run().unwrap();

        assert_eq!(log.sent(), vec![json!({"jsonrpc": "2.0", "id": 42, "result": {}})]);
        assert_eq!(summary.turns, 0);
        assert_eq!(summary.result, json!({"scores": {"player1": 12}}));
        assert!(log.is_closed());
    }

    #[test]
    fn test_start_game_reply_with_unexpected_kingdom() {
        let (transport, log) = ScriptedTransport::new(vec![
            frame(json!({"id": 42, "method": "StartGame", "params": {"kingdom": [{"name": "Smithy"}]}})),
            game_over(),
        ]);

        Session::new(transport, Strategy::Default).run().unwrap();

        assert_eq!(log.sent(), vec![json!({"jsonrpc": "2.0", "id": 42, "result": {}})]);
    }

    #[test]
    fn test_fatal_error_with_object_message() {
        let (transport, _log) = ScriptedTransport::new(vec![
            frame(json!({"method": "FatalError", "message": {"reason": "dup"}})),
            game_over(),
        ]);

        let result = Session::new(transport, Strategy::Default).run();

        assert!(matches!(result, Err(SessionError::Fatal(_))));
    }

    #[test]
    fn test_null_result_completes_call() {
        let (transport, log) = ScriptedTransport::new(vec![
            start_turn(json!({"hand": ["Copper"]})),
            frame(json!({"jsonrpc": "2.0", "id": 1, "result": null})),
            game_over(),
        ]);

        let summary = Session::new(transport, Strategy::Default).run().unwrap();

        // null 結果完成 Play，回合照常結束
        let methods: Vec<String> = log.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["Play", "EndTurn"]);
        assert_eq!(summary.turns, 1);
    }

    #[test]
    fn test_full_turn_then_game_over() {
        let (transport, log) = ScriptedTransport::new(vec![
            start_turn(json!({
                "hand": ["Copper", "Smithy", "Estate"],
                "discard": 0,
                "deck": 5,
                "supply": {"Smithy": 3, "Silver": 40}
            })),
            // Smithy
            frame(json!({"id": 1, "result": {"hand": ["Copper", "Estate", "Copper"], "actions": 0}})),
            frame(json!({"id": 2, "result": {"hand": ["Estate", "Copper"], "treasure": 1}})),
            frame(json!({"id": 3, "result": {"hand": ["Estate"], "treasure": 2}})),
            game_over(),
        ]);

        let summary = Session::new(transport, Strategy::Smithy).run().unwrap();

        let methods: Vec<String> = log.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["Play", "Play", "Play", "EndTurn"]);
        assert_eq!(summary.turns, 1);
        assert!(summary.acquired.is_empty());
    }

    #[test]
    fn test_purchases_accumulate_across_turns() {
        let turn = |supply: u32| {
            start_turn(json!({
                "hand": ["Gold", "Gold", "Gold"],
                "supply": {"Province": supply, "Gold": 20}
            }))
        };
        let (transport, log) = ScriptedTransport::new(vec![
            turn(8),
            frame(json!({"id": 1, "result": {"treasure": 3}})),
            frame(json!({"id": 2, "result": {"treasure": 6}})),
            frame(json!({"id": 3, "result": {"treasure": 9}})),
            frame(json!({"id": 4, "result": {"hand": [], "treasure": 1}})),
            turn(7),
            frame(json!({"id": 6, "result": {"treasure": 3}})),
            frame(json!({"id": 7, "result": {"treasure": 6}})),
            frame(json!({"id": 8, "result": {"treasure": 9}})),
            frame(json!({"id": 9, "result": {"hand": [], "treasure": 1}})),
            game_over(),
        ]);

        let summary = Session::new(transport, Strategy::Fancy).run().unwrap();

        assert_eq!(summary.turns, 2);
        assert_eq!(summary.acquired, vec!["Province", "Province"]);
        let buys = log
            .calls()
            .into_iter()
            .filter(|(method, _)| method == "Buy")
            .count();
        assert_eq!(buys, 2);
    }

    #[test]
    fn test_error_stops_processing() {
        let (transport, log) = ScriptedTransport::new(vec![
            start_turn(json!({"hand": ["Copper"]})),
            frame(json!({"id": 1, "error": {"code": -1, "message": "Not your turn"}})),
            start_turn(json!({"hand": ["Copper"]})),
        ]);

        let result = Session::new(transport, Strategy::Default).run();

        assert!(matches!(result, Err(SessionError::Protocol { .. })));
        // 第二個 StartTurn 沒被處理
        assert_eq!(log.calls().len(), 1);
        assert!(log.is_closed());
    }

    #[test]
    fn test_fatal_error_notification() {
        let (transport, log) = ScriptedTransport::new(vec![
            frame(json!({"method": "FatalError", "message": "Duplicate player name"})),
            start_turn(json!({"hand": ["Copper"]})),
        ]);

        let result = Session::new(transport, Strategy::Default).run();

        match result {
            Err(SessionError::Fatal(message)) => assert_eq!(message, "Duplicate player name"),
            other => panic!("Expected Fatal, got {:?}", other),
        }
        assert!(log.sent().is_empty());
    }

    #[test]
    fn test_unrecognized_messages_skipped() {
        let (transport, log) = ScriptedTransport::new(vec![
            "{not json".to_string(),
            frame(json!({"jsonrpc": "2.0", "id": 5})),
            frame(json!({"method": "PlayerJoined", "params": {"name": "player2"}})),
            frame(json!({"id": 9, "result": {}})),
            game_over(),
        ]);

        let summary = Session::new(transport, Strategy::Curses).run().unwrap();

        assert_eq!(summary.turns, 0);
        assert!(log.sent().is_empty());
    }

    #[test]
    fn test_connection_closed_before_game_over() {
        let (transport, log) = ScriptedTransport::new(Vec::<String>::new());
        let result = Session::new(transport, Strategy::Default).run();
        assert!(matches!(result, Err(SessionError::ConnectionClosed)));
        assert!(log.is_closed());
    }
}
