use crate::ai::TurnStrategy;
use crate::error::SessionError;
use crate::game::SessionState;
use crate::net::Transport;
use crate::protocol::{Card, ClientCall, Codec, Frame, ServerCall};
use log::{debug, error, info, warn};
use serde_json::Value;

/// 回合階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingTurn,
    ActionPhase,
    BuyPhase,
    TurnEnded,
}

/// 回合結果
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// 已送出 EndTurn
    Ended(TurnReport),
    /// 等待回應時收到 GameOver，回合中止
    GameOver(Value),
}

/// 本回合打出與買入的牌
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub played: Vec<Card>,
    pub bought: Vec<Card>,
}

/// 一次呼叫之後是否繼續回合
enum Step {
    Continue,
    GameOver(Value),
}

/// 回合協調器 - 依序執行行動、購買、結束回合
///
/// 每個呼叫都阻塞到回應抵達才做下一個決策，同時只有一個請求在途中。
pub struct TurnOrchestrator<'a, T: Transport, S: TurnStrategy> {
    codec: &'a mut Codec<T>,
    state: &'a mut SessionState,
    strategy: &'a S,
    phase: TurnPhase,
    report: TurnReport,
}

impl<'a, T: Transport, S: TurnStrategy> TurnOrchestrator<'a, T, S> {
    pub fn new(codec: &'a mut Codec<T>, state: &'a mut SessionState, strategy: &'a S) -> Self {
        Self {
            codec,
            state,
            strategy,
            phase: TurnPhase::AwaitingTurn,
            report: TurnReport::default(),
        }
    }

    /// 執行完整回合
    pub fn run(mut self) -> Result<TurnOutcome, SessionError> {
        if let Step::GameOver(result) = self.action_phase()? {
            return Ok(TurnOutcome::GameOver(result));
        }
        if let Step::GameOver(result) = self.buy_phase()? {
            return Ok(TurnOutcome::GameOver(result));
        }
        self.end_turn()?;
        Ok(TurnOutcome::Ended(self.report))
    }

    /// 行動階段: 手上有行動牌且 actions > 0 時持續出牌
    fn action_phase(&mut self) -> Result<Step, SessionError> {
        self.enter(TurnPhase::ActionPhase);

        while self.state.actions > 0 {
            let Some(card) = self.strategy.next_action(self.state) else {
                break;
            };

            info!("[TURN] Playing {}", card);
            if let Step::GameOver(result) = self.call(ClientCall::play(card))? {
                return Ok(Step::GameOver(result));
            }
            self.report.played.push(card.to_string());
        }

        Ok(Step::Continue)
    }

    /// 購買階段: 先打出所有錢幣牌，再依策略購買
    fn buy_phase(&mut self) -> Result<Step, SessionError> {
        self.enter(TurnPhase::BuyPhase);

        for card in self.state.treasures_in_hand() {
            info!("[TURN] Playing {}", card);
            if let Step::GameOver(result) = self.call(ClientCall::play(card.clone()))? {
                return Ok(Step::GameOver(result));
            }
            self.report.played.push(card);
        }

        for card in self.strategy.select_purchases(self.state) {
            if !self.state.can_buy(&card) {
                debug!("[TURN] {} sold out, skipping purchase", card);
                continue;
            }

            info!("[TURN] Buying {}", card);
            if let Step::GameOver(result) = self.call(ClientCall::buy(card.clone()))? {
                return Ok(Step::GameOver(result));
            }
            self.state.record_purchase(card.clone());
            self.report.bought.push(card);
        }

        Ok(Step::Continue)
    }

    /// 結束回合，不等待回應
    fn end_turn(&mut self) -> Result<(), SessionError> {
        self.codec.send_call(&ClientCall::EndTurn)?;
        self.enter(TurnPhase::TurnEnded);
        Ok(())
    }

    fn enter(&mut self, phase: TurnPhase) {
        debug!("[TURN] {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    /// 送出呼叫並阻塞到對應的回應，成功時刷新狀態
    fn call(&mut self, call: ClientCall) -> Result<Step, SessionError> {
        let request_id = self.codec.send_call(&call)?;

        loop {
            let frame = self
                .codec
                .read_frame()?
                .ok_or(SessionError::ConnectionClosed)?;

            match frame {
                Frame::Result { id, result } => {
                    if id != Some(request_id) {
                        warn!(
                            "[TURN] {} #{} answered with id {:?}",
                            call.method(),
                            request_id,
                            id
                        );
                    }
                    self.state.apply(result);
                    info!("[TURN] {}", self.state);
                    return Ok(Step::Continue);
                }
                Frame::Error { id, error } => {
                    error!("[TURN] {} #{} failed: {}", call.method(), request_id, error);
                    return Err(SessionError::Protocol { id, error });
                }
                Frame::Call(ServerCall::FatalError(message)) => {
                    return Err(SessionError::Fatal(message));
                }
                Frame::Call(ServerCall::GameOver(result)) => {
                    warn!("[TURN] Game ended while waiting for {} response", call.method());
                    return Ok(Step::GameOver(result));
                }
                Frame::Call(other) => {
                    warn!("[TURN] Ignoring {:?} while waiting for a response", other);
                }
                Frame::Ignored => {}
            }
        }
    }
}
