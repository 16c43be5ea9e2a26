use std::time::Duration;

use async_trait::async_trait;
use qbft_types::{Height, Round};
use ractor::time::send_after;
use ractor::{Actor, ActorProcessingErr, ActorRef, MessagingErr};
use tokio::task::JoinHandle;

/// Delivered to the listener when an armed timer fires (§4.7).
pub struct TimeoutFired {
    pub height: Height,
    pub round: Round,
}

pub type TimerActorRef = ActorRef<Msg>;

/// Per `(identifier, height)`, a single outstanding timer (§4.7): arming a
/// new round cancels the previous one, narrowed to the one timer QBFT needs
/// instead of per-step ones.
pub struct Timer<M> {
    listener: ActorRef<M>,
}

impl<M> Timer<M>
where
    M: From<TimeoutFired> + ractor::Message,
{
    pub async fn spawn(listener: ActorRef<M>) -> Result<(ActorRef<Msg>, JoinHandle<()>), ractor::SpawnErr> {
        Actor::spawn(None, Self { listener }, ()).await
    }
}

pub enum Msg {
    Arm { height: Height, round: Round, duration: Duration },
    Cancel,
    #[doc(hidden)]
    Fired { height: Height, round: Round },
}

type TimerTask = JoinHandle<Result<(), MessagingErr<Msg>>>;

#[derive(Default)]
pub struct State {
    scheduled: Option<TimerTask>,
}

#[async_trait]
impl<M> Actor for Timer<M>
where
    M: From<TimeoutFired> + ractor::Message,
{
    type Msg = Msg;
    type State = State;
    type Arguments = ();

    async fn pre_start(&self, _myself: ActorRef<Msg>, _args: ()) -> Result<State, ActorProcessingErr> {
        Ok(State::default())
    }

    async fn handle(&self, myself: ActorRef<Msg>, msg: Msg, state: &mut State) -> Result<(), ActorProcessingErr> {
        match msg {
            Msg::Arm { height, round, duration } => {
                if let Some(previous) = state.scheduled.take() {
                    previous.abort();
                }
                let task = send_after(duration, myself.get_cell(), move || Msg::Fired { height, round });
                state.scheduled = Some(task);
            }

            Msg::Cancel => {
                if let Some(previous) = state.scheduled.take() {
                    previous.abort();
                }
            }

            Msg::Fired { height, round } => {
                state.scheduled = None;
                self.listener.cast(TimeoutFired { height, round }.into())?;
            }
        }

        Ok(())
    }

    async fn post_stop(&self, _myself: ActorRef<Msg>, state: &mut State) -> Result<(), ActorProcessingErr> {
        if let Some(task) = state.scheduled.take() {
            task.abort();
        }
        Ok(())
    }
}
