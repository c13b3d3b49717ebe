use std::collections::HashMap;

use little_chat_actor::{Actor, Message as ActorMessage, Request};
use little_chat_backend::SessionId;
use tokio::task::JoinHandle;

use super::Submission;
use crate::backend_client::BackendClient;
use crate::dispatcher::{CycleOutcome, MessageDispatcher};
use crate::resetter::{ConversationResetter, ResetOutcome};
use crate::transcript::{Message, Transcript};

type MessageCallback = Box<dyn Fn(&Message) + Send + Sync>;
type Callback = Box<dyn Fn() + Send + Sync>;
type ReasonCallback = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct Callbacks {
    pub on_message: Option<MessageCallback>,
    pub on_idle: Option<Callback>,
    pub on_cleared: Option<Callback>,
    pub on_reset_failed: Option<ReasonCallback>,
}

pub struct ControllerState {
    dispatcher: MessageDispatcher,
    resetter: ConversationResetter,
    session_id: SessionId,
    transcript: Transcript,
    // Advanced by every confirmed reset. Send cycles remember the epoch
    // they started in, answers from an older epoch are discarded.
    epoch: u64,
    running_tasks: HashMap<u64, JoinHandle<()>>,
    next_task_id: u64,
    callbacks: Callbacks,
}

impl ControllerState {
    pub fn new(
        client: BackendClient,
        session_id: SessionId,
        callbacks: Callbacks,
    ) -> Self {
        Self {
            dispatcher: MessageDispatcher::new(client.clone()),
            resetter: ConversationResetter::new(client),
            session_id,
            transcript: Default::default(),
            epoch: 0,
            running_tasks: Default::default(),
            next_task_id: 1,
            callbacks,
        }
    }

    fn submit(&mut self, text: &str, handle: &Actor<Self>) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            trace!("ignored a blank submission");
            return Submission::Blank;
        }
        if self.transcript.is_pending() {
            debug!("a message is still waiting for its answer, ignored");
            return Submission::Busy;
        }

        let cycle = self.dispatcher.begin(
            &mut self.transcript,
            text.to_owned(),
            &self.session_id,
        );
        self.notify_last_message();

        let reporter = CycleReporter {
            handle: Some(handle.clone()),
            epoch: self.epoch,
        };
        self.spawn_task(
            async move {
                let outcome = cycle.await;
                reporter.report(outcome);
            },
            handle,
        );
        Submission::Started
    }

    fn finish_cycle(&mut self, epoch: u64, outcome: CycleOutcome) {
        if epoch == self.epoch {
            MessageDispatcher::finish(&mut self.transcript, outcome);
            self.notify_last_message();
        } else {
            debug!("the conversation has been cleared, discard: {outcome:?}");
            self.transcript.set_pending(false);
        }

        if let Some(on_idle) = &self.callbacks.on_idle {
            on_idle();
        }
    }

    fn clear(&mut self, handle: &Actor<Self>) {
        let reset = self.resetter.begin(&self.session_id);
        let handle_clone = handle.clone();
        self.spawn_task(
            async move {
                let outcome = reset.await;
                handle_clone.send(ResetFinished(outcome)).ok();
            },
            handle,
        );
    }

    fn finish_reset(&mut self, outcome: ResetOutcome) {
        if ConversationResetter::finish(&mut self.transcript, &outcome) {
            self.epoch += 1;
            if let Some(on_cleared) = &self.callbacks.on_cleared {
                on_cleared();
            }
        } else if let ResetOutcome::Failed(reason) = &outcome {
            if let Some(on_reset_failed) = &self.callbacks.on_reset_failed {
                on_reset_failed(reason);
            }
        }
    }

    fn notify_last_message(&self) {
        if let (Some(on_message), Some(message)) =
            (&self.callbacks.on_message, self.transcript.last())
        {
            on_message(message);
        }
    }

    fn spawn_task<Fut>(&mut self, fut: Fut, handle: &Actor<Self>)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let guard = TaskEndedGuard {
            handle: handle.clone(),
            task_id,
        };
        let task = tokio::spawn(async move {
            let _guard = guard;
            fut.await;
        });
        self.running_tasks.insert(task_id, task);
    }
}

impl Drop for ControllerState {
    fn drop(&mut self) {
        for (_, task) in self.running_tasks.drain() {
            task.abort();
        }
    }
}

/// Reports the outcome of a send cycle back to the controller.
///
/// If the cycle task goes away without an outcome, e.g. the backend
/// panicked while producing it, the cycle is reported as unreachable so
/// that the pending flag is cleared anyway.
struct CycleReporter {
    handle: Option<Actor<ControllerState>>,
    epoch: u64,
}

impl CycleReporter {
    #[inline]
    fn report(mut self, outcome: CycleOutcome) {
        self.send(outcome);
    }

    fn send(&mut self, outcome: CycleOutcome) -> bool {
        let Some(handle) = self.handle.take() else {
            return false;
        };
        handle
            .send(CycleFinished {
                epoch: self.epoch,
                outcome,
            })
            .is_ok()
    }
}

impl Drop for CycleReporter {
    fn drop(&mut self) {
        if self.send(CycleOutcome::Unreachable) {
            warn!("send cycle ended without an outcome");
        }
    }
}

/// Tells the controller that a spawned task is gone, however it ended.
struct TaskEndedGuard {
    handle: Actor<ControllerState>,
    task_id: u64,
}

impl Drop for TaskEndedGuard {
    fn drop(&mut self) {
        self.handle.send(TaskEnded(self.task_id)).ok();
    }
}

#[derive(Debug)]
pub struct Submit(pub String);

impl Request<ControllerState> for Submit {
    type Reply = Submission;

    fn handle(
        self,
        state: &mut ControllerState,
        handle: &Actor<ControllerState>,
    ) -> Submission {
        state.submit(&self.0, handle)
    }
}

#[derive(Debug)]
pub struct Clear;

impl ActorMessage<ControllerState> for Clear {
    fn handle(self, state: &mut ControllerState, handle: &Actor<ControllerState>) {
        state.clear(handle);
    }
}

#[derive(Debug)]
pub struct Snapshot;

impl Request<ControllerState> for Snapshot {
    type Reply = Transcript;

    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) -> Transcript {
        state.transcript.clone()
    }
}

#[derive(Debug)]
struct CycleFinished {
    epoch: u64,
    outcome: CycleOutcome,
}

impl ActorMessage<ControllerState> for CycleFinished {
    fn handle(self, state: &mut ControllerState, _handle: &Actor<ControllerState>) {
        state.finish_cycle(self.epoch, self.outcome);
    }
}

#[derive(Debug)]
struct ResetFinished(ResetOutcome);

impl ActorMessage<ControllerState> for ResetFinished {
    fn handle(self, state: &mut ControllerState, _handle: &Actor<ControllerState>) {
        state.finish_reset(self.0);
    }
}

#[derive(Debug)]
struct TaskEnded(u64);

impl ActorMessage<ControllerState> for TaskEnded {
    #[inline]
    fn handle(self, state: &mut ControllerState, _handle: &Actor<ControllerState>) {
        if state.running_tasks.remove(&self.0).is_none() {
            warn!("task {} ended but was never tracked", self.0);
        }
    }
}
