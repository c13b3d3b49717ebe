use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::mailbox::{Call, Mailbox, MailboxParts};
use crate::scheduler::run_actor;
use crate::{ActorDeadError, Message, Request};

/// Handle to an actor.
///
/// The actor keeps running as long as any handle is alive, or until
/// [`Actor::stop`] is called.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns a new actor with the specified state and an optional label.
    ///
    /// This must be called within a tokio runtime. All messages are
    /// handled one by one on the spawned task, so the state never needs
    /// any synchronization.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let MailboxParts {
            mailbox,
            msg_rx,
            stop_rx,
        } = Mailbox::new();
        let mailbox = Arc::new(mailbox);
        tokio::spawn(
            run_actor(Arc::downgrade(&mailbox), state, msg_rx, stop_rx)
                .instrument(trace_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Sends a message to the actor.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.send(Box::new(msg))
    }

    /// Sends a request to the actor and waits for its reply.
    ///
    /// Messages sent earlier from the same handle are handled before
    /// this request.
    pub async fn call<R: Request<S>>(
        &self,
        request: R,
    ) -> Result<R::Reply, ActorDeadError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Call { request, reply_tx })?;
        reply_rx.await.map_err(|_| ActorDeadError)
    }

    /// Asks the actor to stop.
    ///
    /// The actor is not guaranteed to stop immediately, but it will not
    /// handle further messages and quit soon.
    #[inline]
    pub fn stop(&self) {
        self.mailbox.stop();
    }

    /// Returns `true` if the actor no longer accepts messages.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.mailbox.is_stopped()
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
