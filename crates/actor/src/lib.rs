//! A lightweight actor runtime on top of tokio.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::{Message, Request};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
    }

    #[derive(Debug)]
    struct Add(u32);

    impl Message<Counter> for Add {
        fn handle(self, state: &mut Counter, _handle: &Actor<Counter>) {
            state.value += self.0;
        }
    }

    #[derive(Debug)]
    struct Get;

    impl Request<Counter> for Get {
        type Reply = u32;

        fn handle(self, state: &mut Counter, _handle: &Actor<Counter>) -> u32 {
            state.value
        }
    }

    #[derive(Debug)]
    struct AddLater(u32);

    impl Message<Counter> for AddLater {
        fn handle(self, _state: &mut Counter, handle: &Actor<Counter>) {
            let handle = handle.clone();
            let amount = self.0;
            tokio::spawn(async move {
                sleep(Duration::from_millis(1)).await;
                handle.send(Add(amount)).ok();
            });
        }
    }

    #[tokio::test]
    async fn test_send_and_call() {
        let actor = Actor::spawn(Counter::default(), None);
        actor.send(Add(40)).unwrap();
        actor.send(Add(2)).unwrap();
        assert_eq!(actor.call(Get).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_message_from_task() {
        let actor = Actor::spawn(Counter::default(), Some("counter"));
        actor.send(AddLater(7)).unwrap();
        sleep(Duration::from_millis(50)).await;
        assert_eq!(actor.call(Get).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_stop() {
        let actor = Actor::spawn(Counter::default(), None);
        actor.stop();
        sleep(Duration::from_millis(10)).await;
        assert!(actor.is_stopped());
        assert_eq!(actor.call(Get).await, Err(ActorDeadError));
    }
}
