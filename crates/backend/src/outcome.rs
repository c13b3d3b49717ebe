/// Every way a send-message exchange can end.
#[derive(Debug)]
pub enum SendOutcome<E> {
    /// The backend answered with a response text.
    Success(String),
    /// The backend was reachable, but reported that it couldn't process
    /// the message. The server-provided description is carried if there
    /// is any.
    ApplicationFailure(Option<String>),
    /// No usable response was obtained.
    TransportFailure(E),
}

impl<E> SendOutcome<E> {
    /// Maps the transport error, leaving the other variants untouched.
    #[inline]
    pub fn map_err<F, O: FnOnce(E) -> F>(self, op: O) -> SendOutcome<F> {
        match self {
            SendOutcome::Success(text) => SendOutcome::Success(text),
            SendOutcome::ApplicationFailure(text) => {
                SendOutcome::ApplicationFailure(text)
            }
            SendOutcome::TransportFailure(err) => {
                SendOutcome::TransportFailure(op(err))
            }
        }
    }

    /// Returns `true` if the backend answered with a response.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Success(_))
    }
}
