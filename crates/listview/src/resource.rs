use crate::error::{ErrorInfo, FetchError};

/// Lifecycle of a single asynchronous load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// Handle for one fetch attempt, issued by [`RemoteResource::begin`].
///
/// A resolution is only applied while its ticket is still the newest one
/// issued; anything older is discarded, so a slow early request can never
/// overwrite fresher data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Outcome of handing a fetch result back to a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// The result was current and has been stored.
    Applied,
    /// The result was stale (or the owner detached) and was dropped.
    Discarded,
}

impl Applied {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// One asynchronous fetch of a typed payload from the HTTP collaborator.
///
/// The resource never performs I/O itself; callers run the fetch however
/// they like and feed the outcome back through [`resolve`]. All failure
/// shapes are representable in the phase, so nothing panics across this
/// boundary.
///
/// The payload is present only in [`Phase::Success`] and the error only in
/// [`Phase::Failure`]; retaining stale rows across a refresh is the
/// controller's job, not the resource's.
///
/// [`resolve`]: RemoteResource::resolve
#[derive(Debug)]
pub struct RemoteResource<T> {
    phase: Phase,
    data: Option<T>,
    error: Option<ErrorInfo>,
    request_id: u64,
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RemoteResource<T> {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            data: None,
            error: None,
            request_id: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Starts a fetch: transitions to [`Phase::Loading`] and issues a fresh
    /// ticket. Any ticket issued earlier becomes stale immediately.
    pub fn begin(&mut self) -> LoadTicket {
        self.request_id += 1;
        self.phase = Phase::Loading;
        self.data = None;
        self.error = None;
        LoadTicket(self.request_id)
    }

    /// Applies a fetch outcome if `ticket` is still the newest one.
    pub fn resolve(&mut self, ticket: LoadTicket, outcome: Result<T, FetchError>) -> Applied {
        if ticket.0 != self.request_id {
            tracing::debug!(
                ticket = ticket.0,
                current = self.request_id,
                "discarding stale response"
            );
            return Applied::Discarded;
        }

        match outcome {
            Ok(data) => {
                self.phase = Phase::Success;
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                self.phase = Phase::Failure;
                self.data = None;
                self.error = Some(err.into());
            }
        }
        Applied::Applied
    }

    /// Begin + await + resolve for the common non-overlapping path.
    pub async fn load<F>(&mut self, fetcher: F) -> Applied
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let ticket = self.begin();
        let outcome = fetcher.await;
        self.resolve(ticket, outcome)
    }

    /// Removes and returns the payload, returning the resource to
    /// [`Phase::Idle`]. Controllers call this right before a reload to keep
    /// a stale copy on display while the new fetch is in flight.
    pub fn take_data(&mut self) -> Option<T> {
        let data = self.data.take();
        if data.is_some() {
            self.phase = Phase::Idle;
        }
        data
    }

    /// Back to [`Phase::Idle`] with no data and no error. In-flight tickets
    /// become stale.
    pub fn reset(&mut self) {
        self.request_id += 1;
        self.phase = Phase::Idle;
        self.data = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_stores_data_and_clears_error() {
        let mut res = RemoteResource::new();
        let ticket = res.begin();
        assert_eq!(res.phase(), Phase::Loading);

        assert!(res.resolve(ticket, Ok(vec![1, 2, 3])).is_applied());
        assert_eq!(res.phase(), Phase::Success);
        assert_eq!(res.data(), Some(&vec![1, 2, 3]));
        assert!(res.error().is_none());
    }

    #[test]
    fn failure_stores_error_and_clears_data() {
        let mut res: RemoteResource<Vec<u8>> = RemoteResource::new();
        let ticket = res.begin();
        res.resolve(ticket, Err(FetchError::Rejected("boom".to_string())));

        assert_eq!(res.phase(), Phase::Failure);
        assert!(res.data().is_none());
        assert_eq!(res.error().map(|e| e.message.as_str()), Some("boom"));
    }

    #[test]
    fn late_response_for_older_ticket_is_discarded() {
        let mut res = RemoteResource::new();
        let first = res.begin();
        let second = res.begin();

        assert!(res.resolve(second, Ok("fresh")).is_applied());
        assert_eq!(res.resolve(first, Ok("stale")), Applied::Discarded);
        assert_eq!(res.data(), Some(&"fresh"));
    }

    #[test]
    fn reset_invalidates_in_flight_tickets() {
        let mut res = RemoteResource::new();
        let ticket = res.begin();
        res.reset();

        assert_eq!(res.resolve(ticket, Ok(1)), Applied::Discarded);
        assert_eq!(res.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn load_drives_a_full_cycle() {
        let mut res = RemoteResource::new();
        assert!(res.load(async { Ok(vec!["W1", "W2"]) }).await.is_applied());
        assert_eq!(res.phase(), Phase::Success);
        assert_eq!(res.data().map(Vec::len), Some(2));
    }
}
