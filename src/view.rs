use std::fmt::Display;

/// Fetch bookkeeping for a single resource view.
///
/// Every view that loads data on demand owns one of these. It tracks the
/// view's own loading and error flags, and which request the view is still
/// interested in: results belonging to anything but the newest
/// [`FetchTicket`] are dropped silently, so a slow response can never clobber
/// the data of a newer one.
///
/// There is no network-level cancellation here. Ignoring a late result is
/// enough.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    generation: u64,
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

/// Proof of which fetch a result belongs to. Issued by
/// [`ViewState::begin()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        ViewState {
            generation: 0,
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Start a new fetch, superseding any fetch still in flight.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        FetchTicket {
            generation: self.generation,
        }
    }

    /// Apply a fetch result.
    ///
    /// Returns `false` (and changes nothing) when the ticket belongs to a
    /// superseded fetch. A failed fetch records the error message but keeps
    /// whatever data was already on screen.
    pub fn resolve<E>(
        &mut self,
        ticket: FetchTicket,
        result: Result<T, E>,
    ) -> bool
    where
        E: Display,
    {
        if ticket.generation != self.generation {
            log::debug!("Discarding a stale fetch result");
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            },
            Err(e) => {
                self.error = Some(e.to_string());
            },
        }

        true
    }

    /// Logically cancel whatever is in flight, because the view went away or
    /// its parameters changed.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    pub fn data(&self) -> Option<&T> { self.data.as_ref() }

    pub fn error(&self) -> Option<&str> { self.error.as_deref() }

    pub fn is_loading(&self) -> bool { self.loading }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self { ViewState::new() }
}
