use crate::{
    aggregate::{self, Aggregate, Summarize},
    error::{ErrorInfo, FetchError},
    filter::{FilterPatch, FilterState, Filterable},
    resource::{Applied, LoadTicket, Phase, RemoteResource},
};

/// Controller-level state machine: `Idle -> Loading -> (Ready | Error)`.
///
/// `Ready` and `Error` both accept a reload (back to `Loading`) and filter
/// changes (recompute in place, no fetch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Ready,
    Error,
}

/// Whether the aggregate summarizes the full data set or only the rows the
/// active filter lets through. Summary cards historically ignore filters,
/// so `FullData` is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregateScope {
    #[default]
    FullData,
    Filtered,
}

/// Render model a screen reads on every frame.
#[derive(Debug)]
pub struct ListView<'a, T> {
    pub phase: ViewPhase,
    pub items: Vec<&'a T>,
    pub aggregate: &'a Aggregate,
    pub error: Option<&'a ErrorInfo>,
}

/// Orchestrates one [`RemoteResource`] plus filter and aggregate state into
/// a consistent render model. The only piece with mutable state and the
/// only one that sequences operations.
///
/// Rows and filter are recomputed together, synchronously, whenever either
/// changes, so a render can never observe a filter applied to data it was
/// not computed against. A reload keeps the previous rows and aggregate on
/// display until the new fetch resolves (stale-while-revalidate), and a
/// failed refresh leaves them in place alongside the error.
#[derive(Debug)]
pub struct ListViewController<T> {
    resource: RemoteResource<Vec<T>>,
    stale: Vec<T>,
    filter: FilterState,
    visible: Vec<usize>,
    aggregate: Aggregate,
    scope: AggregateScope,
    has_loaded: bool,
    detached: bool,
}

impl<T> Default for ListViewController<T>
where
    T: Filterable + Summarize,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListViewController<T>
where
    T: Filterable + Summarize,
{
    pub fn new() -> Self {
        Self::with_scope(AggregateScope::default())
    }

    pub fn with_scope(scope: AggregateScope) -> Self {
        Self {
            resource: RemoteResource::new(),
            stale: Vec::new(),
            filter: FilterState::default(),
            visible: Vec::new(),
            aggregate: Aggregate::default(),
            scope,
            has_loaded: false,
            detached: false,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        if self.detached {
            return ViewPhase::Idle;
        }
        match self.resource.phase() {
            Phase::Idle => ViewPhase::Idle,
            Phase::Loading => ViewPhase::Loading,
            Phase::Success => ViewPhase::Ready,
            Phase::Failure => ViewPhase::Error,
        }
    }

    /// The last successfully loaded collection, regardless of what the
    /// current fetch is doing.
    pub fn rows(&self) -> &[T] {
        self.resource
            .data()
            .map(Vec::as_slice)
            .unwrap_or(&self.stale)
    }

    /// Rows admitted by the current filter, in source order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        let rows = self.rows();
        self.visible.iter().map(move |&idx| &rows[idx])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Nth visible row, in filtered order. Screens use this for selection.
    pub fn visible_nth(&self, n: usize) -> Option<&T> {
        self.visible.get(n).map(|&idx| &self.rows()[idx])
    }

    pub fn aggregate(&self) -> &Aggregate {
        &self.aggregate
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.resource.error()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Whether any load has ever succeeded. Lets a screen distinguish
    /// "no records" from "nothing fetched yet".
    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn view(&self) -> ListView<'_, T> {
        ListView {
            phase: self.phase(),
            items: self.visible().collect(),
            aggregate: &self.aggregate,
            error: self.error(),
        }
    }

    /// Starts a (re)load. Previous rows stay on display until the matching
    /// [`resolve`] applies; calling this again before that simply makes the
    /// earlier ticket stale.
    ///
    /// [`resolve`]: ListViewController::resolve
    pub fn begin_load(&mut self) -> LoadTicket {
        if let Some(previous) = self.resource.take_data() {
            self.stale = previous;
        }
        self.resource.begin()
    }

    /// Applies a fetch outcome. Stale tickets and detached controllers
    /// discard the result; an applied success replaces the rows and
    /// recomputes the visible set and the aggregate together.
    pub fn resolve(&mut self, ticket: LoadTicket, outcome: Result<Vec<T>, FetchError>) -> Applied {
        if self.detached {
            tracing::debug!("dropping resolution for detached controller");
            return Applied::Discarded;
        }

        let applied = self.resource.resolve(ticket, outcome);
        if applied.is_applied() && self.resource.phase() == Phase::Success {
            self.has_loaded = true;
            self.stale.clear();
            self.recompute();
        }
        applied
    }

    /// Begin + await + resolve for the common non-overlapping path.
    pub async fn load<F>(&mut self, fetcher: F) -> Applied
    where
        F: Future<Output = Result<Vec<T>, FetchError>>,
    {
        let ticket = self.begin_load();
        let outcome = fetcher.await;
        self.resolve(ticket, outcome)
    }

    /// Merges `patch` into the filter and recomputes the visible rows
    /// synchronously. No fetch happens; the aggregate is only touched when
    /// the scope policy says it follows the filter.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.apply(patch);
        self.recompute_visible();
        if self.scope == AggregateScope::Filtered {
            self.recompute_aggregate();
        }
    }

    /// Marks the owning screen as unmounted: the controller reports
    /// [`ViewPhase::Idle`] and ignores every further resolution.
    pub fn detach(&mut self) {
        self.detached = true;
        self.resource.reset();
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    fn recompute(&mut self) {
        self.recompute_visible();
        self.recompute_aggregate();
    }

    fn recompute_visible(&mut self) {
        let visible = {
            let rows = self.rows();
            let filter = &self.filter;
            rows.iter()
                .enumerate()
                .filter(|(_, item)| filter.matches(*item))
                .map(|(idx, _)| idx)
                .collect()
        };
        self.visible = visible;
    }

    fn recompute_aggregate(&mut self) {
        let aggregate = match self.scope {
            AggregateScope::FullData => aggregate::summarize(self.rows()),
            AggregateScope::Filtered => {
                let rows = self.rows();
                let picked: Vec<&T> = self.visible.iter().map(|&idx| &rows[idx]).collect();
                summarize_refs(&picked)
            }
        };
        self.aggregate = aggregate;
    }
}

fn summarize_refs<T: Summarize>(items: &[&T]) -> Aggregate {
    struct Ref<'a, T>(&'a T);

    impl<T: Summarize> Summarize for Ref<'_, T> {
        fn status_bucket(&self) -> Option<&str> {
            self.0.status_bucket()
        }

        fn amount_bucket(&self) -> Option<&str> {
            self.0.amount_bucket()
        }

        fn amount(&self) -> crate::money::Money {
            self.0.amount()
        }
    }

    let wrapped: Vec<Ref<'_, T>> = items.iter().map(|item| Ref(*item)).collect();
    aggregate::summarize(&wrapped)
}
