use listview::{
    Aggregate, AggregateScope, Applied, Facet, FetchError, FilterPatch, Filterable,
    ListViewController, Money, Summarize, ViewPhase,
};

#[derive(Debug, Clone, PartialEq)]
struct Record {
    id: String,
    customer: Option<String>,
    status: Option<String>,
    category: Option<String>,
    kind: Option<String>,
    amount: Money,
}

impl Record {
    fn new(id: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            customer: None,
            status: Some(status.to_string()),
            category: None,
            kind: None,
            amount: Money::ZERO,
        }
    }

    fn customer(mut self, name: &str) -> Self {
        self.customer = Some(name.to_string());
        self
    }

    fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    fn entry(mut self, kind: &str, paise: i64) -> Self {
        self.kind = Some(kind.to_string());
        self.amount = Money::new(paise);
        self
    }
}

impl Filterable for Record {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        if let Some(customer) = self.customer.as_deref() {
            fields.push(customer);
        }
        fields
    }

    fn status_label(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn category_label(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Summarize for Record {
    fn status_bucket(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn amount_bucket(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    fn amount(&self) -> Money {
        self.amount
    }
}

fn sample() -> Vec<Record> {
    vec![
        Record::new("W1", "Active").customer("Rohit Rajput").category("AC"),
        Record::new("W2", "Expired").customer("Priya Sharma").category("Laptop"),
    ]
}

fn visible_ids(controller: &ListViewController<Record>) -> Vec<&str> {
    controller.visible().map(|r| r.id.as_str()).collect()
}

#[tokio::test]
async fn status_facet_narrows_rows_but_not_the_aggregate() {
    let mut controller = ListViewController::new();
    controller.load(async { Ok(sample()) }).await;

    controller.set_filter(FilterPatch::status(Facet::only("Active")));

    assert_eq!(visible_ids(&controller), vec!["W1"]);
    let agg = controller.aggregate();
    assert_eq!(agg.total, 2);
    assert_eq!(agg.count("Active"), 1);
    assert_eq!(agg.count("Expired"), 1);
}

#[tokio::test]
async fn empty_collection_renders_without_error() {
    let mut controller: ListViewController<Record> = ListViewController::new();
    controller.load(async { Ok(Vec::new()) }).await;
    controller.set_filter(FilterPatch::query("anything"));

    assert_eq!(controller.phase(), ViewPhase::Ready);
    assert_eq!(controller.visible_len(), 0);
    assert_eq!(controller.aggregate().total, 0);
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_rows_on_screen() {
    let mut controller = ListViewController::new();
    controller.load(async { Ok(sample()) }).await;

    controller
        .load(async { Err(FetchError::Rejected("boom".to_string())) })
        .await;

    assert_eq!(controller.phase(), ViewPhase::Error);
    assert_eq!(controller.error().map(|e| e.message.as_str()), Some("boom"));
    assert_eq!(visible_ids(&controller), vec!["W1", "W2"]);
    assert_eq!(controller.aggregate().total, 2);
}

#[tokio::test]
async fn reapplying_the_same_filter_is_idempotent() {
    let mut controller = ListViewController::new();
    controller.load(async { Ok(sample()) }).await;

    controller.set_filter(FilterPatch::query("roh"));
    let first = visible_ids(&controller)
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>();
    controller.set_filter(FilterPatch::query("roh"));

    assert_eq!(visible_ids(&controller), first);
}

#[tokio::test]
async fn filtering_preserves_source_order() {
    let rows = vec![
        Record::new("W3", "Active"),
        Record::new("W1", "Active"),
        Record::new("W2", "Active"),
    ];
    let mut controller = ListViewController::new();
    controller.load(async { Ok(rows) }).await;

    controller.set_filter(FilterPatch::status(Facet::only("Active")));
    assert_eq!(visible_ids(&controller), vec!["W3", "W1", "W2"]);
}

#[test]
fn late_response_cannot_overwrite_a_newer_one() {
    let mut controller: ListViewController<Record> = ListViewController::new();

    let first = controller.begin_load();
    let second = controller.begin_load();

    assert!(
        controller
            .resolve(second, Ok(vec![Record::new("FRESH", "Active")]))
            .is_applied()
    );
    assert_eq!(
        controller.resolve(first, Ok(vec![Record::new("STALE", "Active")])),
        Applied::Discarded
    );

    assert_eq!(visible_ids(&controller), vec!["FRESH"]);
}

#[test]
fn reload_shows_stale_rows_while_the_fetch_is_in_flight() {
    let mut controller = ListViewController::new();
    let ticket = controller.begin_load();
    controller.resolve(ticket, Ok(sample()));

    let _reload = controller.begin_load();

    assert_eq!(controller.phase(), ViewPhase::Loading);
    assert_eq!(controller.rows().len(), 2);
    assert_eq!(visible_ids(&controller), vec!["W1", "W2"]);
}

#[test]
fn filter_changes_during_a_reload_stay_consistent_with_stale_rows() {
    let mut controller = ListViewController::new();
    let ticket = controller.begin_load();
    controller.resolve(ticket, Ok(sample()));

    let _reload = controller.begin_load();
    controller.set_filter(FilterPatch::category(Facet::only("Laptop")));

    assert_eq!(visible_ids(&controller), vec!["W2"]);
}

#[test]
fn detached_controller_ignores_late_resolutions() {
    let mut controller: ListViewController<Record> = ListViewController::new();
    let ticket = controller.begin_load();

    controller.detach();

    assert_eq!(
        controller.resolve(ticket, Ok(sample())),
        Applied::Discarded
    );
    assert_eq!(controller.phase(), ViewPhase::Idle);
    assert!(controller.rows().is_empty());
}

#[tokio::test]
async fn filtered_scope_makes_the_aggregate_follow_the_filter() {
    let rows = vec![
        Record::new("T1", "Active").entry("credit", 1000_00),
        Record::new("T2", "Active").entry("debit", 300_00),
        Record::new("T3", "Expired").entry("credit", 150_00),
    ];

    let mut controller = ListViewController::with_scope(AggregateScope::Filtered);
    controller.load(async { Ok(rows) }).await;
    controller.set_filter(FilterPatch::status(Facet::only("Active")));

    let agg: &Aggregate = controller.aggregate();
    assert_eq!(agg.total, 2);
    assert_eq!(agg.sum("credit"), Money::new(1000_00));
    assert_eq!(agg.sum("debit"), Money::new(300_00));
}

#[tokio::test]
async fn view_model_is_consistent_with_filter_and_data() {
    let mut controller = ListViewController::new();
    controller.load(async { Ok(sample()) }).await;
    controller.set_filter(FilterPatch::query("priya"));

    let view = controller.view();
    assert_eq!(view.phase, ViewPhase::Ready);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].id, "W2");
    assert_eq!(view.aggregate.total, 2);
    assert!(view.error.is_none());
}

#[tokio::test]
async fn first_load_failure_reports_error_with_no_rows() {
    let mut controller: ListViewController<Record> = ListViewController::new();
    controller
        .load(async { Err(FetchError::Network("connection refused".to_string())) })
        .await;

    assert_eq!(controller.phase(), ViewPhase::Error);
    assert!(!controller.has_loaded());
    assert!(controller.rows().is_empty());
    assert!(controller.error().is_some_and(|e| e.retryable));
}
