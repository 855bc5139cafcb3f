#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use catalog_daemon::batch::BatchClass;
use catalog_daemon::server::proto::catalog_daemon_server::CatalogDaemon;
use catalog_daemon::server::proto::{
    CreateItemRequest, GetHealthRequest, ItemOrder, ListItemsRequest, ReorderSelectedRequest,
    SelectItemRequest,
};
use common::{flush_after, seeded_scheduler, service};
use tonic::Request;

fn list(offset: u32, limit: u32, search: &str) -> Request<ListItemsRequest> {
    Request::new(ListItemsRequest {
        offset,
        limit,
        search: search.to_string(),
    })
}

fn error_code(error: &str) -> String {
    let json: serde_json::Value = serde_json::from_str(error).unwrap();
    json["messages"][0]["code"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_list_available_defaults_and_pagination() {
    let scheduler = seeded_scheduler(50);
    let svc = service(&scheduler);

    let (resp, _) = tokio::join!(
        svc.list_available(list(0, 0, "")),
        flush_after(&scheduler, BatchClass::Get, 1)
    );
    let resp = resp.unwrap().into_inner();
    assert!(resp.success);
    assert_eq!(resp.items.len(), 20);
    assert_eq!(resp.items[0].id, 1);
    assert_eq!(resp.items[0].name, "Element 1");

    let page = resp.pagination.unwrap();
    assert_eq!(page.limit, 20);
    assert_eq!(page.total, 50);
    assert!(page.has_more);
}

#[tokio::test]
async fn test_identical_list_requests_coalesce() {
    let scheduler = seeded_scheduler(50);
    let svc = service(&scheduler);

    let (a, b, summary) = tokio::join!(
        svc.list_available(list(10, 5, "1")),
        svc.list_available(list(10, 5, "1")),
        flush_after(&scheduler, BatchClass::Get, 1)
    );
    assert_eq!(summary.processed, 1);
    let a = a.unwrap().into_inner();
    let b = b.unwrap().into_inner();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_create_select_reorder_flow() {
    let scheduler = seeded_scheduler(10);
    let svc = service(&scheduler);

    let (created, _) = tokio::join!(
        svc.create_item(Request::new(CreateItemRequest {
            custom_id: Some(500)
        })),
        flush_after(&scheduler, BatchClass::Add, 1)
    );
    let created = created.unwrap().into_inner();
    assert!(created.success);
    assert_eq!(created.item.unwrap().name, "Custom Element 500");

    let (s1, s2, _) = tokio::join!(
        svc.select_item(Request::new(SelectItemRequest { id: 500 })),
        svc.select_item(Request::new(SelectItemRequest { id: 3 })),
        flush_after(&scheduler, BatchClass::Update, 2)
    );
    assert!(s1.unwrap().into_inner().success);
    assert!(s2.unwrap().into_inner().success);

    let (reordered, _) = tokio::join!(
        svc.reorder_selected(Request::new(ReorderSelectedRequest {
            order: Some(ItemOrder { ids: vec![3, 500] }),
        })),
        flush_after(&scheduler, BatchClass::Update, 1)
    );
    assert!(reordered.unwrap().into_inner().success);

    let (selected, _) = tokio::join!(
        svc.list_selected(list(0, 0, "")),
        flush_after(&scheduler, BatchClass::Get, 1)
    );
    let selected = selected.unwrap().into_inner();
    let ids: Vec<i64> = selected.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![3, 500]);
    assert_eq!(selected.pagination.unwrap().total, 2);
}

#[tokio::test]
async fn test_duplicate_create_reports_structured_error() {
    let scheduler = seeded_scheduler(10);
    let svc = service(&scheduler);

    let (resp, _) = tokio::join!(
        svc.create_item(Request::new(CreateItemRequest { custom_id: Some(4) })),
        flush_after(&scheduler, BatchClass::Add, 1)
    );
    let resp = resp.unwrap().into_inner();
    assert!(!resp.success);
    assert!(resp.item.is_none());
    assert_eq!(error_code(&resp.error), "DUPLICATE_ID");
}

#[tokio::test]
async fn test_select_unknown_item_reports_not_found() {
    let scheduler = seeded_scheduler(10);
    let svc = service(&scheduler);

    let (resp, _) = tokio::join!(
        svc.select_item(Request::new(SelectItemRequest { id: 999 })),
        flush_after(&scheduler, BatchClass::Update, 1)
    );
    let resp = resp.unwrap().into_inner();
    assert!(!resp.success);
    assert_eq!(error_code(&resp.error), "ITEM_NOT_FOUND");
}

#[tokio::test]
async fn test_reorder_without_order_is_rejected_before_queueing() {
    let scheduler = seeded_scheduler(10);
    let svc = service(&scheduler);

    let resp = svc
        .reorder_selected(Request::new(ReorderSelectedRequest { order: None }))
        .await
        .unwrap()
        .into_inner();
    assert!(!resp.success);
    assert_eq!(error_code(&resp.error), "INVALID_ORDER");
    assert_eq!(scheduler.pending(BatchClass::Update), 0);
}

#[tokio::test]
async fn test_health_reports_counters() {
    let scheduler = seeded_scheduler(25);
    let svc = service(&scheduler);

    let (resp, _) = tokio::join!(
        svc.get_health(Request::new(GetHealthRequest {})),
        flush_after(&scheduler, BatchClass::Get, 1)
    );
    let resp = resp.unwrap().into_inner();
    assert_eq!(resp.status, "ok");
    assert_eq!(resp.total_items, 25);
    assert_eq!(resp.selected_count, 0);
    assert_eq!(resp.next_id, 26);
}

#[tokio::test]
async fn test_repeated_select_joins_first_entry_across_deselect() {
    let scheduler = seeded_scheduler(10);
    let svc = service(&scheduler);

    let (first, deselected, repeated, summary) = tokio::join!(
        svc.select_item(Request::new(SelectItemRequest { id: 2 })),
        svc.deselect_item(Request::new(SelectItemRequest { id: 2 })),
        svc.select_item(Request::new(SelectItemRequest { id: 2 })),
        flush_after(&scheduler, BatchClass::Update, 2)
    );
    assert_eq!(summary.processed, 2);
    assert!(first.unwrap().into_inner().success);
    assert!(deselected.unwrap().into_inner().success);
    assert!(repeated.unwrap().into_inner().success);

    let (selected, _) = tokio::join!(
        svc.list_selected(list(0, 0, "")),
        flush_after(&scheduler, BatchClass::Get, 1)
    );
    let selected = selected.unwrap().into_inner();
    assert!(selected.items.is_empty());
    assert_eq!(selected.pagination.unwrap().total, 0);
}
