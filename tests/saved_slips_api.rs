#[macro_use]
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};
use slip_gaji::model::{SalaryRecord, SavedSlip};
use slip_gaji::store::Storage;
use support::TestContext;

#[actix_web::test]
async fn saving_prepends_a_titled_snapshot() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post().uri("/api/v1/saved").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: SavedSlip = test::read_body_json(resp).await;
    assert_eq!(first.title, "Tanpa Nama - Januari 2026");

    let req = test::TestRequest::patch()
        .uri("/api/v1/record")
        .set_json(json!({ "employeeName": "Budi", "period": "Februari 2026" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post().uri("/api/v1/saved").to_request();
    let second: SavedSlip = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second.title, "Budi - Februari 2026");
    assert_ne!(first.id, second.id);

    let req = test::TestRequest::get().uri("/api/v1/saved").to_request();
    let list: Vec<SavedSlip> = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, [second.id.as_str(), first.id.as_str()]);
    assert_eq!(list[1].data.employee_name, "");
}

#[actix_web::test]
async fn load_requires_confirmation() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post().uri("/api/v1/saved").to_request();
    let slip: SavedSlip = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/record")
        .set_json(json!({ "employeeName": "Unsaved" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/saved/{}/load", slip.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_REQUIRED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("confirm=true"));

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/saved/{}/load?confirm=false", slip.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Load cancelled");

    let req = test::TestRequest::get().uri("/api/v1/record").to_request();
    let record: SalaryRecord = test::call_and_read_body_json(&app, req).await;
    assert_eq!(record.employee_name, "Unsaved");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/saved/{}/load?confirm=true", slip.id))
        .to_request();
    let record: SalaryRecord = test::call_and_read_body_json(&app, req).await;
    assert_eq!(record.employee_name, "");

    let req = test::TestRequest::get().uri("/api/v1/saved").to_request();
    let list: Vec<SavedSlip> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.len(), 1);
}

#[actix_web::test]
async fn delete_removes_exactly_one_entry() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let mut ids = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post().uri("/api/v1/saved").to_request();
        let slip: SavedSlip = test::call_and_read_body_json(&app, req).await;
        ids.push(slip.id);
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/saved/{}", ids[1]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::PRECONDITION_REQUIRED
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/saved/{}?confirm=true", ids[1]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/saved").to_request();
    let list: Vec<SavedSlip> = test::call_and_read_body_json(&app, req).await;
    let remaining: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(remaining, [ids[2].as_str(), ids[0].as_str()]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/saved/{}?confirm=true", ids[1]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn saved_slips_survive_a_restart() {
    let ctx = TestContext::new();
    {
        let app = test_app!(ctx);
        let req = test::TestRequest::patch()
            .uri("/api/v1/record")
            .set_json(json!({ "employeeName": "Rina" }))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::post().uri("/api/v1/saved").to_request();
        test::call_service(&app, req).await;
    }

    let ctx = ctx.reopen();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/saved").to_request();
    let list: Vec<SavedSlip> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Rina - Januari 2026");

    let req = test::TestRequest::get().uri("/api/v1/record").to_request();
    let record: SalaryRecord = test::call_and_read_body_json(&app, req).await;
    assert_eq!(record.employee_name, "Rina");
}

#[actix_web::test]
async fn old_snapshots_gain_new_fields_on_load() {
    let ctx = TestContext::new();
    ctx.storage
        .set_item(
            "saved-slips",
            r#"[{"id":"legacy","title":"Lama","timestamp":1,"data":{"employeeName":"Lama","allowances":null}}]"#,
        )
        .unwrap();
    let ctx = ctx.reopen();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/saved/legacy/load?confirm=true")
        .to_request();
    let record: SalaryRecord = test::call_and_read_body_json(&app, req).await;

    assert_eq!(record.employee_name, "Lama");
    assert_eq!(record.hr_title, "HRD Manager");
    assert_eq!(record.allowances, SalaryRecord::default().allowances);
}

#[actix_web::test]
async fn one_damaged_snapshot_does_not_wipe_the_list() {
    let raw = r#"[
        {"id":"good","title":"Baik","timestamp":1,"data":{"employeeName":"Baik"}},
        {"id":"odd","title":"Aneh","timestamp":2,"data":{"allowances":[{"id":"1","name":"Makan","amount":null}]}},
        "garbage"
    ]"#;
    let ctx = TestContext::new();
    ctx.storage.set_item("saved-slips", raw).unwrap();
    let ctx = ctx.reopen();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/v1/saved").to_request();
    let list: Vec<SavedSlip> = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["good", "odd"]);
    assert_eq!(list[1].data.allowances[0].amount, 0);

    // nothing is rewritten until the list changes
    assert_eq!(ctx.storage.get_item("saved-slips").unwrap().as_deref(), Some(raw));
}
