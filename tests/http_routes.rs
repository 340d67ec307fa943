mod common;

use axum::http::StatusCode;
use common::{TestClient, body_json, body_text, location, setup};
use inventory_tracker::{routes::create_app, services::item_service};
use serde_json::json;

#[tokio::test]
async fn pages_require_login() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state, &config));

    for uri in ["/inventory", "/sales", "/edit/1", "/delete/1"] {
        let response = client.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/auth/login", "{uri}");
    }

    let response = client.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Log in"));
    Ok(())
}

#[tokio::test]
async fn api_requires_login() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state, &config));

    let response = client.get("/api/items").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Authentication required");
    assert_eq!(body["data"]["error"], "unauthorized");

    let response = client
        .send_json("POST", "/api/sales", json!({ "item_id": 1, "quantity": 1 }))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["error"], "unauthorized");
    Ok(())
}

#[tokio::test]
async fn wrong_password_flashes_error() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state, &config));
    client
        .post_form(
            "/auth/register",
            "username=clerk&password=password123&confirm_password=password123",
        )
        .await;

    let response = client
        .post_form("/auth/login", "username=clerk&password=nope")
        .await;
    assert_eq!(location(&response), "/auth/login");

    let page = body_text(client.get("/auth/login").await).await;
    assert!(page.contains("Invalid username or password"));

    let response = client.get("/inventory").await;
    assert_eq!(location(&response), "/auth/login");
    Ok(())
}

#[tokio::test]
async fn add_sell_and_guarded_delete_through_pages() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state.clone(), &config));
    client.sign_in("clerk", "password123").await;

    let response = client
        .post_form("/add", "name=Widget&desc=Blue+widget&quantity=10&price=2.5")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/inventory");

    let items = item_service::list_items(&state).await?;
    assert_eq!(items.len(), 1);
    let widget = &items[0];
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.description, "Blue widget");

    let page = body_text(client.get("/inventory").await).await;
    assert!(page.contains("added."));
    assert!(page.contains("2.50"));
    assert!(page.contains(&format!("/static/qr_codes/item_{}.png", widget.id)));

    let image = client
        .get(&format!("/static/qr_codes/item_{}.png", widget.id))
        .await;
    assert_eq!(image.status(), StatusCode::OK);

    let response = client
        .post_form("/sell", &format!("item_id={}&quantity=4", widget.id))
        .await;
    assert_eq!(location(&response), "/sales");
    assert_eq!(item_service::get_item(&state, widget.id).await?.quantity, 6);

    let page = body_text(client.get("/sales").await).await;
    assert!(page.contains("Sale recorded successfully!"));
    assert!(page.contains("Widget"));

    let response = client
        .post_form("/sell", &format!("item_id={}&quantity=10", widget.id))
        .await;
    assert_eq!(location(&response), "/inventory");
    assert_eq!(item_service::get_item(&state, widget.id).await?.quantity, 6);
    let page = body_text(client.get("/inventory").await).await;
    assert!(page.contains("Insufficient quantity in stock"));

    let response = client.get(&format!("/delete/{}", widget.id)).await;
    assert_eq!(location(&response), "/inventory");
    assert!(item_service::get_item(&state, widget.id).await.is_ok());
    let page = body_text(client.get("/inventory").await).await;
    assert!(page.contains("Cannot delete item because there are completed sales orders against it."));
    Ok(())
}

#[tokio::test]
async fn malformed_numbers_are_reported_not_fatal() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state.clone(), &config));
    client.sign_in("clerk", "password123").await;

    let response = client
        .post_form("/add", "name=Widget&desc=&quantity=ten&price=2.5")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(item_service::list_items(&state).await?.is_empty());

    let page = body_text(client.get("/inventory").await).await;
    assert!(page.contains("Quantity must be a whole number"));

    let response = client.post_form("/sell", "item_id=1&quantity=").await;
    assert_eq!(location(&response), "/inventory");
    let page = body_text(client.get("/inventory").await).await;
    assert!(page.contains("Quantity must be a whole number"));
    Ok(())
}

#[tokio::test]
async fn edit_page_updates_item() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state.clone(), &config));
    client.sign_in("clerk", "password123").await;
    let item = common::add_item(&state, "Widget", 10, 2.5).await;

    let response = client.get(&format!("/edit/{}", item.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("value=\"Widget\""));

    let response = client
        .post_form(
            &format!("/edit/{}", item.id),
            "name=Gizmo&desc=Renamed&quantity=7&price=3",
        )
        .await;
    assert_eq!(location(&response), "/inventory");
    let updated = item_service::get_item(&state, item.id).await?;
    assert_eq!(updated.name, "Gizmo");
    assert_eq!(updated.description, "Renamed");
    assert_eq!(updated.quantity, 7);
    assert_eq!(updated.price, 3.0);

    let response = client.get("/edit/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unchanged_edit_keeps_exact_price() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state.clone(), &config));
    client.sign_in("clerk", "password123").await;
    let item = common::add_item(&state, "Widget", 10, 2.555).await;

    let page = body_text(client.get(&format!("/edit/{}", item.id)).await).await;
    assert!(page.contains("value=\"2.555\""));

    let response = client
        .post_form(
            &format!("/edit/{}", item.id),
            "name=Widget&desc=Widget+description&quantity=10&price=2.555",
        )
        .await;
    assert_eq!(location(&response), "/inventory");
    assert_eq!(item_service::get_item(&state, item.id).await?, item);
    Ok(())
}

#[tokio::test]
async fn delete_page_removes_unsold_item() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state.clone(), &config));
    client.sign_in("clerk", "password123").await;
    let item = common::add_item(&state, "Widget", 10, 2.5).await;

    let response = client.get(&format!("/delete/{}", item.id)).await;
    assert_eq!(location(&response), "/inventory");
    assert!(item_service::list_items(&state).await?.is_empty());

    let page = body_text(client.get("/inventory").await).await;
    assert!(page.contains("Item successfully deleted."));
    Ok(())
}

#[tokio::test]
async fn json_api_flow() -> anyhow::Result<()> {
    let (state, config, _dir) = setup().await?;
    let mut client = TestClient::new(create_app(state, &config));
    client.sign_in("clerk", "password123").await;

    let response = client
        .send_json(
            "POST",
            "/api/items",
            json!({ "name": "Widget", "description": "Blue", "quantity": 10, "price": 2.5 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().expect("item id");
    assert_eq!(body["data"]["quantity"], 10);

    let response = client
        .send_json("POST", "/api/sales", json!({ "item_id": id, "quantity": 4 }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["remaining"], 6);
    assert_eq!(body["data"]["sale"]["quantity_sold"], 4);

    let response = client
        .send_json("POST", "/api/sales", json!({ "item_id": id, "quantity": 10 }))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["data"]["error"], "insufficient_stock");

    let response = client
        .send_json("POST", "/api/sales", json!({ "item_id": id, "quantity": 0 }))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .send_json(
            "POST",
            "/api/items",
            json!({ "name": "Broken", "quantity": -1, "price": 1.0 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = client
        .send_json("DELETE", &format!("/api/items/{id}"), json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(client.get("/api/sales").await).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["item_name"], "Widget");

    let response = client.get(&format!("/api/items/{id}")).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["quantity"], 6);

    let body = body_json(client.get(&format!("/api/items/{id}/sales")).await).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["quantity_sold"], 4);

    let response = client.get("/api/items/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = client.get("/api/items/9999/sales").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}
