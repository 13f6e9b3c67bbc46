//! Repositories and request encoding against an in-process backend

mod common;

use common::{FakeTransport, client, menu_entry_json, restaurant_json};
use reqwest::Method;
use searchdish_api_client::ApiError;
use searchdish_api_client::models::{
    ContactMessage, ContactSubject, CreateRestaurantDto, CreateRestaurantDishDto, Restaurant,
    UpdateDishDto, User, parse_opening_hours,
};
use searchdish_api_client::payload::ImageUpload;
use searchdish_api_client::storage::{ACCESS_TOKEN_KEY, MemoryTokenStore, TokenStore};
use searchdish_api_client::transport::{RawResponse, RequestBody};
use serde_json::json;
use std::sync::Arc;

fn restaurant_dto() -> CreateRestaurantDto {
    CreateRestaurantDto {
        name: "Chez Fatou".to_string(),
        description: "Cuisine sénégalaise familiale".to_string(),
        address: "12 rue Carnot".to_string(),
        country: "Dakar".to_string(),
        phone: "771234567".to_string(),
        website: None,
        is_active: false,
        opening_hours: Some(parse_opening_hours(&["monday=08:00-22:00"]).unwrap()),
        user_id: "u1".to_string(),
    }
}

#[tokio::test]
async fn bearer_is_attached_only_when_stored() {
    let transport = FakeTransport::new();
    transport.json(Method::GET, "dish", 200, json!([]));
    let store = Arc::new(MemoryTokenStore::new());
    let api = client(&transport, &store);

    api.dishes().find_all().await.unwrap();
    store.set(ACCESS_TOKEN_KEY, "T").unwrap();
    api.dishes().find_all().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].bearer, None);
    assert_eq!(requests[1].bearer.as_deref(), Some("T"));
    assert_ne!(requests[0].request_id, requests[1].request_id);
}

#[tokio::test]
async fn create_restaurant_without_image_sends_json() {
    let transport = FakeTransport::new();
    transport.json(Method::POST, "restaurant", 201, restaurant_json(1, "Chez Fatou"));
    let store = Arc::new(MemoryTokenStore::new());

    let created = client(&transport, &store)
        .restaurants()
        .create(&restaurant_dto(), None)
        .await
        .unwrap();

    assert_eq!(created.id, "r1");
    let sent = &transport.requests_to(&Method::POST, "restaurant")[0];
    let RequestBody::Json(body) = &sent.body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["openingHours"]["monday"], "08:00-22:00");
    assert_eq!(body["isActive"], false);
}

#[tokio::test]
async fn create_restaurant_with_image_sends_multipart() {
    let transport = FakeTransport::new();
    transport.json(Method::POST, "restaurant", 201, restaurant_json(1, "Chez Fatou"));
    let store = Arc::new(MemoryTokenStore::new());
    let image = ImageUpload::new("facade.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);

    client(&transport, &store)
        .restaurants()
        .create(&restaurant_dto(), Some(image.clone()))
        .await
        .unwrap();

    let sent = &transport.requests_to(&Method::POST, "restaurant")[0];
    let RequestBody::Multipart(form) = &sent.body else {
        panic!("expected a multipart body");
    };
    assert_eq!(form.file.as_ref(), Some(&image));
    assert_eq!(form.field("openingHours"), Some(r#"{"monday":"08:00-22:00"}"#));
    assert_eq!(form.field("isActive"), Some("false"));
    assert_eq!(form.field("website"), None);
}

#[tokio::test]
async fn paginated_queries_are_passed_as_parameters() {
    let transport = FakeTransport::new();
    transport.json(
        Method::GET,
        "restaurantDish/paginate",
        200,
        json!({"data": [], "total": 0, "totalPage": 0, "page": 2, "limit": 5}),
    );
    let store = Arc::new(MemoryTokenStore::new());

    client(&transport, &store)
        .restaurant_dishes()
        .paginate_by_city(2, 5, "Saint-Louis & Thiès")
        .await
        .unwrap();

    let sent = &transport.requests()[0];
    assert_eq!(sent.query_param("page"), Some("2"));
    assert_eq!(sent.query_param("limit"), Some("5"));
    assert_eq!(sent.query_param("countryName"), Some("Saint-Louis & Thiès"));
}

#[tokio::test]
async fn menu_of_a_restaurant_accepts_a_single_object() {
    let transport = FakeTransport::new();
    transport.json(
        Method::GET,
        "restaurantDish/restaurant/r1",
        200,
        menu_entry_json("m1", "Yassa"),
    );
    transport.json(
        Method::GET,
        "restaurantDish/restaurant/r2",
        200,
        json!([menu_entry_json("m2", "Mafé"), menu_entry_json("m3", "Thiéré")]),
    );
    let store = Arc::new(MemoryTokenStore::new());
    let api = client(&transport, &store).restaurant_dishes();

    let one = api.find_by_restaurant("r1").await.unwrap();
    let many = api.find_by_restaurant("r2").await.unwrap();

    assert_eq!(one.len(), 1);
    assert_eq!(one[0].dish_name(), "Yassa");
    assert_eq!(many.len(), 2);
}

#[tokio::test]
async fn create_menu_entry_uses_default_currency() {
    let transport = FakeTransport::new();
    transport.json(Method::POST, "restaurantDish", 201, menu_entry_json("m1", "Yassa"));
    let store = Arc::new(MemoryTokenStore::new());
    let dto = CreateRestaurantDishDto {
        restaurant_id: "r1".to_string(),
        dish_id: "d1".to_string(),
        price: 2500.0,
        description: "Poulet yassa".to_string(),
        ..Default::default()
    };

    client(&transport, &store)
        .restaurant_dishes()
        .create(&dto)
        .await
        .unwrap();

    let RequestBody::Json(body) = &transport.requests()[0].body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["currency"], "Fcfa");
    assert_eq!(body["isAvailable"], true);
    assert_eq!(body["restaurantId"], "r1");
}

#[tokio::test]
async fn dish_update_with_image_sends_only_set_fields() {
    let transport = FakeTransport::new();
    transport.json(Method::PATCH, "dish/d1", 200, json!({"id": "d1", "name": "Yassa"}));
    let store = Arc::new(MemoryTokenStore::new());
    let dto = UpdateDishDto {
        description: Some("Poulet au citron".to_string()),
        ..Default::default()
    };
    let image = ImageUpload::new("yassa.png", "image/png", vec![1, 2, 3]);

    client(&transport, &store)
        .dishes()
        .update("d1", &dto, Some(image))
        .await
        .unwrap();

    let RequestBody::Multipart(form) = &transport.requests()[0].body else {
        panic!("expected a multipart body");
    };
    assert_eq!(form.fields, vec![("description".to_string(), "Poulet au citron".to_string())]);
}

#[tokio::test]
async fn delete_accepts_an_empty_body() {
    let transport = FakeTransport::new();
    transport.on(Method::DELETE, "restaurantDish/m1", |_| RawResponse::new(204, ""));
    let store = Arc::new(MemoryTokenStore::new());

    client(&transport, &store)
        .restaurant_dishes()
        .delete("m1")
        .await
        .unwrap();
}

#[tokio::test]
async fn errors_carry_status_and_message() {
    let transport = FakeTransport::new();
    transport.json(
        Method::POST,
        "dish",
        400,
        json!({"message": ["name should not be empty"], "error": "Bad Request"}),
    );
    let store = Arc::new(MemoryTokenStore::new());

    let err = client(&transport, &store)
        .dishes()
        .create(&Default::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::ApiResponse { status: 400, ref message, .. } if message == "name should not be empty"
    ));
}

#[tokio::test]
async fn approve_activates_owner_and_restaurant() {
    let transport = FakeTransport::new();
    transport.json(Method::PATCH, "users/u3", 200, json!({"id": "u3"}));
    transport.json(Method::PATCH, "restaurant/activate/r3", 200, json!({"id": "r3"}));
    let store = Arc::new(MemoryTokenStore::new());
    let restaurant: Restaurant = serde_json::from_value(restaurant_json(3, "Le Lagon")).unwrap();

    client(&transport, &store)
        .restaurants()
        .approve(&restaurant)
        .await
        .unwrap();

    assert_eq!(transport.requests_to(&Method::PATCH, "users/u3").len(), 1);
    assert_eq!(
        transport
            .requests_to(&Method::PATCH, "restaurant/activate/r3")
            .len(),
        1
    );
}

#[tokio::test]
async fn approve_fails_when_either_activation_fails() {
    let transport = FakeTransport::new();
    transport.json(Method::PATCH, "users/u3", 200, json!({"id": "u3"}));
    transport.json(
        Method::PATCH,
        "restaurant/activate/r3",
        403,
        json!({"message": "Forbidden resource"}),
    );
    let store = Arc::new(MemoryTokenStore::new());
    let restaurant: Restaurant = serde_json::from_value(restaurant_json(3, "Le Lagon")).unwrap();

    let err = client(&transport, &store)
        .restaurants()
        .approve(&restaurant)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn contact_attaches_the_sender() {
    let transport = FakeTransport::new();
    transport.json(Method::POST, "contact", 201, json!({"ok": true}));
    let store = Arc::new(MemoryTokenStore::new());
    let sender: User = serde_json::from_value(
        json!({"id": "u9", "email": "awa@searchdish.sn", "name": "Awa", "role": "CUSTOMER"}),
    )
    .unwrap();
    let message = ContactMessage {
        subject: ContactSubject::Appreciation,
        message: "Le thieboudienne était parfait.".to_string(),
        ..Default::default()
    };

    client(&transport, &store)
        .contact()
        .send(&sender, message)
        .await
        .unwrap();

    let RequestBody::Json(body) = &transport.requests()[0].body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["userId"], "u9");
    assert_eq!(body["userEmail"], "awa@searchdish.sn");
    assert_eq!(body["name"], "Awa");
    assert_eq!(body["subject"], "appreciation");
}
