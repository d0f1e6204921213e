use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use eventmate_client::api::ApiClient;
use eventmate_client::booking::{BookingFlow, FlowState};
use eventmate_client::config::{ApiConfig, PaymentConfig};
use eventmate_client::seating::Toggle;
use eventmate_client::session::SessionStore;
use eventmate_client::Error;

const SHOW_DATE: &str = "2026-09-01T19:30:00";

fn flow_for(server: &MockServer, event_id: i64) -> BookingFlow {
    let api = ApiClient::from_config(
        &ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout_seconds: 5,
        },
        SessionStore::in_memory(),
    );
    let payment = PaymentConfig {
        success_url: "http://localhost:3000/payment/success".into(),
        cancel_url: "http://localhost:3000/payment/cancel".into(),
    };
    BookingFlow::new(api, payment, event_id, None)
}

async fn mount_event(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "title": "An Evening of Jazz",
            "date": SHOW_DATE,
            "sections": [
                {"id": 3, "name": "Standard", "rows": 1, "cols": 4, "price": 100.0}
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_booked_seats(server: &MockServer, seats: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/bookings/event/1/seats"))
        .and(query_param("showDate", SHOW_DATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(seats))
        .mount(server)
        .await;
}

#[tokio::test]
async fn load_select_and_submit_redirects_to_checkout() {
    let server = MockServer::start().await;
    mount_event(&server).await;
    mount_booked_seats(&server, json!(["Standard-1-1"])).await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(body_partial_json(json!({
            "eventId": 1,
            "showDate": SHOW_DATE,
            "paymentMethod": "CARD",
            "tickets": [{"sectionId": 3, "row": 1, "col": 2}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookingId": 55,
            "paymentStatus": "PENDING",
            "totalAmount": 100.0
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-checkout-session"))
        .and(body_partial_json(json!({"bookingId": 55, "amount": 100.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://checkout.example/session/55"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, 1);
    flow.load().await.unwrap();
    assert_eq!(flow.state(), FlowState::Ready);
    assert!(flow.booked().contains("Standard-1-1"));

    // The booked seat is inert; an available one selects.
    assert_eq!(flow.toggle_seat("Standard-1-1").unwrap(), Toggle::AlreadyBooked);
    assert_eq!(flow.toggle_seat("Standard-1-2").unwrap(), Toggle::Selected);
    assert_eq!(flow.total_price(), 100.0);

    let redirect = flow.submit().await.unwrap();
    assert_eq!(flow.state(), FlowState::Redirected);
    assert_eq!(redirect.booking_id, 55);
    assert_eq!(redirect.url, "https://checkout.example/session/55");
}

#[tokio::test]
async fn booked_seats_failure_keeps_the_page_usable() {
    let server = MockServer::start().await;
    mount_event(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/event/1/seats"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, 1);
    flow.load().await.unwrap();

    assert_eq!(flow.state(), FlowState::Ready);
    assert!(flow.booked().is_empty());
    assert_eq!(flow.toggle_seat("Standard-1-1").unwrap(), Toggle::Selected);
    let notices = flow.take_notices();
    assert!(notices.iter().any(|n| n.message.contains("booked seats")));
}

#[tokio::test]
async fn rejected_booking_returns_to_ready_with_selection_intact() {
    let server = MockServer::start().await;
    mount_event(&server).await;
    mount_booked_seats(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "Seat Standard-1-2 is already booked"})),
        )
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, 1);
    flow.load().await.unwrap();
    flow.toggle_seat("Standard-1-2").unwrap();

    let err = flow.submit().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 409, .. }));
    assert_eq!(flow.state(), FlowState::Ready);
    assert_eq!(flow.selection().len(), 1);
    assert!(flow.selection().contains("Standard-1-2"));

    // The server's own message is what the user sees.
    let notices = flow.take_notices();
    assert!(notices.iter().any(|n| n.message.contains("already booked")));
}

#[tokio::test]
async fn checkout_failure_leaves_the_pending_booking_recoverable() {
    let server = MockServer::start().await;
    mount_event(&server).await;
    mount_booked_seats(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookingId": 77,
            "paymentStatus": "PENDING",
            "totalAmount": 100.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-checkout-session"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"error": "gateway down"})))
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, 1);
    flow.load().await.unwrap();
    flow.toggle_seat("Standard-1-3").unwrap();

    let err = flow.submit().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 502, .. }));
    assert_eq!(flow.state(), FlowState::Ready);
    let notices = flow.take_notices();
    assert!(notices.iter().any(|n| n.message.contains("booking #77")));
}

#[tokio::test]
async fn pay_now_reuses_the_recorded_booking_total() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bookings/my-bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"bookingId": 77, "paymentStatus": "PENDING", "totalAmount": 300.0},
            {"bookingId": 78, "paymentStatus": "PAID", "totalAmount": 50.0}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-checkout-session"))
        .and(body_partial_json(json!({"bookingId": 77, "amount": 300.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://checkout.example/session/77"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::from_config(
        &ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout_seconds: 5,
        },
        SessionStore::in_memory(),
    );
    let payment = PaymentConfig {
        success_url: "http://localhost:3000/payment/success".into(),
        cancel_url: "http://localhost:3000/payment/cancel".into(),
    };

    let session = api.pay_now(77, &payment).await.unwrap();
    assert_eq!(session.url, "https://checkout.example/session/77");

    // A settled booking cannot be paid again.
    let err = api.pay_now(78, &payment).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn event_load_failure_surfaces_and_stays_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&server)
        .await;

    let mut flow = flow_for(&server, 1);
    assert!(flow.load().await.is_err());
    assert_eq!(flow.state(), FlowState::Loading);
    let notices = flow.take_notices();
    assert!(notices.iter().any(|n| n.message.contains("event details")));
}
