use payment_service::domain::outcome::PaymentStatus;
use payment_service::gateways::network::{NetworkGateway, NetworkSettings, MISSING_PAYMENT_METHOD};
use payment_service::gateways::{ChargeRequest, PaymentGateway};
use rust_decimal_macros::dec;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer, timeout: Duration) -> NetworkGateway {
    NetworkGateway::new(NetworkSettings {
        secret_key: "sk_test_123".to_string(),
        base_url: server.uri(),
        timeout,
    })
    .unwrap()
}

fn card_charge(amount: rust_decimal::Decimal) -> ChargeRequest {
    ChargeRequest::new(amount, "EUR", "order-123").with_payment_method(Some("pm_card_visa".to_string()))
}

#[tokio::test]
async fn charge_sends_minor_units_and_order_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(header("authorization", "Bearer sk_test_123"))
        .and(body_string_contains("amount=4990"))
        .and(body_string_contains("currency=eur"))
        .and(body_string_contains("confirm=true"))
        .and(body_string_contains("payment_method=pm_card_visa"))
        .and(body_string_contains("metadata%5Border_id%5D=order-123"))
        .and(body_string_contains("description=Order+order-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pi_123",
            "status": "succeeded",
            "amount": 4990,
            "currency": "eur",
            "client_secret": "pi_123_secret_abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .charge(card_charge(dec!(49.90)))
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Succeeded);
    assert_eq!(outcome.payment_id, "pi_123");
    assert_eq!(outcome.transaction_id, "pi_123");
    assert_eq!(outcome.amount, dec!(49.90));
    assert_eq!(outcome.currency, "EUR");
    assert!(outcome.error_message.is_none());
    assert_eq!(outcome.client_secret.as_deref(), Some("pi_123_secret_abc"));
}

#[tokio::test]
async fn charge_includes_receipt_email_when_given() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(body_string_contains("receipt_email=buyer%40example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pi_mail",
            "status": "succeeded",
            "amount": 100,
            "currency": "eur"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = card_charge(dec!(1)).with_customer_email(Some("buyer@example.com".to_string()));
    let outcome = gateway(&server, Duration::from_secs(5)).charge(request).await;
    assert!(outcome.success);
}

#[tokio::test]
async fn charge_without_payment_method_fails_without_calling_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .charge(ChargeRequest::new(dec!(10), "EUR", "order-1"))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Failed);
    assert_eq!(outcome.error_message.as_deref(), Some(MISSING_PAYMENT_METHOD));
}

#[tokio::test]
async fn unconfirmed_charge_is_not_successful() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pi_3ds",
            "status": "requires_action",
            "amount": 1999,
            "currency": "eur",
            "client_secret": "pi_3ds_secret"
        })))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .charge(card_charge(dec!(19.99)))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Pending);
    assert_eq!(outcome.payment_id, "pi_3ds");
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("payment status: requires_action")
    );
    assert_eq!(outcome.client_secret.as_deref(), Some("pi_3ds_secret"));
}

#[tokio::test]
async fn declined_charge_becomes_failed_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "error": {
                "type": "card_error",
                "code": "card_declined",
                "decline_code": "generic_decline",
                "message": "Your card was declined."
            }
        })))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .charge(card_charge(dec!(10)))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Failed);
    assert!(outcome.payment_id.is_empty());
    assert!(outcome.transaction_id.is_empty());
    assert_eq!(outcome.amount, dec!(10));
    assert_eq!(outcome.error_message.as_deref(), Some("Your card was declined."));
}

#[tokio::test]
async fn charge_timeout_becomes_failed_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_millis(100))
        .charge(card_charge(dec!(10)))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Failed);
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("payment network request timed out")
    );
}

#[tokio::test]
async fn unreachable_network_becomes_failed_outcome() {
    let gateway = NetworkGateway::new(NetworkSettings {
        secret_key: "sk_test_123".to_string(),
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: Duration::from_secs(1),
    })
    .unwrap();

    let outcome = gateway.charge(card_charge(dec!(10))).await;
    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Failed);
    assert!(outcome.error_message.is_some());
}

#[tokio::test]
async fn status_lookup_converts_minor_units_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/payment_intents/pi_123"))
        .and(header("authorization", "Bearer sk_test_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pi_123",
            "status": "succeeded",
            "amount": 1999,
            "currency": "eur"
        })))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .get_status("pi_123")
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Succeeded);
    assert_eq!(outcome.amount, dec!(19.99));
    assert_eq!(outcome.currency, "EUR");
    assert!(outcome.error_message.is_none());
}

#[tokio::test]
async fn status_lookup_of_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/payment_intents/pi_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {
                "type": "invalid_request_error",
                "code": "resource_missing",
                "message": "No such payment_intent: 'pi_missing'"
            }
        })))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .get_status("pi_missing")
        .await;

    assert_eq!(outcome.status, PaymentStatus::NotFound);
    assert!(!outcome.success);
    assert_eq!(outcome.error_message.as_deref(), Some("Payment not found"));
}

#[tokio::test]
async fn status_lookup_backend_failure_becomes_error_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/payment_intents/pi_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .get_status("pi_1")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Error);
    assert_eq!(outcome.payment_id, "pi_1");
    assert_eq!(outcome.error_message.as_deref(), Some("network returned HTTP 500"));
}

#[tokio::test]
async fn status_lookup_timeout_becomes_error_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_millis(100))
        .get_status("pi_slow")
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Error);
    assert!(outcome.error_message.is_some());
}

#[tokio::test]
async fn sub_cent_charge_is_rejected_without_calling_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .charge(card_charge(dec!(0.004)))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Failed);
    assert!(outcome.payment_id.is_empty());
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("amount 0.004 is not a positive number of minor units")
    );
}

#[tokio::test]
async fn overflowing_charge_is_rejected_without_calling_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = gateway(&server, Duration::from_secs(5))
        .charge(card_charge(rust_decimal::Decimal::MAX))
        .await;

    assert!(!outcome.success);
    assert_eq!(outcome.status, PaymentStatus::Failed);
    assert!(outcome.error_message.is_some());
}
