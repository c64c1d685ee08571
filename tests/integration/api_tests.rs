//! API integration tests
//!
//! These run against a live server: start one with `cargo run`, then
//! `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn provider_registration(email: &str, phone: &str, license: &str) -> Value {
    json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": email,
        "phone_number": phone,
        "password": "Str0ng!pass",
        "confirm_password": "Str0ng!pass",
        "specialization": "Cardiology",
        "license_number": license,
        "years_of_experience": 10,
        "clinic_address": {
            "street": "123 Medical Center Dr",
            "city": "New York",
            "state": "NY",
            "zip": "10001"
        }
    })
}

/// Register a provider and return (provider_id, access_token)
async fn register_and_login(client: &Client, email: &str, phone: &str, license: &str) -> (String, String) {
    let response = client
        .post(format!("{}/provider/register", BASE_URL))
        .json(&provider_registration(email, phone, license))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse register response");
    let provider_id = body["data"]["provider_id"]
        .as_str()
        .expect("No provider_id")
        .to_string();

    let response = client
        .post(format!("{}/provider/login", BASE_URL))
        .json(&json!({ "email": email, "password": "Str0ng!pass" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["data"]["access_token"]
        .as_str()
        .expect("No access token")
        .to_string();

    (provider_id, token)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_provider_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/provider/login", BASE_URL))
        .json(&json!({
            "email": "nobody@clinic.test",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_and_list_availability() {
    let client = Client::new();
    let (provider_id, token) =
        register_and_login(&client, "avail@clinic.test", "+12025550101", "MDAVAIL1").await;

    let response = client
        .post(format!("{}/provider/availability", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "provider_id": provider_id,
            "date": "2026-02-16",
            "start_time": "09:00",
            "end_time": "11:00",
            "timezone": "America/New_York",
            "slot_duration": 30,
            "break_duration": 0,
            "location": { "type": "clinic", "address": "123 Medical Center Dr" },
            "pricing": { "base_fee": 150.0, "insurance_accepted": true }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["slots_created"], 4);

    let response = client
        .get(format!(
            "{}/provider/{}/availability?start_date=2026-02-16&end_date=2026-02-16",
            BASE_URL, provider_id
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["availability_summary"]["total_slots"], 4);
    assert!(body["data"]["availability"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_overlapping_availability_conflicts() {
    let client = Client::new();
    let (provider_id, token) =
        register_and_login(&client, "conflict@clinic.test", "+12025550102", "MDCONF1").await;

    let window = |start: &str, end: &str| {
        json!({
            "provider_id": provider_id,
            "date": "2026-03-02",
            "start_time": start,
            "end_time": end,
            "timezone": "America/New_York",
            "location": { "type": "clinic", "address": "123 Medical Center Dr" }
        })
    };

    let response = client
        .post(format!("{}/provider/availability", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&window("09:00", "11:00"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/provider/availability", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&window("09:15", "09:45"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_search_availability() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/provider/availability/search?available_only=true&max_price=500",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["results"].is_array());
    assert!(body["data"]["total_results"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_patient_registration_and_profile() {
    let client = Client::new();

    let response = client
        .post(format!("{}/patient/register", BASE_URL))
        .json(&json!({
            "first_name": "Sam",
            "last_name": "Rivera",
            "email": "sam@example.test",
            "phone_number": "+12025550177",
            "password": "Str0ng!pass",
            "confirm_password": "Str0ng!pass",
            "date_of_birth": "1990-05-20",
            "gender": "other",
            "address": {
                "street": "42 Elm St",
                "city": "Boston",
                "state": "MA",
                "zip": "02101"
            }
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let patient_id = body["data"]["patient_id"].as_str().expect("No patient_id").to_string();

    let response = client
        .post(format!("{}/patient/login", BASE_URL))
        .json(&json!({ "email": "sam@example.test", "password": "Str0ng!pass" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let token = body["data"]["access_token"].as_str().expect("No token").to_string();

    let response = client
        .get(format!("{}/patient/profile/{}", BASE_URL, patient_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["email"], "sam@example.test");
    assert!(body["data"]["password_hash"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_underage_patient_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/patient/register", BASE_URL))
        .json(&json!({
            "first_name": "Kid",
            "last_name": "Young",
            "email": "kid@example.test",
            "phone_number": "+12025550178",
            "password": "Str0ng!pass",
            "confirm_password": "Str0ng!pass",
            "date_of_birth": "2020-01-01",
            "gender": "other",
            "address": {
                "street": "42 Elm St",
                "city": "Boston",
                "state": "MA",
                "zip": "02101"
            }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_availability_create_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/provider/availability", BASE_URL))
        .json(&json!({
            "provider_id": "00000000-0000-0000-0000-000000000000",
            "date": "2026-02-16",
            "start_time": "09:00",
            "end_time": "11:00",
            "location": { "type": "clinic" }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
