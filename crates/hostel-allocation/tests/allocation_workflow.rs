use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hostel_allocation::allocation::AllocationService;
use hostel_allocation::api_router;
use hostel_allocation::applications::{ApplicationRepository, ApplicationService};
use hostel_allocation::catalog::{CatalogService, HostelRepository};
use hostel_allocation::context::AppContext;
use hostel_allocation::identity::{Gender, IdentityService, TokenStore, UserRepository};
use hostel_allocation::memory::{
    MemoryApplications, MemoryHostels, MemoryRooms, MemoryTokens, MemoryUsers,
};
use hostel_allocation::reports::ReportsService;
use hostel_allocation::rooms::{RoomRepository, RoomService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn context() -> AppContext {
    let users: Arc<dyn UserRepository> = Arc::new(MemoryUsers::default());
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokens::default());
    let hostels: Arc<dyn HostelRepository> = Arc::new(MemoryHostels::default());
    let rooms: Arc<dyn RoomRepository> = Arc::new(MemoryRooms::default());
    let applications: Arc<dyn ApplicationRepository> = Arc::new(MemoryApplications::default());

    AppContext {
        identity: Arc::new(IdentityService::new(users.clone(), tokens, 60)),
        catalog: Arc::new(CatalogService::new(hostels.clone())),
        rooms: Arc::new(RoomService::new(rooms.clone(), hostels.clone())),
        applications: Arc::new(ApplicationService::new(applications.clone(), rooms.clone())),
        allocation: Arc::new(AllocationService::new(
            users.clone(),
            rooms.clone(),
            applications.clone(),
        )),
        reports: Arc::new(ReportsService::new(users, hostels, rooms, applications)),
    }
}

fn app(context: &AppContext) -> Router {
    api_router().with_state(context.clone())
}

async fn call(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.oneshot(request).await.expect("handler responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is json")
    };
    (status, payload)
}

async fn login(context: &AppContext, email: &str, password: &str) -> String {
    let (status, body) = call(
        app(context),
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"]
        .as_str()
        .expect("token in payload")
        .to_string()
}

fn application_payload(academic_year: &str, hostel: &Value) -> Value {
    json!({
        "academic_year": academic_year,
        "semester": "first",
        "personal": {
            "phone": "+2348012345678",
            "address": "14 College Road, Yaba"
        },
        "guardian": {
            "name": "P. Okafor",
            "phone": "08087654321"
        },
        "preference": {
            "hostel": hostel["id"],
            "room_type": "shared"
        }
    })
}

#[tokio::test]
async fn full_allocation_workflow_over_http() {
    let context = context();
    context
        .identity
        .provision_admin("Warden", "warden@hostel.edu", "warden-pass", Gender::Female)
        .expect("admin provisioned");

    // Student self-registration.
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "full_name": "Ade Okafor",
            "email": "ade@student.edu",
            "matric_number": "HST/2024/001",
            "gender": "male",
            "password": "sturdy-passphrase"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["user"]["role"], json!("student"));
    assert!(body["data"]["user"].get("credential").is_none());

    let student_token = login(&context, "ade@student.edu", "sturdy-passphrase").await;
    let admin_token = login(&context, "warden@hostel.edu", "warden-pass").await;

    // No token: 401 with the failure envelope.
    let (status, body) = call(app(&context), Method::GET, "/api/v1/applications", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    // Student token on an admin route: 403.
    let (status, _) = call(
        app(&context),
        Method::GET,
        "/api/v1/applications",
        Some(&student_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Admin provisions a hostel and a room.
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/hostels",
        Some(&admin_token),
        Some(json!({
            "name": "Kuti Hall",
            "gender": "male",
            "prices": { "shared": 30000, "standard": 45000 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "hostel create failed: {body}");
    let hostel = body["data"]["hostel"].clone();

    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/rooms",
        Some(&admin_token),
        Some(json!({
            "hostel": hostel["id"],
            "number": "A-101",
            "room_type": "shared",
            "capacity": 2,
            "gender": "male"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "room create failed: {body}");
    let room = body["data"]["room"].clone();
    assert_eq!(room["occupied_beds"], json!(0));

    // Student submits an application for the term.
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/applications/submit",
        Some(&student_token),
        Some(application_payload("2024/2025", &hostel)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {body}");
    let application = body["data"]["application"].clone();
    assert_eq!(application["status"], json!("pending"));

    // Duplicate submission for the same term is a conflict.
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/applications/submit",
        Some(&student_token),
        Some(application_payload("2024/2025", &hostel)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    // Admin approves and assigns in one pass.
    let application_id = application["id"].as_str().expect("application id");
    let (status, body) = call(
        app(&context),
        Method::POST,
        &format!("/api/v1/applications/{application_id}/approve"),
        Some(&admin_token),
        Some(json!({ "comments": "Meets criteria" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "approve failed: {body}");
    assert_eq!(body["data"]["application"]["status"], json!("approved"));

    let student_id = application["student"].clone();
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/rooms/assign",
        Some(&admin_token),
        Some(json!({
            "student": student_id,
            "room": room["id"],
            "application": application_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "assign failed: {body}");
    assert_eq!(body["data"]["bed_number"], json!(1));
    assert_eq!(body["data"]["application"]["status"], json!("assigned"));

    // Assigning the same student elsewhere is rejected.
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/rooms/assign",
        Some(&admin_token),
        Some(json!({ "student": student_id, "room": room["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    // Dashboard reflects the allocation.
    let (status, body) = call(
        app(&context),
        Method::GET,
        "/api/v1/admin/dashboard",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"], json!(1));
    assert_eq!(body["data"]["occupied_beds"], json!(1));
    assert_eq!(body["data"]["applications"]["assigned"], json!(1));

    // Removal frees the bed and resets the application to approved.
    let room_id = room["id"].as_str().expect("room id");
    let (status, body) = call(
        app(&context),
        Method::POST,
        &format!("/api/v1/rooms/{room_id}/remove-student"),
        Some(&admin_token),
        Some(json!({ "student": student_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "removal failed: {body}");
    assert_eq!(body["data"]["room"]["occupied_beds"], json!(0));
    assert_eq!(body["data"]["application"]["status"], json!("approved"));

    // The student sees the reset application under their own listing.
    let (status, body) = call(
        app(&context),
        Method::GET,
        "/api/v1/applications/mine",
        Some(&student_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mine = body["data"]["applications"]
        .as_array()
        .expect("applications array");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], json!("approved"));
}

#[tokio::test]
async fn validation_failures_report_field_errors() {
    let context = context();
    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "full_name": "",
            "email": "not-an-email",
            "matric_number": "HST/2024/001",
            "gender": "male",
            "password": "short"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    let errors = body["errors"].as_array().expect("field errors");
    let fields: Vec<&str> = errors
        .iter()
        .filter_map(|error| error["field"].as_str())
        .collect();
    assert!(fields.contains(&"full_name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn hostel_detail_is_fetchable_by_id() {
    let context = context();
    context
        .identity
        .provision_admin("Warden", "warden@hostel.edu", "warden-pass", Gender::Female)
        .expect("admin provisioned");
    let admin_token = login(&context, "warden@hostel.edu", "warden-pass").await;

    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/hostels",
        Some(&admin_token),
        Some(json!({
            "name": "Queens Hall",
            "gender": "female",
            "prices": { "shared": 30000 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hostel_id = body["data"]["hostel"]["id"].as_str().expect("hostel id");

    let (status, body) = call(
        app(&context),
        Method::GET,
        &format!("/api/v1/hostels/{hostel_id}"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["hostel"]["name"], json!("Queens Hall"));

    let (status, _) = call(
        app(&context),
        Method::GET,
        "/api/v1/hostels/no-such-hostel",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deactivated_rooms_drop_out_of_the_available_listing() {
    let context = context();
    context
        .identity
        .provision_admin("Warden", "warden@hostel.edu", "warden-pass", Gender::Female)
        .expect("admin provisioned");
    let admin_token = login(&context, "warden@hostel.edu", "warden-pass").await;

    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/hostels",
        Some(&admin_token),
        Some(json!({
            "name": "Kuti Hall",
            "gender": "male",
            "prices": { "shared": 30000 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hostel = body["data"]["hostel"].clone();

    let (status, body) = call(
        app(&context),
        Method::POST,
        "/api/v1/rooms",
        Some(&admin_token),
        Some(json!({
            "hostel": hostel["id"],
            "number": "A-101",
            "room_type": "shared",
            "capacity": 2,
            "gender": "male"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let room_id = body["data"]["room"]["id"].as_str().expect("room id").to_string();

    let (status, body) = call(
        app(&context),
        Method::POST,
        &format!("/api/v1/rooms/{room_id}/deactivate"),
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "deactivation failed: {body}");
    assert_eq!(body["data"]["room"]["is_active"], json!(false));
    assert_eq!(body["data"]["room"]["is_available"], json!(false));

    let (status, body) = call(
        app(&context),
        Method::GET,
        "/api/v1/rooms?available=true",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let available = body["data"]["rooms"].as_array().expect("rooms array");
    assert!(available.is_empty());
}

#[tokio::test]
async fn unknown_resources_return_404() {
    let context = context();
    context
        .identity
        .provision_admin("Warden", "warden@hostel.edu", "warden-pass", Gender::Female)
        .expect("admin provisioned");
    let admin_token = login(&context, "warden@hostel.edu", "warden-pass").await;

    let (status, body) = call(
        app(&context),
        Method::DELETE,
        "/api/v1/rooms/no-such-room",
        Some(&admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}
