mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_classroom, create_student, create_teacher, id_of, request, test_app};

async fn add(
    app: &axum::Router,
    classroom_id: &str,
    student_id: &str,
    teacher_id: &str,
) -> (StatusCode, serde_json::Value) {
    request(
        app,
        Method::POST,
        &format!("/classrooms/{classroom_id}/students/{student_id}"),
        Some(teacher_id),
        None,
    )
    .await
}

async fn remove(
    app: &axum::Router,
    classroom_id: &str,
    student_id: &str,
    teacher_id: &str,
) -> (StatusCode, serde_json::Value) {
    request(
        app,
        Method::DELETE,
        &format!("/classrooms/{classroom_id}/students/{student_id}"),
        Some(teacher_id),
        None,
    )
    .await
}

async fn roster(
    app: &axum::Router,
    classroom_id: &str,
    teacher_id: &str,
) -> (StatusCode, serde_json::Value) {
    request(
        app,
        Method::GET,
        &format!("/classrooms/{classroom_id}/students"),
        Some(teacher_id),
        None,
    )
    .await
}

#[tokio::test]
async fn capacity_two_worked_example() {
    // capacity=2, roster=[A]; add B succeeds, add C fails "Classroom is full"
    let app = test_app();
    let teacher = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let teacher_id = id_of(&teacher);
    let classroom = create_classroom(&app, &teacher_id, "101", 2).await;
    let classroom_id = id_of(&classroom);

    let a = id_of(&create_student(&app, "A", "a@school.edu").await);
    let b = id_of(&create_student(&app, "B", "b@school.edu").await);
    let c = id_of(&create_student(&app, "C", "c@school.edu").await);

    let (status, _) = add(&app, &classroom_id, &a, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = add(&app, &classroom_id, &b, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Student added successfully to classroom");

    let (status, body) = roster(&app, &classroom_id, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .expect("roster array")
        .iter()
        .map(|s| s["id"].as_str().expect("student id"))
        .collect();
    assert_eq!(ids, vec![a.as_str(), b.as_str()]);

    let (status, body) = add(&app, &classroom_id, &c, &teacher_id).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Classroom is full");
}

#[tokio::test]
async fn adding_same_student_twice_is_rejected() {
    let app = test_app();
    let teacher = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let teacher_id = id_of(&teacher);
    let classroom_id = id_of(&create_classroom(&app, &teacher_id, "101", 5).await);
    let student_id = id_of(&create_student(&app, "A", "a@school.edu").await);

    let (status, _) = add(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = add(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Student already allocated in this classroom");
}

#[tokio::test]
async fn unavailable_classroom_rejects_enrollment() {
    let app = test_app();
    let teacher = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let teacher_id = id_of(&teacher);
    let classroom_id = id_of(&create_classroom(&app, &teacher_id, "101", 5).await);
    let student_id = id_of(&create_student(&app, "A", "a@school.edu").await);

    let (status, _) = request(
        &app,
        Method::PUT,
        &format!("/classrooms/{classroom_id}"),
        Some(&teacher_id),
        Some(json!({ "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = add(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["message"],
        "Classroom is not available for student allocation"
    );
}

#[tokio::test]
async fn remove_succeeds_only_when_enrolled() {
    let app = test_app();
    let teacher = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let teacher_id = id_of(&teacher);
    let classroom_id = id_of(&create_classroom(&app, &teacher_id, "101", 5).await);
    let student_id = id_of(&create_student(&app, "A", "a@school.edu").await);

    let (status, body) = remove(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student does not exist in this classroom");

    let (status, _) = add(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = remove(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Student removed successfully from classroom");

    let (_, body) = roster(&app, &classroom_id, &teacher_id).await;
    assert_eq!(body.as_array().expect("roster array").len(), 0);
}

#[tokio::test]
async fn non_owner_cannot_mutate_roster() {
    let app = test_app();
    let owner = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let intruder = create_teacher(&app, "Mr. Wormwood", "wormwood@school.edu").await;
    let owner_id = id_of(&owner);
    let intruder_id = id_of(&intruder);
    let classroom_id = id_of(&create_classroom(&app, &owner_id, "101", 5).await);
    let student_id = id_of(&create_student(&app, "A", "a@school.edu").await);

    let (status, body) = add(&app, &classroom_id, &student_id, &intruder_id).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "Teacher cannot add students to a classroom they do not own"
    );

    let (status, _) = remove(&app, &classroom_id, &student_id, &intruder_id).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = roster(&app, &classroom_id, &intruder_id).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_classroom_blocked_until_roster_empty() {
    let app = test_app();
    let teacher = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let teacher_id = id_of(&teacher);
    let classroom_id = id_of(&create_classroom(&app, &teacher_id, "101", 5).await);
    let student_id = id_of(&create_student(&app, "A", "a@school.edu").await);

    let (status, _) = add(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        Method::DELETE,
        &format!("/classrooms/{classroom_id}"),
        Some(&teacher_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["message"],
        "Cannot delete classroom with allocated students. Please remove all students first."
    );

    let (status, _) = remove(&app, &classroom_id, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/classrooms/{classroom_id}"),
        Some(&teacher_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unknown_entities_report_the_right_name() {
    let app = test_app();
    let teacher = create_teacher(&app, "Ms. Honey", "honey@school.edu").await;
    let teacher_id = id_of(&teacher);
    let classroom_id = id_of(&create_classroom(&app, &teacher_id, "101", 5).await);
    let student_id = id_of(&create_student(&app, "A", "a@school.edu").await);
    let bogus = uuid::Uuid::new_v4().to_string();

    let (status, body) = add(&app, &bogus, &student_id, &teacher_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Classroom not found");

    let (status, body) = add(&app, &classroom_id, &bogus, &teacher_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");

    let (status, body) = add(&app, &classroom_id, &student_id, &bogus).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Teacher not found");
}
