use super::*;

#[test]
fn login_response_decodes_flat_shape() {
    let raw = r#"{
        "token": "tok-1",
        "user": {
            "id": 7,
            "uuid": "6f2d8f7e-43a1-4a8e-9f30-111122223333",
            "name": "Ana Souza",
            "email": "ana@example.com"
        }
    }"#;
    let decoded: LoginResponse = serde_json::from_str(raw).expect("decode login response");
    assert_eq!(decoded.token, "tok-1");
    assert_eq!(decoded.user.id, 7);
    assert_eq!(decoded.user.name, "Ana Souza");
}

#[test]
fn me_response_decodes_enveloped_user() {
    let raw = r#"{"data": {
        "id": 1,
        "uuid": "6f2d8f7e-43a1-4a8e-9f30-111122223333",
        "name": "Ana Souza",
        "email": "ana@example.com"
    }}"#;
    let decoded: Envelope<User> = serde_json::from_str(raw).expect("decode me response");
    assert_eq!(decoded.data.email, "ana@example.com");
}

#[test]
fn training_list_decodes_enveloped_array() {
    let raw = r#"{"data": [
        {"uuid": "6f2d8f7e-43a1-4a8e-9f30-111122223333", "name": "Push day", "created_at": "2025-07-01T18:30:00.000000Z"},
        {"uuid": "6f2d8f7e-43a1-4a8e-9f30-444455556666", "name": "Pull day", "created_at": "2025-07-02T09:00:00.000000Z"}
    ]}"#;
    let decoded: Envelope<Vec<Training>> = serde_json::from_str(raw).expect("decode trainings");
    assert_eq!(decoded.data.len(), 2);
    assert_eq!(decoded.data[0].name, "Push day");
    assert_eq!(decoded.data[1].created_at, "2025-07-02T09:00:00.000000Z");
}

#[test]
fn exercise_round_trips() {
    let exercise = Exercise {
        uuid: Uuid::from_u128(42),
        name: "Deadlift".to_owned(),
    };
    let raw = serde_json::to_string(&exercise).expect("encode exercise");
    let decoded: Exercise = serde_json::from_str(&raw).expect("decode exercise");
    assert_eq!(decoded, exercise);
}

#[test]
fn user_with_malformed_uuid_is_rejected() {
    let raw = r#"{"id": 1, "uuid": "not-a-uuid", "name": "x", "email": "x@y.z"}"#;
    assert!(serde_json::from_str::<User>(raw).is_err());
}
