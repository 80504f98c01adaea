//! Handler-level tests against an in-memory repository double.
//!
//! These exercise validation, error translation, and the duplicate gate
//! without a database; storage semantics live in `users_pg.rs`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tonic::Request;
use uuid::Uuid;

use users_api::api::grpc::UsersGrpcService;
use users_api::contract::error::StoreError;
use users_api::contract::model::{NewUser, User, UserPatch};
use users_api::domain::repo::UsersRepository;
use users_api::domain::service::UsersService;
use users_proto::proto::users::v1 as proto;
use users_proto::proto::users::v1::user_service_server::UserService;

/// In-memory stand-in honoring the repository contract, soft delete
/// included.
#[derive(Default)]
struct InMemoryRepo {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UsersRepository for InMemoryRepo {
    async fn get_by_id(&self, id: &str) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_field("id"));
        }
        let users = self.users.lock().unwrap();
        users
            .get(id)
            .filter(|u| u.deleted_at.is_none())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        if email.is_empty() {
            return Err(StoreError::missing_field("email"));
        }
        let needle = email.to_lowercase();
        let users = self.users.lock().unwrap();
        users
            .values()
            .find(|u| u.email == needle && u.deleted_at.is_none())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        if new_user.email.is_empty() {
            return Err(StoreError::missing_field("email"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: new_user.email.to_lowercase(),
            name: new_user.name,
            last_name: new_user.last_name,
            password: new_user.password,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let mut users = self.users.lock().unwrap();
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, id: &str, patch: UserPatch) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_field("id"));
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .filter(|u| u.deleted_at.is_none())
            .ok_or(StoreError::NotFound)?;
        if let Some(email) = patch.email {
            user.email = email.to_lowercase();
        }
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> Result<User, StoreError> {
        if id.is_empty() {
            return Err(StoreError::missing_field("id"));
        }
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .filter(|u| u.deleted_at.is_none())
            .ok_or(StoreError::NotFound)?;
        user.deleted_at = Some(Utc::now());
        Ok(user.clone())
    }
}

fn grpc_service() -> UsersGrpcService {
    let repo = Arc::new(InMemoryRepo::default());
    UsersGrpcService::new(UsersService::new(repo))
}

async fn create_user(svc: &UsersGrpcService, email: &str) -> proto::User {
    let response = svc
        .create(Request::new(proto::CreateUserRequest {
            data: Some(proto::User {
                email: email.to_string(),
                name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                password: "analytical".to_string(),
                ..Default::default()
            }),
        }))
        .await
        .expect("create rpc failed")
        .into_inner();

    assert!(response.error.is_none(), "unexpected error: {response:?}");
    response.data.expect("created user missing from response")
}

#[tokio::test]
async fn get_by_id_with_empty_id_is_a_validation_error() {
    let svc = grpc_service();

    let response = svc
        .get_by_id(Request::new(proto::GetUserByIdRequest { id: String::new() }))
        .await
        .unwrap()
        .into_inner();

    assert!(response.data.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, 400);
    assert_eq!(error.message, "must provide a id");
}

#[tokio::test]
async fn get_by_id_of_unknown_user_is_not_found() {
    let svc = grpc_service();

    let response = svc
        .get_by_id(Request::new(proto::GetUserByIdRequest {
            id: "missing".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();

    let error = response.error.unwrap();
    assert_eq!(error.code, 404);
    assert_eq!(error.message, "user with id = missing not found");
}

#[tokio::test]
async fn create_returns_generated_id_and_lowercases_email() {
    let svc = grpc_service();

    let created = create_user(&svc, "Foo@Bar.com").await;
    assert!(!created.id.is_empty());
    assert_eq!(created.email, "foo@bar.com");
    assert!(created.created_at > 0);

    let fetched = svc
        .get_by_id(Request::new(proto::GetUserByIdRequest {
            id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched.data.unwrap(), created);
}

#[tokio::test]
async fn create_with_duplicate_email_is_a_conflict() {
    let svc = grpc_service();
    create_user(&svc, "ada@example.com").await;

    let response = svc
        .create(Request::new(proto::CreateUserRequest {
            data: Some(proto::User {
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                password: "analytical".to_string(),
                ..Default::default()
            }),
        }))
        .await
        .unwrap()
        .into_inner();

    assert!(response.data.is_none());
    let error = response.error.unwrap();
    assert_eq!(error.code, 409);
    assert_eq!(error.message, "user already registered");
}

#[tokio::test]
async fn create_validates_each_required_param() {
    let svc = grpc_service();

    let cases = [
        (proto::User::default(), "email param is empty"),
        (
            proto::User {
                email: "a@b.com".into(),
                ..Default::default()
            },
            "name param is empty",
        ),
        (
            proto::User {
                email: "a@b.com".into(),
                name: "A".into(),
                ..Default::default()
            },
            "last_name param is empty",
        ),
        (
            proto::User {
                email: "a@b.com".into(),
                name: "A".into(),
                last_name: "B".into(),
                ..Default::default()
            },
            "password param is empty",
        ),
    ];

    for (data, expected) in cases {
        let response = svc
            .create(Request::new(proto::CreateUserRequest { data: Some(data) }))
            .await
            .unwrap()
            .into_inner();
        let error = response.error.unwrap();
        assert_eq!(error.code, 400);
        assert_eq!(error.message, expected);
    }
}

#[tokio::test]
async fn create_with_no_payload_is_a_validation_error() {
    let svc = grpc_service();

    let response = svc
        .create(Request::new(proto::CreateUserRequest { data: None }))
        .await
        .unwrap()
        .into_inner();

    let error = response.error.unwrap();
    assert_eq!(error.code, 400);
    assert_eq!(error.message, "email param is empty");
}

#[tokio::test]
async fn update_overwrites_only_set_fields() {
    let svc = grpc_service();
    let created = create_user(&svc, "ada@example.com").await;

    let response = svc
        .update(Request::new(proto::UpdateUserRequest {
            id: created.id.clone(),
            name: Some("Augusta".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner();

    assert!(response.error.is_none());
    let updated = response.data.unwrap();
    assert_eq!(updated.name, "Augusta");
    assert_eq!(updated.email, created.email);
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.password, created.password);
}

#[tokio::test]
async fn update_with_present_but_empty_field_is_rejected() {
    let svc = grpc_service();
    let created = create_user(&svc, "ada@example.com").await;

    let response = svc
        .update(Request::new(proto::UpdateUserRequest {
            id: created.id.clone(),
            email: Some(String::new()),
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner();

    let error = response.error.unwrap();
    assert_eq!(error.code, 400);
    assert_eq!(error.message, "email param is empty");

    // The stored record is untouched.
    let fetched = svc
        .get_by_id(Request::new(proto::GetUserByIdRequest {
            id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched.data.unwrap().email, "ada@example.com");
}

#[tokio::test]
async fn update_of_unknown_user_is_not_found() {
    let svc = grpc_service();

    let response = svc
        .update(Request::new(proto::UpdateUserRequest {
            id: "missing".to_string(),
            name: Some("Augusta".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap()
        .into_inner();

    let error = response.error.unwrap();
    assert_eq!(error.code, 404);
    assert_eq!(error.message, "user with id = missing not found");
}

#[tokio::test]
async fn delete_returns_snapshot_and_second_delete_is_not_found() {
    let svc = grpc_service();
    let created = create_user(&svc, "ada@example.com").await;

    let response = svc
        .delete(Request::new(proto::DeleteUserRequest {
            user_id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert!(response.error.is_none());
    assert_eq!(response.data.unwrap(), created);

    let again = svc
        .delete(Request::new(proto::DeleteUserRequest {
            user_id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();

    let error = again.error.unwrap();
    assert_eq!(error.code, 404);

    let fetched = svc
        .get_by_id(Request::new(proto::GetUserByIdRequest {
            id: created.id.clone(),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched.error.unwrap().code, 404);
}

#[tokio::test]
async fn get_by_email_matches_case_insensitively() {
    let svc = grpc_service();
    let created = create_user(&svc, "ada@example.com").await;

    let response = svc
        .get_by_email(Request::new(proto::GetUserByEmailRequest {
            email: "Ada@Example.COM".to_string(),
        }))
        .await
        .unwrap()
        .into_inner();

    assert!(response.error.is_none());
    assert_eq!(response.data.unwrap().id, created.id);
}
