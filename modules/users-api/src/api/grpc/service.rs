use tonic::{Request, Response, Status};
use tracing::{error, info};
use users_proto::proto::users::v1 as proto;
use users_proto::proto::users::v1::user_service_server::UserService;

use crate::api::grpc::error::{conflict, map_store_error, validation};
use crate::contract::error::StoreError;
use crate::contract::model::{NewUser, UserPatch};
use crate::domain::service::UsersService;

/// gRPC facade over the domain service.
///
/// Every failure is embedded in the response payload as
/// `Error { code, message }`; the RPC itself stays `Ok` so transport-level
/// status codes are reserved for transport problems.
#[derive(Clone)]
pub struct UsersGrpcService {
    svc: UsersService,
}

impl UsersGrpcService {
    pub fn new(svc: UsersService) -> Self {
        Self { svc }
    }
}

#[tonic::async_trait]
impl UserService for UsersGrpcService {
    async fn get_by_id(
        &self,
        request: Request<proto::GetUserByIdRequest>,
    ) -> Result<Response<proto::GetUserByIdResponse>, Status> {
        let req = request.into_inner();
        info!("Getting user by id: {}", req.id);

        if req.id.is_empty() {
            error!("Failed to get user: must provide a id");
            return Ok(Response::new(proto::GetUserByIdResponse {
                data: None,
                error: Some(validation("must provide a id")),
            }));
        }

        match self.svc.get_by_id(&req.id).await {
            Ok(user) => {
                info!("Retrieved user {}", user.id);
                Ok(Response::new(proto::GetUserByIdResponse {
                    data: Some(user.into()),
                    error: None,
                }))
            }
            Err(e) => {
                error!("Failed to get user {}: {}", req.id, e);
                Ok(Response::new(proto::GetUserByIdResponse {
                    data: None,
                    error: Some(map_store_error(
                        &e,
                        format!("user with id = {} not found", req.id),
                    )),
                }))
            }
        }
    }

    async fn get_by_email(
        &self,
        request: Request<proto::GetUserByEmailRequest>,
    ) -> Result<Response<proto::GetUserByEmailResponse>, Status> {
        let req = request.into_inner();
        info!("Getting user by email: {}", req.email);

        if req.email.is_empty() {
            error!("Failed to get user: must provide a email");
            return Ok(Response::new(proto::GetUserByEmailResponse {
                data: None,
                error: Some(validation("must provide a email")),
            }));
        }

        match self.svc.get_by_email(&req.email).await {
            Ok(user) => {
                info!("Retrieved user {}", user.id);
                Ok(Response::new(proto::GetUserByEmailResponse {
                    data: Some(user.into()),
                    error: None,
                }))
            }
            Err(e) => {
                error!("Failed to get user by email {}: {}", req.email, e);
                Ok(Response::new(proto::GetUserByEmailResponse {
                    data: None,
                    error: Some(map_store_error(
                        &e,
                        format!("user with email = {} not found", req.email),
                    )),
                }))
            }
        }
    }

    async fn create(
        &self,
        request: Request<proto::CreateUserRequest>,
    ) -> Result<Response<proto::CreateUserResponse>, Status> {
        let data = request.into_inner().data.unwrap_or_default();
        info!("Creating user with email: {}", data.email);

        if data.email.is_empty() {
            error!("Failed to create user: email param is empty");
            return Ok(Response::new(proto::CreateUserResponse {
                data: None,
                error: Some(validation("email param is empty")),
            }));
        }

        // Duplicate gate: only a clean "not found" from the probe lets the
        // create proceed.
        match self.svc.get_by_email(&data.email).await {
            Ok(_) => {
                error!("Failed to create user {}: already registered", data.email);
                return Ok(Response::new(proto::CreateUserResponse {
                    data: None,
                    error: Some(conflict("user already registered")),
                }));
            }
            Err(StoreError::NotFound) => {}
            Err(e) => {
                error!("Failed to create user {}: {}", data.email, e);
                return Ok(Response::new(proto::CreateUserResponse {
                    data: None,
                    error: Some(map_store_error(
                        &e,
                        format!("user with email = {} not found", data.email),
                    )),
                }));
            }
        }

        if data.name.is_empty() {
            error!("Failed to create user: name param is empty");
            return Ok(Response::new(proto::CreateUserResponse {
                data: None,
                error: Some(validation("name param is empty")),
            }));
        }

        if data.last_name.is_empty() {
            error!("Failed to create user: last_name param is empty");
            return Ok(Response::new(proto::CreateUserResponse {
                data: None,
                error: Some(validation("last_name param is empty")),
            }));
        }

        if data.password.is_empty() {
            error!("Failed to create user: password param is empty");
            return Ok(Response::new(proto::CreateUserResponse {
                data: None,
                error: Some(validation("password param is empty")),
            }));
        }

        let email = data.email.clone();
        match self.svc.create(NewUser::from(data)).await {
            Ok(user) => {
                info!("Created user {}", user.id);
                Ok(Response::new(proto::CreateUserResponse {
                    data: Some(user.into()),
                    error: None,
                }))
            }
            Err(e) => {
                error!("Failed to create user {}: {}", email, e);
                Ok(Response::new(proto::CreateUserResponse {
                    data: None,
                    error: Some(map_store_error(
                        &e,
                        format!("user with email = {email} not found"),
                    )),
                }))
            }
        }
    }

    async fn update(
        &self,
        request: Request<proto::UpdateUserRequest>,
    ) -> Result<Response<proto::UpdateUserResponse>, Status> {
        let req = request.into_inner();
        info!("Updating user {}", req.id);

        if req.id.is_empty() {
            error!("Failed to update user: id param is empty");
            return Ok(Response::new(proto::UpdateUserResponse {
                data: None,
                error: Some(validation("id param is empty")),
            }));
        }

        if let Err(e) = self.svc.get_by_id(&req.id).await {
            error!("Failed to update user {}: {}", req.id, e);
            return Ok(Response::new(proto::UpdateUserResponse {
                data: None,
                error: Some(map_store_error(
                    &e,
                    format!("user with id = {} not found", req.id),
                )),
            }));
        }

        // A present-but-empty field cannot clear the stored value.
        for (value, field) in [
            (&req.email, "email"),
            (&req.name, "name"),
            (&req.last_name, "last_name"),
            (&req.password, "password"),
        ] {
            if value.as_deref() == Some("") {
                error!("Failed to update user {}: {} param is empty", req.id, field);
                return Ok(Response::new(proto::UpdateUserResponse {
                    data: None,
                    error: Some(validation(format!("{field} param is empty"))),
                }));
            }
        }

        let id = req.id.clone();
        match self.svc.update(&id, UserPatch::from(req)).await {
            Ok(user) => {
                info!("Updated user {}", user.id);
                Ok(Response::new(proto::UpdateUserResponse {
                    data: Some(user.into()),
                    error: None,
                }))
            }
            Err(e) => {
                error!("Failed to update user {}: {}", id, e);
                Ok(Response::new(proto::UpdateUserResponse {
                    data: None,
                    error: Some(map_store_error(
                        &e,
                        format!("user with id = {id} not found"),
                    )),
                }))
            }
        }
    }

    async fn delete(
        &self,
        request: Request<proto::DeleteUserRequest>,
    ) -> Result<Response<proto::DeleteUserResponse>, Status> {
        let req = request.into_inner();
        info!("Deleting user {}", req.user_id);

        // Resolve first; the response carries the pre-deletion snapshot.
        let user = match self.svc.get_by_id(&req.user_id).await {
            Ok(user) => user,
            Err(e) => {
                error!("Failed to delete user {}: {}", req.user_id, e);
                return Ok(Response::new(proto::DeleteUserResponse {
                    data: None,
                    error: Some(map_store_error(
                        &e,
                        format!("user with id = {} not found", req.user_id),
                    )),
                }));
            }
        };

        if let Err(e) = self.svc.delete(&user.id).await {
            error!("Failed to delete user {}: {}", user.id, e);
            return Ok(Response::new(proto::DeleteUserResponse {
                data: None,
                error: Some(map_store_error(
                    &e,
                    format!("user with id = {} not found", user.id),
                )),
            }));
        }

        info!("Deleted user {}", user.id);
        Ok(Response::new(proto::DeleteUserResponse {
            data: Some(user.into()),
            error: None,
        }))
    }
}
