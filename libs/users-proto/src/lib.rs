//! Wire contract of the users service.
//!
//! The protobuf definition lives in `proto/users.proto`; the build script
//! generates both client and server bindings along with a file descriptor
//! set consumed by gRPC server reflection.

pub mod proto {
    pub mod users {
        pub mod v1 {
            tonic::include_proto!("users.v1");

            /// Encoded descriptor set for gRPC server reflection.
            pub const FILE_DESCRIPTOR_SET: &[u8] =
                tonic::include_file_descriptor_set!("users_descriptor");
        }
    }
}
