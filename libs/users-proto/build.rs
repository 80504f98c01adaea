fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?);

    // Compile protobuf definitions and generate a file descriptor set for
    // server reflection.
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(out_dir.join("users_descriptor.bin"))
        .compile_protos(&["proto/users.proto"], &["proto"])?;

    Ok(())
}
