fn main() {
    // 生成 built.rs 文件（版本信息等）
    built::write_built_file().expect("Failed to acquire build-time information");

    println!("cargo:rerun-if-changed=build.rs");
}
