fn main() {
    // Stamp the build date for the About dialog
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=SOLIDTUI_BUILD_DATE={}", build_date);
    println!("cargo:rerun-if-changed=build.rs");
}
