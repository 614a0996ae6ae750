/// Embed build metadata and track the bundled PowerShell helper.
///
/// `WSLKIT_BUILD_DATE` comes from the release pipeline; local builds report
/// `unknown`.
fn main() {
    let date = std::env::var("WSLKIT_BUILD_DATE").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo::rustc-env=WSLKIT_BUILD_DATE={date}");
    println!("cargo::rerun-if-env-changed=WSLKIT_BUILD_DATE");
    println!("cargo::rerun-if-changed=assets");
}
