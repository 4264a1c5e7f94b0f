use std::process::Command;

fn main() {
    let output = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
        .expect("failed to execute rustup");
    let installed = String::from_utf8_lossy(&output.stdout);
    let has_wasm_target = installed.lines().any(|line| line.trim() == "wasm32-unknown-unknown");
    if !has_wasm_target {
        panic!(
            "the wasm32-unknown-unknown target is required to build the dashboard; \
             install it with `rustup target add wasm32-unknown-unknown`"
        );
    }
}
