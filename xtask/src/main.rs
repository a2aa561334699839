//! Workspace build tasks. Run through the cargo alias: `cargo xtask web`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Parser)]
#[command(about = "hexglobe build tasks")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the browser bundle: wasm module, JS bindings, demo page.
    Web {
        /// Build without optimizations.
        #[arg(long)]
        debug: bool,
        /// Where to write the bundle.
        #[arg(long, default_value = "target/web")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Web { debug, out_dir } => web(debug, &out_dir),
    }
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn run(command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to start {command:?}"))?;
    if !status.success() {
        bail!("{command:?} exited with {status}");
    }
    Ok(())
}

fn web(debug: bool, out_dir: &Path) -> Result<()> {
    let root = workspace_root();
    let profile = if debug { "debug" } else { "release" };

    let mut cargo = Command::new(env!("CARGO"));
    let _ = cargo
        .current_dir(&root)
        .args(["rustc", "--lib", "--package", "hexglobe"])
        .args(["--target", WASM_TARGET])
        .args(["--no-default-features", "--features", "web"]);
    if !debug {
        let _ = cargo.arg("--release");
    }
    let _ = cargo.args(["--", "--crate-type=cdylib"]);
    run(&mut cargo)?;

    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join("hexglobe.wasm");
    let out_dir = root.join(out_dir);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    run(Command::new("wasm-bindgen")
        .arg("--target")
        .arg("web")
        .arg("--out-dir")
        .arg(out_dir.join("pkg"))
        .arg(&wasm))
    .context(
        "wasm-bindgen failed (install with `cargo install wasm-bindgen-cli`)",
    )?;

    let page = root.join("web").join("index.html");
    let _ = std::fs::copy(&page, out_dir.join("index.html"))
        .with_context(|| format!("copying {}", page.display()))?;

    println!("web bundle written to {}", out_dir.display());
    Ok(())
}
