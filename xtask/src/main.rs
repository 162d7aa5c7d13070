// Satire API - Build Task Runner
// cargo xtask <command>

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use xshell::{Shell, cmd};

const BINARY_NAME: &str = "satire-api";

/// Plain cargo invocations; each entry is (name, cargo args, failure message)
const CARGO_STEPS: &[(&str, &[&str], &str)] = &[
    ("test", &["test", "--workspace"], "Tests failed"),
    ("fmt", &["fmt", "--all"], "Failed to format Rust code"),
    ("fmt-check", &["fmt", "--all", "--", "--check"], "Rust code is not formatted"),
    (
        "clippy",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "--deny",
            "warnings",
            "--allow",
            "clippy::uninlined-format-args",
        ],
        "Clippy checks failed",
    ),
];

/// Steps `ci` runs, in order
const CI_PIPELINE: &[&str] = &["fmt-check", "clippy", "test"];

fn main() -> Result<()> {
    let sh = Shell::new()?;
    sh.change_dir(project_root());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "build" => build(&sh, args.iter().any(|a| a == "--release")),
        "run" => {
            let rest = &args[1..];
            cmd!(sh, "cargo run -p {BINARY_NAME} -- {rest...}")
                .run()
                .context("Failed to run the server")
        },
        "ci" => {
            for (i, step) in CI_PIPELINE.iter().enumerate() {
                println!("[{}/{}] {}", i + 1, CI_PIPELINE.len(), step);
                cargo_step(&sh, step)?;
            }
            println!("CI pipeline passed");
            Ok(())
        },
        "dist" => dist(&sh),
        "clean" => {
            cmd!(sh, "cargo clean").run()?;
            sh.remove_path("build")?;
            Ok(())
        },
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        },
        other => cargo_step(&sh, other),
    }
}

fn print_help() {
    println!("Usage: cargo xtask <COMMAND>");
    println!();
    println!("  build [--release]   Build the server (release also lays out build/dist)");
    println!("  run [ARGS...]       Run the server with ARGS");
    for (name, args, _) in CARGO_STEPS {
        println!("  {:<19} cargo {}", name, args.join(" "));
    }
    println!("  ci                  {}", CI_PIPELINE.join(" + "));
    println!("  dist                Release build packed as build/dist/{}-<timestamp>.tar.gz", BINARY_NAME);
    println!("  clean               Remove target/ and build/");
}

/// Run one named entry of `CARGO_STEPS`
fn cargo_step(sh: &Shell, name: &str) -> Result<()> {
    let Some((_, args, failure)) = CARGO_STEPS.iter().find(|(step, _, _)| *step == name) else {
        print_help();
        bail!("unknown command: {name}");
    };
    let args: &[&str] = args;
    cmd!(sh, "cargo {args...}").run().context(*failure)
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if !release {
        return cmd!(sh, "cargo build -p {BINARY_NAME}").run().context("Failed to build");
    }

    cargo_step(sh, "clippy")?;
    cmd!(sh, "cargo build --release -p {BINARY_NAME}")
        .run()
        .context("Failed to build in release mode")?;

    // build/dist/{bin,conf,logs}
    let dist_dir = project_root().join("build/dist");
    for dir in ["bin", "conf", "logs"] {
        sh.create_dir(dist_dir.join(dir))?;
    }
    sh.copy_file(
        project_root().join("target/release").join(BINARY_NAME),
        dist_dir.join("bin"),
    )?;
    sh.copy_file(project_root().join("backend/conf/config.toml"), dist_dir.join("conf"))?;
    println!("Release layout written to {}", dist_dir.display());

    Ok(())
}

/// Release build packed as a timestamped tarball
fn dist(sh: &Shell) -> Result<()> {
    build(sh, true)?;

    let dist_dir = project_root().join("build/dist");
    let package_name = format!(
        "{}-{}.tar.gz",
        BINARY_NAME,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );

    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf {package_name} bin conf logs")
        .run()
        .context("Failed to create tarball")?;

    println!("Package: {}", dist_dir.join(&package_name).display());
    Ok(())
}

fn project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default()
}
