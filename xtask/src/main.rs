//! Build automation for k3skvm
//!
//! Usage: cargo xtask <command>
//!
//! - build: compile the k3skvm binary
//! - test: run unit and integration tests
//! - dist: package the release binary with an example config
//! - install: copy the release binary under a prefix
//! - ci: formatting, clippy and tests in one go

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN_NAME: &str = "k3skvm";
const EXAMPLE_CONF: &str = "k3skvm.toml.example";

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for k3skvm")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the k3skvm binary
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Only run the tests/ integration suites
        #[arg(long)]
        integration: bool,
    },
    /// Package the release binary into a tarball
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Install the release binary
    Install {
        #[arg(long, default_value = "/usr/local")]
        prefix: String,
    },
    /// Run format check, clippy and tests
    Ci,
    /// Format code
    Format {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy with warnings denied
    Clippy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = project_root()?;
    let sh = Shell::new()?;
    sh.change_dir(&root);

    match cli.command {
        Task::Build { release } => build(&sh, release),
        Task::Test { integration } => test(&sh, integration),
        Task::Dist { target } => dist(&sh, &root, target.as_deref()),
        Task::Install { prefix } => install(&sh, &root, &prefix),
        Task::Ci => ci(&sh),
        Task::Format { check } => format(&sh, check),
        Task::Clippy => clippy(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building {}...", BIN_NAME);
    let profile: &[&str] = if release { &["--release"] } else { &[] };
    cmd!(sh, "cargo build --bin {BIN_NAME} {profile...}").run()?;
    println!(
        "✅ Build completed: target/{}/{}",
        if release { "release" } else { "debug" },
        BIN_NAME
    );
    Ok(())
}

fn test(sh: &Shell, integration: bool) -> Result<()> {
    println!("🧪 Running tests...");
    if integration {
        for suite in ["client_test", "command_test", "cli_test"] {
            cmd!(sh, "cargo test --test {suite}").run()?;
        }
    } else {
        cmd!(sh, "cargo test --workspace").run()?;
    }
    println!("✅ All tests passed");
    Ok(())
}

fn release_binary(root: &Path, target: Option<&str>) -> PathBuf {
    match target {
        Some(triple) => root.join("target").join(triple).join("release").join(BIN_NAME),
        None => root.join("target/release").join(BIN_NAME),
    }
}

fn dist(sh: &Shell, root: &Path, target: Option<&str>) -> Result<()> {
    println!("📦 Creating distribution package...");
    let target_args: Vec<String> = target
        .map(|t| vec!["--target".to_string(), t.to_string()])
        .unwrap_or_default();
    cmd!(sh, "cargo build --release --bin {BIN_NAME} {target_args...}").run()?;

    let dist_dir = root.join("dist");
    sh.create_dir(&dist_dir)?;
    sh.copy_file(release_binary(root, target), dist_dir.join(BIN_NAME))?;
    sh.copy_file(root.join(EXAMPLE_CONF), dist_dir.join(EXAMPLE_CONF))?;

    let archive = format!(
        "{}-{}-{}.tar.gz",
        BIN_NAME,
        env!("CARGO_PKG_VERSION"),
        target.unwrap_or("native")
    );
    cmd!(sh, "tar -czf {archive} -C dist {BIN_NAME} {EXAMPLE_CONF}")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {}", archive);
    Ok(())
}

fn install(sh: &Shell, root: &Path, prefix: &str) -> Result<()> {
    println!("📥 Installing {} to {}...", BIN_NAME, prefix);

    let binary = release_binary(root, None);
    if !binary.exists() {
        build(sh, true)?;
    }

    let bin_dir = Path::new(prefix).join("bin");
    sh.create_dir(&bin_dir)?;
    let installed = bin_dir.join(BIN_NAME);
    sh.copy_file(&binary, &installed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&installed, std::fs::Permissions::from_mode(0o755))?;
    }

    println!("✅ Installed to: {}", installed.display());
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");
    format(sh, true)?;
    clippy(sh)?;
    test(sh, false)?;
    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
        println!("✅ Code formatting is correct");
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
        println!("✅ Code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    println!("✅ Clippy checks passed");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    match Path::new(env!("CARGO_MANIFEST_DIR")).parent() {
        Some(root) => Ok(root.to_path_buf()),
        None => bail!("xtask manifest has no parent directory"),
    }
}
