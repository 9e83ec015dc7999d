use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Build, lint and launch tasks for terrainview")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Format check, clippy and tests in one go
    Ci,
    /// Run clippy with warnings denied
    Lint,
    /// Run the workspace tests
    Test,
    /// Launch the desktop viewer, forwarding any extra arguments
    Run {
        #[arg(long)]
        release: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print mesh statistics for a grid through the headless CLI
    Mesh {
        #[arg(long, default_value = "64")]
        width: u32,
        #[arg(long, default_value = "64")]
        height: u32,
    },
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Ci => {
            cargo("fmt", &["fmt", "--all", "--", "--check"])?;
            lint()?;
            cargo("test", &["test", "--workspace"])?;
        }
        Task::Lint => lint()?,
        Task::Test => cargo("test", &["test", "--workspace"])?,
        Task::Run { release, args } => {
            let mut cmd = vec!["run", "-p", "terrainview-desktop"];
            if release {
                cmd.push("--release");
            }
            cmd.push("--");
            cmd.extend(args.iter().map(String::as_str));
            cargo("terrainview-desktop", &cmd)?;
        }
        Task::Mesh { width, height } => {
            let (width, height) = (width.to_string(), height.to_string());
            cargo(
                "mesh",
                &[
                    "run", "-q", "-p", "terrainview-cli", "--", "mesh", "--width", &width,
                    "--height", &height,
                ],
            )?;
        }
    }
    Ok(())
}

fn lint() -> Result<()> {
    cargo(
        "clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

/// Run `cargo` with `args`, failing if it exits unsuccessfully.
fn cargo(label: &str, args: &[&str]) -> Result<()> {
    println!("==> {label}: cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        bail!("{label} failed ({status})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_forwards_viewer_flags() {
        let cli = Cli::parse_from(["xtask", "run", "--release", "--technique", "simple", "-v"]);
        match cli.task {
            Task::Run { release, args } => {
                assert!(release);
                assert_eq!(args, ["--technique", "simple", "-v"]);
            }
            _ => panic!("expected run task"),
        }
    }

    #[test]
    fn deny_is_not_a_task() {
        assert!(Cli::try_parse_from(["xtask", "deny"]).is_err());
        assert!(Cli::try_parse_from(["xtask", "ci"]).is_ok());
    }
}
