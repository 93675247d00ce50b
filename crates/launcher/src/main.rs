use std::path::PathBuf;

use clap::Parser;
use flappy_game_protocol::profile::{LaunchProfile, LaunchTarget};
use flappy_runtime::Runtime;
use flappy_shell::{AppShell, ShellHost};
use flappy_telemetry::TelemetryConfig;
use tracing::info;

use crate::bootstrap::GameBootstrap;

mod bootstrap;

pub type LauncherResult<T> = color_eyre::Result<T>;

/// Launch the flappy-bird application shell with a dynamically resolved game
/// module.
#[derive(Parser, Debug)]
#[command(version)]
struct LauncherArgs {
    /// A list of paths to launch profile files (TOML or JSON).
    #[arg(short, long, env("FLAPPY_PROFILE"), action = clap::ArgAction::Append)]
    profiles: Vec<PathBuf>,

    /// Mirror launcher logs into this file.
    #[arg(long, env("FLAPPY_LOG_FILE"))]
    log_file: Option<PathBuf>,
}

fn run(args: LauncherArgs) -> LauncherResult<()> {
    info!("Launcher started");

    if args.profiles.is_empty() {
        info!("No profiles provided");
    } else {
        info!("Loading profiles from {:?}", args.profiles);
    }

    let profiles: Vec<_> = args
        .profiles
        .iter()
        .map(LaunchProfile::from_file)
        .collect::<Result<_, _>>()?;

    let target = LaunchTarget::from_profiles(&profiles);
    info!(module = %target.module, binding = %target.binding, "resolved launch target");

    let runtime = Runtime::new();
    flappy_bird_core::install(&runtime);

    let title = target
        .window_title
        .clone()
        .unwrap_or_else(|| "flappy bird".to_owned());

    let shell = AppShell::new(title);
    let launcher = GameBootstrap::new(runtime, target);

    ShellHost::new(shell, launcher, None).run()?;

    Ok(())
}

fn install_error_hooks() {
    let _ = color_eyre::config::HookBuilder::default()
        .issue_url(concat!(env!("CARGO_PKG_REPOSITORY"), "/issues/new"))
        .add_issue_metadata("version", env!("CARGO_PKG_VERSION"))
        .install();
}

fn main() -> LauncherResult<()> {
    let args = match LauncherArgs::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    let _telemetry = flappy_telemetry::install(TelemetryConfig {
        log_file: args.log_file.clone(),
    })?;
    install_error_hooks();

    run(args)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::LauncherArgs;

    #[test]
    fn profile_flags_accumulate() {
        let args = LauncherArgs::parse_from([
            "flappy-launcher",
            "-p",
            "a.toml",
            "--profiles",
            "b.toml",
        ]);

        assert_eq!(
            args.profiles,
            vec![
                std::path::PathBuf::from("a.toml"),
                std::path::PathBuf::from("b.toml")
            ]
        );
        assert_eq!(args.log_file, None);
    }
}
