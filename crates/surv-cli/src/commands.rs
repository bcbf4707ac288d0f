use anyhow::Result;

use surv_cli::{RunConfig, RunResult, run_workdir};

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<RunResult> {
    let config = RunConfig {
        workdir: cli.workdir.clone(),
        output_dir: cli.output_dir.clone(),
        profile: cli.profile.into(),
    };
    run_workdir(&config)
}
