// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use k3skvm_cli::cli::{self, CliArgs, CommandContext};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Initialize tracing; stdout is reserved for rendered output
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let ctx = match args.settings().and_then(|settings| CommandContext::new(&settings)) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", cli::failure_line(&e.into()));
            return ExitCode::FAILURE;
        }
    };

    let code = cli::run(&args.command, &ctx, &mut io::stdout(), &mut io::stderr()).await;

    ExitCode::from(code)
}
