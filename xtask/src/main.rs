use std::process;

use anyhow::Result;
use clap::{ArgMatches, Command};

/// A named cargo invocation run as part of `xtask test`.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
}

const CORE_TESTS: Step = Step {
    label: "treeswap-core tests",
    args: &["test", "--package", "treeswap-core"],
};

const BIN_TESTS: Step = Step {
    label: "treeswap-bin tests",
    args: &["test", "--package", "treeswap-bin"],
};

const WORKSPACE_TESTS: Step = Step {
    label: "workspace tests",
    args: &["test", "--workspace"],
};

const DOC_TESTS: Step = Step {
    label: "documentation tests",
    args: &["test", "--doc", "--package", "treeswap-core"],
};

const INTEGRATION: &[Step] = &[
    Step {
        label: "build treeswap",
        args: &["build", "--bin", "treeswap"],
    },
    Step {
        label: "treeswap --help",
        args: &["run", "--bin", "treeswap", "--", "--help"],
    },
    // Dry run over the workspace sources; must leave everything untouched
    Step {
        label: "treeswap dry run",
        args: &[
            "run", "--bin", "treeswap", "--",
            "--replace", "treeswap", "treeswap-renamed",
            "--dir", "crates",
            "--dry-run", "--no-confirm", "--quiet",
        ],
    },
];

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Install treeswap binary locally"))
        .subcommand(
            Command::new("run")
                .about("Build and run treeswap with arguments")
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .arg(clap::Arg::new("args")
                    .help("Arguments to pass to treeswap")
                    .action(clap::ArgAction::Append)
                    .num_args(0..))
        )
        .subcommand(
            Command::new("test")
                .about("Test Operations")
                .subcommand(Command::new("all").about("Run all tests for the entire project"))
                .subcommand(Command::new("core").about("Run tests for treeswap-core"))
                .subcommand(Command::new("bin").about("Run tests for treeswap-bin"))
                .subcommand(Command::new("integration").about("Build the binary and exercise the CLI"))
        )
        .get_matches();

    match args.subcommand() {
        Some(("install", _args)) => cargo(&["install", "--path", "crates/treeswap-bin"]),
        Some(("run", args)) => handle_run_command(args),
        Some(("test", args)) => handle_test_commands(args),
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn handle_run_command(args: &ArgMatches) -> Result<()> {
    let run_args: Vec<&str> = args.get_many::<String>("args")
        .map_or(Vec::new(), |vals| vals.map(String::as_str).collect());

    let mut command = vec!["run", "--bin", "treeswap", "--"];
    command.extend(run_args);
    cargo(&command)
}

fn handle_test_commands(args: &ArgMatches) -> Result<()> {
    match args.subcommand() {
        Some(("all", _args)) => test_all(),
        Some(("core", _args)) => run_step(&CORE_TESTS),
        Some(("bin", _args)) => run_step(&BIN_TESTS),
        Some(("integration", _args)) => INTEGRATION.iter().try_for_each(run_step),
        _ => {
            println!("Available test commands:");
            println!("  all          - Run all tests for the entire project");
            println!("  core         - Run tests for treeswap-core");
            println!("  bin          - Run tests for treeswap-bin");
            println!("  integration  - Build the binary and exercise the CLI");
            Ok(())
        }
    }
}

fn test_all() -> Result<()> {
    let steps = [&CORE_TESTS, &BIN_TESTS, &WORKSPACE_TESTS, &DOC_TESTS]
        .into_iter()
        .chain(INTEGRATION);

    let mut failed = Vec::new();
    for step in steps {
        if let Err(e) = run_step(step) {
            println!("❌ {}: {}", step.label, e);
            failed.push(step.label);
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Test suite failed: {}", failed.join(", "));
    }

    println!("🎉 All tests passed successfully!");
    Ok(())
}

fn run_step(step: &Step) -> Result<()> {
    println!("🧪 Running {}...", step.label);
    cargo(step.args)?;
    println!("✅ {} passed\n", step.label);
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = process::Command::new("cargo").args(args).status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
