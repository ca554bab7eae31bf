//! Tether CLI
//!
//! Loads a plugin script into a fresh bridge and optionally calls one of its
//! functions with string arguments.

mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use tether_common::warning;
use tether_js::{BridgeOptions, EngineBridge};

use report::CallReport;

/// Tether — call into a JavaScript engine plugin
#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Check that a plugin loads
    tether plugin.js

    # Call a function with string arguments
    tether plugin.js --call greet --arg World

    # Inline plugin, JSON output
    tether --script '({ add: function (a, b) { return a + b; } })' -c add -a 1 -a 2 --json
"#)]
struct Cli {
    /// Path to the plugin script
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Plugin source given directly instead of a file
    #[arg(long, value_name = "SOURCE", conflicts_with = "path")]
    script: Option<String>,

    /// Function to call on the plugin
    #[arg(short, long, value_name = "NAME")]
    call: Option<String>,

    /// String argument for the call (repeatable, passed in order)
    #[arg(short, long = "arg", value_name = "STRING", requires = "call")]
    args: Vec<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,

    /// Do not print bridge warnings
    #[arg(short, long)]
    quiet: bool,

    /// Abort any loop in the plugin after this many iterations
    #[arg(long, value_name = "N")]
    loop_limit: Option<u64>,

    /// Also expose the plugin as a global with this name
    #[arg(long, value_name = "NAME")]
    plugin_name: Option<String>,
}

impl Cli {
    fn bridge_options(&self) -> BridgeOptions {
        let mut options = BridgeOptions::default();
        if let Some(limit) = self.loop_limit {
            options = options.with_loop_iteration_limit(limit);
        }
        if let Some(name) = &self.plugin_name {
            options = options.with_plugin_name(name.clone());
        }
        options
    }

    fn load_source(&self) -> Result<Option<String>> {
        if let Some(source) = &self.script {
            return Ok(Some(source.clone()));
        }
        self.path
            .as_ref()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("failed to read plugin script '{}'", path.display()))
            })
            .transpose()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.quiet {
        warning::set_enabled(false);
    }

    let source = cli.load_source()?;
    let mut bridge = EngineBridge::with_options(source.as_deref(), &cli.bridge_options());

    let Some(name) = cli.call.as_deref() else {
        print_status(&bridge, source.is_some());
        return Ok(());
    };

    let outcome = bridge.call_with_strings(name, None, &cli.args);
    let report = CallReport::new(&mut bridge, name, &cli.args, outcome);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    if !report.ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Report whether the plugin loaded. Exits non-zero if the script threw.
fn print_status(bridge: &EngineBridge, had_script: bool) {
    if let Some(exception) = bridge.exception() {
        eprintln!("{} {}", "Plugin failed to load:".red(), exception.display());
        std::process::exit(1);
    }

    match (had_script, bridge.engine_plugin()) {
        (_, Some(_)) => println!("{}", "Plugin loaded".green()),
        (true, None) => println!("{}", "Script ran but did not produce a plugin object".yellow()),
        (false, None) => println!("No plugin script given; bridge has only the global object"),
    }
}
