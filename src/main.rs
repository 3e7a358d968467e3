use std::ffi::OsString;

use argparse::{ArgumentParser, HelpConfig};
use miette::Result;
use tracing_subscriber::EnvFilter;

fn build_parser() -> ArgumentParser {
    let mut parser = ArgumentParser::new("argparse-demo");
    parser
        .short_description("Sum a list of integers")
        .config(HelpConfig::from_env());

    parser
        .add_argument::<bool>(["-h", "--help"])
        .help("show help message and exit");
    parser
        .add_argument::<Vec<i64>>(["ints"])
        .help("list of integers to sum together");
    parser
        .add_argument::<u32>(["-b", "--base"])
        .help("base to print the output in")
        .default_value(10)
        .implicit_value(16);
    parser.add_argument::<String>(["file"]).help("input file");
    parser
}

/// Render `value` in `base`, keeping the sign apart from the digits
fn format_in_base(value: i128, base: u32) -> Result<String> {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    let digits = match base {
        2 => format!("0b{magnitude:b}"),
        8 => format!("0{magnitude:o}"),
        10 => magnitude.to_string(),
        16 => format!("0x{magnitude:x}"),
        _ => miette::bail!(
            code = "argparse_demo::unsupported_base",
            help = "choose one of 2, 8, 10 or 16",
            "cannot print in base {base}"
        ),
    };
    Ok(format!("{sign}{digits}"))
}

/// Convert raw process arguments, rejecting any that are not UTF-8
fn collect_args(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>> {
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                miette::miette!(
                    code = "argparse_demo::invalid_utf8",
                    "argument {raw:?} is not valid UTF-8"
                )
            })
        })
        .collect()
}

/// `-h`/`--help` before any `--` separator
fn help_requested(args: &[String]) -> bool {
    args.iter()
        .take_while(|a| *a != "--")
        .any(|a| a == "-h" || a == "--help")
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;
    init_tracing();

    let parser = build_parser();
    let args = collect_args(std::env::args_os().skip(1))?;

    // Required positionals would reject a bare --help
    if help_requested(&args) {
        println!("{}", parser.help());
        return Ok(());
    }

    let results = parser.parse_args(args)?;
    let ints = results.get::<Vec<i64>>("ints")?;
    let base = results.get::<u32>("base")?;
    let file = results.get::<String>("file")?;
    tracing::debug!(count = ints.len(), base, "summing");

    let sum: i128 = ints.iter().map(|&i| i128::from(i)).sum();
    println!("{} {}", format_in_base(sum, base)?, file);
    Ok(())
}
