/*! The `rlx` command-line interface.

Compiles patterns given on the command line and either tokenizes an input
string with them (`rlx scan`) or prints the intermediate artifacts of the
compilation pipeline (`rlx dump`).
*/

use anyhow::Context;
use clap::{arg, ArgAction, ArgMatches, Command};

use relex::fsa::dfa::Dfa;
use relex::fsa::nfa::Nfa;
use relex::Scanner;
use relex_parser::Parser;

const APP_HELP_TEMPLATE: &str = r#"relex {version}, a DFA-based lexer generator.

{usage-heading}
  {usage}

{all-args}
"#;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::init();

    let args = cli().get_matches();

    match args.subcommand() {
        Some(("scan", args)) => scan(args),
        Some(("dump", args)) => dump(args),
        _ => unreachable!(),
    }
}

fn command(name: &'static str) -> Command {
    Command::new(name).help_template(
        r#"{about-with-newline}
{usage-heading}
  {usage}

{all-args}
"#,
    )
}

fn cli() -> Command {
    Command::new("rlx")
        .version(env!("CARGO_PKG_VERSION"))
        .help_template(APP_HELP_TEMPLATE)
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommands(vec![
            command("scan")
                .about("Tokenize a string with the given patterns")
                .arg(
                    arg!(-p --pattern <PATTERN> "Pattern to match, in priority order")
                        .action(ArgAction::Append)
                        .required(true),
                )
                .arg(arg!(<INPUT> "String to tokenize")),
            command("dump")
                .about("Print the automata compiled from the given patterns")
                .arg(
                    arg!(-p --pattern <PATTERN> "Pattern to compile, in priority order")
                        .action(ArgAction::Append)
                        .required(true),
                )
                .arg(arg!(--ast "Print each pattern's syntax tree"))
                .arg(arg!(--nfa "Print the combined NFA"))
                .arg(arg!(--dfa "Print the DFA")),
        ])
}

fn patterns(args: &ArgMatches) -> Vec<&str> {
    args.get_many::<String>("pattern").unwrap().map(String::as_str).collect()
}

fn scan(args: &ArgMatches) -> anyhow::Result<()> {
    let patterns = patterns(args);
    let input = args.get_one::<String>("INPUT").unwrap();

    let lexer = relex::compile(patterns)?;

    for token in Scanner::new(&lexer).scan(input.as_bytes()) {
        let token = token?;
        println!(
            "{}: {:?}",
            lexer.pattern(token.pattern()),
            String::from_utf8_lossy(&input.as_bytes()[token.range()]),
        );
    }

    Ok(())
}

fn dump(args: &ArgMatches) -> anyhow::Result<()> {
    let patterns = patterns(args);

    // With no section flag given, print every section.
    let all = !args.get_flag("ast")
        && !args.get_flag("nfa")
        && !args.get_flag("dfa");

    let mut regexps = Vec::new();
    for &pattern in &patterns {
        let regexp = Parser::new(pattern)
            .parse()
            .with_context(|| format!("invalid pattern `{pattern}`"))?;
        regexps.push(regexp);
    }

    if all || args.get_flag("ast") {
        for (pattern, regexp) in patterns.iter().zip(regexps.iter()) {
            println!("{pattern}:");
            print!("{regexp}");
        }
    }

    let nfa = Nfa::from_regexps(regexps.iter())?;

    if all || args.get_flag("nfa") {
        println!("NFA:");
        print!("{nfa}");
    }

    if all || args.get_flag("dfa") {
        let dfa = Dfa::from_nfa(&nfa)?;
        println!("DFA:");
        print!("{dfa}");
    }

    Ok(())
}
