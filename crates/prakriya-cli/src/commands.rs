use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::info_span;

use prakriya_core::{Grammar, PrakriyaConfig, State};
use prakriya_model::{Tag, Term, Upadesha, UpadeshaKind};

use crate::cli::{Cli, Command, DeriveArgs, OutputFormatArg};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell, render_report};
use crate::types::DeriveReport;

/// Run the parsed command and return what it prints.
pub fn run(cli: &Cli) -> Result<String> {
    let config = PrakriyaConfig::load_or_default(cli.config.as_deref()).context("load config")?;
    let grammar = Grammar::new(config).context("build grammar")?;
    match &cli.command {
        Command::Derive(args) => run_derive(&grammar, args),
        Command::Rules => Ok(run_rules(&grammar)),
        Command::Config => grammar.config().to_toml().context("render config"),
    }
}

pub fn run_derive(grammar: &Grammar, args: &DeriveArgs) -> Result<String> {
    let start = initial_state(args)?;
    let outcome = {
        let _span = info_span!("cli_derive", dhatu = %args.dhatu, suffix = %args.suffix).entered();
        grammar.deriver().derive(start)
    };
    let lakshana = args.lakshana.iter().map(ToString::to_string).collect();
    let report = DeriveReport::new(&args.dhatu, &args.suffix, lakshana, &outcome, args.trace);
    match args.format {
        OutputFormatArg::Text => Ok(render_report(&report)),
        OutputFormatArg::Json => serde_json::to_string_pretty(&report).context("serialize report"),
    }
}

/// Dhātu followed by the suffix, with the suffix carrying every lakṣaṇa,
/// marker and tag given on the command line.
pub fn initial_state(args: &DeriveArgs) -> Result<State> {
    let dhatu = Upadesha::parse_strict(&args.dhatu, UpadeshaKind::Dhatu)
        .with_context(|| format!("invalid dhatu {:?}", args.dhatu))?;
    let suffix = Upadesha::parse_strict(&args.suffix, UpadeshaKind::Vibhakti)
        .with_context(|| format!("invalid suffix {:?}", args.suffix))?;
    let dhatu = Term::from_upadesha(&dhatu).with_tags([Tag::Dhatu, Tag::Anga]);
    let suffix = Term::from_upadesha(&suffix)
        .with_tags([Tag::Pratyaya, Tag::Vibhakti, Tag::Tin])
        .with_tags(args.tags.iter().copied())
        .with_markers(args.markers.iter().copied())
        .with_lakshana(args.lakshana.iter().copied());
    Ok(State::new([dhatu, suffix]))
}

pub fn run_rules(grammar: &Grammar) -> String {
    let mut stages = Table::new();
    stages.set_header(vec![
        header_cell("#"),
        header_cell("Stage"),
        header_cell("Requires"),
        header_cell("Produces"),
    ]);
    apply_table_style(&mut stages);
    align_column(&mut stages, 0, CellAlignment::Right);
    for (index, stage) in grammar.pipeline().stages().iter().enumerate() {
        stages.add_row(vec![
            Cell::new(index + 1),
            Cell::new(stage.name()),
            op_cell(&stage.requires()),
            op_cell(&stage.produces()),
        ]);
    }

    let mut windows = Table::new();
    windows.set_header(vec![header_cell("Stage"), header_cell("Id"), header_cell("Rule")]);
    apply_table_style(&mut windows);
    align_column(&mut windows, 1, CellAlignment::Right);
    for (stage, rules) in grammar.rule_sets() {
        for rule in rules.rules() {
            windows.add_row(vec![
                Cell::new(stage),
                Cell::new(rule.id()),
                Cell::new(rule.name()),
            ]);
        }
    }
    format!("{stages}\n{windows}\n")
}

fn op_cell(ops: &[prakriya_model::Op]) -> Cell {
    if ops.is_empty() {
        return dim_cell("-");
    }
    Cell::new(
        ops.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    )
}
