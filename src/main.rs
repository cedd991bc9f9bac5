use std::fs;
use std::path::PathBuf;
use std::process;
use std::str;

use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use tracing::{debug, error, info};

use gencode::code::random::Strategy;
use gencode::code::{AminoAcid, GeneticCode, Label, LabeledCode, Synthetic, SyntheticMeanings};
use gencode::constants::N_FREE_BLOCKS;
use gencode::io::code_table;
use gencode::io::results::{MutationMatrixWriter, OstrovWriter, RobustnessWriter};
use gencode::mutation;
use gencode::ostrov::{self, Labels, OstrovGenerator};
use gencode::score::{self, Grouping};
use gencode::utils::parse_range;
use gencode::{logging, Error, Result};

// progress is logged once per batch of seeds
const BATCH: u64 = 10000;

fn main() {
    logging::init();

    let matches = app().get_matches();
    let res = match matches.subcommand() {
        ("random", Some(m)) => run_random(m),
        ("mutations", Some(m)) => run_mutations(m),
        ("ostrov", Some(m)) => run_ostrov(m),
        ("create", Some(m)) => run_create(m),
        _ => Ok(()),
    };

    if let Err(why) = res {
        error!("{}", why);
        process::exit(1);
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    let standard = Arg::with_name("standard")
        .long("standard")
        .value_name("TSV")
        .help("standard code table, X standing for serine [default: NCBI table 1]")
        .takes_value(true);
    let out = Arg::with_name("out")
        .long("out")
        .short("o")
        .value_name("FILE")
        .help("output file")
        .takes_value(true)
        .required(true);
    let strategy = Arg::with_name("type")
        .long("type")
        .short("t")
        .value_name("STRATEGY")
        .help("aa_permutation, aa_permutation_restricted or random")
        .takes_value(true)
        .required(true);
    let seeds = Arg::with_name("seeds")
        .long("seeds")
        .short("s")
        .value_name("START-END")
        .help("inclusive range of seeds; seed 0 is the standard code")
        .takes_value(true)
        .required(true);
    let identity = Arg::with_name("identity")
        .long("identity")
        .help("count only synonymous substitutions as conservative");

    App::new("gencode")
        .version(crate_version!())
        .about("Randomized and Ostrov genetic codes and their robustness")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("random")
                .about("Score randomized codes")
                .arg(strategy.clone())
                .arg(seeds.clone())
                .arg(out.clone())
                .arg(standard.clone())
                .arg(identity.clone())
                .arg(
                    Arg::with_name("codes")
                        .long("codes")
                        .value_name("DIR")
                        .help("directory to write each code table to")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("mutations")
                .about("Count single-mutation paths between amino acids of randomized codes")
                .arg(strategy)
                .arg(seeds)
                .arg(out.clone())
                .arg(standard.clone()),
        )
        .subcommand(
            SubCommand::with_name("ostrov")
                .about("Enumerate and score Ostrov codes")
                .arg(out.clone())
                .arg(standard.clone())
                .arg(identity),
        )
        .subcommand(
            SubCommand::with_name("create")
                .about("Write the code table of one Ostrov code")
                .arg(
                    Arg::with_name("blocks")
                        .long("blocks")
                        .value_names(&["B1", "B2", "B3", "B4"])
                        .help("new letter of each free block, or - for no change")
                        .number_of_values(N_FREE_BLOCKS as u64)
                        .required(true),
                )
                .arg(
                    Arg::with_name("markers")
                        .long("markers")
                        .value_names(&["X", "Z", "B", "J"])
                        .help("resolve the markers X, Z, B and J to these amino acids, or - if unused")
                        .number_of_values(N_FREE_BLOCKS as u64),
                )
                .arg(out)
                .arg(standard),
        )
}

// required arguments are enforced by clap
fn required<'a>(m: &'a ArgMatches, name: &str) -> &'a str {
    m.value_of(name).unwrap_or_default()
}

fn standard_code(m: &ArgMatches) -> Result<GeneticCode> {
    match m.value_of("standard") {
        Some(path) => {
            info!(path, "reading standard code");
            code_table::read_standard(path)
        }
        None => Ok(GeneticCode::standard()),
    }
}

fn grouping(m: &ArgMatches) -> Grouping {
    if m.is_present("identity") {
        Grouping::Identity
    } else {
        Grouping::PhysChem
    }
}

/// Parse a letter, with `-` standing for none.
fn parse_optional<T>(x: &str) -> Result<Option<T>>
where
    T: str::FromStr<Err = Error>,
{
    if x.trim() == "-" {
        Ok(None)
    } else {
        x.parse().map(Some)
    }
}

fn run_random(m: &ArgMatches) -> Result<()> {
    let strategy: Strategy = required(m, "type").parse()?;
    let (start, end) = parse_range(required(m, "seeds"))?;
    let standard = standard_code(m)?;
    let grouping = grouping(m);

    let codes_dir = m.value_of("codes").map(PathBuf::from);
    if let Some(ref dir) = codes_dir {
        fs::create_dir_all(dir)?;
    }

    info!(%strategy, start, end, "scoring randomized codes");
    let mut out = RobustnessWriter::from_file(required(m, "out"), strategy.preserves_blocks())?;
    for seed in start..=end {
        let code = strategy.generate(&standard, seed)?;
        out.write(seed, &code, &score::robustness(&code, &grouping))?;
        if let Some(ref dir) = codes_dir {
            code_table::write_code(dir.join(format!("code_{}.tsv", seed)), &code)?;
        }
        if (seed - start + 1) % BATCH == 0 {
            debug!(seed, "scored batch");
        }
    }
    out.flush()?;

    info!(n = end - start + 1, "done");
    Ok(())
}

fn run_mutations(m: &ArgMatches) -> Result<()> {
    let strategy: Strategy = required(m, "type").parse()?;
    let (start, end) = parse_range(required(m, "seeds"))?;
    let standard = standard_code(m)?;

    info!(%strategy, start, end, "counting mutations of randomized codes");
    let mut out = MutationMatrixWriter::from_file(required(m, "out"))?;
    for seed in start..=end {
        let code = strategy.generate(&standard, seed)?;
        out.write(&mutation::number_of_mutations(&code))?;
        if (seed - start + 1) % BATCH == 0 {
            debug!(seed, "counted batch");
        }
    }
    out.flush()?;

    info!(n = end - start + 1, "done");
    Ok(())
}

fn run_ostrov(m: &ArgMatches) -> Result<()> {
    let standard = standard_code(m)?;
    let generator = OstrovGenerator::new(&standard, grouping(m));

    info!("enumerating Ostrov codes");
    let mut out = OstrovWriter::from_file(required(m, "out"))?;
    let mut n = 0;
    for k in 0..=N_FREE_BLOCKS {
        let mut n_k = 0;
        for record in generator.records(k) {
            out.write(&record)?;
            n_k += 1;
        }
        debug!(k, n = n_k, "wrote codes");
        n += n_k;
    }
    out.flush()?;

    info!(n, "done");
    Ok(())
}

fn run_create(m: &ArgMatches) -> Result<()> {
    let standard = standard_code(m)?;

    let mut labels: Labels = [None; N_FREE_BLOCKS];
    if let Some(values) = m.values_of("blocks") {
        for (label, x) in labels.iter_mut().zip(values) {
            *label = parse_optional::<Label>(x)?;
        }
    }
    let labeled = ostrov::assemble(&standard, &labels);

    let mut out = code_table::Writer::from_file(required(m, "out"))?;
    match m.values_of("markers") {
        Some(values) => {
            let mut meanings = SyntheticMeanings::new();
            for (&s, x) in Synthetic::iter().zip(values) {
                if let Some(aa) = parse_optional::<AminoAcid>(x)? {
                    meanings.set(s, aa);
                }
            }
            let code = labeled.resolve(&meanings)?;
            out.write_labeled(&LabeledCode::from(&code))?;
        }
        None => out.write_labeled(&labeled)?,
    }

    info!(path = required(m, "out"), "wrote code");
    Ok(())
}
