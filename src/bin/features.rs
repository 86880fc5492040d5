//! Command line tool to inspect the vocabulary a feature set generator selects

use std::path::PathBuf;

use anyhow::anyhow;
use log::info;
use pico_args::Arguments;
use textfold::{
    cli::Generator,
    config::{ExperimentConfig, TokenizerKind},
    datasets,
    documents::unzip_examples,
    features::{feature_distribution, FeatureSetGenerator},
};

const HELP: &str = "\
Usage: features DATASET [OPTIONS]

Arguments:
  DATASET              A training set with one '<label><separator><text>' example per line

Options:
  -h, --help           Print help
  -c, --config         A .json, .yaml or .yml experiment config
  -g, --generator      The feature set generator to use ('ngram', 'bns' or 'sf')
  -t, --tokenizer      The tokenizer to use ('full', 'stopwords' or 'smart-split')
  --separator          The label separator (defaults to '`')
  --report             Print the class distribution of each selected feature
";

#[derive(Debug)]
struct Args {
    /// The training set to select features from
    dataset: PathBuf,

    /// An optional experiment config
    config: Option<PathBuf>,

    /// Overrides the configured generator
    generator: Option<String>,

    /// Overrides the configured tokenizer
    tokenizer: Option<String>,

    /// Overrides the configured separator
    separator: Option<String>,

    /// Prints the class distribution report
    report: bool,
}

fn parse_args() -> anyhow::Result<Option<Args>> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let args = Args {
        config: pargs.opt_value_from_str(["-c", "--config"])?,
        generator: pargs.opt_value_from_str(["-g", "--generator"])?,
        tokenizer: pargs.opt_value_from_str(["-t", "--tokenizer"])?,
        separator: pargs.opt_value_from_str("--separator")?,
        report: pargs.contains("--report"),
        dataset: pargs.free_from_str().map_err(|e| match e {
            pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
            _ => anyhow!("{}", e),
        })?,
    };

    Ok(Some(args))
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = parse_args()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(generator) = &args.generator {
        let generator = Generator::try_from(generator.as_str())?;

        if Generator::from(&config.generator) != generator {
            config.generator = generator.default_config();
        }
    }

    if let Some(tokenizer) = &args.tokenizer {
        config.tokenizer.kind = TokenizerKind::try_from(tokenizer.as_str())?;
    }

    if let Some(separator) = args.separator {
        config.separator = separator;
    }

    let examples = datasets::load_training_set(&args.dataset, &config.separator)?;
    let (documents, labels) = unzip_examples(&examples);

    let tokenizer = config.tokenizer.build()?;
    let generator = config.generator.build(tokenizer)?;

    let feature_space = generator.feature_space(&documents, &labels)?;

    info!(
        "Selected {} features with {}",
        feature_space.len(),
        Generator::from(&config.generator)
    );

    if args.report {
        let report = feature_distribution(&documents, &labels, &feature_space, &*generator)?;

        for distribution in report {
            println!("{}", distribution);
        }
    } else {
        for feature in &feature_space {
            println!("{}", feature);
        }
    }

    Ok(())
}
