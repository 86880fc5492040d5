//! Command line tool to cross-validate a feature set generator over a training set

use std::path::PathBuf;

use anyhow::anyhow;
use log::info;
use pico_args::Arguments;
use textfold::{
    classifiers::NaiveBayes,
    cli::Generator,
    config::{ExperimentConfig, TokenizerKind},
    datasets,
    evaluation::Evaluator,
};

const HELP: &str = "\
Usage: evaluate DATASET [OPTIONS]

Arguments:
  DATASET              A training set with one '<label><separator><text>' example per line

Options:
  -h, --help           Print help
  -c, --config         A .json, .yaml or .yml experiment config
  -g, --generator      The feature set generator to use ('ngram', 'bns' or 'sf')
  -t, --tokenizer      The tokenizer to use ('full', 'stopwords' or 'smart-split')
  -k, --folds          Number of folds (defaults to 10)
  -s, --seed           Seed for the fold partitioning (defaults to 4)
  --separator          The label separator (defaults to '`')
  --json               Print the results as JSON
";

#[derive(Debug)]
struct Args {
    dataset: PathBuf,
    config: Option<PathBuf>,
    generator: Option<String>,
    tokenizer: Option<String>,
    folds: Option<usize>,
    seed: Option<u64>,
    separator: Option<String>,
    json: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            generator: pargs.opt_value_from_str(["-g", "--generator"])?,
            tokenizer: pargs.opt_value_from_str(["-t", "--tokenizer"])?,
            folds: pargs.opt_value_from_str(["-k", "--folds"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            separator: pargs.opt_value_from_str("--separator")?,
            json: pargs.contains("--json"),
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }

    /// Layer the command line overrides on top of the config file, if any
    fn config(&self) -> anyhow::Result<ExperimentConfig> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::load(path)?,
            None => ExperimentConfig::default(),
        };

        if let Some(generator) = &self.generator {
            let generator = Generator::try_from(generator.as_str())?;

            if Generator::from(&config.generator) != generator {
                config.generator = generator.default_config();
            }
        }

        if let Some(tokenizer) = &self.tokenizer {
            config.tokenizer.kind = TokenizerKind::try_from(tokenizer.as_str())?;
        }

        if let Some(folds) = self.folds {
            config.folds = folds;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        if let Some(separator) = &self.separator {
            config.separator = separator.clone();
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config()?;

    info!("Configuration: {:?}", config);

    let examples = datasets::load_training_set(&args.dataset, &config.separator)?;

    let tokenizer = config.tokenizer.build()?;
    let generator = config.generator.build(tokenizer)?;
    let mut classifier = NaiveBayes::new(generator, config.smoothing)?;

    let mut evaluator = Evaluator::new(config.folds, config.seed);
    let results = evaluator.cross_validate(&mut classifier, &examples)?;

    info!(
        "Classified {} examples in {}ms",
        results.confusion_matrix().total(),
        results.elapsed_millis()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", results);
    }

    Ok(())
}
