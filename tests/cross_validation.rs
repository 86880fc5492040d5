use std::io::Write;

use pretty_assertions::assert_eq;
use textfold::{
    classifiers::NaiveBayes,
    config::{ExperimentConfig, GeneratorConfig, TokenizerConfig, TokenizerKind},
    datasets,
    documents::{TextDocument, TrainingExample},
    evaluation::{cross_validate, partition, Evaluator, Stage},
    features::NGram,
    tokenize::SmartSplit,
};

const SPORTS: [&str; 10] = [
    "the team scored a late goal in the match",
    "a penalty goal won the match for the team",
    "the keeper saved a goal and the team won the match",
    "our team needs one more goal this match",
    "the striker missed an open goal but the team won the match",
    "fans cheered the team after the goal sealed the match",
    "the coach praised the team for every goal in the match",
    "an own goal ended the match for the away team",
    "the team celebrated the goal after the match",
    "a header goal in extra time gave the team the match",
];

const TECH: [&str; 10] = [
    "the compiler rejected the build because the code had a borrow error",
    "a new compiler makes the build faster for old code",
    "the compiler inlines small functions when the build optimises code",
    "our build uses an incremental compiler for this code",
    "the compiler reported a type error and the build failed on that code",
    "upgrade the compiler before the build touches the code",
    "the optimising compiler removed dead code from the build",
    "a compiler bug broke the build for generic code",
    "the compiler explains every lifetime error in the code before the build",
    "benchmarks of the code improved once the build used the new compiler flag",
];

fn corpus() -> Vec<TrainingExample<TextDocument>> {
    SPORTS
        .iter()
        .map(|text| TrainingExample::new(TextDocument::new(*text), "sports"))
        .chain(
            TECH.iter()
                .map(|text| TrainingExample::new(TextDocument::new(*text), "tech")),
        )
        .collect()
}

fn classifier() -> anyhow::Result<NaiveBayes<NGram<SmartSplit>>> {
    Ok(NaiveBayes::new(NGram::new(1, 1, SmartSplit::default())?, 1.0)?)
}

#[test]
fn test_every_example_is_classified_once() -> anyhow::Result<()> {
    let examples = corpus();
    let mut classifier = classifier()?;

    let results = cross_validate(&mut classifier, &examples, 5, 4)?;
    let matrix = results.confusion_matrix();

    assert_eq!(matrix.total(), 20);
    assert_eq!(matrix.labels(), ["sports".to_string(), "tech".to_string()]);

    // Column sums are the number of examples of each class
    for label in ["sports", "tech"] {
        let actual: u64 = matrix
            .labels()
            .iter()
            .map(|predicted| matrix.count(predicted, label))
            .sum::<Result<u64, _>>()?;

        assert_eq!(actual, 10);
    }

    Ok(())
}

#[test]
fn test_separable_corpus() -> anyhow::Result<()> {
    let examples = corpus();
    let mut classifier = classifier()?;

    let results = cross_validate(&mut classifier, &examples, 4, 11)?;
    let matrix = results.confusion_matrix();

    assert_eq!(matrix.accuracy(), Some(1.0));
    assert_eq!(matrix.precision("sports")?, Some(1.0));
    assert_eq!(matrix.recall("tech")?, Some(1.0));
    assert_eq!(matrix.f1("tech")?, Some(1.0));

    Ok(())
}

#[test]
fn test_same_seed_same_matrix() -> anyhow::Result<()> {
    let examples = corpus();

    let first = cross_validate(&mut classifier()?, &examples, 3, 42)?;
    let second = cross_validate(&mut classifier()?, &examples, 3, 42)?;

    assert_eq!(first.confusion_matrix(), second.confusion_matrix());
    assert_eq!(partition(&examples, 3, 42).len(), 3);

    Ok(())
}

#[test]
fn test_zero_folds() -> anyhow::Result<()> {
    let examples = corpus();
    let mut evaluator = Evaluator::new(0, 4);

    let results = evaluator.cross_validate(&mut classifier()?, &examples)?;

    assert_eq!(results.confusion_matrix().total(), 0);
    assert_eq!(evaluator.stage(), Stage::Complete);

    Ok(())
}

#[test]
fn test_configured_experiment() -> anyhow::Result<()> {
    let mut dataset = tempfile::Builder::new().suffix(".txt").tempfile()?;
    for (label, texts) in [("sports", SPORTS), ("tech", TECH)] {
        for text in texts {
            writeln!(dataset, "{}|{}", label, text)?;
        }
    }

    let config = ExperimentConfig {
        folds: 5,
        separator: "|".to_string(),
        tokenizer: TokenizerConfig {
            kind: TokenizerKind::StopWords,
            ..Default::default()
        },
        ..Default::default()
    };

    let examples = datasets::load_training_set(dataset.path(), &config.separator)?;
    assert_eq!(examples.len(), 20);

    for generator in [
        GeneratorConfig::NGram { n: 1, min: 1 },
        GeneratorConfig::Bns {
            n: 1,
            min: 1,
            features_per_class: 5,
        },
        GeneratorConfig::Sf {
            n: 1,
            min: 1,
            num_features: 10,
            threshold: 0.5,
        },
    ] {
        let tokenizer = config.tokenizer.build()?;
        let mut classifier = NaiveBayes::new(generator.build(tokenizer)?, config.smoothing)?;

        let results = cross_validate(&mut classifier, &examples, config.folds, config.seed)?;

        assert_eq!(results.confusion_matrix().total(), 20);
    }

    Ok(())
}
