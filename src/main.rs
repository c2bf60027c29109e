use anyhow::{Context, Result};
use bayesnet::common::report::{print_classification, print_cpds, print_topology};
use bayesnet::common::setup::parse_configuration_options;
use bayesnet::common::{CommandLineOptions, Mode};
use bayesnet::inference::classify;
use bayesnet::scenarios::StudentNetwork;
use bayesnet::{BayesianNetwork, RawDataset, learn_structure, print_green, print_red};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<()> {
    let options = parse_configuration_options()?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match &options.mode {
        Mode::Learn {
            data,
            bins,
            class_feature,
        } => run_learn(&options, data, *bins, class_feature.as_deref(), &mut rng),
        Mode::Demo { samples } => run_demo(&options, *samples, &mut rng),
    }
}

fn run_learn(
    options: &CommandLineOptions,
    path: &str,
    bins: Option<usize>,
    class_feature: Option<&str>,
    rng: &mut StdRng,
) -> Result<()> {
    let raw = RawDataset::from_json_file(path).with_context(|| format!("Failed to load dataset '{}'", path))?;
    let dataset = match bins {
        Some(bins) => raw.discretize(bins),
        None => raw.to_codes(),
    }
    .context("Failed to encode dataset")?;

    let mut network = BayesianNetwork::new();
    let (_, observations) = dataset.to_observations(&mut network)?;
    learn_structure(&mut network, &observations, &options.search, rng).context("Structure learning failed")?;

    print_topology(&network)?;
    print_cpds(&network)?;
    let log_likelihood = network.model_log_likelihood(&observations)?;
    print_green!("Model log likelihood: {}", log_likelihood);

    if let Some(feature) = class_feature {
        let class = match network.find(feature) {
            Some(class) => class,
            None => {
                print_red!("No feature named '{}' in the dataset", feature);
                return Ok(());
            }
        };
        let report = classify(&network, class, &observations, rng).context("Classification failed")?;
        print_classification(&report);
    }
    Ok(())
}

fn run_demo(options: &CommandLineOptions, samples: usize, rng: &mut StdRng) -> Result<()> {
    let student = StudentNetwork::new()?;
    let observations = student.network.sample_batch(samples, rng)?;
    info!("Drew {} samples from the student network", observations.len());
    print_green!(
        "Log likelihood under the true network: {}",
        student.network.model_log_likelihood(&observations)?
    );

    let mut refit = student.network.clone();
    refit.fit_cpds(&observations)?;
    print_green!("CPDs refitted on the true topology:");
    print_cpds(&refit)?;

    let mut learned = student.network.clone();
    learn_structure(&mut learned, &observations, &options.search, rng)?;
    print_topology(&learned)?;
    print_green!(
        "Log likelihood under the learned network: {}",
        learned.model_log_likelihood(&observations)?
    );
    Ok(())
}
