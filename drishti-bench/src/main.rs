use clap::{Parser, ValueEnum};
use drishti_bench::BenchmarkRunner;
use drishti_core::{BenchConfig, BenchError, Device};
use drishti_models::{HubModelProvider, RecordedEvaluator, WeightStore, WeightStoreConfig};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "drishti-bench")]
#[command(about = "Benchmark object-detection model variants and generate a comparison report")]
struct Cli {
    /// Dataset descriptor (yaml) path
    #[arg(long, default_value = "data/custom_dataset/dataset.yaml")]
    data: PathBuf,

    /// Compute device for the whole run
    #[arg(long, value_enum, default_value = "cpu")]
    device: DeviceArg,

    /// Variant ids to test, in order
    #[arg(long, value_delimiter = ',', default_values_t = [
        "yolov8n".to_string(),
        "yolov8s".to_string(),
        "yolov8m".to_string(),
    ])]
    variants: Vec<String>,

    /// Directory the report is written into
    #[arg(long, default_value = "results/benchmark")]
    results_dir: PathBuf,

    /// Recorded evaluation results (JSON) replayed by the evaluator
    #[arg(long, default_value = "data/eval/recorded.json")]
    fixtures: PathBuf,

    /// Directory where downloaded weights are cached (defaults to
    /// ~/.drishti/weights)
    #[arg(long)]
    weights_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceArg {
    Cpu,
    Gpu,
}

impl From<DeviceArg> for Device {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Cpu => Device::Cpu,
            DeviceArg::Gpu => Device::Gpu,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = BenchConfig {
        variants: cli.variants,
        dataset: cli.data,
        results_dir: cli.results_dir,
        device: cli.device.into(),
    };

    let store_config = cli
        .weights_dir
        .map(|weights_dir| WeightStoreConfig { weights_dir })
        .unwrap_or_default();
    let provider = Arc::new(HubModelProvider::new(WeightStore::new(store_config)));

    let evaluator = match RecordedEvaluator::from_file(&cli.fixtures) {
        Ok(evaluator) => Arc::new(evaluator),
        Err(e) => {
            eprintln!("Could not load recorded evaluation results: {}", e);
            eprintln!("Pass --fixtures pointing at a JSON file of recorded results.");
            std::process::exit(1);
        }
    };

    let runner = BenchmarkRunner::new(config, provider, evaluator)?;
    match runner.run().await {
        Ok(path) => {
            println!("Report generated: {}", path.display());
            Ok(())
        }
        Err(BenchError::EmptyTable) => {
            eprintln!("No variant produced usable results; no report was generated.");
            eprintln!("Check the log output above for per-variant failures.");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
