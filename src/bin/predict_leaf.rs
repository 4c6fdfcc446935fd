//! One-shot leaf diagnosis from the command line.
//!
//! Drops a single image, submits it to the prediction endpoint and prints
//! the result. Useful for scripts and for checking that a server is up.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin predict_leaf -- <image> [--api-url <url>] [--tab symptoms|prevention]
//! ```
//!
//! Exit codes: 0 on a result, 1 on a rejected drop or failed prediction,
//! 2 on usage errors.

use std::io::Write;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use agri_detect::adapters::HttpPredictor;
use agri_detect::application::SessionController;
use agri_detect::config::normalize_api_url;
use agri_detect::domain::{PredictionResult, UploadError};
use agri_detect::ports::{PredictError, Predictor};
use agri_detect::ClientConfig;

const USAGE: &str = "Usage: predict_leaf <image> [--api-url <url>] [--tab symptoms|prevention]";

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListChoice {
    Both,
    Symptoms,
    Prevention,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    image: String,
    api_url: Option<String>,
    lists: ListChoice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Analyze(CliArgs),
    Help,
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut image: Option<String> = None;
    let mut api_url: Option<String> = None;
    let mut lists = ListChoice::Both;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let v = args
                    .next()
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| "--api-url needs a value".to_string())?;
                api_url = Some(normalize_api_url(&v).map_err(|e| e.to_string())?);
            }
            "--tab" => {
                lists = match args.next().as_deref() {
                    Some("symptoms") => ListChoice::Symptoms,
                    Some("prevention") => ListChoice::Prevention,
                    _ => return Err("--tab must be symptoms or prevention".to_string()),
                };
            }
            "-h" | "--help" => return Ok(Command::Help),
            other if other.starts_with("--") => return Err(format!("Unknown option: {other}")),
            other => {
                if image.is_some() {
                    return Err("Only one image can be analyzed at a time".to_string());
                }
                image = Some(other.to_string());
            }
        }
    }

    let image = image.ok_or_else(|| "Missing image path".to_string())?;
    Ok(Command::Analyze(CliArgs {
        image,
        api_url,
        lists,
    }))
}

/// Drop the image into a fresh session and submit it.
fn analyze<P>(predictor: Arc<P>, image: &str) -> agri_detect::Result<PredictionResult>
where
    P: Predictor,
{
    let mut controller = SessionController::new(predictor);
    controller.on_text_dropped(image)?;

    let pending = controller.begin_submit().ok_or(UploadError::Empty)?;
    let outcome = controller.predictor().predict(&pending.upload);
    controller.resolve(pending.ticket, outcome.clone());
    Ok(outcome?)
}

fn format_result(result: &PredictionResult, choice: ListChoice) -> String {
    let gauge = result.gauge();
    let mut out = format!(
        "Analysis Complete\n{}\n{}\n\n{}\n",
        result.disease_name,
        gauge.label(),
        result.details.description
    );

    let sections = [
        ("Symptoms", &result.details.symptoms, ListChoice::Symptoms),
        ("Treatment & Prevention", &result.details.prevention, ListChoice::Prevention),
    ];
    for (title, items, kind) in sections {
        if choice != ListChoice::Both && choice != kind {
            continue;
        }
        out.push_str(&format!("\n{title}:\n"));
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {item}\n", i + 1));
        }
    }
    out
}

/// Run one invocation and return its exit code.
fn execute<I, P, F>(
    args: I,
    config: &ClientConfig,
    connect: F,
    out: &mut impl Write,
    err: &mut impl Write,
) -> i32
where
    I: IntoIterator<Item = String>,
    P: Predictor,
    F: FnOnce(&str) -> Result<P, PredictError>,
{
    let args = match parse_args(args) {
        Ok(Command::Analyze(args)) => args,
        Ok(Command::Help) => {
            let _ = writeln!(out, "{USAGE}");
            return EXIT_OK;
        }
        Err(message) => {
            let _ = writeln!(err, "{message}\n{USAGE}");
            return EXIT_USAGE;
        }
    };

    let api_url = args.api_url.as_deref().unwrap_or(&config.api_url);
    let predictor = match connect(api_url) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            return EXIT_FAILURE;
        }
    };

    match analyze(predictor, &args.image) {
        Ok(result) => {
            let _ = write!(out, "{}", format_result(&result, args.lists));
            EXIT_OK
        }
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            EXIT_FAILURE
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_USAGE);
        }
    };

    let code = execute(
        std::env::args().skip(1),
        &config,
        HttpPredictor::new,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_detect::domain::{DiseaseDetails, ImageUpload};
    use agri_detect::AgriDetectError;
    use std::path::PathBuf;

    struct StubPredictor {
        outcome: Result<PredictionResult, PredictError>,
    }

    impl Predictor for StubPredictor {
        fn predict(&self, _image: &ImageUpload) -> Result<PredictionResult, PredictError> {
            self.outcome.clone()
        }
    }

    fn rust_result() -> PredictionResult {
        PredictionResult {
            disease_name: "Corn Common Rust".to_string(),
            confidence: 0.934,
            details: DiseaseDetails {
                description: "Pustules on both leaf surfaces.".to_string(),
                symptoms: vec!["Brick-red pustules".to_string(), "Yellowing".to_string()],
                prevention: vec!["Plant resistant hybrids".to_string()],
            },
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn leaf_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("agri-detect-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).expect("write leaf");
        path
    }

    fn run(
        argv: &[&str],
        outcome: Result<PredictionResult, PredictError>,
    ) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = execute(
            args(argv),
            &ClientConfig::default(),
            |_url: &str| {
                Ok(StubPredictor {
                    outcome: outcome.clone(),
                })
            },
            &mut out,
            &mut err,
        );
        (
            code,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    #[test]
    fn test_parse_args_defaults() {
        let parsed = parse_args(args(&["leaf.jpg"])).expect("parse");
        assert_eq!(
            parsed,
            Command::Analyze(CliArgs {
                image: "leaf.jpg".to_string(),
                api_url: None,
                lists: ListChoice::Both,
            })
        );
    }

    #[test]
    fn test_parse_args_options() {
        let parsed = parse_args(args(&[
            "--api-url",
            "http://leafhost:9000/",
            "leaf.png",
            "--tab",
            "prevention",
        ]))
        .expect("parse");
        assert_eq!(
            parsed,
            Command::Analyze(CliArgs {
                image: "leaf.png".to_string(),
                api_url: Some("http://leafhost:9000".to_string()),
                lists: ListChoice::Prevention,
            })
        );
        assert_eq!(parse_args(args(&["-h"])), Ok(Command::Help));
    }

    #[test]
    fn test_parse_args_rejects_bad_usage() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.jpg", "b.jpg"])).is_err());
        assert!(parse_args(args(&["a.jpg", "--tab", "roots"])).is_err());
        assert!(parse_args(args(&["a.jpg", "--api-url"])).is_err());
        assert!(parse_args(args(&["a.jpg", "--api-url", "ftp://host"])).is_err());
        assert!(parse_args(args(&["a.jpg", "--verbose"])).is_err());
    }

    #[test]
    fn test_exit_code_success_prints_result() {
        let path = leaf_file("corn.jpg");
        let (code, out, err) = run(&[path.to_str().expect("utf8 path")], Ok(rust_result()));

        assert_eq!(code, EXIT_OK);
        assert!(err.is_empty());
        assert!(out.contains("Corn Common Rust"));
        assert!(out.contains("93.4% Confidence"));
        assert!(out.contains("   1. Brick-red pustules\n"));
        assert!(out.contains("Treatment & Prevention:"));
    }

    #[test]
    fn test_exit_code_usage_error() {
        let (code, out, err) = run(&["--tab", "symptoms"], Ok(rust_result()));

        assert_eq!(code, EXIT_USAGE);
        assert!(out.is_empty());
        assert!(err.contains("Missing image path"));
        assert!(err.contains(USAGE));
    }

    #[test]
    fn test_exit_code_rejected_drop() {
        let (code, _out, err) = run(&["/tmp/leaf.gif"], Ok(rust_result()));

        assert_eq!(code, EXIT_FAILURE);
        assert!(err.contains("Unsupported file type"));
    }

    #[test]
    fn test_exit_code_failed_prediction() {
        let path = leaf_file("blurry.png");
        let (code, out, err) = run(
            &[path.to_str().expect("utf8 path")],
            Err(PredictError::Rejected {
                status: 400,
                message: "bad image".to_string(),
            }),
        );

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(err.contains("bad image"));
    }

    #[test]
    fn test_analyze_routes_errors_by_layer() {
        let stub = Arc::new(StubPredictor {
            outcome: Err(PredictError::Transport("connection refused".to_string())),
        });

        assert!(matches!(
            analyze(Arc::clone(&stub), "/tmp/notes.txt"),
            Err(AgriDetectError::Upload(UploadError::UnsupportedType(_)))
        ));

        let path = leaf_file("offline.jpg");
        assert!(matches!(
            analyze(stub, path.to_str().expect("utf8 path")),
            Err(AgriDetectError::Predict(PredictError::Transport(_)))
        ));
    }

    #[test]
    fn test_format_result_single_list() {
        let text = format_result(&rust_result(), ListChoice::Symptoms);
        assert!(text.contains("Symptoms:"));
        assert!(!text.contains("Treatment & Prevention:"));
    }
}
