use ellipse_detector::diagnostics::DetectionReport;
use ellipse_detector::edges::{gaussian_blur, image_gradients, EdgeMap, GradientKernel};
use ellipse_detector::image::{load_grayscale_image, write_json_file, ImageF32};
use ellipse_detector::{EllipseDetector, EllipseParams};
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "ellipse_demo".to_string());
    let config = parse_args(&program)?;

    let params = match &config.params_path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read params {}: {e}", path.display()))?;
            serde_json::from_str(&data)
                .map_err(|e| format!("Failed to parse params {}: {e}", path.display()))?
        }
        None => EllipseParams::default(),
    };

    let gray = load_grayscale_image(&config.input_path)?;
    let luminance = ImageF32::from_u8(&gray.as_view());
    let smoothed = gaussian_blur(&luminance);
    let grad = image_gradients(&smoothed, config.kernel);
    let map = EdgeMap::from_gradients(&grad, config.magnitude_threshold);

    let mut detector = EllipseDetector::new(params);
    detector.set_edge_map(&map);
    let report = detector
        .detect_with_diagnostics()
        .map_err(|e| e.to_string())?;

    if config.format.includes_text() {
        print_text_summary(&config.input_path, &report);
    }

    if config.format.includes_json() {
        if let Some(path) = &config.json_out {
            write_json_file(path, &report)?;
            println!("JSON report written to {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Both,
}

impl OutputFormat {
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "both" => Ok(Self::Both),
            other => Err(format!("Unknown format '{other}'. Use text|json|both.")),
        }
    }

    fn includes_text(&self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    fn includes_json(&self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }
}

struct CliConfig {
    input_path: PathBuf,
    format: OutputFormat,
    json_out: Option<PathBuf>,
    params_path: Option<PathBuf>,
    magnitude_threshold: f32,
    kernel: GradientKernel,
}

fn parse_args(program: &str) -> Result<CliConfig, String> {
    let mut args = env::args().skip(1);
    let mut input_path: Option<PathBuf> = None;
    let mut format = OutputFormat::Text;
    let mut json_out: Option<PathBuf> = None;
    let mut params_path: Option<PathBuf> = None;
    let mut magnitude_threshold = 0.1f32;
    let mut kernel = GradientKernel::Sobel;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage(program));
                std::process::exit(0);
            }
            "--format" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--format expects a value\n{}", usage(program)))?;
                format = OutputFormat::from_str(&value)?;
            }
            "--json-out" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--json-out expects a path\n{}", usage(program)))?;
                json_out = Some(PathBuf::from(value));
            }
            "--params" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--params expects a path\n{}", usage(program)))?;
                params_path = Some(PathBuf::from(value));
            }
            "--mag-thresh" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--mag-thresh expects a value\n{}", usage(program)))?;
                magnitude_threshold = value
                    .parse()
                    .map_err(|_| format!("Invalid magnitude threshold '{value}'"))?;
            }
            "--kernel" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("--kernel expects sobel|scharr\n{}", usage(program)))?;
                kernel = match value.to_lowercase().as_str() {
                    "sobel" => GradientKernel::Sobel,
                    "scharr" => GradientKernel::Scharr,
                    other => return Err(format!("Unknown kernel '{other}'. Use sobel|scharr.")),
                };
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option '{arg}'\n{}", usage(program)));
            }
            _ => {
                if input_path.is_some() {
                    return Err(format!(
                        "Unexpected positional argument '{arg}'\n{}",
                        usage(program)
                    ));
                }
                input_path = Some(PathBuf::from(arg));
            }
        }
    }

    let input_path = input_path.ok_or_else(|| usage(program))?;
    Ok(CliConfig {
        input_path,
        format,
        json_out,
        params_path,
        magnitude_threshold,
        kernel,
    })
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <image.png> [--format text|json|both] [--json-out report.json] \\\n         [--params params.json] [--mag-thresh 0.1] [--kernel sobel|scharr]\n\n\
Detects ellipses in an image and emits a result summary or JSON report.\n\
Examples:\n  {program} photo.png --format both --json-out photo_report.json\n  {program} scan.png --mag-thresh 0.05 --kernel scharr\n"
    )
}

fn print_text_summary(input: &std::path::Path, report: &DetectionReport) {
    println!("Detection summary for {}", input.display());
    println!(
        "  segments: total={} short={} straight={}",
        report.arcs.total_segments, report.arcs.short_rejected, report.arcs.straight_rejected
    );
    println!(
        "  arcs per quadrant: q1={} q2={} q3={} q4={}",
        report.quadrants.q1, report.quadrants.q2, report.quadrants.q3, report.quadrants.q4
    );
    println!(
        "  hypotheses: triplets={} estimated={} validated={} clustered={}",
        report.candidates.triplets,
        report.candidates.estimated,
        report.candidates.validated,
        report.candidates.clustered
    );
    println!("  ellipses: {}", report.ellipses.len());
    for (i, e) in report.ellipses.iter().enumerate() {
        println!(
            "    [{i}] center=({:.1}, {:.1}) a={:.1} b={:.1} rho={:.1}° score={:.3}",
            e.center.x,
            e.center.y,
            e.a_axis,
            e.b_axis,
            e.rho.to_degrees(),
            e.score
        );
    }
    println!("  latency: {:.3} ms", report.timing.total_ms);
    for stage in &report.timing.stages {
        println!("    {}: {:.3} ms", stage.label, stage.elapsed_ms);
    }
}
