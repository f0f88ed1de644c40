use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use serde::Deserialize;
use snapshot_lib::SampleSeries;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{info, warn};

pub const BLOCK_NUMBER_LABEL: &str = "Block number";
pub const VOTING_POWER_LABEL: &str = "Total vePUL";

const CHART_SIZE: (u32, u32) = (1024, 640);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot render a chart without samples")]
    EmptySeries,

    #[error("unsupported chart format {0}, only svg is available")]
    UnsupportedFormat(PathBuf),

    #[error("could not draw the chart: {0}")]
    Drawing(String),

    #[error("could not launch the chart viewer {program}")]
    ViewerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("chart viewer exited with {0}")]
    ViewerStatus(ExitStatus),
}

fn drawing_error<E>(e: DrawingAreaErrorKind<E>) -> Error
where
    E: std::error::Error + Send + Sync,
{
    Error::Drawing(e.to_string())
}

/// Draws the series as a connected line of voting power against block number.
pub fn render(series: &SampleSeries, path: &Path) -> Result<(), Error> {
    let is_svg = path
        .extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if !is_svg {
        return Err(Error::UnsupportedFormat(path.to_path_buf()));
    }

    let (first, last) = series.block_range().ok_or(Error::EmptySeries)?;
    // a single sampled block still needs a non empty axis
    let last = last.max(first + 1);
    let top = series
        .voting_powers_f64()
        .into_iter()
        .fold(0.0, f64::max);
    let top = if top > 0.0 { top * 1.05 } else { 1.0 };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(first..last, 0f64..top)
        .map_err(drawing_error)?;
    chart
        .configure_mesh()
        .x_labels(6)
        .x_desc(BLOCK_NUMBER_LABEL)
        .y_desc(VOTING_POWER_LABEL)
        .draw()
        .map_err(drawing_error)?;
    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .map(|sample| (sample.block, sample.voting_power.to_f64())),
            BLUE.stroke_width(2),
        ))
        .map_err(drawing_error)?;

    root.present().map_err(drawing_error)?;
    info!(path = %path.display(), samples = series.len(), "chart rendered");
    Ok(())
}

/// Program displaying the chart, the chart path is appended to `args`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewer {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Viewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }
}

fn viewer_command(viewer: Option<&Viewer>) -> Command {
    if let Some(Viewer { program, args }) = viewer {
        let mut command = Command::new(program);
        command.args(args);
        return command;
    }

    if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg("-W");
        command
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "/WAIT", ""]);
        command
    } else {
        Command::new("xdg-open")
    }
}

/// Opens the chart at `path` and blocks until the viewer exits.
///
/// Without an explicit viewer the platform opener is used. `open -W` and
/// `start /WAIT` wait for the window to close, `xdg-open` usually hands the file
/// over and exits at once, so on Linux a blocking display needs a viewer.
pub fn show(path: &Path, viewer: Option<&Viewer>) -> Result<(), Error> {
    if viewer.is_none() && !cfg!(any(target_os = "macos", windows)) {
        warn!("no chart viewer configured, xdg-open may return before the chart is closed");
    }
    let mut command = viewer_command(viewer);
    let program = command.get_program().to_string_lossy().into_owned();
    command.arg(path);

    info!(%program, path = %path.display(), "waiting for the chart viewer to exit");
    let status = command
        .status()
        .map_err(|source| Error::ViewerLaunch { program, source })?;
    if !status.success() {
        return Err(Error::ViewerStatus(status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapshot_lib::{RawVotingPower, Sample, VotingPower};

    // voting power grows by 1000 tokens per sample
    fn linear(start: u64, step: u64, len: u64) -> SampleSeries {
        (0..len)
            .map(|i| Sample {
                block: start + i * step,
                voting_power: VotingPower::from_raw(&RawVotingPower::from(
                    i as u128 * 1_000 * 10u128.pow(18),
                ))
                .unwrap(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn render_labelled_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vepul.svg");

        render(&linear(10647813, 10, 100), &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains(BLOCK_NUMBER_LABEL));
        assert!(svg.contains(VOTING_POWER_LABEL));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn render_sampled_series() {
        use snapshot_lib::reader::test_api::ScriptedReader;
        use snapshot_lib::{SamplerConfig, SnapshotSampler};

        let reader = ScriptedReader::new(|block| RawVotingPower::from(block) * 10u64.pow(18));
        let contract = "0x5f3b5DfEb7B28CDbD7FAba78963EE202a494e2A2".parse().unwrap();
        let series = SnapshotSampler::new(&reader, SamplerConfig::new(contract, 10647813))
            .sample(10648803)
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sampled.svg");

        render(&series, &path).unwrap();
        assert!(path.exists());
        assert_eq!(reader.calls().len(), series.len());
    }

    #[test]
    fn render_single_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.svg");

        render(&linear(10647813, 0, 100), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn reject_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");

        assert!(matches!(
            render(&SampleSeries::default(), &path),
            Err(Error::EmptySeries)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn reject_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vepul.png");

        assert!(matches!(
            render(&linear(0, 1, 2), &path),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn viewer_exit_status() {
        let path = Path::new("vepul.svg");
        assert!(show(path, Some(&Viewer::new("true"))).is_ok());
        assert!(matches!(
            show(path, Some(&Viewer::new("false"))),
            Err(Error::ViewerStatus(_))
        ));
        assert!(matches!(
            show(path, Some(&Viewer::new("/nonexistent/viewer"))),
            Err(Error::ViewerLaunch { .. })
        ));
    }

    #[test]
    fn viewer_program_keeps_spaces() {
        let viewer = Viewer {
            program: "/Applications/Image Viewer/viewer".to_string(),
            args: vec!["--wait".to_string(), "--title=Total vePUL".to_string()],
        };
        let command = viewer_command(Some(&viewer));

        assert_eq!(command.get_program(), "/Applications/Image Viewer/viewer");
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            ["--wait", "--title=Total vePUL"]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn platform_viewer_on_linux() {
        assert_eq!(viewer_command(None).get_program(), "xdg-open");
    }

    #[cfg(unix)]
    #[test]
    fn viewer_receives_chart_path_last() {
        let dir = tempfile::tempdir().unwrap();
        let copy = dir.path().join("copy.svg");
        let chart = dir.path().join("chart with spaces.svg");
        std::fs::write(&chart, "<svg/>").unwrap();

        // sh -c binds the appended chart path to $0
        let viewer = Viewer {
            program: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                format!("cp \"$0\" '{}'", copy.display()),
            ],
        };
        show(&chart, Some(&viewer)).unwrap();
        assert_eq!(std::fs::read_to_string(&copy).unwrap(), "<svg/>");
    }
}
