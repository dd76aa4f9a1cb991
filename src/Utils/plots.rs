//! plotters rendering of the three figures: the curve, the rotated solid (still image
//! and rotation animation) and the cross-section animation.
use crate::Utils::task_config::RevolutionTask;
use crate::global::{PlotTheme, theme};
use crate::numerical::disk_method::SampleSet;
use crate::numerical::revolution_surface::{
    CrossSectionFrame, SolidSurface, cross_section_frames, solid_frames,
};
use crate::revolution::{Calculation, RevolutionError};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

type PlotResult = Result<(), Box<dyn Error>>;

/// min and max of the finite values, widened a little; never an empty range
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return (-1.0, 1.0);
    }
    let span = max - min;
    if span == 0.0 {
        let pad = if min == 0.0 { 1.0 } else { 0.1 * min.abs() };
        return (min - pad, max + pad);
    }
    (min - 0.05 * span, max + 0.05 * span)
}

/// pieces of the curve between non-finite samples
fn finite_segments(x: &[f64], y: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if yi.is_finite() {
            current.push((xi, yi));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn text_style(theme: &PlotTheme) -> TextStyle<'static> {
    (theme.font_family, theme.font_size)
        .into_font()
        .color(&theme.font_color)
}

/// line plot of y = f(x)
pub fn plot_function(
    title: &str,
    arg: &str,
    label: &str,
    samples: &SampleSet,
    path: &Path,
    size: (u32, u32),
) -> PlotResult {
    let theme = theme();
    let text = text_style(theme);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let (x_min, x_max) = padded_range(samples.x.iter());
    let (y_min, y_max) = padded_range(samples.y.iter());
    let mut chart = ChartBuilder::on(&root)
        .caption(title, text.clone())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(arg)
        .y_desc(label)
        .axis_style(theme.font_color)
        .label_style(text.clone())
        .light_line_style(theme.font_color.mix(0.05))
        .bold_line_style(theme.font_color.mix(0.15))
        .draw()?;

    for segment in finite_segments(samples.x.as_slice(), samples.y.as_slice()) {
        chart.draw_series(LineSeries::new(segment, CYAN.stroke_width(2)))?;
    }
    root.present()?;
    Ok(())
}

/// x range and the radius used for both y and z axes
fn solid_bounds(samples: &SampleSet) -> ((f64, f64), f64) {
    let (x_min, x_max) = padded_range(samples.x.iter());
    let r = samples.max_radius();
    let r = if r > 0.0 { 1.05 * r } else { 1.0 };
    ((x_min, x_max), r)
}

fn draw_solid(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    surface: &SolidSurface,
    x_range: (f64, f64),
    r: f64,
    title: &str,
) -> PlotResult {
    let theme = theme();
    let text = text_style(theme);
    root.fill(&theme.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, text.clone())
        .margin(20)
        .build_cartesian_3d(x_range.0..x_range.1, -r..r, -r..r)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.3;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .label_style(text.clone())
        .light_grid_style(theme.font_color.mix(0.05))
        .bold_grid_style(theme.font_color.mix(0.15))
        .max_light_lines(3)
        .draw()?;

    let (x_lo, x_hi) = x_range;
    let width = x_hi - x_lo;
    chart.draw_series(surface.quads().into_iter().map(|quad| {
        // hue follows x along the axis of rotation
        let t = (quad[0].0 - x_lo) / width;
        let color = HSLColor(0.55 - 0.35 * t, 0.8, 0.5);
        Polygon::new(quad.to_vec(), color.mix(0.7).filled())
    }))?;
    Ok(())
}

/// 3D view of the full solid of revolution
pub fn plot_solid(
    title: &str,
    samples: &SampleSet,
    surface: &SolidSurface,
    path: &Path,
    size: (u32, u32),
) -> PlotResult {
    let (x_range, r) = solid_bounds(samples);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_solid(&root, surface, x_range, r, title)?;
    root.present()?;
    Ok(())
}

/// GIF of the solid being swept out, one frame per surface
pub fn animate_solid(
    title: &str,
    samples: &SampleSet,
    frames: &[SolidSurface],
    path: &Path,
    size: (u32, u32),
    frame_delay_ms: u32,
) -> PlotResult {
    let (x_range, r) = solid_bounds(samples);
    let root = BitMapBackend::gif(path, size, frame_delay_ms)?.into_drawing_area();
    for surface in frames {
        draw_solid(&root, surface, x_range, r, title)?;
        root.present()?;
    }
    Ok(())
}

/// GIF of the filled profile f(x)·cos(α) .. −f(x)·cos(α) as α goes around
pub fn animate_cross_section(
    title: &str,
    arg: &str,
    samples: &SampleSet,
    frames: &[CrossSectionFrame],
    path: &Path,
    size: (u32, u32),
    frame_delay_ms: u32,
) -> PlotResult {
    let theme = theme();
    let text = text_style(theme);
    let ((x_min, x_max), r) = solid_bounds(samples);
    let root = BitMapBackend::gif(path, size, frame_delay_ms)?.into_drawing_area();

    for frame in frames {
        root.fill(&theme.background)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, text.clone())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, -r..r)?;
        chart
            .configure_mesh()
            .x_desc(arg)
            .axis_style(theme.font_color)
            .label_style(text.clone())
            .light_line_style(theme.font_color.mix(0.05))
            .bold_line_style(theme.font_color.mix(0.15))
            .draw()?;

        let (red, green, blue, alpha) = frame.fill;
        let fill = RGBAColor(red, green, blue, alpha);
        let x = frame.x.as_slice();
        for (upper, lower) in finite_segments(x, frame.upper.as_slice())
            .into_iter()
            .zip(finite_segments(x, frame.lower.as_slice()))
        {
            let outline: Vec<(f64, f64)> =
                upper.iter().copied().chain(lower.iter().rev().copied()).collect();
            chart.draw_series(std::iter::once(Polygon::new(outline, fill.filled())))?;
            chart.draw_series(LineSeries::new(upper, theme.font_color))?;
            chart.draw_series(LineSeries::new(lower, theme.font_color))?;
        }
        root.present()?;
    }
    Ok(())
}

/// Renders all figures of a calculation into `task.plots.output_dir`.
/// Returns the written files.
pub fn render_all(
    calculation: &Calculation,
    task: &RevolutionTask,
) -> Result<Vec<PathBuf>, RevolutionError> {
    let plots = &task.plots;
    fs::create_dir_all(&plots.output_dir)?;
    let size = (plots.width, plots.height);
    let samples = &calculation.result.samples;
    let function = &calculation.function;
    let arg = function.variable().unwrap_or("x");
    let label = function.label();
    let title = format!("{} = {}", label, function.source());
    let to_plot_error = |e: Box<dyn Error>| RevolutionError::Plot(e.to_string());

    let function_png = plots.output_dir.join("function.png");
    plot_function(&title, arg, &label, samples, &function_png, size).map_err(to_plot_error)?;

    let solid_png = plots.output_dir.join("solid.png");
    let surface = SolidSurface::new(samples, task.sampling.theta_points);
    plot_solid("Solid of Revolution", samples, &surface, &solid_png, size)
        .map_err(to_plot_error)?;

    let rotation_gif = plots.output_dir.join("solid_rotation.gif");
    let frames = solid_frames(samples, task.sampling.theta_points, task.sampling.frames);
    animate_solid(
        "Solid of Revolution",
        samples,
        &frames,
        &rotation_gif,
        size,
        plots.frame_delay_ms,
    )
    .map_err(to_plot_error)?;

    let section_gif = plots.output_dir.join("cross_section.gif");
    let sections = cross_section_frames(samples, task.sampling.frames);
    animate_cross_section(
        "Cross-section of the Solid",
        arg,
        samples,
        &sections,
        &section_gif,
        size,
        plots.frame_delay_ms,
    )
    .map_err(to_plot_error)?;

    let written = vec![function_png, solid_png, rotation_gif, section_gif];
    for path in &written {
        info!("plot saved to {}", path.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::disk_method::VolumeResult;
    use crate::revolution::calculate;
    use crate::symbolic::symbolic_lambdify::parse;
    use std::f64::consts::PI;

    fn small_task(function: &str, a: f64, b: f64, dir: &Path) -> RevolutionTask {
        let mut task = RevolutionTask::new(function, a, b);
        task.sampling.frames = 3;
        task.sampling.theta_points = 10;
        task.plots.output_dir = dir.to_path_buf();
        task.plots.width = 320;
        task.plots.height = 240;
        task
    }

    fn assert_all_written(written: &[PathBuf], dir: &Path) {
        let names: Vec<String> = written
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(
            names,
            ["function.png", "solid.png", "solid_rotation.gif", "cross_section.gif"]
        );
        for path in written {
            assert!(path.starts_with(dir));
            let size = fs::metadata(path).unwrap().len();
            assert!(size > 0, "{} is empty", path.display());
        }
    }

    #[test]
    fn test_render_all_half_circle() {
        let dir = tempfile::tempdir().unwrap();
        let task = small_task("sqrt(1 - x^2)", -1.0, 1.0, dir.path());
        let calculation = calculate(&task).unwrap();
        let written = render_all(&calculation, &task).unwrap();
        assert_all_written(&written, dir.path());
    }

    #[test]
    fn test_render_all_with_infinite_sample() {
        let dir = tempfile::tempdir().unwrap();
        let task = small_task("ln(x)", 0.0, 1.0, dir.path());
        let function = parse(&task.function).unwrap();
        let samples = SampleSet::new(&function, 0.0, 1.0, task.sampling.points);
        assert_eq!(samples.y[0], f64::NEG_INFINITY);
        let calculation = Calculation {
            function,
            result: VolumeResult {
                volume: 2.0 * PI,
                abs_error: 0.0,
                evaluations: 0,
                interval: (0.0, 1.0),
                samples,
            },
        };
        let written = render_all(&calculation, &task).unwrap();
        assert_all_written(&written, dir.path());
    }

    #[test]
    fn test_render_all_empty_interval() {
        let dir = tempfile::tempdir().unwrap();
        let task = small_task("x + 1", 0.5, 0.5, dir.path());
        let calculation = calculate(&task).unwrap();
        assert_eq!(calculation.volume(), 0.0);
        let written = render_all(&calculation, &task).unwrap();
        assert_all_written(&written, dir.path());
    }

    #[test]
    fn test_render_all_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("run").join("plots");
        let task = small_task("1", 0.0, 2.0, &nested);
        let calculation = calculate(&task).unwrap();
        let written = render_all(&calculation, &task).unwrap();
        assert_all_written(&written, &nested);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0.0, 10.0].iter()), (-0.5, 10.5));
        assert_eq!(padded_range([f64::NAN, f64::INFINITY].iter()), (-1.0, 1.0));
        assert_eq!(padded_range([0.0, 0.0].iter()), (-1.0, 1.0));
        let (lo, hi) = padded_range([2.0, f64::NAN, 2.0].iter());
        assert!(lo < 2.0 && hi > 2.0);
    }

    #[test]
    fn test_finite_segments() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.0, f64::NAN, 2.0, 3.0, f64::INFINITY];
        let segments = finite_segments(&x, &y);
        assert_eq!(segments, vec![vec![(0.0, 1.0)], vec![(2.0, 2.0), (3.0, 3.0)]]);
        assert!(finite_segments(&x, &[f64::NAN; 5]).is_empty());
    }
}
