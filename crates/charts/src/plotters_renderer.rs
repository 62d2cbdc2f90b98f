use crate::error::ChartError;
use crate::{BarPalette, CategorySamples, CategoryValue, ChartRenderer, ChartSpec};
use plotters::coord::Shift;
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LINE_BLUE: RGBColor = RGBColor(99, 110, 250);

const CAPTION_FONT: (&str, u32) = ("sans-serif", 30);
const LABEL_FONT: (&str, u32) = ("sans-serif", 16);

/// Renders charts to PNG with the `plotters` bitmap backend.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn canvas<'a>(
        &self,
        path: &'a Path,
    ) -> Result<DrawingArea<BitMapBackend<'a>, Shift>, ChartError> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| render_err(path, e))?;
        Ok(root)
    }

    /// A white image carrying only the title, used when there is nothing to plot.
    fn blank(&self, spec: &ChartSpec) -> Result<(), ChartError> {
        let root = self.canvas(&spec.path)?;
        root.titled(&spec.title, CAPTION_FONT).map_err(|e| render_err(&spec.path, e))?;
        root.present().map_err(|e| render_err(&spec.path, e))?;
        tracing::debug!(path = %spec.path.display(), "Rendered empty chart");
        Ok(())
    }
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new(1000, 600)
    }
}

impl ChartRenderer for PlottersRenderer {
    fn bar_chart(&self, spec: &ChartSpec, bars: &[CategoryValue]) -> Result<(), ChartError> {
        if bars.is_empty() {
            return self.blank(spec);
        }
        let axis = CategoryAxis::new(bars.iter().map(|b| b.label.clone()).collect());
        let y_max = axis_max(bars.iter().map(|b| b.value));

        let root = self.canvas(&spec.path)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(axis.clone(), 0f64..y_max)
            .map_err(|e| render_err(&spec.path, e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(axis.len())
            .label_style(LABEL_FONT)
            .draw()
            .map_err(|e| render_err(&spec.path, e))?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, bar.value)],
                    bar_color(spec.palette, i).filled(),
                )
            }))
            .map_err(|e| render_err(&spec.path, e))?;

        root.present().map_err(|e| render_err(&spec.path, e))?;
        tracing::debug!(path = %spec.path.display(), bars = bars.len(), "Rendered bar chart");
        Ok(())
    }

    fn line_chart(&self, spec: &ChartSpec, points: &[CategoryValue]) -> Result<(), ChartError> {
        if points.is_empty() {
            return self.blank(spec);
        }
        let axis = CategoryAxis::new(points.iter().map(|p| p.label.clone()).collect());
        let y_max = axis_max(points.iter().map(|p| p.value));

        let root = self.canvas(&spec.path)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(axis.clone(), 0f64..y_max)
            .map_err(|e| render_err(&spec.path, e))?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(axis.len())
            .label_style(LABEL_FONT)
            .draw()
            .map_err(|e| render_err(&spec.path, e))?;

        let series: Vec<(f64, f64)> =
            points.iter().enumerate().map(|(i, p)| (i as f64, p.value)).collect();

        chart
            .draw_series(LineSeries::new(series.clone(), LINE_BLUE.stroke_width(3)))
            .map_err(|e| render_err(&spec.path, e))?;
        chart
            .draw_series(series.into_iter().map(|c| Circle::new(c, 4, LINE_BLUE.filled())))
            .map_err(|e| render_err(&spec.path, e))?;

        root.present().map_err(|e| render_err(&spec.path, e))?;
        tracing::debug!(path = %spec.path.display(), points = points.len(), "Rendered line chart");
        Ok(())
    }

    fn box_plot(&self, spec: &ChartSpec, groups: &[CategorySamples]) -> Result<(), ChartError> {
        let groups: Vec<&CategorySamples> = groups.iter().filter(|g| !g.samples.is_empty()).collect();
        if groups.is_empty() {
            return self.blank(spec);
        }
        let axis = CategoryAxis::new(groups.iter().map(|g| g.label.clone()).collect());
        let y_max = axis_max(groups.iter().flat_map(|g| g.samples.iter().copied())) as f32;

        let root = self.canvas(&spec.path)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, CAPTION_FONT)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(axis.clone(), 0f32..y_max)
            .map_err(|e| render_err(&spec.path, e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(axis.len())
            .label_style(LABEL_FONT)
            .draw()
            .map_err(|e| render_err(&spec.path, e))?;

        chart
            .draw_series(groups.iter().enumerate().map(|(i, group)| {
                let quartiles = Quartiles::new(group.samples.as_slice());
                Boxplot::new_vertical(i as f64, &quartiles)
                    .width(40)
                    .whisker_width(0.5)
                    .style(Palette99::pick(i).stroke_width(2))
            }))
            .map_err(|e| render_err(&spec.path, e))?;

        root.present().map_err(|e| render_err(&spec.path, e))?;
        tracing::debug!(path = %spec.path.display(), boxes = groups.len(), "Rendered box plot");
        Ok(())
    }
}

/// Fraction of a category slot covered by half a bar.
const BAR_HALF_WIDTH: f64 = 0.35;

/// An x axis of evenly spaced, named categories.
///
/// Category `i` sits at coordinate `i as f64`, centred in its own slot, so a
/// single category lands in the middle of the plot.
#[derive(Debug, Clone)]
struct CategoryAxis {
    labels: Vec<String>,
}

impl CategoryAxis {
    fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    fn len(&self) -> usize {
        self.labels.len()
    }

    fn slots(&self) -> f64 {
        self.labels.len().max(1) as f64
    }
}

impl Ranged for CategoryAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let slot = f64::from(limit.1 - limit.0) / self.slots();
        limit.0 + (slot * (value + 0.5)).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() == 0 {
            return Vec::new();
        }
        (0..self.len()).map(|i| i as f64).collect()
    }

    fn range(&self) -> Range<f64> {
        -0.5..self.slots() - 0.5
    }
}

impl ValueFormatter<f64> for CategoryAxis {
    fn format_ext(&self, value: &f64) -> String {
        let index = value.round();
        if index < 0.0 {
            return String::new();
        }
        self.labels.get(index as usize).cloned().unwrap_or_default()
    }
}

fn bar_color(palette: BarPalette, index: usize) -> RGBAColor {
    match palette {
        BarPalette::PerCategory => Palette99::pick(index).to_rgba(),
        BarPalette::Uniform => SKY_BLUE.to_rgba(),
    }
}

/// Upper y bound with some headroom; 1.0 when every value is zero.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn render_err<E: std::error::Error>(path: &Path, err: E) -> ChartError {
    ChartError::Render { path: path.to_path_buf(), message: err.to_string() }
}

/// Whether plotters can lay out text with the chart font on this machine.
///
/// Rendering titles and axis labels fails without a system sans-serif font.
pub fn fonts_available() -> bool {
    LABEL_FONT.into_font().box_size("Sales").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(dir: &Path, name: &str, palette: BarPalette) -> ChartSpec {
        ChartSpec {
            title: name.to_string(),
            x_label: "Product".to_string(),
            y_label: "Total Sales".to_string(),
            path: dir.join(format!("{name}.png")),
            palette,
        }
    }

    fn is_png(path: &Path) -> bool {
        std::fs::read(path).map(|bytes| bytes.starts_with(b"\x89PNG")).unwrap_or(false)
    }

    #[test]
    fn axis_max_adds_headroom() {
        assert!((axis_max([10.0, 50.0, 20.0].into_iter()) - 55.0).abs() < 1e-9);
        assert_eq!(axis_max(std::iter::empty()), 1.0);
        assert_eq!(axis_max([0.0].into_iter()), 1.0);
    }

    #[test]
    fn categories_are_centred_in_their_slots() {
        let axis = CategoryAxis::new(vec!["A".into(), "B".into(), "C".into(), "D".into()]);
        assert_eq!(axis.map(&0.0, (100, 500)), 150);
        assert_eq!(axis.map(&3.0, (100, 500)), 450);
        assert_eq!(axis.map(&-0.5, (100, 500)), 100);
        assert_eq!(axis.map(&3.5, (100, 500)), 500);
        assert_eq!(axis.key_points(4usize), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn single_category_sits_in_the_middle() {
        let axis = CategoryAxis::new(vec!["2023-01".into()]);
        assert_eq!(axis.map(&0.0, (100, 500)), 300);
        assert_eq!(axis.range(), -0.5..0.5);
    }

    #[test]
    fn tick_labels_are_the_category_names() {
        let axis = CategoryAxis::new(vec!["North".into(), "South".into()]);
        assert_eq!(axis.format_ext(&0.0), "North");
        assert_eq!(axis.format_ext(&1.0), "South");
        assert_eq!(axis.format_ext(&2.0), "");
        assert_eq!(axis.format_ext(&-1.0), "");
    }

    #[test]
    fn bar_colours_follow_the_palette() {
        assert_eq!(bar_color(BarPalette::Uniform, 0), bar_color(BarPalette::Uniform, 3));
        assert_ne!(bar_color(BarPalette::PerCategory, 0), bar_color(BarPalette::PerCategory, 1));
        assert_eq!(bar_color(BarPalette::PerCategory, 2), Palette99::pick(2).to_rgba());
    }

    #[test]
    fn empty_charts_render_without_data() {
        if !fonts_available() {
            eprintln!("Skipping empty chart rendering because no sans-serif font is installed");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlottersRenderer::new(400, 300);

        renderer.bar_chart(&spec(dir.path(), "bar", BarPalette::Uniform), &[]).unwrap();
        renderer.line_chart(&spec(dir.path(), "line", BarPalette::Uniform), &[]).unwrap();
        renderer.box_plot(&spec(dir.path(), "box", BarPalette::Uniform), &[]).unwrap();

        for name in ["bar", "line", "box"] {
            assert!(is_png(&dir.path().join(format!("{name}.png"))), "{name}.png");
        }
    }

    #[test]
    fn renders_png_files() {
        if !fonts_available() {
            eprintln!("Skipping chart rendering because no sans-serif font is installed");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlottersRenderer::new(400, 300);
        let values = vec![
            CategoryValue { label: "Product A".into(), value: 12.5 },
            CategoryValue { label: "Product B".into(), value: 7.0 },
        ];
        let samples = vec![CategorySamples { label: "Product A".into(), samples: vec![1.0, 2.0, 3.0, 9.0] }];

        renderer.bar_chart(&spec(dir.path(), "bar", BarPalette::PerCategory), &values).unwrap();
        renderer.line_chart(&spec(dir.path(), "line", BarPalette::Uniform), &values).unwrap();
        renderer.box_plot(&spec(dir.path(), "box", BarPalette::Uniform), &samples).unwrap();

        for name in ["bar", "line", "box"] {
            assert!(is_png(&dir.path().join(format!("{name}.png"))), "{name}.png");
        }
    }

    #[test]
    fn renders_a_single_category() {
        if !fonts_available() {
            eprintln!("Skipping single-category rendering because no sans-serif font is installed");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let renderer = PlottersRenderer::new(400, 300);
        let one = vec![CategoryValue { label: "2023-01".into(), value: 42.0 }];
        let samples = vec![CategorySamples { label: "Product C".into(), samples: vec![5.0] }];

        renderer.line_chart(&spec(dir.path(), "line", BarPalette::Uniform), &one).unwrap();
        renderer.bar_chart(&spec(dir.path(), "bar", BarPalette::Uniform), &one).unwrap();
        renderer.box_plot(&spec(dir.path(), "box", BarPalette::Uniform), &samples).unwrap();

        for name in ["line", "bar", "box"] {
            assert!(is_png(&dir.path().join(format!("{name}.png"))), "{name}.png");
        }
    }
}
