use super::{ImageOptions, RenderError};
use crate::{ColorMap, DisplayRange, Mesh};
use nalgebra::DMatrix;
use plotters::{coord::Shift, prelude::*};

type Result<T> = std::result::Result<T, RenderError>;

pub(crate) fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Panel annotations
pub(crate) struct PanelStyle<'a> {
    pub title: Option<&'a str>,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    /// Font size [px]
    pub font: f64,
    pub image: &'a ImageOptions,
}

/// An element map drawn as a pseudocolor image with its colorbar
pub(crate) struct ElementPanel<'a> {
    /// Rotated counts
    pub counts: &'a DMatrix<f64>,
    pub mesh: Mesh,
    pub colormap: ColorMap,
    pub range: DisplayRange,
}
impl<'a> ElementPanel<'a> {
    pub fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &PanelStyle,
    ) -> Result<()> {
        let (width, height) = area.dim_in_pixel();
        let font = style.font;
        let text = FontDesc::new(FontFamily::SansSerif, font, FontStyle::Normal).color(&BLACK);
        let ticks =
            FontDesc::new(FontFamily::SansSerif, 0.85 * font, FontStyle::Normal).color(&BLACK);

        let size = |k: f64| (k * font).ceil() as u32;
        let pad = size(0.5);
        let caption = if style.title.is_some() { size(1.6) } else { 0 };
        let x_area = size(2.8);
        let y_area = size(4.2);
        let bar_total = size(1.2) + size(4.6) + 2 * pad;

        // equal x and y scales
        let avail_w = width as f64 - (bar_total + y_area + 2 * pad) as f64;
        let avail_h = height as f64 - (caption + x_area + 2 * pad) as f64;
        let (mut dw, mut dh) = (0, 0);
        if avail_w > 0. && avail_h > 0. {
            let aspect = self.mesh.aspect();
            if avail_w / avail_h > aspect {
                dw = (0.5 * (avail_w - avail_h * aspect)).floor() as i32;
            } else {
                dh = (0.5 * (avail_h - avail_w / aspect)).floor() as i32;
            }
        }
        let area = area.margin(dh, dh, dw, dw);
        let map_width = (width as i32 - 2 * dw - bar_total as i32).max(1);
        let (map_area, bar_area) = area.split_horizontally(map_width);

        let mut builder = ChartBuilder::on(&map_area);
        builder
            .margin(pad)
            .x_label_area_size(x_area)
            .y_label_area_size(y_area);
        if let Some(title) = style.title {
            builder.caption(title, text.clone());
        }
        let mut chart = builder
            .build_cartesian_2d(self.mesh.x_range(), self.mesh.y_range())
            .map_err(drawing)?;
        {
            let mut axes = chart.configure_mesh();
            axes.disable_mesh()
                .x_labels(5)
                .y_labels(5)
                .label_style(ticks.clone())
                .axis_desc_style(text.clone());
            if let Some(desc) = &style.x_desc {
                axes.x_desc(desc.as_str());
            }
            if let Some(desc) = &style.y_desc {
                axes.y_desc(desc.as_str());
            }
            axes.draw().map_err(drawing)?;
        }

        let (rows, cols) = self.counts.shape();
        let (counts, mesh, colormap, range) = (self.counts, self.mesh, self.colormap, self.range);
        let alpha = style.image.alpha;
        chart
            .draw_series((0..rows).flat_map(move |i| {
                (0..cols).filter_map(move |j| {
                    let value = counts[(i, j)];
                    value.is_finite().then(|| {
                        let color = colormap.eval(range.normalize(value));
                        Rectangle::new(mesh.cell(i, j), color.mix(alpha).filled())
                    })
                })
            }))
            .map_err(drawing)?;

        self.draw_colorbar(&bar_area, style, (pad + caption, pad + x_area), (&text, &ticks))
    }

    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        style: &PanelStyle,
        (top, bottom): (u32, u32),
        (text, ticks): (&TextStyle, &TextStyle),
    ) -> Result<()> {
        let pad = (0.5 * style.font).ceil() as u32;
        let bar_labels = (4.6 * style.font).ceil() as u32;
        let range = self.range.nonsingular();
        let mut bar = ChartBuilder::on(area)
            .margin_top(top)
            .margin_bottom(bottom)
            .margin_left(pad)
            .margin_right(pad)
            .set_label_area_size(LabelAreaPosition::Right, bar_labels)
            .build_cartesian_2d(0f64..1f64, range.min..range.max)
            .map_err(drawing)?;
        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(style.image.colorbar_ticks)
            .y_desc(style.image.colorbar_label.as_str())
            .label_style(ticks.clone())
            .axis_desc_style(text.clone())
            .draw()
            .map_err(drawing)?;

        let steps = bar.plotting_area().dim_in_pixel().1.max(2) as usize;
        let delta = (range.max - range.min) / steps as f64;
        let colormap = self.colormap;
        bar.draw_series((0..steps).map(|k| {
            let v0 = range.min + k as f64 * delta;
            let color = colormap.eval(range.normalize(v0 + 0.5 * delta));
            Rectangle::new([(0., v0), (1., v0 + delta)], color.filled())
        }))
        .map_err(drawing)?;
        bar.plotting_area()
            .draw(&Rectangle::new(
                [(0., range.min), (1., range.max)],
                BLACK.stroke_width(1),
            ))
            .map_err(drawing)?;
        Ok(())
    }
}
