use crate::components::plot::{colour, label_size, PlotError, Plottable, BOLD_LINE, LIGHT_LINE};
use common::format_k;
use common::models::ImpactResponse;
use gloo::utils::window;
use plotters::prelude::SegmentValue::CenterOf;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use std::cmp::{max, min};
use std::rc::Rc;
use web_sys::HtmlCanvasElement;

/// The engine for the horizontal bar chart of impact totals per disaster type.

pub struct ImpactEngine {
    data: Option<Rc<ImpactResponse>>,
    window_width: f64,
    dpr: f64,
}

impl Plottable for ImpactEngine {
    type Data = ImpactResponse;
    type Extra = ();

    fn new() -> Self {
        ImpactEngine {
            data: None,
            window_width: 0.0,
            dpr: 1.0,
        }
    }

    fn set_props(&mut self, window_width: f64, _: ()) {
        self.window_width = window_width;
    }

    fn load_data(&mut self, data: Rc<ImpactResponse>) {
        self.data = Some(data);
    }

    fn warning(&self) -> Option<String> {
        None
    }

    fn is_empty(&self) -> bool {
        self.data.as_ref().map_or(true, |d| d.bars.is_empty())
    }

    fn get_width(&self) -> u32 {
        min(max(400, (self.window_width * 0.7) as u32), 1000)
    }

    fn get_height(&self) -> u32 {
        let bars = self.data.as_ref().map_or(0, |d| d.bars.len()) as u32;
        max(300, 80 + bars * 28)
    }

    fn redraw(&mut self, canvas: HtmlCanvasElement) -> Result<(), PlotError> {
        let data = self.data.clone().ok_or(PlotError)?;
        let x_max = data.bars.iter().map(|b| b.total).max_by(|a, b| a.total_cmp(b)).ok_or(PlotError)?;
        let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };
        let types: Vec<String> = data.bars.iter().map(|b| b.disaster_type.clone()).collect();

        self.dpr = window().device_pixel_ratio().max(1.0);
        let canvas_width = self.dpr * self.get_width() as f64;
        canvas.set_width(canvas_width as u32);
        canvas.set_height((self.dpr * self.get_height() as f64) as u32);

        let backend = CanvasBackend::with_canvas_object(canvas).ok_or(PlotError)?;
        let drawing_area = backend.into_drawing_area();
        let label_size = label_size(canvas_width, self.dpr);
        let desc_style = TextStyle::from(("sans-serif", (16.0 * self.dpr) as u32).into_font()).color(&WHITE);

        let mut chart = ChartBuilder::on(&drawing_area)
            .caption(&data.title, ("sans-serif", (20.0 * self.dpr) as u32, &WHITE))
            .margin((10.0 * self.dpr) as u32)
            .x_label_area_size((50.0 * self.dpr) as u32)
            .y_label_area_size((150.0 * self.dpr) as u32)
            .build_cartesian_2d(0.0..x_max, types.into_segmented())?
            .set_secondary_coord(0.0..x_max, 0.0..data.bars.len() as f64);

        chart.configure_mesh()
            .disable_y_mesh()
            .x_desc(data.label.as_str())
            .y_desc("Disaster Type")
            .x_label_style(TextStyle::from(("sans-serif", label_size).into_font()).color(&WHITE))
            .y_label_style(TextStyle::from(("sans-serif", label_size).into_font()).color(&WHITE))
            .axis_desc_style(desc_style)
            .bold_line_style(colour(BOLD_LINE)?)
            .light_line_style(colour(LIGHT_LINE)?)
            .x_label_formatter(&|v| format_k(*v))
            .y_label_formatter(&|v| {
                if let CenterOf(s) = v {
                    format!("{}", s)
                } else {
                    "".to_string()
                }
            })
            .draw()?;

        // bars go on the secondary coords so they can be narrower than their segment
        let red = colour("d62728")?;
        chart.draw_secondary_series(data.bars.iter().enumerate().map(|(i, b)| {
            Rectangle::new([(0.0, i as f64 + 0.15), (b.total, i as f64 + 0.85)], red.filled())
        }))?;
        Ok(())
    }
}
