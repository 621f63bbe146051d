use crate::components::plot::{colour, label_size, PlotError, Plottable, BOLD_LINE, LIGHT_LINE};
use common::models::TrendResponse;
use gloo::utils::window;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use std::cmp::{max, min};
use std::rc::Rc;
use web_sys::HtmlCanvasElement;

/// The engine for the yearly trend line of one disaster type.

pub struct TrendEngine {
    data: Option<Rc<TrendResponse>>,
    window_width: f64,
    dpr: f64,
}

impl TrendEngine {

    /// The x range, padded by a year either side when only one year is drawn.

    fn year_range(data: &TrendResponse) -> Option<(i32, i32)> {
        let first = data.points.first()?.year;
        let last = data.points.last()?.year;
        if first == last {
            Some((first - 1, last + 1))
        } else {
            Some((first, last))
        }
    }
}

impl Plottable for TrendEngine {
    type Data = TrendResponse;
    type Extra = ();

    fn new() -> Self {
        TrendEngine {
            data: None,
            window_width: 0.0,
            dpr: 1.0,
        }
    }

    fn set_props(&mut self, window_width: f64, _: ()) {
        self.window_width = window_width;
    }

    fn load_data(&mut self, data: Rc<TrendResponse>) {
        self.data = Some(data);
    }

    fn warning(&self) -> Option<String> {
        self.data.as_ref()?.warning.clone()
    }

    fn is_empty(&self) -> bool {
        self.data.as_ref().map_or(true, |d| d.points.is_empty())
    }

    fn get_width(&self) -> u32 {
        min(max(400, (self.window_width * 0.7) as u32), 1000)
    }

    fn get_height(&self) -> u32 {
        (self.get_width() as f64 * 0.55) as u32
    }

    fn redraw(&mut self, canvas: HtmlCanvasElement) -> Result<(), PlotError> {
        let data = self.data.clone().ok_or(PlotError)?;
        let (x_min, x_max) = TrendEngine::year_range(&data).ok_or(PlotError)?;
        let y_max = data.points.iter().map(|p| p.count).max().ok_or(PlotError)? as f64 * 1.1;

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
            .y_label_area_size((70.0 * self.dpr) as u32)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max.max(1.0))?;

        chart.configure_mesh()
            .x_desc("Year")
            .y_desc("Number of Disasters")
            .x_label_style(TextStyle::from(("sans-serif", label_size).into_font()).color(&WHITE))
            .y_label_style(TextStyle::from(("sans-serif", label_size).into_font()).color(&WHITE))
            .axis_desc_style(desc_style)
            .bold_line_style(colour(BOLD_LINE)?)
            .light_line_style(colour(LIGHT_LINE)?)
            .x_label_formatter(&|y| format!("{}", y))
            .y_label_formatter(&|v| format!("{}", *v as u64))
            .draw()?;

        let line = colour("4c9be8")?;
        chart.draw_series(
            LineSeries::new(data.points.iter().map(|p| (p.year, p.count as f64)), line.stroke_width((2.0 * self.dpr) as u32))
                .point_size((4.0 * self.dpr) as u32)
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::YearCount;

    fn response(years: &[i32]) -> TrendResponse {
        TrendResponse {
            title: "Trend of Flood from 2000 to 2002".into(),
            points: years.iter().map(|&year| YearCount { year, count: 1 }).collect(),
            warning: None,
        }
    }

    #[test]
    fn pads_a_single_year() {
        assert_eq!(TrendEngine::year_range(&response(&[2001])), Some((2000, 2002)));
        assert_eq!(TrendEngine::year_range(&response(&[1999, 2003])), Some((1999, 2003)));
        assert_eq!(TrendEngine::year_range(&response(&[])), None);
    }
}
