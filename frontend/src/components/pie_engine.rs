use crate::components::plot::{colour, PlotError, Plottable};
use common::models::DistributionResponse;
use gloo::utils::window;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use std::cmp::{max, min};
use std::rc::Rc;
use web_sys::HtmlCanvasElement;

const TAB10: [&str; 10] = [
    "1f77b4", "ff7f0e", "2ca02c", "d62728", "9467bd",
    "8c564b", "e377c2", "7f7f7f", "bcbd22", "17becf",
];

const PAIRED: [&str; 12] = [
    "a6cee3", "1f78b4", "b2df8a", "33a02c", "fb9a99", "e31a1c",
    "fdbf6f", "ff7f00", "cab2d6", "6a3d9a", "ffff99", "b15928",
];

/// The colour cycle a pie chart draws its slices with.

#[derive(Clone, Copy, PartialEq, Default)]
pub enum PieColours {
    #[default]
    Tab10,
    Paired,
}

impl PieColours {
    fn cycle(&self) -> &'static [&'static str] {
        match self {
            PieColours::Tab10 => &TAB10,
            PieColours::Paired => &PAIRED,
        }
    }
}

/// The engine for disaster type pie charts.

pub struct PieEngine {
    data: Option<Rc<DistributionResponse>>,
    colours: PieColours,
    window_width: f64,
    dpr: f64,
}

impl Plottable for PieEngine {
    type Data = DistributionResponse;
    type Extra = PieColours;

    fn new() -> Self {
        PieEngine {
            data: None,
            colours: PieColours::default(),
            window_width: 0.0,
            dpr: 1.0,
        }
    }

    fn set_props(&mut self, window_width: f64, extra: PieColours) {
        self.window_width = window_width;
        self.colours = extra;
    }

    fn load_data(&mut self, data: Rc<DistributionResponse>) {
        self.data = Some(data);
    }

    fn warning(&self) -> Option<String> {
        self.data.as_ref()?.warning.clone()
    }

    fn is_empty(&self) -> bool {
        self.data.as_ref().map_or(true, |d| d.slices.is_empty())
    }

    fn get_width(&self) -> u32 {
        min(max(360, (self.window_width * 0.6) as u32), 720)
    }

    fn get_height(&self) -> u32 {
        min(self.get_width(), 540)
    }

    fn redraw(&mut self, canvas: HtmlCanvasElement) -> Result<(), PlotError> {
        let data = self.data.clone().ok_or(PlotError)?;
        self.dpr = window().device_pixel_ratio().max(1.0);
        canvas.set_width((self.dpr * self.get_width() as f64) as u32);
        canvas.set_height((self.dpr * self.get_height() as f64) as u32);

        let backend = CanvasBackend::with_canvas_object(canvas).ok_or(PlotError)?;
        let mut drawing_area = backend.into_drawing_area();
        if let Some(title) = &data.title {
            let title_style = TextStyle::from(("sans-serif", (20.0 * self.dpr) as u32).into_font()).color(&WHITE);
            drawing_area = drawing_area.titled(title, title_style)?;
        }

        let (width, height) = drawing_area.dim_in_pixel();
        let center = ((width / 2) as i32, (height / 2) as i32);
        let radius = min(width, height) as f64 * 0.32;

        let sizes: Vec<f64> = data.slices.iter().map(|s| s.count as f64).collect();
        let labels: Vec<&str> = data.slices.iter().map(|s| s.label.as_str()).collect();
        let cycle = self.colours.cycle();
        let colours = (0..sizes.len())
            .map(|i| colour(cycle[i % cycle.len()]))
            .collect::<Result<Vec<RGBColor>, PlotError>>()?;

        let label_size = (13.0 * self.dpr) as u32;
        let mut pie = Pie::new(&center, &radius, &sizes, &colours, &labels);
        pie.start_angle(140.0);
        pie.label_style(TextStyle::from(("sans-serif", label_size).into_font()).color(&WHITE));
        pie.percentages(TextStyle::from(("sans-serif", label_size).into_font()).color(&BLACK));
        drawing_area.draw(&pie)?;
        Ok(())
    }
}
