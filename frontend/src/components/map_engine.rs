use crate::components::plot::{colour, label_size, PlotError, Plottable};
use common::models::MapResponse;
use geojson::feature::Id;
use geojson::{Feature, GeoJson, Value};
use gloo::utils::window;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use serde::Deserialize;
use std::cmp::{max, min};
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::HtmlCanvasElement;

/// Latitudes drawn by the map; antarctica and the far north are cut off.
const LAT_RANGE: (f64, f64) = (-58.0, 84.0);

const PROPERTY_KEYS: [&str; 4] = ["ISO_A3", "iso_a3", "ADM0_A3", "ISO3"];

/// One country outline, as exterior rings of `(longitude, latitude)` points.

#[derive(Debug, PartialEq)]
pub struct CountryShape {
    pub iso: String,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Country outlines read from a geojson feature collection.

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "GeoJson")]
pub struct WorldShapes {
    pub countries: Vec<CountryShape>,
}

fn feature_iso(feature: &Feature) -> Option<String> {
    PROPERTY_KEYS
        .iter()
        .find_map(|key| feature.property(key).and_then(|v| v.as_str()).filter(|iso| *iso != "-99"))
        .map(str::to_owned)
        .or_else(|| match &feature.id {
            Some(Id::String(id)) => Some(id.clone()),
            _ => None,
        })
}

fn exterior_rings(value: &Value) -> Vec<Vec<(f64, f64)>> {
    let ring = |positions: &Vec<Vec<f64>>| -> Vec<(f64, f64)> {
        positions.iter().filter(|p| p.len() >= 2).map(|p| (p[0], p[1])).collect()
    };
    match value {
        Value::Polygon(polygon) => polygon.first().map(ring).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons.iter().filter_map(|p| p.first().map(ring)).collect(),
        _ => vec![],
    }
}

impl TryFrom<GeoJson> for WorldShapes {
    type Error = String;

    fn try_from(geojson: GeoJson) -> Result<Self, Self::Error> {
        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err("expected a feature collection".to_string());
        };

        let countries = collection
            .features
            .iter()
            .filter_map(|feature| {
                let iso = feature_iso(feature)?;
                let rings = exterior_rings(&feature.geometry.as_ref()?.value);
                (!rings.is_empty()).then_some(CountryShape { iso, rings })
            })
            .collect();
        Ok(WorldShapes { countries })
    }
}

/// Shared world outlines handed to the map engine. Compared by pointer, since
/// the outlines never change once fetched.

#[derive(Clone, Default)]
pub struct World(pub Option<Rc<WorldShapes>>);

impl PartialEq for World {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

/// A sequential white to dark red scale for `t` in `[0, 1]`.

pub fn reds(t: f64) -> RGBColor {
    const STOPS: [(f64, f64, f64); 3] = [(255.0, 245.0, 240.0), (251.0, 106.0, 74.0), (103.0, 0.0, 13.0)];
    let t = t.clamp(0.0, 1.0) * 2.0;
    let (from, to, f) = if t <= 1.0 { (STOPS[0], STOPS[1], t) } else { (STOPS[1], STOPS[2], t - 1.0) };
    let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// The engine for the world choropleth of one disaster type.

pub struct MapEngine {
    data: Option<Rc<MapResponse>>,
    world: World,
    window_width: f64,
    dpr: f64,
}

impl Plottable for MapEngine {
    type Data = MapResponse;
    type Extra = World;

    fn new() -> Self {
        MapEngine {
            data: None,
            world: World::default(),
            window_width: 0.0,
            dpr: 1.0,
        }
    }

    fn set_props(&mut self, window_width: f64, extra: World) {
        self.window_width = window_width;
        self.world = extra;
    }

    fn load_data(&mut self, data: Rc<MapResponse>) {
        self.data = Some(data);
    }

    fn warning(&self) -> Option<String> {
        self.data.as_ref()?.warning.clone()
    }

    // a type whose records carry no iso codes still gets its empty map
    fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    fn get_width(&self) -> u32 {
        min(max(400, (self.window_width * 0.8) as u32), 1200)
    }

    fn get_height(&self) -> u32 {
        (self.get_width() as f64 * 0.55) as u32 + 90
    }

    fn redraw(&mut self, canvas: HtmlCanvasElement) -> Result<(), PlotError> {
        let data = self.data.clone().ok_or(PlotError)?;
        let world = self.world.0.clone().ok_or(PlotError)?;
        let counts: HashMap<&str, u64> = data.counts.iter().map(|c| (c.iso.as_str(), c.count)).collect();
        let c_max = counts.values().copied().max().unwrap_or(0).max(1) as f64;

        self.dpr = window().device_pixel_ratio().max(1.0);
        let canvas_width = self.dpr * self.get_width() as f64;
        let canvas_height = self.dpr * self.get_height() as f64;
        canvas.set_width(canvas_width as u32);
        canvas.set_height(canvas_height as u32);

        let backend = CanvasBackend::with_canvas_object(canvas).ok_or(PlotError)?;
        let drawing_area = backend.into_drawing_area();
        let (map_area, bar_area) = drawing_area.split_vertically((canvas_height - 90.0 * self.dpr) as u32);

        let mut chart = ChartBuilder::on(&map_area)
            .caption(&data.title, ("sans-serif", (20.0 * self.dpr) as u32, &WHITE))
            .margin((5.0 * self.dpr) as u32)
            .build_cartesian_2d(-180.0..180.0, LAT_RANGE.0..LAT_RANGE.1)?;

        let no_data = colour("3a3a3a")?;
        let border = colour("67635c")?;
        for country in world.countries.iter() {
            let fill = match counts.get(country.iso.as_str()) {
                Some(&count) => reds(count as f64 / c_max),
                None => no_data,
            };
            chart.draw_series(country.rings.iter().map(|ring| Polygon::new(ring.clone(), fill.filled())))?;
            chart.draw_series(country.rings.iter().map(|ring| PathElement::new(ring.clone(), border.stroke_width(1))))?;
        }

        let label_size = label_size(canvas_width, self.dpr);
        let margin = (canvas_width * 0.2) as u32;
        let mut bar = ChartBuilder::on(&bar_area)
            .margin_left(margin)
            .margin_right(margin)
            .margin_top((10.0 * self.dpr) as u32)
            .x_label_area_size((50.0 * self.dpr) as u32)
            .build_cartesian_2d(0.0..c_max, 0.0..1.0)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_y_axis()
            .x_desc("Number of Disasters")
            .x_label_style(TextStyle::from(("sans-serif", label_size).into_font()).color(&WHITE))
            .axis_desc_style(TextStyle::from(("sans-serif", (16.0 * self.dpr) as u32).into_font()).color(&WHITE))
            .x_label_formatter(&|v| format!("{}", *v as u64))
            .draw()?;

        let steps = 100;
        bar.draw_series((0..steps).map(|i| {
            let from = c_max * i as f64 / steps as f64;
            let to = c_max * (i + 1) as f64 / steps as f64;
            Rectangle::new([(from, 0.0), (to, 1.0)], reds(i as f64 / (steps - 1) as f64).filled())
        }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"ISO_A3": "TCD", "NAME": "Chad"},
                "geometry": {"type": "Polygon", "coordinates": [[[14.0, 8.0], [24.0, 8.0], [24.0, 23.0], [14.0, 8.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"ISO_A3": "-99", "ADM0_A3": "FRA"},
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[-4.0, 43.0], [8.0, 43.0], [8.0, 51.0], [-4.0, 43.0]]],
                    [[[8.5, 41.4], [9.5, 41.4], [9.5, 43.0], [8.5, 41.4]]]
                ]}
            },
            {
                "type": "Feature",
                "id": "JPN",
                "properties": {},
                "geometry": {"type": "Polygon", "coordinates": [[[130.0, 31.0], [145.0, 31.0], [145.0, 45.0], [130.0, 31.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"NAME": "nowhere"},
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
            }
        ]
    }"#;

    #[test]
    fn reads_country_outlines() {
        let world: WorldShapes = serde_json::from_str(WORLD).unwrap();
        let isos: Vec<&str> = world.countries.iter().map(|c| c.iso.as_str()).collect();
        assert_eq!(isos, vec!["TCD", "FRA", "JPN"]);
        assert_eq!(world.countries[1].rings.len(), 2);
        assert_eq!(world.countries[0].rings[0][1], (24.0, 8.0));
    }

    #[test]
    fn rejects_bare_geometries() {
        let geometry = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(serde_json::from_str::<WorldShapes>(geometry).is_err());
    }

    #[test]
    fn red_scale_runs_light_to_dark() {
        assert_eq!(reds(0.0), RGBColor(255, 245, 240));
        assert_eq!(reds(0.5), RGBColor(251, 106, 74));
        assert_eq!(reds(1.0), RGBColor(103, 0, 13));
        assert_eq!(reds(7.0), reds(1.0));
    }

    #[test]
    fn draws_an_empty_map_without_a_warning() {
        let mut engine = MapEngine::new();
        assert!(engine.is_empty());

        engine.load_data(Rc::new(MapResponse {
            title: "Global Distribution of Drought".into(),
            counts: vec![],
            warning: None,
        }));
        assert!(!engine.is_empty());
        assert_eq!(engine.warning(), None);
    }

    #[test]
    fn world_compares_by_pointer() {
        let shapes = Rc::new(WorldShapes::default());
        assert!(World(Some(shapes.clone())) == World(Some(shapes)));
        assert!(World(Some(Rc::new(WorldShapes::default()))) != World(Some(Rc::new(WorldShapes::default()))));
        assert!(World(None) == World::default());
    }
}
