use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DISASTER_TYPE_COLUMN: &str = "disaster_info.disaster_type";
pub const START_YEAR_COLUMN: &str = "timeline.start_year";
pub const COUNTRY_COLUMN: &str = "location_info.country";
pub const ISO_COLUMN: &str = "location_info.iso";

/// The pseudo-country that disables the country filter.
pub const ALL_COUNTRIES: &str = "All Countries";

/// The label of the bucket collecting everything past the top slices of a pie.
pub const OTHERS: &str = "Others";

/// A numeric impact column that can be summed or averaged per disaster type.

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ImpactMetric {
    TotalDeaths,
    Injured,
    Affected,
    Homeless,
    TotalAffected,
    ReconstructionCost,
    InsuredDamage,
    TotalDamage,
}

use ImpactMetric::*;

impl ImpactMetric {

    /// All metrics, in the order the impact metric dropdown lists them.

    pub const ALL: [ImpactMetric; 8] = [
        TotalDeaths,
        Injured,
        Affected,
        Homeless,
        TotalAffected,
        ReconstructionCost,
        InsuredDamage,
        TotalDamage,
    ];

    /// All metrics, in the order the comparison table lists them.

    pub const COMPARISON_ORDER: [ImpactMetric; 8] = [
        TotalDeaths,
        ReconstructionCost,
        InsuredDamage,
        TotalDamage,
        Injured,
        Affected,
        Homeless,
        TotalAffected,
    ];

    /// The flattened column this metric is read from.

    pub fn column(&self) -> &'static str {
        match *self {
            TotalDeaths => "impact_info.total_deaths",
            Injured => "impact_info.injured_number",
            Affected => "impact_info.affected_number",
            Homeless => "impact_info.homeless_number",
            TotalAffected => "impact_info.total_affected",
            ReconstructionCost => "financial_info.reconstruction_cost_usd_adjusted",
            InsuredDamage => "financial_info.insured_damage_usd_adjusted",
            TotalDamage => "financial_info.total_damage_usd_adjusted",
        }
    }

    /// The label used on the impact bar chart and its dropdown.

    pub fn label(&self) -> &'static str {
        match *self {
            TotalDeaths => "Total Deaths",
            Injured => "Injured Number",
            Affected => "Affected Number",
            Homeless => "Homeless Number",
            TotalAffected => "Total Affected",
            ReconstructionCost => "Reconstruction Cost (USD)",
            InsuredDamage => "Insured Damage (USD)",
            TotalDamage => "Total Damage (USD)",
        }
    }

    /// The label used in the average impact comparison table.

    pub fn comparison_label(&self) -> &'static str {
        match *self {
            ReconstructionCost => "Reconstruction Cost (USD Adjusted)",
            InsuredDamage => "Insured Damage (USD Adjusted)",
            TotalDamage => "Total Damage (USD Adjusted)",
            _ => self.label(),
        }
    }

    /// The position of this metric in a record's impact array.

    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricParseError(pub String);

impl fmt::Display for MetricParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown impact metric {}", self.0)
    }
}

impl std::error::Error for MetricParseError {}

impl FromStr for ImpactMetric {
    type Err = MetricParseError;
    fn from_str(input: &str) -> Result<ImpactMetric, Self::Err> {
        match input.to_lowercase().as_str() {
            "total_deaths" => Ok(TotalDeaths),
            "injured" => Ok(Injured),
            "affected" => Ok(Affected),
            "homeless" => Ok(Homeless),
            "total_affected" => Ok(TotalAffected),
            "reconstruction_cost" => Ok(ReconstructionCost),
            "insured_damage" => Ok(InsuredDamage),
            "total_damage" => Ok(TotalDamage),
            _ => Err(MetricParseError(input.to_owned())),
        }
    }
}

impl fmt::Display for ImpactMetric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TotalDeaths => write!(f, "total_deaths"),
            Injured => write!(f, "injured"),
            Affected => write!(f, "affected"),
            Homeless => write!(f, "homeless"),
            TotalAffected => write!(f, "total_affected"),
            ReconstructionCost => write!(f, "reconstruction_cost"),
            InsuredDamage => write!(f, "insured_damage"),
            TotalDamage => write!(f, "total_damage"),
        }
    }
}

/// A single flattened disaster event.
///
/// The fields the views filter and aggregate on are typed and already coerced;
/// a value that was absent or couldn't be coerced is `None`. `columns` keeps
/// every flattened column as display text for the tabular views.

#[derive(Clone, PartialEq, Debug, Default)]
pub struct DisasterRecord {
    pub disaster_type: Option<String>,
    pub start_year: Option<i32>,
    pub country: Option<String>,
    pub iso: Option<String>,
    pub impact: [Option<f64>; 8],
    pub columns: BTreeMap<String, String>,
}

impl DisasterRecord {
    pub fn impact(&self, metric: ImpactMetric) -> Option<f64> {
        self.impact[metric.index()]
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct OptionsResponse {
    pub years: Vec<i32>,
    pub disaster_types: Vec<String>,
    pub countries: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct RecordsRequest {
    pub country: Option<String>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct RecordsResponse {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total: usize,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct DistributionRequest {
    pub country: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Slice {
    pub label: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct DistributionResponse {
    pub title: Option<String>,
    pub slices: Vec<Slice>,
    pub warning: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TrendRequest {
    pub start_year: i32,
    pub end_year: i32,
    pub disaster_type: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct TrendResponse {
    pub title: String,
    pub points: Vec<YearCount>,
    pub warning: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ImpactBar {
    pub disaster_type: String,
    pub total: f64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ImpactResponse {
    pub metric: ImpactMetric,
    pub label: String,
    pub title: String,
    pub bars: Vec<ImpactBar>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct ComparisonRequest {
    pub disaster_a: Option<String>,
    pub disaster_b: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ComparisonRow {
    pub label: String,
    pub a: Option<f64>,
    pub b: Option<f64>,
}

/// The comparison table along with the selections it was resolved against.
///
/// `candidates` never contains `disaster_a`, so the frontend can't offer the
/// same disaster on both sides.

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug, Default)]
pub struct ComparisonResponse {
    pub disaster_types: Vec<String>,
    pub disaster_a: Option<String>,
    pub candidates: Vec<String>,
    pub disaster_b: Option<String>,
    pub rows: Vec<ComparisonRow>,
    pub warning: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct MapRequest {
    pub disaster_type: String,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct CountryCount {
    pub iso: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct MapResponse {
    pub title: String,
    pub counts: Vec<CountryCount>,
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_slugs_parse_back() {
        for metric in ImpactMetric::ALL {
            assert_eq!(metric.to_string().parse::<ImpactMetric>(), Ok(metric));
        }
        assert_eq!("Total_Deaths".parse::<ImpactMetric>(), Ok(TotalDeaths));
        assert!("deaths".parse::<ImpactMetric>().is_err());
    }

    #[test]
    fn metric_orders_cover_every_metric() {
        for metric in ImpactMetric::ALL {
            assert!(ImpactMetric::COMPARISON_ORDER.contains(&metric));
            assert_eq!(ImpactMetric::ALL[metric.index()], metric);
        }
    }

    #[test]
    fn comparison_labels_mark_adjusted_costs() {
        assert_eq!(TotalDamage.label(), "Total Damage (USD)");
        assert_eq!(TotalDamage.comparison_label(), "Total Damage (USD Adjusted)");
        assert_eq!(Homeless.comparison_label(), Homeless.label());
    }

    #[test]
    fn metric_serializes_as_variant_name() {
        let json = serde_json::to_string(&InsuredDamage).unwrap();
        assert_eq!(json, "\"InsuredDamage\"");
    }
}
