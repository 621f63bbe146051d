use crate::loader::Dataset;
use common::models::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// The number of slices a pie keeps before bucketing the rest into "Others".
pub const PIE_SLICES: usize = 10;

pub const NO_RECORDS: &str = "⚠️ No Records found.";
pub const NOT_ENOUGH_TYPES: &str = "Not enough disaster types available for comparison.";
pub const SAME_TYPES: &str = "Please select different disasters for comparison.";

/// Returns the values the dashboard's dropdowns are built from: every start
/// year, every disaster type and every non-blank country, each sorted.

pub fn options(dataset: &Dataset) -> OptionsResponse {
    let mut years = BTreeSet::new();
    let mut disaster_types = BTreeSet::new();
    let mut countries = BTreeSet::new();

    for record in &dataset.records {
        if let Some(year) = record.start_year {
            years.insert(year);
        }
        if let Some(disaster_type) = &record.disaster_type {
            disaster_types.insert(disaster_type.clone());
        }
        if let Some(country) = record.country.as_ref().filter(|c| !c.trim().is_empty()) {
            countries.insert(country.clone());
        }
    }

    OptionsResponse {
        years: years.into_iter().collect(),
        disaster_types: disaster_types.into_iter().collect(),
        countries: countries.into_iter().collect(),
    }
}

fn country_filter(country: &Option<String>) -> Option<&str> {
    country.as_deref().filter(|c| *c != ALL_COUNTRIES)
}

/// Returns the table rows, optionally limited to one country and paged.

pub fn records(dataset: &Dataset, request: &RecordsRequest) -> RecordsResponse {
    let country = country_filter(&request.country);
    let matching = dataset.records
        .iter()
        .filter(|r| country.is_none() || r.country.as_deref() == country);

    let mut total = 0;
    let mut rows = vec![];
    let offset = request.offset.unwrap_or(0);
    let limit = request.limit.unwrap_or(usize::MAX);
    for record in matching {
        if total >= offset && rows.len() < limit {
            rows.push(dataset.columns
                .iter()
                .map(|c| record.columns.get(c).cloned().unwrap_or_default())
                .collect());
        }
        total += 1;
    }

    RecordsResponse {
        columns: dataset.columns.clone(),
        rows,
        total,
    }
}

/// Keeps the first `n` counts and sums whatever is left into one "Others"
/// slice. The counts are expected to be sorted already.

pub fn bucket_top(counts: Vec<(String, u64)>, n: usize) -> Vec<Slice> {
    let others: u64 = counts.iter().skip(n).map(|(_, count)| count).sum();
    let mut slices: Vec<Slice> = counts
        .into_iter()
        .take(n)
        .map(|(label, count)| Slice { label, count })
        .collect();

    if others > 0 {
        slices.push(Slice { label: OTHERS.to_owned(), count: others });
    }
    slices
}

/// Counts records per disaster type, most frequent first and alphabetical
/// among ties.

fn count_types<'a, I>(records: I) -> Vec<(String, u64)>
    where I: Iterator<Item = &'a DisasterRecord>
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for disaster_type in records.filter_map(|r| r.disaster_type.as_deref()) {
        *counts.entry(disaster_type).or_default() += 1;
    }

    let mut counts: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(t, c)| (t.to_owned(), c))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Returns the disaster type pie, either across the whole table or for one
/// country.

pub fn type_distribution(dataset: &Dataset, request: &DistributionRequest) -> DistributionResponse {
    match country_filter(&request.country) {
        None => DistributionResponse {
            title: None,
            slices: bucket_top(count_types(dataset.records.iter()), PIE_SLICES),
            warning: None,
        },
        Some(country) => {
            let mut in_country = dataset.records
                .iter()
                .filter(|r| r.country.as_deref() == Some(country))
                .peekable();

            if in_country.peek().is_none() {
                return DistributionResponse {
                    title: None,
                    slices: vec![],
                    warning: Some(format!("No disaster data available for {}.", country)),
                };
            }

            DistributionResponse {
                title: Some(format!("Disaster Types in {}", country)),
                slices: bucket_top(count_types(in_country), PIE_SLICES),
                warning: None,
            }
        }
    }
}

/// Returns the number of disasters of one type per year, for years inside the
/// inclusive range.

pub fn trend(dataset: &Dataset, request: &TrendRequest) -> TrendResponse {
    let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
    for record in &dataset.records {
        let Some(year) = record.start_year else { continue };
        if year >= request.start_year
            && year <= request.end_year
            && record.disaster_type.as_deref() == Some(request.disaster_type.as_str())
        {
            *per_year.entry(year).or_default() += 1;
        }
    }

    let points: Vec<YearCount> = per_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();

    TrendResponse {
        title: format!("Trend of {} from {} to {}", request.disaster_type, request.start_year, request.end_year),
        warning: points.is_empty().then(|| NO_RECORDS.to_owned()),
        points,
    }
}

/// Sums one impact metric per disaster type, smallest total first. Records
/// where the metric is missing or wasn't numeric don't contribute.

pub fn impact_totals(dataset: &Dataset, metric: ImpactMetric) -> ImpactResponse {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for record in &dataset.records {
        if let (Some(disaster_type), Some(value)) = (record.disaster_type.as_deref(), record.impact(metric)) {
            *totals.entry(disaster_type).or_default() += value;
        }
    }

    let mut bars: Vec<ImpactBar> = totals
        .into_iter()
        .map(|(t, total)| ImpactBar { disaster_type: t.to_owned(), total })
        .collect();
    bars.sort_by(|a, b| a.total.total_cmp(&b.total).then_with(|| a.disaster_type.cmp(&b.disaster_type)));

    ImpactResponse {
        metric,
        label: metric.label().to_owned(),
        title: format!("Total {} by Disaster Type", metric.label()),
        bars,
    }
}

/// Returns the choices offered for the second side of a comparison: every type
/// except the one already chosen for the first side.

pub fn comparison_candidates(disaster_types: &[String], disaster_a: &str) -> Vec<String> {
    disaster_types
        .iter()
        .filter(|t| t.as_str() != disaster_a)
        .cloned()
        .collect()
}

fn mean_impact(dataset: &Dataset, disaster_type: &str, metric: ImpactMetric) -> Option<f64> {
    let (sum, count) = dataset.records
        .iter()
        .filter(|r| r.disaster_type.as_deref() == Some(disaster_type))
        .filter_map(|r| r.impact(metric))
        .fold((0.0, 0u64), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / count as f64)
}

/// Compares the average impact of two disaster types.
///
/// Missing selections fall back to the first available choice on each side. A
/// second side that equals the first, or isn't one of the candidates, yields a
/// warning instead of rows.

pub fn comparison(dataset: &Dataset, request: &ComparisonRequest) -> ComparisonResponse {
    let disaster_types = options(dataset).disaster_types;
    if disaster_types.len() < 2 {
        return ComparisonResponse {
            disaster_types,
            warning: Some(NOT_ENOUGH_TYPES.to_owned()),
            ..Default::default()
        };
    }

    let disaster_a = request.disaster_a
        .clone()
        .filter(|a| disaster_types.contains(a))
        .unwrap_or_else(|| disaster_types[0].clone());
    let candidates = comparison_candidates(&disaster_types, &disaster_a);
    let disaster_b = match &request.disaster_b {
        Some(b) => b.clone(),
        None => candidates[0].clone(),
    };

    if !candidates.contains(&disaster_b) {
        return ComparisonResponse {
            disaster_types,
            disaster_a: Some(disaster_a),
            candidates,
            disaster_b: Some(disaster_b),
            rows: vec![],
            warning: Some(SAME_TYPES.to_owned()),
        };
    }

    let rows = ImpactMetric::COMPARISON_ORDER
        .iter()
        .map(|&metric| ComparisonRow {
            label: metric.comparison_label().to_owned(),
            a: mean_impact(dataset, &disaster_a, metric),
            b: mean_impact(dataset, &disaster_b, metric),
        })
        .collect();

    ComparisonResponse {
        disaster_types,
        disaster_a: Some(disaster_a),
        candidates,
        disaster_b: Some(disaster_b),
        rows,
        warning: None,
    }
}

/// Counts the disasters of one type per ISO country code, for the choropleth.
///
/// Records without an ISO code can't be placed on the map; if none of the
/// type's records have one the map is drawn empty. Only a type with no records
/// at all gets a warning.

pub fn world_map(dataset: &Dataset, request: &MapRequest) -> MapResponse {
    let mut per_country: BTreeMap<&str, u64> = BTreeMap::new();
    let mut matched = false;
    for record in &dataset.records {
        if record.disaster_type.as_deref() != Some(request.disaster_type.as_str()) {
            continue;
        }
        matched = true;
        if let Some(iso) = record.iso.as_deref().filter(|i| !i.trim().is_empty()) {
            *per_country.entry(iso).or_default() += 1;
        }
    }

    let counts: Vec<CountryCount> = per_country
        .into_iter()
        .map(|(iso, count)| CountryCount { iso: iso.to_owned(), count })
        .collect();

    MapResponse {
        title: format!("Global Distribution of {}", request.disaster_type),
        warning: (!matched).then(|| NO_RECORDS.to_owned()),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{event, sample_dataset};

    fn counts(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect()
    }

    #[test]
    fn options_are_sorted_and_skip_blanks() {
        let options = options(&sample_dataset());
        assert_eq!(options.years, vec![1999, 2000, 2001, 2002]);
        assert_eq!(options.disaster_types, vec!["Earthquake", "Flood", "Storm"]);
        assert_eq!(options.countries, vec!["Chad", "India", "Japan"]);
    }

    #[test]
    fn records_filter_by_country() {
        let dataset = sample_dataset();
        let all = records(&dataset, &RecordsRequest::default());
        assert_eq!(all.total, 7);
        assert_eq!(all.rows.len(), 7);
        assert_eq!(all.columns, dataset.columns);

        let everywhere = records(&dataset, &RecordsRequest { country: Some(ALL_COUNTRIES.to_owned()), ..Default::default() });
        assert_eq!(everywhere.total, 7);

        let india = records(&dataset, &RecordsRequest { country: Some("India".to_owned()), ..Default::default() });
        assert_eq!(india.total, 2);
        let country = india.columns.iter().position(|c| c == COUNTRY_COLUMN).unwrap();
        assert!(india.rows.iter().all(|row| row[country] == "India"));
    }

    #[test]
    fn records_page_through_the_table() {
        let page = records(&sample_dataset(), &RecordsRequest { country: None, offset: Some(5), limit: Some(10) });
        assert_eq!(page.total, 7);
        assert_eq!(page.rows.len(), 2);

        let first = records(&sample_dataset(), &RecordsRequest { country: None, offset: None, limit: Some(3) });
        assert_eq!(first.rows.len(), 3);
    }

    #[test]
    fn rows_fill_missing_columns_with_blanks() {
        let dataset = sample_dataset();
        let all = records(&dataset, &RecordsRequest::default());
        let injured = all.columns.iter().position(|c| c == "impact_info.injured_number").unwrap();
        // the storm with unknown deaths was stored without this column
        assert_eq!(all.rows[4][injured], "");
    }

    #[test]
    fn bucketing_keeps_ten_slices_plus_others() {
        let many: Vec<(String, u64)> = (0..15u64).map(|i| (format!("type {}", i), 20 - i)).collect();
        let total: u64 = many.iter().map(|(_, c)| c).sum();
        let slices = bucket_top(many, PIE_SLICES);

        assert_eq!(slices.len(), 11);
        assert_eq!(slices[10].label, OTHERS);
        assert_eq!(slices[10].count, 10 + 9 + 8 + 7 + 6);
        assert_eq!(slices.iter().map(|s| s.count).sum::<u64>(), total);
    }

    #[test]
    fn bucketing_skips_empty_others() {
        let slices = bucket_top(counts(&[("Flood", 3), ("Storm", 1)]), PIE_SLICES);
        assert_eq!(slices, vec![
            Slice { label: "Flood".into(), count: 3 },
            Slice { label: "Storm".into(), count: 1 },
        ]);
        assert!(bucket_top(vec![], PIE_SLICES).is_empty());
    }

    #[test]
    fn bucketing_never_exceeds_eleven_slices() {
        for len in 0..30u64 {
            let input: Vec<(String, u64)> = (0..len).map(|i| (i.to_string(), i % 4 + 1)).collect();
            let total: u64 = input.iter().map(|(_, c)| c).sum();
            let slices = bucket_top(input, PIE_SLICES);
            assert!(slices.len() <= PIE_SLICES + 1);
            assert_eq!(slices.iter().map(|s| s.count).sum::<u64>(), total);
        }
    }

    #[test]
    fn distribution_counts_types() {
        let response = type_distribution(&sample_dataset(), &DistributionRequest::default());
        assert_eq!(response.title, None);
        assert_eq!(response.warning, None);
        assert_eq!(response.slices, vec![
            Slice { label: "Flood".into(), count: 3 },
            Slice { label: "Storm".into(), count: 2 },
            Slice { label: "Earthquake".into(), count: 1 },
        ]);
    }

    #[test]
    fn distribution_within_a_country() {
        let response = type_distribution(&sample_dataset(), &DistributionRequest { country: Some("Chad".into()) });
        assert_eq!(response.title.as_deref(), Some("Disaster Types in Chad"));
        assert_eq!(response.slices, vec![
            Slice { label: "Flood".into(), count: 1 },
            Slice { label: "Storm".into(), count: 1 },
        ]);
    }

    #[test]
    fn distribution_warns_for_unknown_country() {
        let response = type_distribution(&sample_dataset(), &DistributionRequest { country: Some("Atlantis".into()) });
        assert!(response.slices.is_empty());
        assert_eq!(response.warning.as_deref(), Some("No disaster data available for Atlantis."));
    }

    #[test]
    fn trend_counts_floods_per_year() {
        let dataset = Dataset::from_documents(vec![
            event("Flood", 2000, "Chad", "TCD", 1),
            event("Flood", 2000, "Chad", "TCD", 1),
            event("Flood", 2001, "Chad", "TCD", 1),
        ]).unwrap();
        let response = trend(&dataset, &TrendRequest { start_year: 2000, end_year: 2001, disaster_type: "Flood".into() });

        assert_eq!(response.points, vec![YearCount { year: 2000, count: 2 }, YearCount { year: 2001, count: 1 }]);
        assert_eq!(response.title, "Trend of Flood from 2000 to 2001");
        assert_eq!(response.warning, None);
    }

    #[test]
    fn trend_range_is_inclusive() {
        let dataset = sample_dataset();
        let response = trend(&dataset, &TrendRequest { start_year: 2001, end_year: 2002, disaster_type: "Storm".into() });
        assert_eq!(response.points, vec![YearCount { year: 2001, count: 1 }, YearCount { year: 2002, count: 1 }]);

        for (start, end) in [(1999, 1999), (2000, 2000), (1999, 2002), (2001, 2001)] {
            let response = trend(&dataset, &TrendRequest { start_year: start, end_year: end, disaster_type: "Flood".into() });
            assert!(response.points.iter().all(|p| p.year >= start && p.year <= end));
        }
    }

    #[test]
    fn trend_warns_when_empty() {
        let dataset = sample_dataset();
        let backwards = trend(&dataset, &TrendRequest { start_year: 2002, end_year: 2000, disaster_type: "Flood".into() });
        assert!(backwards.points.is_empty());
        assert_eq!(backwards.warning.as_deref(), Some(NO_RECORDS));
    }

    #[test]
    fn impact_totals_skip_non_numeric_values() {
        let response = impact_totals(&sample_dataset(), ImpactMetric::TotalDeaths);
        assert_eq!(response.title, "Total Total Deaths by Disaster Type");
        assert_eq!(response.bars, vec![
            ImpactBar { disaster_type: "Storm".into(), total: 2.0 },
            ImpactBar { disaster_type: "Flood".into(), total: 15.0 },
            ImpactBar { disaster_type: "Earthquake".into(), total: 40.0 },
        ]);
    }

    #[test]
    fn impact_totals_include_partial_rows() {
        let response = impact_totals(&sample_dataset(), ImpactMetric::TotalAffected);
        let storm = response.bars.iter().find(|b| b.disaster_type == "Storm").unwrap();
        assert_eq!(storm.total, 25.0);
        assert!(impact_totals(&sample_dataset(), ImpactMetric::Injured).bars.is_empty());
    }

    #[test]
    fn candidates_exclude_the_first_choice() {
        let types: Vec<String> = vec!["Earthquake".into(), "Flood".into(), "Storm".into()];
        for a in &types {
            let candidates = comparison_candidates(&types, a);
            assert_eq!(candidates.len(), 2);
            assert!(!candidates.contains(a));
        }
    }

    #[test]
    fn comparison_averages_each_metric() {
        let response = comparison(&sample_dataset(), &ComparisonRequest {
            disaster_a: Some("Flood".into()),
            disaster_b: Some("Storm".into()),
        });
        assert_eq!(response.warning, None);
        assert_eq!(response.candidates, vec!["Earthquake", "Storm"]);
        assert_eq!(response.rows.len(), 8);
        assert_eq!(response.rows[0], ComparisonRow { label: "Total Deaths".into(), a: Some(5.0), b: Some(2.0) });
        assert_eq!(response.rows[3], ComparisonRow { label: "Total Damage (USD Adjusted)".into(), a: Some(5000.0), b: Some(1000.0) });
        assert_eq!(response.rows[4], ComparisonRow { label: "Injured Number".into(), a: None, b: None });
    }

    #[test]
    fn comparison_defaults_to_first_choices() {
        let response = comparison(&sample_dataset(), &ComparisonRequest::default());
        assert_eq!(response.disaster_a.as_deref(), Some("Earthquake"));
        assert_eq!(response.disaster_b.as_deref(), Some("Flood"));
        assert_eq!(response.warning, None);
    }

    #[test]
    fn comparison_rejects_identical_sides() {
        let response = comparison(&sample_dataset(), &ComparisonRequest {
            disaster_a: Some("Flood".into()),
            disaster_b: Some("Flood".into()),
        });
        assert!(response.rows.is_empty());
        assert_eq!(response.warning.as_deref(), Some(SAME_TYPES));
        assert!(!response.candidates.contains(&"Flood".to_owned()));
    }

    #[test]
    fn comparison_needs_two_types() {
        let dataset = Dataset::from_documents(vec![event("Flood", 2000, "Chad", "TCD", 1)]).unwrap();
        let response = comparison(&dataset, &ComparisonRequest::default());
        assert_eq!(response.warning.as_deref(), Some(NOT_ENOUGH_TYPES));
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn world_map_counts_per_iso() {
        let response = world_map(&sample_dataset(), &MapRequest { disaster_type: "Flood".into() });
        assert_eq!(response.title, "Global Distribution of Flood");
        assert_eq!(response.counts, vec![
            CountryCount { iso: "IND".into(), count: 2 },
            CountryCount { iso: "TCD".into(), count: 1 },
        ]);

        let none = world_map(&sample_dataset(), &MapRequest { disaster_type: "Volcano".into() });
        assert_eq!(none.warning.as_deref(), Some(NO_RECORDS));
    }

    #[test]
    fn world_map_without_iso_codes_is_empty_not_missing() {
        let mut unplaced = event("Drought", 2001, "Chad", "TCD", 1);
        unplaced.insert("location_info", bson::doc! { "country": "Chad", "iso": null });
        let dataset = Dataset::from_documents(vec![event("Flood", 2000, "India", "IND", 5), unplaced]).unwrap();

        let response = world_map(&dataset, &MapRequest { disaster_type: "Drought".into() });
        assert!(response.counts.is_empty());
        assert_eq!(response.warning, None);
        assert_eq!(response.title, "Global Distribution of Drought");
    }
}
