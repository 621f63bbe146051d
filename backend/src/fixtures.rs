use crate::loader::Dataset;
use bson::{doc, Document};

/// A raw EM-DAT style document with every column the views rely on.

pub fn event(disaster_type: &str, year: i32, country: &str, iso: &str, deaths: i32) -> Document {
    doc! {
        "disaster_info": { "disaster_type": disaster_type },
        "timeline": { "start_year": year },
        "location_info": { "country": country, "iso": iso },
        "impact_info": {
            "total_deaths": deaths,
            "injured_number": null,
            "affected_number": "",
            "homeless_number": null,
            "total_affected": deaths * 10,
        },
        "financial_info": {
            "reconstruction_cost_usd_adjusted": null,
            "insured_damage_usd_adjusted": null,
            "total_damage_usd_adjusted": 1000.0 * deaths as f64,
        },
    }
}

/// A small table: three floods, two storms, one earthquake, and one record of
/// each degenerate kind.

pub fn sample_dataset() -> Dataset {
    let mut bad_deaths = event("Storm", 2002, "Chad", "TCD", 0);
    bad_deaths.insert("impact_info", doc! { "total_deaths": "unknown", "total_affected": 5 });

    let mut no_type = event("Flood", 2001, "Chad", "TCD", 100);
    no_type.insert("disaster_info", doc! { "disaster_type": null });

    Dataset::from_documents(vec![
        event("Flood", 2000, "Chad", "TCD", 3),
        event("Flood", 2000, "India", "IND", 5),
        event("Flood", 2001, "India", "IND", 7),
        event("Storm", 2001, "Japan", "JPN", 2),
        bad_deaths,
        event("Earthquake", 1999, " ", "XXX", 40),
        no_type,
    ]).expect("sample dataset has every column")
}
