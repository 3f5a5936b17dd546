//! Load → geocode → match → write.

use futures::stream::{self, StreamExt};
use std::path::PathBuf;

use crate::core::Matcher;
use crate::error::AppError;
use crate::models::{Coordinates, Direction, MatchReport, RunSummary};
use crate::services::Geocoder;
use crate::tabular::{load_addresses, load_locations, write_results};

/// Everything a run needs besides the geocoder
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub list_a: PathBuf,
    pub list_b: PathBuf,
    pub output: PathBuf,
    pub direction: Direction,
    pub concurrency: usize,
    pub matcher: Matcher,
}

/// Geocode every address, keeping input order
///
/// At most `concurrency` lookups are in flight at once.
pub async fn geocode_all<G: Geocoder>(
    geocoder: &G,
    addresses: &[String],
    concurrency: usize,
    list_name: &str,
) -> Vec<Option<Coordinates>> {
    let total = addresses.len();
    tracing::info!("Geocoding {}: {} addresses", list_name, total);

    let coordinates: Vec<Option<Coordinates>> = stream::iter(addresses.iter().enumerate())
        .map(|(index, address)| async move {
            let coords = geocoder.geocode(address).await;
            tracing::debug!("{} [{}/{}] {} -> {:?}", list_name, index + 1, total, address, coords);
            coords
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let resolved = coordinates.iter().filter(|c| c.is_some()).count();
    tracing::info!("Geocoded {}: {}/{} resolved", list_name, resolved, total);

    coordinates
}

/// Run the whole pipeline
///
/// Both lists are loaded before the first lookup, so a load error
/// neither hits the geocoding service nor creates the output file.
pub async fn run<G: Geocoder>(options: &RunOptions, geocoder: &G) -> Result<RunSummary, AppError> {
    let mut list_a = load_addresses(&options.list_a)?;
    let mut list_b = load_locations(&options.list_b)?;

    let queries: Vec<String> = list_a.iter().map(|r| r.full_address()).collect();
    let coords = geocode_all(geocoder, &queries, options.concurrency, "List A").await;
    for (record, coords) in list_a.iter_mut().zip(coords) {
        record.coordinates = coords;
    }

    let queries: Vec<String> = list_b.iter().map(|r| r.simplified_address()).collect();
    let coords = geocode_all(geocoder, &queries, options.concurrency, "List B").await;
    for (record, coords) in list_b.iter_mut().zip(coords) {
        record.coordinates = coords;
    }

    let report: MatchReport = match options.direction {
        Direction::AToB => options.matcher.find_nearest(&list_a, &list_b),
        Direction::CustomerToStock => options.matcher.find_nearest(&list_b, &list_a),
    };

    if report.dropped_queries > 0 {
        tracing::warn!(
            "{} of {} queries had no valid match and were left out",
            report.dropped_queries,
            report.queries
        );
    }

    let matched = write_results(&options.output, options.direction, &report.results)?;

    Ok(RunSummary {
        output: options.output.clone(),
        list_a_rows: list_a.len(),
        list_b_rows: list_b.len(),
        list_a_geocoded: list_a.iter().filter(|r| r.coordinates.is_some()).count(),
        list_b_geocoded: list_b.iter().filter(|r| r.coordinates.is_some()).count(),
        matched,
        dropped: report.dropped_queries,
    })
}
