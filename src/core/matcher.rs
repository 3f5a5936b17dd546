use crate::core::distance::DistanceModel;
use crate::models::{Geolocated, MatchReport, MatchResult};

/// Nearest-neighbour matcher over two geocoded record lists
///
/// Every query is compared against every candidate (no spatial index).
/// Records without valid coordinates never take part in a comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    model: DistanceModel,
}

impl Matcher {
    pub fn new(model: DistanceModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> DistanceModel {
        self.model
    }

    /// Find the nearest candidate for every query
    ///
    /// # Arguments
    /// * `queries` - Records looking for a match, processed in order
    /// * `candidates` - Records that can be matched, scanned in order
    ///
    /// # Returns
    /// MatchReport with at most one result per query, in query order.
    /// On equal distances the earlier candidate wins.
    pub fn find_nearest<Q, C>(&self, queries: &[Q], candidates: &[C]) -> MatchReport
    where
        Q: Geolocated,
        C: Geolocated,
    {
        let mut report = MatchReport {
            results: Vec::with_capacity(queries.len()),
            queries: queries.len(),
            ..Default::default()
        };

        for query in queries {
            let query_coords = query.coordinates();
            let mut closest: Option<(&C, f64)> = None;

            for candidate in candidates {
                let (Some(a), Some(b)) = (query_coords, candidate.coordinates()) else {
                    tracing::warn!(
                        "Invalid coordinates found: {:?}, {:?} ({} / {})",
                        query.raw_coordinates(),
                        candidate.raw_coordinates(),
                        query.label(),
                        candidate.label()
                    );
                    report.invalid_pairs += 1;
                    continue;
                };

                let distance = self.model.distance_km(&a, &b);
                if !distance.is_finite() {
                    tracing::warn!(
                        "No distance between {:?} and {:?} ({} / {})",
                        a,
                        b,
                        query.label(),
                        candidate.label()
                    );
                    report.invalid_pairs += 1;
                    continue;
                }

                if closest.map_or(true, |(_, min_distance)| distance < min_distance) {
                    closest = Some((candidate, distance));
                }
            }

            match closest {
                Some((candidate, distance_km)) => report.results.push(MatchResult {
                    query_label: query.label(),
                    candidate_label: candidate.label(),
                    distance_km,
                }),
                None => {
                    tracing::debug!("No valid candidate for {}", query.label());
                    report.dropped_queries += 1;
                }
            }
        }

        report
    }
}
