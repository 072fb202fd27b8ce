use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Candidate, GameId, GeoPoint, Profile, ProximityResult, UserId};
use crate::storage::ProfileStore;

/// How many results a nearest-N query returns when the caller does not
/// ask for a specific limit.
pub const DEFAULT_NEAREST_LIMIT: usize = 10;

/// Parameters of a radius search.
#[derive(Debug, Clone, Default)]
pub struct RadiusQuery {
    pub radius_km: f64,
    /// Keep only candidates owning at least one of these games. `None`
    /// or an empty set disables the filter.
    pub game_ids: Option<HashSet<GameId>>,
    /// Cap on the number of results, applied after sorting.
    pub max_results: Option<usize>,
}

/// Parameters of a nearest-N search.
#[derive(Debug, Clone)]
pub struct NearestQuery {
    pub limit: usize,
    /// Same semantics as [`RadiusQuery::game_ids`].
    pub game_ids: Option<HashSet<GameId>>,
}

impl Default for NearestQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_NEAREST_LIMIT,
            game_ids: None,
        }
    }
}

/// Validate and persist a user's location. Creates the profile row if
/// absent, overwrites the coordinates if present.
pub async fn update_location(
    store: &impl ProfileStore,
    user_id: UserId,
    latitude: f64,
    longitude: f64,
) -> Result<Profile> {
    let Some(point) = GeoPoint::new(latitude, longitude) else {
        return Err(Error::InvalidCoordinates);
    };
    Ok(store.upsert_location(user_id, point).await?)
}

/// The user's profile row, if any. A row without coordinates means the
/// user never set a location.
pub async fn user_location(store: &impl ProfileStore, user_id: UserId) -> Result<Option<Profile>> {
    Ok(store.get_profile(user_id).await?)
}

/// All candidates within `query.radius_km` of the subject, closest
/// first.
pub async fn find_users_in_radius(
    store: &impl ProfileStore,
    user_id: UserId,
    query: &RadiusQuery,
) -> Result<Vec<ProximityResult>> {
    if !query.radius_km.is_finite() || query.radius_km < 0.0 {
        return Err(Error::InvalidRadius);
    }

    let subject = subject_point(store, user_id).await?;
    let candidates = store.list_candidates(user_id).await?;
    let total = candidates.len();

    let results = rank_in_radius(user_id, subject, candidates, query);
    debug!(
        "📍 radius search for user {}: {} of {} candidates within {} km",
        user_id,
        results.len(),
        total,
        query.radius_km
    );
    Ok(results)
}

/// The `query.limit` closest candidates to the subject, regardless of
/// absolute distance.
pub async fn find_nearest_users(
    store: &impl ProfileStore,
    user_id: UserId,
    query: &NearestQuery,
) -> Result<Vec<ProximityResult>> {
    let subject = subject_point(store, user_id).await?;
    let candidates = store.list_candidates(user_id).await?;
    let total = candidates.len();

    let results = rank_nearest(user_id, subject, candidates, query);
    debug!(
        "📍 nearest search for user {}: kept {} of {} candidates",
        user_id,
        results.len(),
        total
    );
    Ok(results)
}

/// Distance in kilometers between two users, rounded to two decimals.
pub async fn distance_between_users(
    store: &impl ProfileStore,
    user_a: UserId,
    user_b: UserId,
) -> Result<f64> {
    let profile_a = store
        .get_profile(user_a)
        .await?
        .ok_or(Error::UserNotFound(user_a))?;
    let profile_b = store
        .get_profile(user_b)
        .await?
        .ok_or(Error::UserNotFound(user_b))?;

    let point_a = profile_a.location.ok_or(Error::LocationNotSet(user_a))?;
    let point_b = profile_b.location.ok_or(Error::LocationNotSet(user_b))?;

    Ok(round_km(point_a.distance_km(&point_b)))
}

/// Rank pre-fetched candidates by distance from `subject`, keeping those
/// within the radius (inclusive, compared after rounding). The subject
/// itself and candidates without coordinates are skipped. Pure; the
/// request layer can call it over its own candidate snapshot.
pub fn rank_in_radius(
    subject_id: UserId,
    subject: GeoPoint,
    candidates: Vec<Candidate>,
    query: &RadiusQuery,
) -> Vec<ProximityResult> {
    let mut results: Vec<ProximityResult> = candidates
        .into_iter()
        .filter(|c| c.user_id != subject_id)
        .filter(|c| owns_any(c, query.game_ids.as_ref()))
        .filter_map(|candidate| {
            let point = candidate.location?;
            let distance_km = round_km(subject.distance_km(&point));
            (distance_km <= query.radius_km).then_some(ProximityResult {
                candidate,
                distance_km,
            })
        })
        .collect();

    sort_by_distance(&mut results);
    if let Some(max_results) = query.max_results {
        results.truncate(max_results);
    }
    results
}

/// Rank pre-fetched candidates by distance and keep the closest
/// `query.limit`. The game filter runs before truncation, so a full page
/// of matching candidates is returned whenever one exists.
pub fn rank_nearest(
    subject_id: UserId,
    subject: GeoPoint,
    candidates: Vec<Candidate>,
    query: &NearestQuery,
) -> Vec<ProximityResult> {
    let mut results: Vec<ProximityResult> = candidates
        .into_iter()
        .filter(|c| c.user_id != subject_id)
        .filter(|c| owns_any(c, query.game_ids.as_ref()))
        .filter_map(|candidate| {
            let point = candidate.location?;
            let distance_km = round_km(subject.distance_km(&point));
            Some(ProximityResult {
                candidate,
                distance_km,
            })
        })
        .collect();

    sort_by_distance(&mut results);
    results.truncate(query.limit);
    results
}

async fn subject_point(store: &impl ProfileStore, user_id: UserId) -> Result<GeoPoint> {
    match store.get_profile(user_id).await? {
        Some(Profile {
            location: Some(point),
            ..
        }) => Ok(point),
        _ => Err(Error::LocationNotSet(user_id)),
    }
}

fn owns_any(candidate: &Candidate, filter: Option<&HashSet<GameId>>) -> bool {
    match filter {
        Some(wanted) if !wanted.is_empty() => {
            candidate.game_ids.iter().any(|id| wanted.contains(id))
        }
        _ => true,
    }
}

fn sort_by_distance(results: &mut [ProximityResult]) {
    // Stable sort keeps input order for equal distances.
    results.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
