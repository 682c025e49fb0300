use super::route::{RoutePlan, RouteSummary};
use crate::sdk::polyline::{self, Coordinate};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, fs, io::Result as IoResult, path::Path};

/// Directional pickup/drop pair; `A::B` and `B::A` are different trips.
#[derive(Serialize, Deserialize, Eq, PartialEq, Hash, Clone, Debug)]
pub struct TripKey {
    pub pickup: String,
    pub drop: String,
}

impl TripKey {
    pub fn new(pickup: &str, drop: &str) -> Self {
        Self {
            pickup: pickup.trim().to_string(),
            drop: drop.trim().to_string(),
        }
    }
}

impl fmt::Display for TripKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.pickup, self.drop)
    }
}

/// Summary plus the encoded polyline; geometry is decoded again on read.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CachedRoute {
    pub summary: RouteSummary,
    pub encoded: String,
}

impl CachedRoute {
    pub fn to_plan(&self) -> RoutePlan {
        RoutePlan {
            summary: self.summary,
            geometry: polyline::decode(&self.encoded),
            encoded: self.encoded.clone(),
        }
    }
}

impl From<&RoutePlan> for CachedRoute {
    fn from(plan: &RoutePlan) -> Self {
        Self {
            summary: plan.summary,
            encoded: plan.encoded.clone(),
        }
    }
}

// Routes are stored as a list of entries so place names may contain any text.
mod trip_entries {
    use super::{CachedRoute, TripKey};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct EntryRef<'a> {
        pickup: &'a str,
        drop: &'a str,
        route: &'a CachedRoute,
    }

    #[derive(Deserialize)]
    struct Entry {
        pickup: String,
        drop: String,
        route: CachedRoute,
    }

    pub fn serialize<S: Serializer>(
        map: &HashMap<TripKey, CachedRoute>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<EntryRef<'_>> = map
            .iter()
            .map(|(k, route)| EntryRef {
                pickup: &k.pickup,
                drop: &k.drop,
                route,
            })
            .collect();
        entries.sort_by(|a, b| (a.pickup, a.drop).cmp(&(b.pickup, b.drop)));
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<TripKey, CachedRoute>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|e| {
                (
                    TripKey {
                        pickup: e.pickup,
                        drop: e.drop,
                    },
                    e.route,
                )
            })
            .collect())
    }
}

#[derive(Serialize, Deserialize, Default)]
pub struct RouteCache {
    #[serde(default)]
    geocodes: HashMap<String, Coordinate>,
    #[serde(default, with = "trip_entries")]
    routes: HashMap<TripKey, CachedRoute>,
}

impl RouteCache {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        if path.as_ref().exists() {
            let data = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
    }

    pub fn get_geocode(&self, place: &str) -> Option<Coordinate> {
        self.geocodes.get(place).copied()
    }

    pub fn insert_geocode(&mut self, place: &str, coord: Coordinate) {
        self.geocodes.insert(place.to_string(), coord);
    }

    pub fn get_route(&self, key: &TripKey) -> Option<&CachedRoute> {
        self.routes.get(key)
    }

    pub fn insert_route(&mut self, key: TripKey, route: CachedRoute) {
        self.routes.insert(key, route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_key_keeps_direction() {
        assert_ne!(TripKey::new("Kandy", "Colombo"), TripKey::new("Colombo", "Kandy"));
        assert_eq!(TripKey::new(" Kandy ", "Colombo").to_string(), "Kandy::Colombo");
    }

    #[test]
    fn cached_route_decodes_geometry() {
        let cached = CachedRoute {
            summary: RouteSummary {
                distance_km: 1.0,
                duration_hours: 0.1,
            },
            encoded: "_p~iF~ps|U_ulLnnqC".to_string(),
        };
        let plan = cached.to_plan();
        assert_eq!(plan.geometry.len(), 2);
        assert_eq!(CachedRoute::from(&plan), cached);
    }

    #[test]
    fn serializes_routes_as_entries() {
        let mut cache = RouteCache::default();
        cache.insert_route(
            TripKey::new("A", "B"),
            CachedRoute {
                summary: RouteSummary {
                    distance_km: 2.0,
                    duration_hours: 0.05,
                },
                encoded: "??".to_string(),
            },
        );
        let json = serde_json::to_value(&cache).unwrap();
        assert_eq!(json["routes"][0]["pickup"], "A");
        assert_eq!(json["routes"][0]["drop"], "B");
        assert_eq!(json["routes"][0]["route"]["encoded"], "??");
    }

    #[test]
    fn place_names_with_separators_survive_a_reload() {
        let mut cache = RouteCache::default();
        let key = TripKey::new("Gate::North", "Kandy");
        let route = CachedRoute {
            summary: RouteSummary {
                distance_km: 1.0,
                duration_hours: 0.1,
            },
            encoded: "_p~iF~ps|U".to_string(),
        };
        cache.insert_route(key.clone(), route.clone());

        let text = serde_json::to_string(&cache).unwrap();
        let loaded: RouteCache = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.get_route(&key), Some(&route));
    }
}
