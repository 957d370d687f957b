use serde::Deserialize;

// --- Data Structures for parsing Google Maps web service responses ---

#[derive(Deserialize, Clone, Copy, Debug)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize, Debug)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<NearbyPlace>,
    #[serde(default)]
    pub error_message: Option<String>,
}
#[derive(Deserialize, Debug)]
pub struct NearbyPlace {
    pub place_id: String,
    pub name: String,
    pub geometry: PlaceGeometry,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}
#[derive(Deserialize, Debug)]
pub struct PlaceGeometry {
    pub location: LatLng,
}
#[derive(Deserialize, Debug)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
    #[serde(default)]
    pub error_message: Option<String>,
}
#[derive(Deserialize, Debug)]
pub struct MatrixRow {
    pub elements: Vec<MatrixElement>,
}
#[derive(Deserialize, Debug)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
}
#[derive(Deserialize, Debug, Clone)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    #[serde(default)]
    pub error_message: Option<String>,
}
#[derive(Deserialize, Debug)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub summary: String,
    pub overview_polyline: Polyline,
    pub legs: Vec<RouteLeg>,
}
#[derive(Deserialize, Debug)]
pub struct Polyline {
    pub points: String,
}
#[derive(Deserialize, Debug)]
pub struct RouteLeg {
    pub distance: TextValue,
    pub duration: TextValue,
}

#[derive(Deserialize, Debug)]
pub struct GeolocateResponse {
    pub location: LatLng,
    #[serde(default)]
    pub accuracy: Option<f64>,
}
