//! Map state: one camera, one radius circle, one pulsing center marker and a
//! marker per monitoring station.
//!
//! Front ends draw from this state every frame. Updates mutate the existing
//! circle and markers in place, so an open station popup survives a restyle.

use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::aqi::{aqi_color, Rgb};
use crate::models::Station;

/// Central Delhi, where the prediction applies.
pub const DELHI: GeoPoint = GeoPoint::new(28.6139, 77.2090);
pub const DEFAULT_ZOOM: f64 = 11.0;
pub const FLY_TO_DURATION: Duration = Duration::from_millis(600);
pub const CIRCLE_FILL_OPACITY: f64 = 0.28;

const RADIUS_MIN_PM25: f64 = 20.0;
const RADIUS_MAX_PM25: f64 = 600.0;
const METRES_PER_PM25: f64 = 45.0;
const METRES_PER_DEGREE: f64 = 111_320.0;
// Longitude span shown at zoom 0; halves with every zoom level.
const VIEW_SPAN_AT_ZOOM_ZERO: f64 = 1440.0;
const PULSE_PERIOD: Duration = Duration::from_millis(1600);

/// Visual radius in metres for a PM2.5 reading. A display scale, not a
/// dispersion model.
pub fn radius_for_pm25(pm25: f64) -> f64 {
    pm25.clamp(RADIUS_MIN_PM25, RADIUS_MAX_PM25) * METRES_PER_PM25
}

/// Converts a distance to `(latitude, longitude)` degree spans at `latitude`.
pub fn metres_to_degrees(metres: f64, latitude: f64) -> (f64, f64) {
    let lat = metres / METRES_PER_DEGREE;
    let lon = metres / (METRES_PER_DEGREE * latitude.to_radians().cos().max(0.01));
    (lat, lon)
}

pub const RING_SEGMENTS: usize = 48;

/// Outline of a geographic circle as `(lon, lat)` points, first point repeated
/// at the end.
pub fn ring_points(center: GeoPoint, radius_m: f64) -> Vec<(f64, f64)> {
    let (dlat, dlon) = metres_to_degrees(radius_m, center.lat);
    (0..=RING_SEGMENTS)
        .map(|step| {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f64::consts::TAU * step as f64 / RING_SEGMENTS as f64;
            (
                angle.cos().mul_add(dlon, center.lon),
                angle.sin().mul_add(dlat, center.lat),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lat: (other.lat - self.lat).mul_add(t, self.lat),
            lon: (other.lon - self.lon).mul_add(t, self.lon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl ViewBounds {
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.west..=self.east).contains(&point.lon)
            && (self.south..=self.north).contains(&point.lat)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Flight {
    from: GeoPoint,
    from_zoom: f64,
    to: GeoPoint,
    to_zoom: f64,
    duration: Duration,
    elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    center: GeoPoint,
    zoom: f64,
    flight: Option<Flight>,
}

impl Camera {
    pub const fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            flight: None,
        }
    }

    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    pub const fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Where the camera will settle.
    pub fn target(&self) -> (GeoPoint, f64) {
        self.flight
            .as_ref()
            .map_or((self.center, self.zoom), |flight| (flight.to, flight.to_zoom))
    }

    pub fn fly_to(&mut self, target: GeoPoint, zoom: f64, duration: Duration) {
        if duration.is_zero() {
            self.center = target;
            self.zoom = zoom;
            self.flight = None;
            return;
        }

        self.flight = Some(Flight {
            from: self.center,
            from_zoom: self.zoom,
            to: target,
            to_zoom: zoom,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    pub fn tick(&mut self, delta: Duration) {
        let Some(flight) = self.flight.as_mut() else {
            return;
        };

        flight.elapsed = (flight.elapsed + delta).min(flight.duration);
        let progress = flight.elapsed.as_secs_f64() / flight.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - progress).powi(3);

        self.center = flight.from.lerp(flight.to, eased);
        self.zoom = (flight.to_zoom - flight.from_zoom).mul_add(eased, flight.from_zoom);

        if flight.elapsed >= flight.duration {
            self.center = flight.to;
            self.zoom = flight.to_zoom;
            self.flight = None;
        }
    }

    /// Visible area for a viewport whose width/height ratio is `aspect`.
    pub fn bounds(&self, aspect: f64) -> ViewBounds {
        let lon_span = VIEW_SPAN_AT_ZOOM_ZERO / self.zoom.exp2();
        let lat_span = lon_span / aspect.max(0.1);
        ViewBounds {
            west: self.center.lon - lon_span / 2.0,
            east: self.center.lon + lon_span / 2.0,
            south: self.center.lat - lat_span / 2.0,
            north: self.center.lat + lat_span / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusCircle {
    center: GeoPoint,
    radius_m: f64,
    color: Rgb,
    fill_color: Rgb,
    popup: String,
    updates: u32,
}

impl RadiusCircle {
    fn new(center: GeoPoint, radius_m: f64, color: Rgb) -> Self {
        Self {
            center,
            radius_m,
            color,
            fill_color: color,
            popup: String::new(),
            updates: 0,
        }
    }

    pub const fn center(&self) -> GeoPoint {
        self.center
    }

    pub const fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn fill_color(&self) -> Rgb {
        self.fill_color
    }

    pub const fn fill_opacity(&self) -> f64 {
        CIRCLE_FILL_OPACITY
    }

    pub fn popup(&self) -> &str {
        &self.popup
    }

    /// How many times this circle was restyled since it was created.
    pub const fn updates(&self) -> u32 {
        self.updates
    }

    fn set_style(&mut self, color: Rgb) {
        self.color = color;
        self.fill_color = color;
        self.updates += 1;
    }

    fn set_radius(&mut self, radius_m: f64) {
        self.radius_m = radius_m;
    }

    fn bind_popup(&mut self, popup: String) {
        self.popup = popup;
    }
}

/// Non-interactive marker pulsing at the prediction point.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseMarker {
    position: GeoPoint,
    color: Rgb,
    updates: u32,
}

impl PulseMarker {
    pub const fn position(&self) -> GeoPoint {
        self.position
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn is_interactive(&self) -> bool {
        false
    }

    pub const fn updates(&self) -> u32 {
        self.updates
    }

    fn set_icon(&mut self, color: Rgb) {
        self.color = color;
        self.updates += 1;
    }
}

#[derive(Debug, Clone)]
pub struct StationMarker {
    station: Weak<Station>,
    position: GeoPoint,
    color: Rgb,
    popup: String,
}

impl StationMarker {
    fn new(station: &Rc<Station>, color: Rgb, popup: String) -> Self {
        Self {
            station: Rc::downgrade(station),
            position: GeoPoint::new(station.lat, station.lon),
            color,
            popup,
        }
    }

    /// The station this marker was built from, if it is still loaded.
    pub fn station(&self) -> Option<Rc<Station>> {
        self.station.upgrade()
    }

    pub const fn position(&self) -> GeoPoint {
        self.position
    }

    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub fn popup(&self) -> &str {
        &self.popup
    }

    fn set_icon(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_popup_content(&mut self, popup: String) {
        self.popup = popup;
    }
}

#[derive(Debug, Clone)]
pub struct MapView {
    camera: Camera,
    anchor: GeoPoint,
    home_zoom: f64,
    circle: Option<RadiusCircle>,
    center_marker: Option<PulseMarker>,
    markers: Vec<StationMarker>,
    open_popup: Option<usize>,
    pulse_phase: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(DELHI, DEFAULT_ZOOM)
    }
}

impl MapView {
    pub const fn new(anchor: GeoPoint, zoom: f64) -> Self {
        Self {
            camera: Camera::new(anchor, zoom),
            anchor,
            home_zoom: zoom,
            circle: None,
            center_marker: None,
            markers: Vec::new(),
            open_popup: None,
            pulse_phase: 0.0,
        }
    }

    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub const fn circle(&self) -> Option<&RadiusCircle> {
        self.circle.as_ref()
    }

    pub const fn center_marker(&self) -> Option<&PulseMarker> {
        self.center_marker.as_ref()
    }

    pub fn markers(&self) -> &[StationMarker] {
        &self.markers
    }

    /// Position in the pulse animation, in `0.0..1.0`.
    pub const fn pulse_phase(&self) -> f64 {
        self.pulse_phase
    }

    /// Creates the circle and pulse marker on first call, restyles them after.
    pub fn update_center(&mut self, pm25: f64, category: &str) {
        let color = aqi_color(category);
        let radius = radius_for_pm25(pm25);

        if let Some(circle) = self.circle.as_mut() {
            circle.set_style(color);
            circle.set_radius(radius);
        } else {
            self.circle = Some(RadiusCircle::new(self.anchor, radius, color));
        }
        if let Some(circle) = self.circle.as_mut() {
            circle.bind_popup(format!("PM2.5: {pm25} µg/m³\nAQI: {category}"));
        }

        if let Some(marker) = self.center_marker.as_mut() {
            marker.set_icon(color);
        } else {
            self.center_marker = Some(PulseMarker {
                position: self.anchor,
                color,
                updates: 0,
            });
        }
    }

    /// Replaces the station layer. Any open popup is closed.
    pub fn rebuild_station_markers<F>(&mut self, stations: &[Rc<Station>], color: Rgb, popup: F)
    where
        F: Fn(&Station) -> String,
    {
        self.markers = stations
            .iter()
            .map(|station| StationMarker::new(station, color, popup(station)))
            .collect();
        self.open_popup = None;
    }

    pub fn clear_station_markers(&mut self) {
        self.markers.clear();
        self.open_popup = None;
    }

    /// Rebinds icon and popup of every marker without replacing it.
    pub fn restyle_station_markers<F>(&mut self, color: Rgb, popup: F)
    where
        F: Fn(&Station) -> String,
    {
        for marker in &mut self.markers {
            marker.set_icon(color);
            if let Some(station) = marker.station() {
                marker.set_popup_content(popup(&station));
            }
        }
    }

    pub fn fly_home(&mut self) {
        self.camera
            .fly_to(self.anchor, self.home_zoom, FLY_TO_DURATION);
    }

    pub const fn open_popup_index(&self) -> Option<usize> {
        self.open_popup
    }

    pub fn open_popup(&self) -> Option<&StationMarker> {
        self.open_popup.and_then(|index| self.markers.get(index))
    }

    pub fn open_next_popup(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        self.open_popup = Some(self.open_popup.map_or(0, |index| (index + 1) % self.markers.len()));
    }

    pub fn open_previous_popup(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        let len = self.markers.len();
        self.open_popup = Some(self.open_popup.map_or(len - 1, |index| (index + len - 1) % len));
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    pub fn tick(&mut self, delta: Duration) {
        self.camera.tick(delta);
        let step = delta.as_secs_f64() / PULSE_PERIOD.as_secs_f64();
        self.pulse_phase = (self.pulse_phase + step).rem_euclid(1.0);
    }
}
