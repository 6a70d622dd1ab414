use crate::{
    core::{
        config::{ProviderConfig, SessionConfig},
        constants::{CONNECTION_FAILED_TEXT, NOT_FOUND_MARKER},
        geo::GeoCoordinate,
        pixel::{ImageSize, PixelMapper},
        viewport::{ViewChange, Viewport},
    },
    data::{FoundPlace, ToponymResolver},
    input::MapIntent,
    providers::{GeocodeQuery, MapProvider, SearchQuery},
    rendering::{DisplayOptions, RenderRequest},
    Result,
};

/// Last outcome of fetching the map image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MapImage {
    /// Nothing has been drawn yet
    #[default]
    Pending,
    /// Encoded image bytes as returned by the provider
    Loaded(Vec<u8>),
    /// The provider could not be reached or refused the request
    Unavailable,
}

impl MapImage {
    /// Text to show instead of the image, if any
    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            MapImage::Unavailable => Some(CONNECTION_FAILED_TEXT),
            _ => None,
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            MapImage::Loaded(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }
}

/// Owns the viewport, the display options and the found place, and exposes the
/// operations the UI layer calls.
///
/// Every operation runs to completion and either commits its whole state change,
/// followed by exactly one redraw, or leaves the session untouched.
pub struct MapSession<P: MapProvider> {
    provider: P,
    providers_config: ProviderConfig,
    viewport: Viewport,
    display: DisplayOptions,
    found: Option<FoundPlace>,
    mapper: PixelMapper,
    resolver: ToponymResolver,
    image: MapImage,
    redraws: u64,
}

impl<P: MapProvider> MapSession<P> {
    /// Creates a session; nothing is fetched until the first redraw
    pub fn new(provider: P, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(config.center, config.zoom)?;

        Ok(Self {
            provider,
            providers_config: config.providers,
            viewport,
            display: config.display,
            found: None,
            mapper: PixelMapper::new(config.image_size),
            resolver: ToponymResolver::new(),
            image: MapImage::Pending,
            redraws: 0,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn display_options(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn found_place(&self) -> Option<&FoundPlace> {
        self.found.as_ref()
    }

    pub fn image(&self) -> &MapImage {
        &self.image
    }

    pub fn image_size(&self) -> ImageSize {
        self.mapper.size()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Number of redraws performed so far
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Image parameters for the current state, rebuilt on every call
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest::new(
            &self.viewport,
            &self.display,
            self.mapper.size(),
            self.found.as_ref().map(|place| place.coordinate),
        )
    }

    /// Text describing the found place, empty when nothing is found
    pub fn display_text(&self) -> String {
        match &self.found {
            None => String::new(),
            Some(place) if self.display.show_postal_code => format!(
                "{}\nPostal code: {}",
                place.display_address,
                place.postal_code.as_deref().unwrap_or(NOT_FOUND_MARKER)
            ),
            Some(place) => place.display_address.clone(),
        }
    }

    /// Pixel position of the found place's marker, `None` when it is off the image
    pub fn marker_pixel(&self) -> Option<(f64, f64)> {
        let place = self.found.as_ref()?;
        if !self.viewport.bounds().contains(&place.coordinate) {
            return None;
        }
        Some(self.mapper.coordinate_to_pixel(&place.coordinate, &self.viewport))
    }

    /// Fetches the image for the current state
    pub fn refresh(&mut self) {
        let request = self.render_request();
        self.image = match self.provider.fetch_image(&request) {
            Ok(bytes) => MapImage::Loaded(bytes),
            Err(e) => {
                log::warn!("map image request failed: {}", e);
                MapImage::Unavailable
            }
        };
        self.redraws += 1;
    }

    fn commit(&mut self, change: ViewChange) -> ViewChange {
        if change.needs_redraw() {
            self.refresh();
        }
        change
    }

    pub fn pan(&mut self, dx: i32, dy: i32) -> ViewChange {
        let change = self.viewport.pan(dx, dy);
        self.commit(change)
    }

    pub fn change_zoom(&mut self, delta: i32) -> ViewChange {
        let change = self.viewport.change_zoom(delta);
        self.commit(change)
    }

    pub fn set_zoom(&mut self, zoom: i32) -> ViewChange {
        let change = self.viewport.set_zoom(zoom);
        self.commit(change)
    }

    pub fn set_center(&mut self, center: GeoCoordinate) -> ViewChange {
        let change = self.viewport.set_center(center);
        self.commit(change)
    }

    /// Looks `text` up and centers the map on the first place found.
    ///
    /// The previous place is dropped first. When nothing is found the viewport
    /// stays where it was.
    pub fn search(&mut self, text: &str) -> ViewChange {
        let had_place = self.found.take().is_some();
        let text = text.trim();

        let place = if text.is_empty() {
            None
        } else {
            self.lookup(text)
        };

        match place {
            Some(mut place) => {
                self.augment(&mut place);
                let _ = self.viewport.set_center(place.coordinate);
                self.found = Some(place);
                self.commit(ViewChange::Redraw)
            }
            None if had_place => self.commit(ViewChange::Redraw),
            None => ViewChange::Unchanged,
        }
    }

    /// Marks the place under a pixel of the image without moving the map
    pub fn click_at(&mut self, x: f64, y: f64) -> ViewChange {
        let Some(coordinate) = self.mapper.pixel_to_coordinate(x, y, &self.viewport) else {
            log::debug!("click at ({}, {}) is outside the image", x, y);
            return ViewChange::Unchanged;
        };

        let had_place = self.found.take().is_some();
        let query = GeocodeQuery::reverse(&coordinate);
        let place = self.resolve_with("reverse geocode", |provider| provider.geocode(&query));

        match place {
            Some(mut place) => {
                self.augment(&mut place);
                self.found = Some(place);
                self.commit(ViewChange::Redraw)
            }
            None if had_place => self.commit(ViewChange::Redraw),
            None => ViewChange::Unchanged,
        }
    }

    /// Drops the found place and its marker; center and zoom stay
    pub fn clear(&mut self) -> ViewChange {
        if self.found.take().is_some() {
            self.commit(ViewChange::Redraw)
        } else {
            ViewChange::Unchanged
        }
    }

    /// Replaces the display options wholesale
    pub fn set_display_options(&mut self, options: DisplayOptions) -> ViewChange {
        self.display = options;
        if let Some(mut place) = self.found.take() {
            self.augment(&mut place);
            self.found = Some(place);
        }
        self.commit(ViewChange::Redraw)
    }

    /// Dispatches a UI intent to the matching operation
    pub fn handle(&mut self, intent: MapIntent) -> ViewChange {
        log::debug!("handling {:?}", intent);
        match intent {
            MapIntent::Pan { dx, dy } => self.pan(dx, dy),
            MapIntent::Zoom(delta) => self.change_zoom(delta),
            MapIntent::SetBaseLayer(layer) => self.set_display_options(DisplayOptions {
                base_layer: layer,
                ..self.display.clone()
            }),
            MapIntent::ShowTraffic(show) => self.set_display_options(DisplayOptions {
                show_traffic: show,
                ..self.display.clone()
            }),
            MapIntent::ShowLabels(show) => self.set_display_options(DisplayOptions {
                show_labels: show,
                ..self.display.clone()
            }),
            MapIntent::ShowPostalCode(show) => self.set_display_options(DisplayOptions {
                show_postal_code: show,
                ..self.display.clone()
            }),
            MapIntent::Search(text) => self.search(&text),
            MapIntent::Click { x, y } => self.click_at(x, y),
            MapIntent::Clear => self.clear(),
        }
    }

    /// Place search first, geocoder second
    fn lookup(&self, text: &str) -> Option<FoundPlace> {
        let search = SearchQuery::new(
            text,
            self.providers_config.language.clone(),
            self.providers_config.search_results,
        );
        self.resolve_with("place search", |provider| provider.search(&search))
            .or_else(|| {
                let geocode = GeocodeQuery::address(text);
                self.resolve_with("geocoder", |provider| provider.geocode(&geocode))
            })
    }

    fn resolve_with<F>(&self, what: &str, call: F) -> Option<FoundPlace>
    where
        F: FnOnce(&P) -> Result<serde_json::Value>,
    {
        match call(&self.provider) {
            Ok(raw) => {
                let place = self.resolver.resolve(&raw);
                if place.is_none() {
                    log::debug!("{} found nothing", what);
                }
                place
            }
            Err(e) => {
                log::warn!("{} request failed: {}", what, e);
                None
            }
        }
    }

    /// Looks up the postal code when it is shown and not known yet
    fn augment(&self, place: &mut FoundPlace) {
        if self.display.show_postal_code && place.postal_code.is_none() {
            self.resolver.augment_postal_code(&self.provider, place);
        }
    }
}
