//! Wires a [`WeatherPanel`] to a surface and a weather client.
//!
//! After each user event the panel is projected and the surface synced,
//! so the drawn cards always follow the location list.

use chrono::Local;
use zipwx_weather::{BlobStore, InputValidation, StoreError, WeatherClient};

use crate::panel::{FetchOutcome, WeatherPanel};
use crate::renderer::{ViewRenderer, ADD_KEY};
use crate::surface::Surface;

pub struct PanelHost<S, U> {
    panel: WeatherPanel<S>,
    renderer: ViewRenderer<U>,
    client: WeatherClient,
}

impl<S: BlobStore, U: Surface> PanelHost<S, U> {
    /// Draw the restored panel onto `surface`.
    pub fn new(panel: WeatherPanel<S>, surface: U, client: WeatherClient) -> Self {
        let mut host = Self {
            panel,
            renderer: ViewRenderer::new(surface),
            client,
        };
        host.render();
        host
    }

    pub fn panel(&self) -> &WeatherPanel<S> {
        &self.panel
    }

    pub fn renderer(&self) -> &ViewRenderer<U> {
        &self.renderer
    }

    pub fn surface(&self) -> &U {
        self.renderer.surface()
    }

    pub fn render(&mut self) {
        let view = self.panel.view(&Local::now());
        self.renderer.sync(&view);
    }

    /// The input text changed.
    pub fn type_input(&mut self, text: &str) -> InputValidation {
        let validation = self.panel.on_input(text).clone();
        self.render();
        validation
    }

    /// Press the add button.
    pub async fn submit(&mut self) -> Result<FetchOutcome, StoreError> {
        if self.surface().click(ADD_KEY).is_none() {
            return Ok(FetchOutcome::Skipped);
        }
        let outcome = self.panel.add(&self.client).await;
        self.render();
        outcome
    }

    /// Click the node with `key`. Returns `false` if nothing clickable has that key.
    pub async fn click(&mut self, key: &str) -> Result<bool, StoreError> {
        let Some(action) = self.surface().click(key) else {
            tracing::debug!("Nothing to click at {}", key);
            return Ok(false);
        };
        let result = self.panel.dispatch(action, &self.client).await;
        self.render();
        result.map(|_| true)
    }
}
