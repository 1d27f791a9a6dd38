//! Weather panel: view projection, surface tree, renderer and the
//! controller tying state, persistence and fetches together.

pub mod error_mapping;
pub mod host;
pub mod i18n;
pub mod panel;
pub mod renderer;
pub mod settings;
pub mod surface;
pub mod view;

pub use host::PanelHost;
pub use panel::{Action, FetchOutcome, WeatherPanel};
pub use renderer::{ContainerState, ViewRenderer};
pub use settings::PanelSettings;
pub use surface::{Node, Slot, Surface, TreeSurface};
pub use view::{CardView, ContainerView, FieldView, InputView, PanelView};
