//! Draws a [`PanelView`] onto a [`Surface`].
//!
//! Every operation is idempotent. The placeholder and the refresh control
//! always toggle together: placeholder shown iff no card is shown iff the
//! refresh control is hidden.

use crate::panel::Action;
use crate::surface::{Node, Slot, Surface};
use crate::view::{card_key, remove_key, CardView, ContainerView, InputView, PanelView, RefreshView};

pub const PLACEHOLDER_KEY: &str = "msg-empty";
pub const REFRESH_KEY: &str = "refresh";
pub const INPUT_KEY: &str = "input";
pub const ADD_KEY: &str = "add";
const CARD_CLASS: &str = "item";

/// Whether the container shows cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainerState {
    #[default]
    Empty,
    Populated,
}

impl ContainerState {
    pub fn for_count(count: usize) -> Self {
        if count == 0 {
            ContainerState::Empty
        } else {
            ContainerState::Populated
        }
    }

    pub fn shows_placeholder(self) -> bool {
        matches!(self, ContainerState::Empty)
    }

    pub fn shows_refresh(self) -> bool {
        matches!(self, ContainerState::Populated)
    }
}

pub struct ViewRenderer<S> {
    surface: S,
}

impl<S: Surface> ViewRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn card_count(&self) -> usize {
        self.surface.count_class(Slot::Container, CARD_CLASS)
    }

    /// State as currently drawn on the surface.
    pub fn container_state(&self) -> ContainerState {
        ContainerState::for_count(self.card_count())
    }

    pub fn placeholder_shown(&self) -> bool {
        self.surface.contains(Slot::Container, PLACEHOLDER_KEY)
    }

    pub fn refresh_shown(&self) -> bool {
        self.surface.contains(Slot::Toolbar, REFRESH_KEY)
    }

    /// Show the placeholder if no card is drawn, hiding the refresh control.
    pub fn render_empty_state(&mut self, message: &str) {
        if self.card_count() > 0 {
            return;
        }
        if !self.placeholder_shown() {
            self.surface.upsert(
                Slot::Container,
                Node::new("div")
                    .key(PLACEHOLDER_KEY)
                    .class("msg-empty alert")
                    .text(message),
            );
        }
        self.remove_refresh_control();
    }

    /// Drop the placeholder if shown and bring the refresh control back.
    pub fn remove_empty_state(&mut self, refresh: &RefreshView) {
        if self.surface.remove(Slot::Container, PLACEHOLDER_KEY) {
            self.render_refresh_control(refresh);
        }
    }

    /// Draw (or redraw in place) the card for one location.
    pub fn render_card(&mut self, card: &CardView) {
        self.surface.upsert(Slot::Container, card_node(card));
    }

    pub fn remove_card(&mut self, card_key: &str) -> bool {
        self.surface.remove(Slot::Container, card_key)
    }

    pub fn render_refresh_control(&mut self, refresh: &RefreshView) {
        if self.refresh_shown() {
            return;
        }
        self.surface.upsert(
            Slot::Toolbar,
            Node::new("button")
                .key(REFRESH_KEY)
                .class("refresh")
                .text(refresh.label.clone())
                .on_click(Action::Refresh),
        );
    }

    pub fn remove_refresh_control(&mut self) {
        self.surface.remove(Slot::Toolbar, REFRESH_KEY);
    }

    /// Input text, add button state and validation alerts. Alerts from the
    /// previous keystroke are always discarded first.
    pub fn render_input(&mut self, input: &InputView) {
        self.surface.upsert(
            Slot::Toolbar,
            Node::new("input")
                .key(INPUT_KEY)
                .class("input-zip")
                .text(format!("> {}", input.value)),
        );
        self.surface.upsert(
            Slot::Toolbar,
            Node::new("button")
                .key(ADD_KEY)
                .class("btn-add")
                .text(input.submit_label.clone())
                .on_click(Action::Add)
                .disabled(!input.submit_enabled),
        );

        self.surface.clear(Slot::Alerts);
        for alert in &input.alerts {
            self.surface.upsert(
                Slot::Alerts,
                Node::new("div").class("alert").text(format!("! {}", alert)),
            );
        }
    }

    /// Bring the surface in line with `view`.
    pub fn sync(&mut self, view: &PanelView) {
        let before = self.container_state();

        self.render_input(&view.input);

        match (&view.container, &view.refresh) {
            (ContainerView::Populated { cards }, Some(refresh)) => {
                self.remove_empty_state(refresh);
                self.sync_cards(cards);
                self.render_refresh_control(refresh);
            }
            (ContainerView::Empty { message }, _) => {
                self.sync_cards(&[]);
                self.render_empty_state(message);
            }
            (ContainerView::Populated { cards }, None) => {
                tracing::warn!("Populated view without refresh control");
                self.sync_cards(cards);
            }
        }

        let after = self.container_state();
        if before != after {
            tracing::debug!("Container {:?} -> {:?}", before, after);
        }
    }

    fn drawn_card_keys(&self) -> Vec<String> {
        self.surface
            .nodes(Slot::Container)
            .iter()
            .filter(|n| n.has_class(CARD_CLASS))
            .filter_map(|n| n.key.clone())
            .collect()
    }

    fn sync_cards(&mut self, cards: &[CardView]) {
        let wanted: Vec<&str> = cards.iter().map(|c| c.key.as_str()).collect();

        for key in self.drawn_card_keys() {
            if !wanted.contains(&key.as_str()) {
                self.remove_card(&key);
            }
        }

        // New cards are appended, so the kept ones must be a prefix of the
        // view order. Otherwise redraw from scratch.
        let drawn = self.drawn_card_keys();
        let is_prefix = drawn.len() <= wanted.len()
            && drawn.iter().zip(&wanted).all(|(d, w)| d.as_str() == *w);
        if !is_prefix {
            for key in drawn {
                self.remove_card(&key);
            }
        }

        for card in cards {
            self.render_card(card);
        }
    }
}

fn card_node(card: &CardView) -> Node {
    let mut title = Node::new("div").class("title");
    if let Some(url) = &card.icon_url {
        title = title.child(Node::new("img").attr("src", url.clone()).attr("height", "50").attr("width", "50"));
    }
    let heading = match &card.description {
        Some(description) => format!("{} ({}) - {}", card.title, card.zip, description),
        None => format!("{} ({})", card.title, card.zip),
    };
    title = title.child(Node::new("h2").text(heading)).child(
        Node::new("a")
            .key(remove_key(&card.zip))
            .class("btn removeItem")
            .text(card.remove_label.clone())
            .on_click(card.remove.clone()),
    );

    let row = card.fields.iter().fold(Node::new("div").class("row"), |row, field| {
        row.child(
            Node::new("div")
                .class(format!("panel {}", field.key))
                .text(format!("{}: {}", field.label, field.display())),
        )
    });

    Node::new("div")
        .key(card_key(&card.zip))
        .class(format!("{} {}", CARD_CLASS, card.key))
        .child(title)
        .child(row)
        .child(Node::new("h6").class("insTs").text(card.timestamp.clone()))
}
