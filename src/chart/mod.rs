//! Page model for the chart window.
//!
//! Everything the user sees lives in a [`ChartPage`]: the start control, the
//! welcome headings, the two catalog containers and the follow-along strip.
//! Core logic only touches the page through [`RenderTarget`], so it runs the
//! same against the egui shell and against plain tests.

pub mod renderer;

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::Group;
use crate::error::MissingElementError;

pub use renderer::{render_catalog, RenderReport};

pub type SharedPage = Arc<Mutex<ChartPage>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerId {
    Vowels,
    Consonants,
    FollowAlong,
}

impl ContainerId {
    pub const ALL: [ContainerId; 3] = [
        ContainerId::Vowels,
        ContainerId::Consonants,
        ContainerId::FollowAlong,
    ];

    pub fn for_group(group: Group) -> Self {
        match group {
            Group::Vowels => ContainerId::Vowels,
            Group::Consonants => ContainerId::Consonants,
        }
    }

    /// Containers holding interactive catalog buttons.
    pub fn is_catalog(self) -> bool {
        !matches!(self, ContainerId::FollowAlong)
    }
}

impl Display for ContainerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ContainerId::Vowels => "vowel-sounds",
            ContainerId::Consonants => "consonant-sounds",
            ContainerId::FollowAlong => "follow-along",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl Display for ElementId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A symbol button, either in a catalog container or copied into the
/// follow-along strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartElement {
    pub id: ElementId,
    pub symbol: String,
    pub audio_path: String,
    pub highlighted: bool,
    pub interactive: bool,
}

impl ChartElement {
    pub fn label(&self) -> String {
        format!("/{}/", self.symbol)
    }
}

/// Element contents before the page assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewElement {
    pub symbol: String,
    pub audio_path: String,
    pub interactive: bool,
}

impl NewElement {
    pub fn button(symbol: impl Into<String>, audio_path: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            audio_path: audio_path.into(),
            interactive: true,
        }
    }

    /// Non-interactive, unhighlighted copy of an existing element.
    pub fn copy_of(element: &ChartElement) -> Self {
        Self {
            symbol: element.symbol.clone(),
            audio_path: element.audio_path.clone(),
            interactive: false,
        }
    }
}

pub trait RenderTarget {
    fn append(
        &mut self,
        container: ContainerId,
        element: NewElement,
    ) -> Result<ElementId, MissingElementError>;

    fn clear_children(&mut self, container: ContainerId) -> Result<(), MissingElementError>;

    fn children(&self, container: ContainerId) -> Result<&[ChartElement], MissingElementError>;

    fn element(&self, id: ElementId) -> Option<&ChartElement>;

    fn set_highlighted(&mut self, id: ElementId, highlighted: bool)
        -> Result<(), MissingElementError>;

    fn hide_start_control(&mut self) -> Result<(), MissingElementError>;

    /// Adds a heading above everything else on the page.
    fn prepend_heading(&mut self, text: String);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartControl {
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct ChartPage {
    start_control: Option<StartControl>,
    headings: Vec<String>,
    containers: BTreeMap<ContainerId, Vec<ChartElement>>,
    next_id: u64,
}

impl Default for ChartPage {
    fn default() -> Self {
        Self {
            start_control: Some(StartControl { visible: true }),
            headings: Vec::new(),
            containers: ContainerId::ALL
                .into_iter()
                .map(|id| (id, Vec::new()))
                .collect(),
            next_id: 0,
        }
    }
}

impl ChartPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_shared(self) -> SharedPage {
        Arc::new(Mutex::new(self))
    }

    pub fn without_container(mut self, container: ContainerId) -> Self {
        self.containers.remove(&container);
        self
    }

    pub fn without_start_control(mut self) -> Self {
        self.start_control = None;
        self
    }

    pub fn start_control(&self) -> Option<StartControl> {
        self.start_control
    }

    pub fn start_visible(&self) -> bool {
        self.start_control.is_some_and(|control| control.visible)
    }

    /// Newest first.
    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    pub fn has_container(&self, container: ContainerId) -> bool {
        self.containers.contains_key(&container)
    }

    /// Catalog buttons currently highlighted.
    pub fn highlighted(&self) -> Vec<ElementId> {
        self.catalog_elements()
            .filter(|element| element.highlighted)
            .map(|element| element.id)
            .collect()
    }

    pub fn clear_catalog_highlights(&mut self) {
        for (_, elements) in self
            .containers
            .iter_mut()
            .filter(|(id, _)| id.is_catalog())
        {
            for element in elements.iter_mut() {
                element.highlighted = false;
            }
        }
    }

    /// Snapshot of the follow-along strip, in click order.
    pub fn follow_along(&self) -> Vec<ChartElement> {
        self.containers
            .get(&ContainerId::FollowAlong)
            .cloned()
            .unwrap_or_default()
    }

    fn catalog_elements(&self) -> impl Iterator<Item = &ChartElement> {
        self.containers
            .iter()
            .filter(|(id, _)| id.is_catalog())
            .flat_map(|(_, elements)| elements.iter())
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut ChartElement> {
        self.containers
            .values_mut()
            .flat_map(|elements| elements.iter_mut())
            .find(|element| element.id == id)
    }
}

impl RenderTarget for ChartPage {
    fn append(
        &mut self,
        container: ContainerId,
        element: NewElement,
    ) -> Result<ElementId, MissingElementError> {
        let id = ElementId(self.next_id);
        let elements = self
            .containers
            .get_mut(&container)
            .ok_or(MissingElementError::Container(container))?;
        elements.push(ChartElement {
            id,
            symbol: element.symbol,
            audio_path: element.audio_path,
            highlighted: false,
            interactive: element.interactive,
        });
        self.next_id += 1;
        Ok(id)
    }

    fn clear_children(&mut self, container: ContainerId) -> Result<(), MissingElementError> {
        self.containers
            .get_mut(&container)
            .ok_or(MissingElementError::Container(container))?
            .clear();
        Ok(())
    }

    fn children(&self, container: ContainerId) -> Result<&[ChartElement], MissingElementError> {
        self.containers
            .get(&container)
            .map(Vec::as_slice)
            .ok_or(MissingElementError::Container(container))
    }

    fn element(&self, id: ElementId) -> Option<&ChartElement> {
        self.containers
            .values()
            .flat_map(|elements| elements.iter())
            .find(|element| element.id == id)
    }

    fn set_highlighted(
        &mut self,
        id: ElementId,
        highlighted: bool,
    ) -> Result<(), MissingElementError> {
        let element = self
            .element_mut(id)
            .ok_or(MissingElementError::Element(id))?;
        element.highlighted = highlighted;
        Ok(())
    }

    fn hide_start_control(&mut self) -> Result<(), MissingElementError> {
        let control = self
            .start_control
            .as_mut()
            .ok_or(MissingElementError::StartControl)?;
        control.visible = false;
        Ok(())
    }

    fn prepend_heading(&mut self, text: String) {
        self.headings.insert(0, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_unique_ids_in_order() {
        let mut page = ChartPage::new();
        let first = page
            .append(ContainerId::Vowels, NewElement::button("a", "a.mp3"))
            .unwrap();
        let second = page
            .append(ContainerId::FollowAlong, NewElement::button("b", "b.mp3"))
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(page.element(second).unwrap().symbol, "b");
        assert_eq!(page.element(first).unwrap().label(), "/a/");
    }

    #[test]
    fn missing_container_is_reported() {
        let mut page = ChartPage::new().without_container(ContainerId::Consonants);
        let err = page
            .append(ContainerId::Consonants, NewElement::button("b", "b.mp3"))
            .unwrap_err();
        assert_eq!(err, MissingElementError::Container(ContainerId::Consonants));
        assert!(page.children(ContainerId::Consonants).is_err());
    }

    #[test]
    fn clearing_highlights_leaves_follow_along_untouched() {
        let mut page = ChartPage::new();
        let button = page
            .append(ContainerId::Vowels, NewElement::button("a", "a.mp3"))
            .unwrap();
        let copy = page
            .append(ContainerId::FollowAlong, NewElement::button("a", "a.mp3"))
            .unwrap();
        page.set_highlighted(button, true).unwrap();
        page.set_highlighted(copy, true).unwrap();
        page.clear_catalog_highlights();
        assert!(page.highlighted().is_empty());
        assert!(page.element(copy).unwrap().highlighted);
    }

    #[test]
    fn hiding_start_control() {
        let mut page = ChartPage::new();
        assert!(page.start_visible());
        page.hide_start_control().unwrap();
        assert!(!page.start_visible());

        let mut bare = ChartPage::new().without_start_control();
        assert_eq!(
            bare.hide_start_control(),
            Err(MissingElementError::StartControl)
        );
    }
}
