//! Selection snapshots for context-sensitive gestures.
//!
//! The tracker never inspects widgets itself. Hosts implement [`UiContext`]
//! for the widget kinds they know, and [`HierarchyResolver`] applies the
//! lookup precedence on top of it.

use std::collections::HashMap;

use super::input_event::ComponentId;

/// Parent links are followed at most this many times.
const MAX_HIERARCHY_DEPTH: usize = 256;

/// Describes what is selected at a widget right now.
///
/// Called synchronously before the host dispatches an event, so
/// implementations must be cheap and free of side effects.
pub trait SelectionResolver {
    fn resolve(&self, component: ComponentId, editable_text_only: bool) -> Option<String>;
}

/// Resolver for hosts that cannot inspect their UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSelection;

impl SelectionResolver for NoSelection {
    fn resolve(&self, _component: ComponentId, _editable_text_only: bool) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub presentable_text: String,
    /// Container or path shown next to the item, e.g. a package name.
    pub location: Option<String>,
}

impl NavigationItem {
    fn describe(&self) -> String {
        match &self.location {
            Some(location) => format!("{} {location}", self.presentable_text),
            None => self.presentable_text.clone(),
        }
    }
}

/// An open "choose by name" popup (go to class, go to file...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserPopup {
    pub entered_text: String,
    pub chosen_name: Option<String>,
}

/// A visible search-everywhere style popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPopup {
    pub query: Option<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetContent {
    Label(String),
    TextInput(String),
    StyledText(String),
    Tree { selected: Option<String> },
    List { selected: Option<String> },
    TreeTable { selected: Option<String> },
    Table { selected_row: Option<Vec<String>> },
    /// Panels and other widgets without a selection of their own.
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub content: WidgetContent,
    pub parent: Option<ComponentId>,
}

/// Narrow view of the host UI used to describe selections.
pub trait UiContext {
    fn predefined_text(&self, _component: ComponentId) -> Option<String> {
        None
    }

    fn navigation_item(&self, _component: ComponentId) -> Option<NavigationItem> {
        None
    }

    fn chooser_popup(&self) -> Option<ChooserPopup> {
        None
    }

    fn search_popup(&self) -> Option<SearchPopup> {
        None
    }

    fn widget(&self, component: ComponentId) -> Option<Widget>;
}

/// Applies the selection precedence over a [`UiContext`].
#[derive(Debug, Clone)]
pub struct HierarchyResolver<C> {
    ui: C,
}

impl<C: UiContext> HierarchyResolver<C> {
    pub fn new(ui: C) -> Self {
        Self { ui }
    }

    pub fn ui(&self) -> &C {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut C {
        &mut self.ui
    }

    fn from_popups(&self, editable_text_only: bool) -> Option<Option<String>> {
        if let Some(popup) = self.ui.chooser_popup() {
            if editable_text_only {
                return Some(Some(popup.entered_text));
            }
            if let Some(name) = popup.chosen_name {
                return Some(Some(name));
            }
        }

        let popup = self.ui.search_popup()?;
        if editable_text_only {
            if let Some(query) = popup.query {
                return Some(Some(query));
            }
        }
        Some(popup.selected)
    }

    fn from_hierarchy(&self, component: ComponentId) -> Option<String> {
        let mut current = Some(component);
        for _ in 0..MAX_HIERARCHY_DEPTH {
            let widget = self.ui.widget(current?)?;
            match widget.content {
                WidgetContent::Label(text)
                | WidgetContent::TextInput(text)
                | WidgetContent::StyledText(text) => return Some(text),
                WidgetContent::Tree { selected }
                | WidgetContent::List { selected }
                | WidgetContent::TreeTable { selected } => return selected,
                WidgetContent::Table { selected_row } => {
                    return selected_row.map(|cells| cells.join(", "));
                }
                WidgetContent::Container => current = widget.parent,
            }
        }
        None
    }
}

impl<C: UiContext> SelectionResolver for HierarchyResolver<C> {
    fn resolve(&self, component: ComponentId, editable_text_only: bool) -> Option<String> {
        if editable_text_only {
            if let Some(text) = self.ui.predefined_text(component) {
                return Some(text);
            }
        }

        if let Some(item) = self.ui.navigation_item(component) {
            return Some(item.describe());
        }

        if let Some(found) = self.from_popups(editable_text_only) {
            return found;
        }

        self.from_hierarchy(component)
    }
}

/// In-memory snapshot of a widget tree.
///
/// Useful for hosts that can copy the relevant part of their UI into plain
/// data before dispatch, and for driving the tracker without a real toolkit.
#[derive(Debug, Clone, Default)]
pub struct WidgetTree {
    widgets: HashMap<ComponentId, Widget>,
    predefined: HashMap<ComponentId, String>,
    navigation: HashMap<ComponentId, NavigationItem>,
    chooser: Option<ChooserPopup>,
    search: Option<SearchPopup>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        component: ComponentId,
        content: WidgetContent,
        parent: Option<ComponentId>,
    ) -> &mut Self {
        self.widgets.insert(component, Widget { content, parent });
        self
    }

    pub fn set_content(&mut self, component: ComponentId, content: WidgetContent) {
        if let Some(widget) = self.widgets.get_mut(&component) {
            widget.content = content;
        }
    }

    pub fn set_predefined_text(&mut self, component: ComponentId, text: impl Into<String>) {
        self.predefined.insert(component, text.into());
    }

    pub fn set_navigation_item(&mut self, component: ComponentId, item: NavigationItem) {
        self.navigation.insert(component, item);
    }

    pub fn set_chooser_popup(&mut self, popup: Option<ChooserPopup>) {
        self.chooser = popup;
    }

    pub fn set_search_popup(&mut self, popup: Option<SearchPopup>) {
        self.search = popup;
    }
}

impl UiContext for WidgetTree {
    fn predefined_text(&self, component: ComponentId) -> Option<String> {
        self.predefined.get(&component).cloned()
    }

    fn navigation_item(&self, component: ComponentId) -> Option<NavigationItem> {
        self.navigation.get(&component).cloned()
    }

    fn chooser_popup(&self) -> Option<ChooserPopup> {
        self.chooser.clone()
    }

    fn search_popup(&self) -> Option<SearchPopup> {
        self.search.clone()
    }

    fn widget(&self, component: ComponentId) -> Option<Widget> {
        self.widgets.get(&component).cloned()
    }
}
