#![forbid(unsafe_code)]

//! Headless document surface.
//!
//! The engine never touches a real document. Hosts mirror the page
//! structure into a [`Document`]: a flat arena of elements with tags,
//! classes, inline styles, attributes, geometry, and focus state. The
//! engine queries this model and emits effects; applying an effect
//! mutates the model (and, in a real host, the page).
//!
//! # Design Notes
//!
//! - [`NodeId`] is a cheap copyable handle; stale handles are answered
//!   with `None` rather than panics.
//! - Queries return nodes in document order (creation order), matching
//!   `querySelectorAll` traversal for a top-down build.
//! - Detached elements (removed subtrees) stay in the arena but are
//!   excluded from every query.

use std::collections::{BTreeMap, BTreeSet};

/// Handle to an element in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Vertical extent of an element in CSS pixels, relative to the page top.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Distance from the top of the page to the element's top edge.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

impl Bounds {
    /// Create bounds from a top offset and height.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether a page position lies within `[top, top + height)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.bottom()
    }
}

/// One element in the document arena.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lowercase tag name (`"div"`, `"section"`, `"button"`, ...).
    pub tag: String,
    /// The element's `id` attribute, if any.
    pub dom_id: Option<String>,
    /// CSS classes.
    pub classes: BTreeSet<String>,
    /// Inline styles (property -> value), including custom properties.
    pub styles: BTreeMap<String, String>,
    /// Non-style attributes (`data-theme`, `required`, ...).
    pub attrs: BTreeMap<String, String>,
    /// Text content.
    pub text: String,
    /// Current value, for form controls.
    pub value: String,
    /// The `href` attribute, for anchors.
    pub href: Option<String>,
    /// Explicit `tabindex`, if any.
    pub tab_index: Option<i32>,
    /// Disabled state, for form controls.
    pub disabled: bool,
    /// Vertical geometry.
    pub bounds: Bounds,
    /// Parent element, `None` for the root.
    pub parent: Option<NodeId>,
    /// Removed from the tree; excluded from all queries.
    pub detached: bool,
}

impl ElementData {
    /// Whether this element has the given class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Whether keyboard focus can land on this element.
    ///
    /// Mirrors the focusable set used by overlay focus containment:
    /// buttons, links with an href, form controls, and elements with an
    /// explicit non-negative tabindex.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        if self.detached {
            return false;
        }
        match self.tag.as_str() {
            "button" | "input" | "select" | "textarea" => true,
            _ => self.href.is_some() || matches!(self.tab_index, Some(i) if i != -1),
        }
    }
}

/// Builder for inserting an element into a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    data: ElementData,
}

impl ElementSpec {
    /// Start a spec for an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            data: ElementData {
                tag: tag.into(),
                ..ElementData::default()
            },
        }
    }

    /// Set the element's `id` attribute.
    #[must_use]
    pub fn dom_id(mut self, id: impl Into<String>) -> Self {
        self.data.dom_id = Some(id.into());
        self
    }

    /// Add a CSS class.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.data.classes.insert(class.into());
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.data.text = text.into();
        self
    }

    /// Set the current value (form controls).
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.data.value = value.into();
        self
    }

    /// Set the `href` attribute.
    #[must_use]
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.data.href = Some(href.into());
        self
    }

    /// Set a non-style attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.attrs.insert(name.into(), value.into());
        self
    }

    /// Set an explicit tabindex.
    #[must_use]
    pub fn tab_index(mut self, index: i32) -> Self {
        self.data.tab_index = Some(index);
        self
    }

    /// Set the vertical geometry.
    #[must_use]
    pub fn bounds(mut self, top: f64, height: f64) -> Self {
        self.data.bounds = Bounds::new(top, height);
        self
    }
}

/// A headless page model.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<ElementData>,
    active: Option<NodeId>,
    scroll_locked: bool,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element under `parent` (or as a root when `None`).
    pub fn append(&mut self, parent: Option<NodeId>, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.elements.len() as u32);
        let mut data = spec.data;
        data.parent = parent;
        self.elements.push(data);
        id
    }

    /// Number of elements ever inserted, including detached ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Borrow an element. Returns `None` for stale or detached handles.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ElementData> {
        self.elements.get(id.index()).filter(|e| !e.detached)
    }

    /// Mutably borrow an element.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.elements.get_mut(id.index()).filter(|e| !e.detached)
    }

    /// All live nodes in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.detached)
            .map(|(i, _)| NodeId(i as u32))
    }

    /// First element with the given `id` attribute.
    #[must_use]
    pub fn by_id(&self, dom_id: &str) -> Option<NodeId> {
        self.nodes()
            .find(|&n| self.elements[n.index()].dom_id.as_deref() == Some(dom_id))
    }

    /// All elements carrying a class, in document order.
    #[must_use]
    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| self.elements[n.index()].has_class(class))
            .collect()
    }

    /// First element carrying a class.
    #[must_use]
    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.nodes()
            .find(|&n| self.elements[n.index()].has_class(class))
    }

    /// All elements with the given tag, in document order.
    #[must_use]
    pub fn by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| self.elements[n.index()].tag == tag)
            .collect()
    }

    /// Whether `node` is `ancestor` or lies inside it.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.get(n).and_then(|e| e.parent);
        }
        false
    }

    /// Nearest ancestor (including `node` itself) with the given class.
    #[must_use]
    pub fn closest_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            let element = self.get(n)?;
            if element.has_class(class) {
                return Some(n);
            }
            current = element.parent;
        }
        None
    }

    /// Live descendants of `root` (excluding `root`), in document order.
    #[must_use]
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| n != root && self.contains(root, n))
            .collect()
    }

    /// Direct live children of `node`, in document order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| self.elements[n.index()].parent == Some(node))
            .collect()
    }

    /// Detach a node and its subtree from every future query.
    pub fn detach(&mut self, node: NodeId) {
        let subtree: Vec<NodeId> = self
            .descendants(node)
            .into_iter()
            .chain(std::iter::once(node))
            .collect();
        for n in subtree {
            if let Some(e) = self.elements.get_mut(n.index()) {
                e.detached = true;
            }
        }
        if self.active.is_some_and(|a| self.get(a).is_none()) {
            self.active = None;
        }
    }

    /// Replace the children of `node` with fresh elements of `tag`,
    /// one per entry in `texts`.
    pub fn replace_children(&mut self, node: NodeId, tag: &str, texts: &[String]) {
        for child in self.children(node) {
            self.detach(child);
        }
        for text in texts {
            self.append(Some(node), ElementSpec::new(tag).text(text.clone()));
        }
    }

    // -- focus ---------------------------------------------------------

    /// The element currently holding keyboard focus.
    #[must_use]
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Move keyboard focus. No-op for stale handles.
    pub fn focus(&mut self, node: NodeId) {
        if self.get(node).is_some() {
            self.active = Some(node);
        }
    }

    /// Drop keyboard focus.
    pub fn blur(&mut self) {
        self.active = None;
    }

    // -- scroll lock ---------------------------------------------------

    /// Whether page background scrolling is suppressed.
    #[must_use]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Suppress page background scrolling (`body { overflow: hidden }`).
    pub fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    /// Restore page background scrolling.
    pub fn unlock_scroll(&mut self) {
        self.scroll_locked = false;
    }

    // -- mutation helpers ----------------------------------------------

    /// Add a class. No-op for stale handles.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.get_mut(node) {
            e.classes.insert(class.to_string());
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.get_mut(node) {
            e.classes.remove(class);
        }
    }

    /// Toggle a class, returning its new presence.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        match self.get_mut(node) {
            Some(e) => {
                if e.classes.remove(class) {
                    false
                } else {
                    e.classes.insert(class.to_string());
                    true
                }
            }
            None => false,
        }
    }

    /// Whether an element carries a class.
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|e| e.has_class(class))
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.styles.insert(prop.to_string(), value.to_string());
        }
    }

    /// Remove an inline style property.
    pub fn clear_style(&mut self, node: NodeId, prop: &str) {
        if let Some(e) = self.get_mut(node) {
            e.styles.remove(prop);
        }
    }

    /// Read an inline style property.
    #[must_use]
    pub fn style(&self, node: NodeId, prop: &str) -> Option<&str> {
        self.get(node)?.styles.get(prop).map(String::as_str)
    }

    /// Set a non-style attribute.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.attrs.insert(name.to_string(), value.to_string());
        }
    }

    /// Read a non-style attribute.
    #[must_use]
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node)?.attrs.get(name).map(String::as_str)
    }

    /// Set text content.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.get_mut(node) {
            e.text = text.to_string();
        }
    }

    /// Read text content.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|e| e.text.as_str())
    }

    /// Set the value of a form control.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.value = value.to_string();
        }
    }

    /// Set the disabled state of a form control.
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(e) = self.get_mut(node) {
            e.disabled = disabled;
        }
    }

    /// Whether keyboard focus can land on an element.
    #[must_use]
    pub fn is_focusable(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(ElementData::is_focusable)
    }
}
