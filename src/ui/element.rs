//! A minimal retained element tree.
//!
//! Elements are shared handles: cloning an [`Element`] yields another
//! handle to the same node. Parents own their children; children keep a
//! weak link back so a node can be moved between containers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// How an element flows inside its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Block,
    Inline,
    InlineBlock,
    None,
}

#[derive(Debug)]
struct Node {
    tag: &'static str,
    class_name: String,
    display: Display,
    text: String,
    children: Vec<Element>,
    parent: Weak<RefCell<Node>>,
}

/// Handle to a node in the element tree.
#[derive(Debug, Clone)]
pub struct Element {
    node: Rc<RefCell<Node>>,
}

impl Element {
    /// Create a detached, empty element.
    pub fn new(tag: &'static str) -> Self {
        Self {
            node: Rc::new(RefCell::new(Node {
                tag,
                class_name: String::new(),
                display: Display::default(),
                text: String::new(),
                children: Vec::new(),
                parent: Weak::new(),
            })),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.node.borrow().tag
    }

    pub fn class_name(&self) -> String {
        self.node.borrow().class_name.clone()
    }

    pub fn set_class_name(&self, class_name: impl Into<String>) {
        self.node.borrow_mut().class_name = class_name.into();
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.node
            .borrow()
            .class_name
            .split_whitespace()
            .any(|c| c == class)
    }

    pub fn display(&self) -> Display {
        self.node.borrow().display
    }

    pub fn set_display(&self, display: Display) {
        self.node.borrow_mut().display = display;
    }

    /// Whether both handles refer to the same node.
    pub fn is_same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn parent(&self) -> Option<Self> {
        self.node
            .borrow()
            .parent
            .upgrade()
            .map(|node| Self { node })
    }

    pub fn children(&self) -> Vec<Self> {
        self.node.borrow().children.clone()
    }

    /// Attach `child` as the last child, detaching it from any previous
    /// parent first. Returns `false`, leaving the tree unchanged, when
    /// `child` is this element or one of its ancestors.
    pub fn append_child(&self, child: &Self) -> bool {
        if self.is_inclusive_descendant_of(child) {
            return false;
        }
        if let Some(old_parent) = child.parent() {
            old_parent.remove_child(child);
        }
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        self.node.borrow_mut().children.push(child.clone());
        true
    }

    fn is_inclusive_descendant_of(&self, other: &Self) -> bool {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if node.is_same_node(other) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Detach `child`. Returns `false` if it is not a child of this element.
    pub fn remove_child(&self, child: &Self) -> bool {
        let mut node = self.node.borrow_mut();
        let Some(idx) = node.children.iter().position(|c| c.is_same_node(child)) else {
            return false;
        };
        node.children.remove(idx);
        drop(node);
        child.node.borrow_mut().parent = Weak::new();
        true
    }

    /// Replace all content (children and text) with `text`.
    pub fn set_text_content(&self, text: impl Into<String>) {
        let children = {
            let mut node = self.node.borrow_mut();
            node.text = text.into();
            std::mem::take(&mut node.children)
        };
        for child in children {
            child.node.borrow_mut().parent = Weak::new();
        }
    }

    /// Text set directly on this element, without descendants.
    pub fn own_text(&self) -> String {
        self.node.borrow().text.clone()
    }

    /// Own text followed by the text of all descendants, in order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        let node = self.node.borrow();
        out.push_str(&node.text);
        for child in &node.children {
            child.collect_text(out);
        }
    }
}
