//! End-to-end tests for the mutation engine.
//!
//! Each rejected operation is checked twice: for its exception code, and for
//! leaving the document byte-for-byte identical by snapshot.

#![allow(clippy::unwrap_used)]

use domcore::{Dom, DomError, ExceptionCode, NodeId, NodeInit, NodeKind};

/// A document with a root element, ready for building trees.
struct Fixture {
    dom: Dom,
    doc: NodeId,
    root: NodeId,
}

impl Fixture {
    fn new() -> Self {
        let mut dom = Dom::new();
        let doc = dom.create_document();
        let root = dom.create_element(doc, "root").unwrap();
        dom.append_child(doc, root).unwrap();
        Self { dom, doc, root }
    }

    fn element(&mut self, name: &str) -> NodeId {
        self.dom.create_element(self.doc, name).unwrap()
    }

    fn text(&mut self, data: &str) -> NodeId {
        self.dom.create_text_node(self.doc, data).unwrap()
    }

    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.dom.children(parent).collect()
    }

    /// Runs `op` and asserts it fails with `expected` without changing the document.
    fn assert_rejected(
        &mut self,
        expected: ExceptionCode,
        op: impl FnOnce(&mut Dom) -> Result<NodeId, DomError>,
    ) {
        let before = self.dom.snapshot(self.doc);
        let err = op(&mut self.dom).unwrap_err();
        assert_eq!(err.code(), expected, "unexpected error: {err}");
        assert_eq!(self.dom.snapshot(self.doc), before, "rejected operation changed the tree");
    }
}

/// Checks that every node under `top` is listed exactly once by its parent.
fn assert_parent_links(dom: &Dom, top: NodeId) {
    for node in dom.descendants(top) {
        let parent = dom.parent_node(node).unwrap();
        let hits = dom.children(parent).filter(|&c| c == node).count();
        assert_eq!(hits, 1, "{node:?} listed {hits} times by its parent");
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_append_links_siblings() {
    let mut f = Fixture::new();
    let (p, a, b) = (f.root, f.text("A"), f.element("b"));
    f.dom.append_child(p, a).unwrap();
    f.dom.append_child(p, b).unwrap();

    assert_eq!(f.children(p), vec![a, b]);
    assert_eq!(f.dom.next_sibling(a), Some(b));
    assert_eq!(f.dom.previous_sibling(b), Some(a));
    assert_eq!(f.dom.first_child(p), Some(a));
    assert_eq!(f.dom.last_child(p), Some(b));

    f.dom.remove_child(p, a).unwrap();
    assert_eq!(f.children(p), vec![b]);
    assert_eq!(f.dom.parent_node(a), None);
    assert_eq!(f.dom.previous_sibling(b), None);
    assert_eq!(f.dom.first_child(p), Some(b));
}

#[test]
fn test_cross_document_append_rejected() {
    let mut f = Fixture::new();
    let x = f.element("x");
    let existing = f.text("keep");
    f.dom.append_child(x, existing).unwrap();
    f.dom.append_child(f.root, x).unwrap();

    let other = f.dom.create_document();
    let y = f.dom.create_element(other, "y").unwrap();
    f.assert_rejected(ExceptionCode::WrongDocument, |dom| dom.append_child(x, y));
    assert_eq!(f.children(x), vec![existing]);
    assert_eq!(f.dom.parent_node(y), None);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_insert_before_none_appends() {
    let mut f = Fixture::new();
    let (a, b) = (f.text("a"), f.text("b"));
    f.dom.insert_before(f.root, a, None).unwrap();
    f.dom.insert_before(f.root, b, None).unwrap();
    assert_eq!(f.children(f.root), vec![a, b]);
}

#[test]
fn test_insert_before_self_is_noop() {
    let mut f = Fixture::new();
    let (a, b, c) = (f.text("a"), f.text("b"), f.text("c"));
    for n in [a, b, c] {
        f.dom.append_child(f.root, n).unwrap();
    }
    let before = f.dom.snapshot(f.doc);
    assert_eq!(f.dom.insert_before(f.root, b, Some(b)), Ok(b));
    assert_eq!(f.dom.snapshot(f.doc), before);
}

#[test]
fn test_insert_moves_existing_child() {
    let mut f = Fixture::new();
    let (a, b, c) = (f.text("a"), f.text("b"), f.text("c"));
    for n in [a, b, c] {
        f.dom.append_child(f.root, n).unwrap();
    }
    f.dom.insert_before(f.root, c, Some(a)).unwrap();
    assert_eq!(f.children(f.root), vec![c, a, b]);

    let other = f.element("other");
    f.dom.append_child(other, a).unwrap();
    assert_eq!(f.children(f.root), vec![c, b]);
    assert_eq!(f.dom.parent_node(a), Some(other));
    assert_parent_links(&f.dom, f.doc);
}

#[test]
fn test_replace_child_takes_slot() {
    let mut f = Fixture::new();
    let (a, b, c) = (f.text("a"), f.text("b"), f.text("c"));
    f.dom.append_child(f.root, a).unwrap();
    f.dom.append_child(f.root, b).unwrap();

    assert_eq!(f.dom.replace_child(f.root, c, a), Ok(a));
    assert_eq!(f.children(f.root), vec![c, b]);
    assert_eq!(f.dom.parent_node(a), None);
    assert_eq!(f.dom.parent_node(c), Some(f.root));
}

#[test]
fn test_remove_child_detaches() {
    let mut f = Fixture::new();
    let a = f.element("a");
    let inner = f.text("inner");
    f.dom.append_child(a, inner).unwrap();
    f.dom.append_child(f.root, a).unwrap();

    assert_eq!(f.dom.remove_child(f.root, a), Ok(a));
    assert!(!f.dom.has_child_nodes(f.root));
    assert_eq!(f.dom.parent_node(a), None);
    // The detached subtree stays intact.
    assert_eq!(f.children(a), vec![inner]);
}

#[test]
fn test_fragment_children_inserted_in_order() {
    let mut f = Fixture::new();
    let r = f.text("ref");
    f.dom.append_child(f.root, r).unwrap();
    let frag = f.dom.create_document_fragment(f.doc).unwrap();
    let (a, b) = (f.element("a"), f.element("b"));
    f.dom.append_child(frag, a).unwrap();
    f.dom.append_child(frag, b).unwrap();

    assert_eq!(f.dom.insert_before(f.root, frag, Some(r)), Ok(frag));
    assert_eq!(f.children(f.root), vec![a, b, r]);
    assert!(!f.dom.has_child_nodes(frag));
    assert_eq!(f.dom.parent_node(a), Some(f.root));

    // A fragment appended at the tail.
    let (c, d) = (f.text("c"), f.text("d"));
    f.dom.append_child(frag, c).unwrap();
    f.dom.append_child(frag, d).unwrap();
    f.dom.append_child(f.root, frag).unwrap();
    assert_eq!(f.children(f.root), vec![a, b, r, c, d]);
    assert_parent_links(&f.dom, f.doc);
}

#[test]
fn test_grammar_violations_leave_tree_untouched() {
    let mut f = Fixture::new();
    let (doc, root) = (f.doc, f.root);
    let t = f.text("t");
    let second = f.element("second");
    let attr = f.dom.create_attribute(doc, "id").unwrap();
    let comment = f.dom.create_comment(doc, "c").unwrap();

    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(doc, t));
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(doc, second));
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(root, attr));
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(comment, t));
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(root, doc));
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(root, root));
}

#[test]
fn test_cycle_through_deep_ancestor_rejected() {
    let mut f = Fixture::new();
    let mut parent = f.root;
    for depth in 0..5 {
        let child = f.element(&format!("level{depth}"));
        f.dom.append_child(parent, child).unwrap();
        parent = child;
    }
    let (root, deepest) = (f.root, parent);
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| {
        dom.append_child(deepest, root)
    });
}

#[test]
fn test_read_only_checked_before_everything() {
    let mut f = Fixture::new();
    let locked = f
        .dom
        .create_node(
            f.doc,
            NodeInit::new(NodeKind::Element).name("locked").read_only(true),
        )
        .unwrap();
    f.dom.append_child(f.root, locked).unwrap();

    // Foreign, grammatically invalid, and unknown reference all at once.
    let other = f.dom.create_document();
    let foreign_attr = f.dom.create_attribute(other, "a").unwrap();
    let stranger = f.text("stranger");
    f.assert_rejected(ExceptionCode::NoModificationAllowed, |dom| {
        dom.insert_before(locked, foreign_attr, Some(stranger))
    });
    f.assert_rejected(ExceptionCode::NoModificationAllowed, |dom| {
        dom.remove_child(locked, stranger)
    });
}

#[test]
fn test_wrong_document_regardless_of_kind() {
    let mut f = Fixture::new();
    let other = f.dom.create_document();
    let root = f.root;
    for kind in [NodeKind::Text, NodeKind::Comment, NodeKind::Element] {
        let init = match kind {
            NodeKind::Element => NodeInit::new(kind).name("e"),
            _ => NodeInit::new(kind),
        };
        let foreign = f.dom.create_node(other, init).unwrap();
        f.assert_rejected(ExceptionCode::WrongDocument, |dom| dom.append_child(root, foreign));
    }
    // Even a node the grammar would refuse anyway.
    let foreign_doc_child = f.dom.create_document_fragment(other).unwrap();
    f.assert_rejected(ExceptionCode::WrongDocument, |dom| {
        dom.append_child(root, foreign_doc_child)
    });
}

#[test]
fn test_not_found_reference() {
    let mut f = Fixture::new();
    let (root, a) = (f.root, f.text("a"));
    let elsewhere = f.element("elsewhere");
    let stranger = f.text("stranger");
    f.dom.append_child(elsewhere, stranger).unwrap();

    f.assert_rejected(ExceptionCode::NotFound, |dom| {
        dom.insert_before(root, a, Some(stranger))
    });
    f.assert_rejected(ExceptionCode::NotFound, |dom| dom.replace_child(root, a, stranger));
    f.assert_rejected(ExceptionCode::NotFound, |dom| dom.remove_child(root, stranger));
}

#[test]
fn test_document_element_swap() {
    let mut f = Fixture::new();
    let (doc, old_root) = (f.doc, f.root);
    let new_root = f.element("new-root");
    assert_eq!(f.dom.replace_child(doc, new_root, old_root), Ok(old_root));
    assert_eq!(f.dom.document_element(doc), Some(new_root));

    let frag = f.dom.create_document_fragment(doc).unwrap();
    let (x, y) = (f.element("x"), f.element("y"));
    f.dom.append_child(frag, x).unwrap();
    f.dom.append_child(frag, y).unwrap();
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| {
        dom.replace_child(doc, frag, new_root)
    });
}

#[test]
fn test_clone_properties() {
    let mut f = Fixture::new();
    let list = f.element("ul");
    f.dom.set_attribute(list, "class", "menu").unwrap();
    for label in ["one", "two", "three"] {
        let li = f.element("li");
        let text = f.text(label);
        f.dom.append_child(li, text).unwrap();
        f.dom.append_child(list, li).unwrap();
    }
    f.dom.append_child(f.root, list).unwrap();

    let shallow = f.dom.clone_node(list, false).unwrap();
    assert!(!f.dom.has_child_nodes(shallow));
    assert_eq!(f.dom.parent_node(shallow), None);

    let deep = f.dom.clone_node(list, true).unwrap();
    assert_eq!(f.dom.parent_node(deep), None);
    let original = f.dom.snapshot(list);
    let copy = f.dom.snapshot(deep);
    assert!(original.same_shape(&copy));
    assert_eq!(original.node_count(), copy.node_count());

    let originals: Vec<NodeId> = f.dom.descendants(list).collect();
    assert!(f.dom.descendants(deep).all(|n| !originals.contains(&n)));

    // The clone is independent of its source.
    f.dom.append_child(f.root, deep).unwrap();
    let first_item = f.dom.first_child(deep).unwrap();
    f.dom.remove_child(deep, first_item).unwrap();
    assert_eq!(f.dom.child_nodes(list).length(), 3);
}

#[test]
fn test_live_child_list_tracks_mutation() {
    let mut f = Fixture::new();
    let (a, b) = (f.text("a"), f.text("b"));
    f.dom.append_child(f.root, a).unwrap();
    assert_eq!(f.dom.child_nodes(f.root).length(), 1);
    f.dom.append_child(f.root, b).unwrap();
    let list = f.dom.child_nodes(f.root);
    assert_eq!(list.length(), 2);
    assert_eq!(list.item(1), Some(b));
    assert_eq!(list.item(2), None);
}

// ---------------------------------------------------------------------------
// Deep trees
// ---------------------------------------------------------------------------

const DEEP: usize = 100_000;

/// Builds a chain of `depth` nested elements bottom-up and returns
/// `(top, leaf)`. Each append only walks the new parent's (empty) ancestry.
fn make_chain(f: &mut Fixture, depth: usize) -> (NodeId, NodeId) {
    let leaf = f.element("leaf");
    let mut top = leaf;
    for _ in 1..depth {
        let parent = f.element("level");
        f.dom.append_child(parent, top).unwrap();
        top = parent;
    }
    (top, leaf)
}

#[test]
fn test_deep_clone_of_very_deep_chain() {
    let mut f = Fixture::new();
    let (top, leaf) = make_chain(&mut f, DEEP);

    let copy = f.dom.clone_node(top, true).unwrap();
    assert_eq!(f.dom.parent_node(copy), None);
    assert_eq!(f.dom.descendants(copy).count(), DEEP - 1);

    let copied_leaf = f.dom.descendants(copy).last().unwrap();
    assert_ne!(copied_leaf, leaf);
    assert_eq!(f.dom.node_name(copied_leaf), "leaf");
    assert_eq!(f.dom.ancestors(copied_leaf).count(), DEEP);
}

#[test]
fn test_snapshot_of_very_deep_chain() {
    let mut f = Fixture::new();
    let (top, leaf) = make_chain(&mut f, DEEP);
    f.dom.append_child(f.root, top).unwrap();

    let snap = f.dom.snapshot(top);
    assert_eq!(snap.node_count(), DEEP);
    assert_eq!(snap.get(leaf).map(|n| n.depth), Some(DEEP - 1));

    // A rejected cycle across the whole depth leaves the tree as it was.
    let root = f.root;
    f.assert_rejected(ExceptionCode::HierarchyRequest, |dom| dom.append_child(leaf, root));

    let copy = f.dom.clone_node(top, true).unwrap();
    assert!(snap.same_shape(&f.dom.snapshot(copy)));
    assert_eq!(f.dom.snapshot(top).render().lines().count(), DEEP);
}
