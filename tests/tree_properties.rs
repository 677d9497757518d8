//! Randomized mutation sequences.
//!
//! A fixed pool of nodes from two documents is shuffled around by arbitrary
//! insert, replace and remove operations. After every step the parent and
//! child links must agree, the tree must stay acyclic, and a failed step must
//! leave every node exactly as it was.

#![allow(clippy::unwrap_used)]

use domcore::{Dom, NodeId, NodeKind, TreeSnapshot};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Append { parent: usize, child: usize },
    InsertBefore { parent: usize, child: usize, reference: Option<usize> },
    Replace { parent: usize, child: usize, old: usize },
    Remove { parent: usize, child: usize },
    CloneNode { node: usize, deep: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let index = 0usize..64;
    prop_oneof![
        (index.clone(), index.clone()).prop_map(|(parent, child)| Op::Append { parent, child }),
        (index.clone(), index.clone(), prop::option::of(index.clone())).prop_map(
            |(parent, child, reference)| Op::InsertBefore {
                parent,
                child,
                reference,
            }
        ),
        (index.clone(), index.clone(), index.clone())
            .prop_map(|(parent, child, old)| Op::Replace { parent, child, old }),
        (index.clone(), index.clone()).prop_map(|(parent, child)| Op::Remove { parent, child }),
        (index, any::<bool>()).prop_map(|(node, deep)| Op::CloneNode { node, deep }),
    ]
}

/// Builds two documents and a pool of loose nodes of every insertable kind.
fn build_pool() -> (Dom, Vec<NodeId>) {
    let mut dom = Dom::new();
    let doc = dom.create_document();
    let other = dom.create_document();
    let mut pool = vec![doc, other];
    for owner in [doc, doc, other] {
        pool.push(dom.create_element(owner, "e").unwrap());
        pool.push(dom.create_element(owner, "f").unwrap());
        pool.push(dom.create_text_node(owner, "t").unwrap());
        pool.push(dom.create_comment(owner, "c").unwrap());
        pool.push(dom.create_document_fragment(owner).unwrap());
        pool.push(dom.create_attribute(owner, "a").unwrap());
        pool.push(dom.create_entity_reference(owner, "r").unwrap());
    }
    pool.push(dom.create_document_type(doc, "html").unwrap());
    (dom, pool)
}

fn snapshot_all(dom: &Dom, pool: &[NodeId]) -> Vec<TreeSnapshot> {
    pool.iter().map(|&n| dom.snapshot(n)).collect()
}

fn check_links(dom: &Dom, pool: &[NodeId]) -> Result<(), TestCaseError> {
    for &node in pool {
        if let Some(parent) = dom.parent_node(node) {
            let hits = dom.children(parent).filter(|&c| c == node).count();
            prop_assert_eq!(hits, 1, "{:?} listed {} times by {:?}", node, hits, parent);
        }
        for child in dom.children(node) {
            prop_assert_eq!(dom.parent_node(child), Some(node));
        }
        prop_assert!(
            dom.ancestors(node).count() <= dom.node_count(),
            "cycle above {:?}",
            node
        );
        let kind = dom.node_kind(node);
        if matches!(kind, NodeKind::Document | NodeKind::DocumentFragment | NodeKind::Attribute) {
            prop_assert_eq!(dom.parent_node(node), None);
        }
        if kind == NodeKind::Document {
            let elements = dom
                .children(node)
                .filter(|&c| dom.node_kind(c) == NodeKind::Element)
                .count();
            prop_assert!(elements <= 1, "document has {} elements", elements);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_random_mutations_keep_tree_consistent(
        ops in prop::collection::vec(op_strategy(), 1..64)
    ) {
        let (mut dom, mut pool) = build_pool();
        for op in ops {
            let pick = |i: usize| pool[i % pool.len()];
            let before = snapshot_all(&dom, &pool);
            let result = match op {
                Op::Append { parent, child } => dom.append_child(pick(parent), pick(child)),
                Op::InsertBefore { parent, child, reference } => {
                    dom.insert_before(pick(parent), pick(child), reference.map(pick))
                }
                Op::Replace { parent, child, old } => {
                    dom.replace_child(pick(parent), pick(child), pick(old))
                }
                Op::Remove { parent, child } => dom.remove_child(pick(parent), pick(child)),
                Op::CloneNode { node, deep } => dom.clone_node(pick(node), deep),
            };
            match result {
                Err(_) => prop_assert_eq!(snapshot_all(&dom, &pool), before),
                Ok(node) if !pool.contains(&node) => {
                    prop_assert_eq!(dom.parent_node(node), None);
                    pool.push(node);
                }
                Ok(_) => {}
            }
            check_links(&dom, &pool)?;
        }
    }

    #[test]
    fn test_remove_after_append_restores_children(count in 1usize..16, victim in any::<prop::sample::Index>()) {
        let mut dom = Dom::new();
        let doc = dom.create_document();
        let parent = dom.create_element(doc, "list").unwrap();
        let items: Vec<NodeId> = (0..count)
            .map(|_| {
                let item = dom.create_element(doc, "item").unwrap();
                dom.append_child(parent, item).unwrap();
                item
            })
            .collect();

        let removed = items[victim.index(count)];
        prop_assert_eq!(dom.remove_child(parent, removed), Ok(removed));
        let remaining: Vec<NodeId> = dom.children(parent).collect();
        let expected: Vec<NodeId> = items.iter().copied().filter(|&n| n != removed).collect();
        prop_assert_eq!(remaining, expected);
        prop_assert_eq!(dom.parent_node(removed), None);
    }
}
