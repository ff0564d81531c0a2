// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! NodePath navigation and mutation outside of a traversal.

use rxtree_ast::{
    generate, parse, Ast, Node, NodeId, NodeKind, NodePath, PathError, PathId, TraversalContext,
};

/// Parse `pattern` and return the path of its body alternative.
fn body_path(ast: &mut Ast, cx: &mut TraversalContext) -> PathId {
    let mut root = NodePath::root(ast, cx).unwrap();
    let body = root.get_child(0).unwrap();
    body.id()
}

fn body_id(ast: &Ast) -> NodeId {
    ast.node(ast.root().unwrap()).scalar("body").flatten().unwrap()
}

/// Ten chars, with a frame over the body collection at `cursor`.
fn with_cursor(cursor: isize) -> (Ast, TraversalContext, PathId) {
    let mut ast = parse("/abcdefghij/").unwrap();
    let mut cx = TraversalContext::new();
    let body = body_path(&mut ast, &mut cx);
    cx.push_frame(body_id(&ast), "expressions");
    cx.update_traversing_index(cursor);
    (ast, cx, body)
}

mod identity {
    use super::*;

    #[test]
    fn same_node_same_path() {
        let mut ast = parse("/abc/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let first = path.get_child(1).unwrap().id();
        let second = path.get_child(1).unwrap().id();
        assert_eq!(first, second);

        let next = path.get_child(0).unwrap().get_next_sibling().unwrap().id();
        assert_eq!(next, first);
    }

    #[test]
    fn registry_lookup_matches_navigation() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let b = ast.node(body_id(&ast)).child_ids()[1];
        let via_nav = NodePath::new(&mut ast, &mut cx, body)
            .get_child(1)
            .unwrap()
            .id();
        assert_eq!(cx.get_for_node(b, None, None, None), Some(via_nav));
        assert_eq!(cx.path_for_node(b), Some(via_nav));
    }
}

mod cursor {
    use super::*;

    #[test]
    fn insert_before_cursor_increments() {
        let (mut ast, mut cx, body) = with_cursor(5);
        NodePath::new(&mut ast, &mut cx, body)
            .insert_child_at(Node::char("x"), 3)
            .unwrap();
        assert_eq!(cx.get_traversing_index(), Some(6));
    }

    #[test]
    fn insert_at_cursor_increments() {
        let (mut ast, mut cx, body) = with_cursor(5);
        NodePath::new(&mut ast, &mut cx, body)
            .insert_child_at(Node::char("x"), 5)
            .unwrap();
        assert_eq!(cx.get_traversing_index(), Some(6));
    }

    #[test]
    fn insert_after_cursor_leaves_it() {
        let (mut ast, mut cx, body) = with_cursor(5);
        NodePath::new(&mut ast, &mut cx, body)
            .insert_child_at(Node::char("x"), 7)
            .unwrap();
        assert_eq!(cx.get_traversing_index(), Some(5));
    }

    #[test]
    fn remove_before_cursor_decrements() {
        let (mut ast, mut cx, body) = with_cursor(5);
        NodePath::new(&mut ast, &mut cx, body)
            .get_child(2)
            .unwrap()
            .remove();
        assert_eq!(cx.get_traversing_index(), Some(4));
    }

    #[test]
    fn remove_after_cursor_leaves_it() {
        let (mut ast, mut cx, body) = with_cursor(5);
        NodePath::new(&mut ast, &mut cx, body)
            .get_child(9)
            .unwrap()
            .remove();
        assert_eq!(cx.get_traversing_index(), Some(5));
        assert_eq!(generate(&ast), "/abcdefghi/");
    }

    #[test]
    fn edits_to_other_collections_leave_it() {
        let mut ast = parse("/ab[cd]/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        cx.push_frame(body_id(&ast), "expressions");
        cx.update_traversing_index(2);

        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut class = path.get_child(2).unwrap();
        class.insert_child_at(Node::char("x"), 0).unwrap();
        class.get_child(2).unwrap().remove();
        assert_eq!(cx.get_traversing_index(), Some(2));
        assert_eq!(generate(&ast), "/ab[xc]/");
    }

    #[test]
    fn no_frame_no_adjustment() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        NodePath::new(&mut ast, &mut cx, body)
            .insert_child_at(Node::char("x"), 0)
            .unwrap();
        assert_eq!(cx.get_traversing_index(), None);
        assert_eq!(generate(&ast), "/xab/");
    }
}

mod reindex {
    use super::*;

    fn assert_indices_match(ast: &Ast, cx: &TraversalContext) {
        for (position, child) in ast.node(body_id(ast)).child_ids().into_iter().enumerate() {
            let path = cx.path_for_node(child).unwrap();
            assert_eq!(cx.record(path).unwrap().index(), Some(position));
        }
    }

    #[test]
    fn indices_follow_inserts_and_removes() {
        let mut ast = parse("/abcd/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        {
            let mut path = NodePath::new(&mut ast, &mut cx, body);
            path.insert_child_at(Node::char("x"), 0).unwrap();
            path.append_child(Node::char("y")).unwrap();
            path.get_child(2).unwrap().remove();
            path.insert_child_at(Node::char("z"), 99).unwrap();
            path.get_child(0).unwrap().remove();
        }
        assert_eq!(generate(&ast), "/acdyz/");
        assert_indices_match(&ast, &cx);
    }

    #[test]
    fn insert_returns_path_at_clamped_index() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let inserted = NodePath::new(&mut ast, &mut cx, body)
            .insert_child_at(Node::char("x"), 10)
            .unwrap();
        let record = cx.record(inserted).unwrap();
        assert_eq!(record.index(), Some(2));
        assert_eq!(record.property(), Some("expressions"));
        assert_eq!(record.parent(), Some(body));
    }
}

mod remove {
    use super::*;

    #[test]
    fn remove_is_idempotent() {
        let mut ast = parse("/abc/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let b = path.get_child(1).unwrap().id();
        let mut b = path.at(b);
        b.remove();
        b.remove();
        assert!(b.is_removed());
        assert_eq!(b.index(), None);
        assert_eq!(b.property(), None);
        assert_eq!(generate(&ast), "/ac/");
    }

    #[test]
    fn removed_path_rejects_edits() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut a = path.get_child(0).unwrap();
        a.remove();
        assert_eq!(a.replace(Node::char("z")), Err(PathError::Removed));
        assert_eq!(a.update(|_| {}), Err(PathError::Removed));
        assert_eq!(a.get_child(0).map(|child| child.id()), None);
        assert!(a.json_encode().is_null());
    }

    #[test]
    fn scalar_slot_is_cleared() {
        let mut ast = parse("/(?:a)/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut group = path.get_child(0).unwrap();
        let mut inner = group.get_child(0).unwrap();
        inner.remove();
        assert!(inner.is_removed());
        assert_eq!(generate(&ast), "/(?:)/");
    }

    #[test]
    fn root_remove_only_marks_absent() {
        let mut ast = parse("/a/").unwrap();
        let root = ast.root();
        let mut cx = TraversalContext::new();
        let mut path = NodePath::root(&mut ast, &mut cx).unwrap();
        path.remove();
        assert!(path.is_removed());
        assert_eq!(ast.root(), root);
        assert_eq!(generate(&ast), "/a/");
    }

    #[test]
    fn reinserted_node_gets_fresh_path() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let (old, node) = {
            let mut b = path.get_child(1).unwrap();
            let node = b.node_id().unwrap();
            b.remove();
            (b.id(), node)
        };
        let new = path.insert_child_at(node, 0).unwrap();
        assert_ne!(old, new);
        assert!(!path.at(new).is_removed());
        assert!(path.at(old).is_removed());
        assert_eq!(generate(&ast), "/ba/");
    }
}

mod replace {
    use super::*;

    #[test]
    fn collection_slot_preserved() {
        let mut ast = parse("/abc/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut b = path.get_child(1).unwrap();
        let id = b.id();
        assert_eq!(b.replace(Node::char("z")).unwrap(), id);
        assert_eq!(b.index(), Some(1));
        assert_eq!(b.property(), Some("expressions"));
        let new = b.node_id().unwrap();
        assert_eq!(cx.path_for_node(new), Some(id));
        assert_eq!(generate(&ast), "/azc/");
    }

    #[test]
    fn scalar_slot_preserved() {
        let mut ast = parse("/(?:a)/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut group = path.get_child(0).unwrap();
        let mut inner = group.get_child(0).unwrap();
        inner.replace(Node::char("q")).unwrap();
        assert_eq!(inner.property(), Some("expression"));
        assert_eq!(inner.index(), None);
        assert_eq!(generate(&ast), "/(?:q)/");
    }

    #[test]
    fn root_replace_reroots() {
        let mut ast = parse("/a/").unwrap();
        let mut cx = TraversalContext::new();
        let replacement = {
            let body = ast.alloc(Node::alternative(vec![]));
            ast.alloc(Node::with_child(
                NodeKind::RegExp {
                    flags: "i".to_string(),
                },
                Some(body),
            ))
        };
        NodePath::root(&mut ast, &mut cx)
            .unwrap()
            .replace(replacement)
            .unwrap();
        assert_eq!(ast.root(), Some(replacement));
        assert_eq!(generate(&ast), "//i");
    }

    #[test]
    fn moved_node_retires_its_old_path() {
        let mut ast = parse("/(?:a)b/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut group = path.get_child(0).unwrap();
        let group_id = group.id();
        let (inner_path, inner) = {
            let inner = group.get_child(0).unwrap();
            (inner.id(), inner.node_id().unwrap())
        };
        assert_eq!(group.replace(inner).unwrap(), group_id);
        assert!(path.at(inner_path).is_removed());
        assert_eq!(path.context().path_for_node(inner), Some(group_id));
        assert_eq!(generate(&ast), "/ab/");
    }
}

mod update {
    use super::*;

    #[test]
    fn data_fields_change_in_place() {
        let mut ast = parse("/a/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut a = path.get_child(0).unwrap();
        a.update(|kind| {
            if let NodeKind::Char { value, .. } = kind {
                *value = "b".to_string();
            }
        })
        .unwrap();
        assert_eq!(generate(&ast), "/b/");
    }

    #[test]
    fn shape_change_is_rejected_and_reverted() {
        let mut ast = parse("/a/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut a = path.get_child(0).unwrap();
        let err = a.update(|kind| *kind = NodeKind::Alternative).unwrap_err();
        assert_eq!(
            err,
            PathError::ShapeMismatch {
                node_type: "Char",
                attempted: "Alternative"
            }
        );
        assert_eq!(a.kind(), Some(&NodeKind::simple_char("a")));
    }
}

mod structural {
    use super::*;

    #[test]
    fn insert_into_leaf_fails() {
        let mut ast = parse("/a/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let before = ast.len();
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let err = path
            .get_child(0)
            .unwrap()
            .insert_child_at(Node::char("x"), 0)
            .unwrap_err();
        assert_eq!(
            err,
            PathError::StructuralMutation {
                node_type: "Char",
                property: "expressions".to_string()
            }
        );
        assert_eq!(ast.len(), before);
    }

    #[test]
    fn disjunction_uses_named_collection() {
        let mut ast = parse("/a|b/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        assert!(matches!(
            path.insert_child_at(Node::char("x"), 0),
            Err(PathError::StructuralMutation { .. })
        ));
        let c = path.alloc(Node::char("c"));
        let alternative = path.alloc(Node::alternative(vec![c]));
        path.insert_child_at_in(alternative, 1, "alternatives").unwrap();
        assert_eq!(generate(&ast), "/a|c|b/");
    }

    #[test]
    fn set_child_overwrites_and_bounds_checks() {
        let mut ast = parse("/ab(?:c)/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let old = path.get_child(0).unwrap().id();

        path.set_child(Node::char("x"), Some(0), None).unwrap();
        assert!(path.at(old).is_removed());
        assert_eq!(
            path.set_child(Node::char("y"), Some(7), None),
            Err(PathError::IndexOutOfBounds {
                property: "expressions".to_string(),
                index: 7,
                len: 3
            })
        );
        path.set_child(Node::char("y"), None, None).unwrap();

        let mut group = path.get_child(2).unwrap();
        let inner = group
            .set_child(Node::char("z"), None, Some("expression"))
            .unwrap();
        assert_eq!(group.at(inner).property(), Some("expression"));
        assert!(matches!(
            group.set_child(Node::char("w"), None, Some("body")),
            Err(PathError::StructuralMutation { .. })
        ));
        assert_eq!(generate(&ast), "/xb(?:z)y/");
    }

    #[test]
    fn ids_outside_the_arena_are_rejected() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let len = ast.len();
        let stray = NodeId::new(999);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let expected = Err(PathError::UnknownNode { node: stray, len });
        assert_eq!(path.insert_child_at(stray, 0), expected);
        assert_eq!(path.set_child(stray, Some(0), None), expected);
        assert_eq!(path.get_child(1).unwrap().replace(stray), expected);

        assert_eq!(generate(&ast), "/ab/");
        let mut count = 0;
        rxtree_ast::traverse(&mut ast, &mut CountNodes(&mut count)).unwrap();
        assert_eq!(count, 4);
    }

    struct CountNodes<'a>(&'a mut usize);

    impl rxtree_ast::Visitor for CountNodes<'_> {
        fn visit_node(
            &mut self,
            _path: &mut NodePath<'_>,
        ) -> rxtree_ast::PathResult<rxtree_ast::VisitResult> {
            *self.0 += 1;
            Ok(rxtree_ast::VisitResult::Continue)
        }
    }
}

mod navigation {
    use super::*;

    #[test]
    fn boundaries_are_absent() {
        let mut ast = parse("/a(?:b)/").unwrap();
        let mut cx = TraversalContext::new();
        let mut root = NodePath::root(&mut ast, &mut cx).unwrap();
        assert!(root.get_parent().is_none());
        assert!(root.get_next_sibling().is_none());
        assert!(root.get_child(1).is_none());

        let mut body = root.get_child(0).unwrap();
        assert!(body.get_previous_sibling().is_none());
        let mut first = body.get_child(0).unwrap();
        assert!(first.get_previous_sibling().is_none());
        assert!(first.get_child(0).is_none());
        let mut last = first.get_next_sibling().unwrap();
        assert!(last.get_next_sibling().is_none());
        let mut inner = last.get_child(0).unwrap();
        assert!(inner.get_next_sibling().is_none());
        assert_eq!(inner.index(), None);
        assert!(body.get_child(2).is_none());
    }

    #[test]
    fn parent_linkage() {
        let mut ast = parse("/ab/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let body_node = body_id(&ast);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let mut b = path.get_child(1).unwrap();
        assert_eq!(b.parent(), Some(body_node));
        assert_eq!(b.parent_path(), Some(body));
        assert_eq!(b.get_parent().unwrap().id(), body);
    }
}

mod encoding {
    use super::*;

    #[test]
    fn json_and_source() {
        let mut ast = parse("/aba/").unwrap();
        let mut cx = TraversalContext::new();
        let body = body_path(&mut ast, &mut cx);
        let mut path = NodePath::new(&mut ast, &mut cx, body);
        let last = path.get_child(2).unwrap().id();
        let middle = path.get_child(1).unwrap().id();
        let first = path.get_child(0).unwrap();
        assert!(first.has_equal_source(last));
        assert!(!first.has_equal_source(middle));
        assert_eq!(first.source().as_deref(), Some("a"));

        let json = path.json_encode();
        assert_eq!(json["type"], "Alternative");
        assert_eq!(json["expressions"][1]["value"], "b");
    }
}
