#[cfg(test)]
mod render_tests {
    use crate::{
        ContentHost, DefaultOptions, DescriptorPatch, LevelOption, MemoryTree, Node, NodeId, NodeSource,
        RenderCallback, RenderContext, Selector, StateFlag, TreeRenderer,
    };
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    // P1 has no children, P2 has a single child C1
    fn scenario_tree() -> MemoryTree {
        MemoryTree::from_json(
            r#"{ "root": { "id": 1, "url": "/", "title": "Home", "children": [
                { "id": 2, "url": "/p1/", "title": "P1" },
                { "id": 3, "url": "/p2/", "title": "P2", "children": [
                    { "id": 4, "url": "/p2/c1/", "title": "C1" }
                ] }
            ] } }"#,
        )
        .unwrap()
    }

    fn site_tree(active: Option<u64>) -> MemoryTree {
        let mut tree = MemoryTree::from_json(
            r#"{ "root": { "id": 1, "url": "/", "title": "Home", "children": [
                { "id": 2, "url": "/about/", "title": "About", "children": [
                    { "id": 6, "url": "/about/team/", "title": "Team" }
                ] },
                { "id": 3, "url": "/blog/", "title": "Blog", "children": [
                    { "id": 4, "url": "/blog/post/", "title": "Post", "children": [
                        { "id": 5, "url": "/blog/post/comments/", "title": "Comments" }
                    ] }
                ] },
                { "id": 7, "url": "/archive/", "title": "Archive", "attributes": { "hidden": "1" } }
            ] } }"#,
        )
        .unwrap();
        if let Some(id) = active {
            tree.set_active(NodeId(id)).unwrap();
        }
        tree
    }

    fn root_of(tree: &MemoryTree) -> NodeSource {
        NodeSource::Single(tree.root().clone())
    }

    fn set_of(tree: &MemoryTree, ids: &[u64]) -> NodeSource {
        NodeSource::Set(ids.iter().map(|id| tree.get(NodeId(*id)).unwrap().clone()).collect())
    }

    fn li(url: &str, title: &str, subtree: &str) -> String {
        format!("<li><a href='{}'>{}</a>{}</li>", url, title, subtree)
    }

    fn ul(items: &[String]) -> String {
        format!("<ul>{}</ul>", items.concat())
    }

    #[test]
    fn test_full_tree_with_defaults() {
        let tree = scenario_tree();
        let renderer = TreeRenderer::new(&tree);

        let output = renderer.render(&root_of(&tree), &[]);
        assert_eq!(
            output.as_deref(),
            Some("<ul><li><a href='/p1/'>P1</a></li><li><a href='/p2/'>P2</a><ul><li><a href='/p2/c1/'>C1</a></li></ul></li></ul>")
        );
    }

    #[test]
    fn test_depth_limit_stops_recursion() {
        let tree = scenario_tree();
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_depth_limit(Some(1));

        let output = renderer.render(&root_of(&tree), &[]).unwrap();
        assert_eq!(output, ul(&[li("/p1/", "P1", ""), li("/p2/", "P2", "")]));
    }

    #[test]
    fn test_collapsed_expands_only_active_branch() {
        let mut tree = scenario_tree();
        tree.set_active(NodeId(4)).unwrap();
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_collapsed(true);

        let output = renderer.render(&root_of(&tree), &[]).unwrap();
        assert_eq!(
            output,
            ul(&[li("/p1/", "P1", ""), li("/p2/", "P2", &ul(&[li("/p2/c1/", "C1", "")]))])
        );
    }

    #[test]
    fn test_collapsed_leaves_other_branches_closed() {
        let tree = site_tree(Some(3));
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_collapsed(true);

        // Blog is current so its children show; Post is neither parent nor current
        let output = renderer.render(&root_of(&tree), &[]).unwrap();
        assert_eq!(
            output,
            ul(&[
                li("/about/", "About", ""),
                li("/blog/", "Blog", &ul(&[li("/blog/post/", "Post", "")])),
                li("/archive/", "Archive", ""),
            ])
        );
    }

    #[test]
    fn test_root_set_is_first_level() {
        let tree = site_tree(Some(4));
        let renderer = TreeRenderer::new(&tree);

        let output = renderer.render(&set_of(&tree, &[2, 3]), &[]).unwrap();
        assert_eq!(
            output,
            ul(&[
                li("/about/", "About", &ul(&[li("/about/team/", "Team", "")])),
                li(
                    "/blog/",
                    "Blog",
                    &ul(&[li("/blog/post/", "Post", &ul(&[li("/blog/post/comments/", "Comments", "")]))])
                ),
            ])
        );
    }

    #[test]
    fn test_root_set_collapsed_uses_ancestry() {
        let tree = site_tree(Some(4));
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_collapsed(true);

        let output = renderer.render(&set_of(&tree, &[2, 3]), &[]).unwrap();
        assert_eq!(
            output,
            ul(&[
                li("/about/", "About", ""),
                li(
                    "/blog/",
                    "Blog",
                    &ul(&[li("/blog/post/", "Post", &ul(&[li("/blog/post/comments/", "Comments", "")]))])
                ),
            ])
        );
    }

    #[test]
    fn test_root_set_home_is_not_expanded_as_parent() {
        let tree = site_tree(Some(4));
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_collapsed(true);

        let output = renderer.render(&set_of(&tree, &[1]), &[]).unwrap();
        assert_eq!(output, ul(&[li("/", "Home", "")]));
    }

    #[test]
    fn test_root_set_members_carry_child_state() {
        let tree = site_tree(Some(4));
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_depth_limit(Some(2));
        renderer.config_mut().set_default_states(true);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let levels = vec![Some(LevelOption::new().callback(move |node: &Node, context: &RenderContext| {
            recorder.lock().unwrap().push((node.id.0, context.states.clone()));
            DescriptorPatch::new()
        }))];

        let output = renderer.render(&set_of(&tree, &[1, 2, 3]), &levels).unwrap();
        assert!(output.contains(&li("/about/", "About", &ul(&[li("/about/team/", "Team", "")]))));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (1, "first".to_string()),
                (2, "has_children".to_string()),
                (3, "parent has_children last".to_string()),
            ]
        );
    }

    #[test]
    fn test_nothing_to_render() {
        let leaf = MemoryTree::from_json(r#"{ "root": { "id": 1, "title": "Alone" } }"#).unwrap();
        assert!(TreeRenderer::new(&leaf).render(&root_of(&leaf), &[]).is_none());

        let tree = scenario_tree();
        let mut renderer = TreeRenderer::new(&tree);
        assert!(renderer.render(&NodeSource::Set(Vec::new()), &[]).is_none());

        renderer.config_mut().set_depth_limit(Some(0));
        assert!(renderer.render(&root_of(&tree), &[]).is_none());

        renderer.config_mut().set_depth_limit(None);
        renderer.config_mut().set_default_options(DefaultOptions {
            filter: Some(Selector::parse("title=Nobody").unwrap()),
            callback: None,
        });
        assert!(renderer.render(&root_of(&tree), &[]).is_none());
    }

    #[test]
    fn test_group_bounded_by_invalid_node_is_empty() {
        let tree = scenario_tree();
        let renderer = TreeRenderer::new(&tree);
        let source = NodeSource::Set(vec![tree.get(NodeId(2)).unwrap().clone(), Node::new(0, "", "")]);
        assert!(renderer.render(&source, &[]).is_none());
    }

    #[test]
    fn test_level_callback_overrides_only_its_fields() {
        let tree = scenario_tree();
        let renderer = TreeRenderer::new(&tree);
        let levels = vec![Some(LevelOption::new().callback(|node: &Node, _: &RenderContext| {
            DescriptorPatch::new().item(format!("<span>{}</span>", node.title))
        }))];

        let output = renderer.render(&root_of(&tree), &levels).unwrap();
        assert_eq!(
            output,
            "<ul><li><span>P1</span></li><li><span>P2</span><ul><li><a href='/p2/c1/'>C1</a></li></ul></li></ul>"
        );
    }

    #[test]
    fn test_level_filter_applies_to_its_depth() {
        let tree = site_tree(None);
        let renderer = TreeRenderer::new(&tree);
        let levels = vec![None, Some(LevelOption::new().filter(Selector::parse("title!=Post").unwrap()))];

        let output = renderer.render(&root_of(&tree), &levels).unwrap();
        assert_eq!(
            output,
            ul(&[
                li("/about/", "About", &ul(&[li("/about/team/", "Team", "")])),
                li("/blog/", "Blog", ""),
                li("/archive/", "Archive", ""),
            ])
        );
    }

    #[test]
    fn test_default_filter_applies_everywhere() {
        let tree = site_tree(None);
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_default_options(DefaultOptions {
            filter: Some(Selector::parse("hidden!=1").unwrap()),
            callback: None,
        });
        renderer.config_mut().set_depth_limit(Some(1));

        let output = renderer.render(&root_of(&tree), &[]).unwrap();
        assert_eq!(output, ul(&[li("/about/", "About", ""), li("/blog/", "Blog", "")]));
    }

    #[test]
    fn test_state_labels_reach_callbacks() {
        let tree = {
            let mut tree = scenario_tree();
            tree.set_active(NodeId(4)).unwrap();
            tree
        };
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_depth_limit(Some(2));
        renderer.config_mut().set_default_states(true);

        let with_class = || {
            LevelOption::new().callback(|_: &Node, context: &RenderContext| {
                DescriptorPatch {
                    list_open: Some(format!("<li class='{}'>", context.states)),
                    ..Default::default()
                }
            })
        };
        let levels = vec![Some(with_class()), Some(with_class())];

        let output = renderer.render(&root_of(&tree), &levels).unwrap();
        assert_eq!(
            output,
            "<ul><li class='first'><a href='/p1/'>P1</a></li>\
             <li class='parent has_children last'><a href='/p2/'>P2</a>\
             <ul><li class='current first last'><a href='/p2/c1/'>C1</a></li></ul></li></ul>"
        );
    }

    #[test]
    fn test_custom_state_labels() {
        let mut tree = scenario_tree();
        tree.set_active(NodeId(2)).unwrap();
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_depth_limit(Some(1));
        renderer
            .config_mut()
            .set_default_states(BTreeMap::from([(StateFlag::Current, "active".to_string())]));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let levels = vec![Some(LevelOption::new().callback(move |node: &Node, context: &RenderContext| {
            recorder.lock().unwrap().push((node.title.clone(), context.states.clone()));
            DescriptorPatch::new()
        }))];

        renderer.render(&root_of(&tree), &levels).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("P1".to_string(), "active first".to_string()),
                ("P2".to_string(), "last".to_string()),
            ]
        );
    }

    #[test]
    fn test_states_empty_when_labels_disabled() {
        let tree = scenario_tree();
        let renderer = TreeRenderer::new(&tree);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let levels = vec![Some(LevelOption::new().callback(move |_: &Node, context: &RenderContext| {
            recorder.lock().unwrap().push(context.states.clone());
            DescriptorPatch::new()
        }))];

        renderer.render(&root_of(&tree), &levels).unwrap();
        assert!(seen.lock().unwrap().iter().all(String::is_empty));
    }

    #[test]
    fn test_wrapper_comes_from_first_and_last_descriptor() {
        let tree = scenario_tree();
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_depth_limit(Some(1));
        let levels = vec![Some(LevelOption::new().callback(|node: &Node, _: &RenderContext| {
            let tag = node.title.to_lowercase();
            DescriptorPatch::new().wrapper(format!("<ol id='{}'>", tag), format!("</ol><!-- {} -->", tag))
        }))];

        let output = renderer.render(&root_of(&tree), &levels).unwrap();
        assert!(output.starts_with("<ol id='p1'>"));
        assert!(output.ends_with("</ol><!-- p2 -->"));
    }

    #[test]
    fn test_empty_wrapper_falls_back_to_list() {
        let tree = scenario_tree();
        let renderer = TreeRenderer::new(&tree);
        let no_wrapper = || {
            LevelOption::new().callback(|_: &Node, _: &RenderContext| DescriptorPatch::new().wrapper("", ""))
        };
        let levels = vec![Some(no_wrapper()), Some(no_wrapper())];

        let output = renderer.render(&root_of(&tree), &levels).unwrap();
        assert_eq!(
            output,
            ul(&[li("/p1/", "P1", ""), li("/p2/", "P2", &ul(&[li("/p2/c1/", "C1", "")]))])
        );
    }

    #[test]
    fn test_default_callback_runs_once_per_node() {
        let tree = scenario_tree();
        let mut renderer = TreeRenderer::new(&tree);
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&calls);
        let callback = move |node: &Node, context: &RenderContext| {
            recorder.lock().unwrap().push((node.id.0, context.depth));
            DescriptorPatch::new().item(node.title.clone())
        };
        renderer.config_mut().set_default_options(DefaultOptions {
            filter: None,
            callback: Some(Arc::new(callback) as Arc<dyn RenderCallback>),
        });

        let output = renderer.render(&root_of(&tree), &[]).unwrap();
        assert_eq!(output, "<ul>P1P2<ul>C1</ul></ul>");
        assert_eq!(*calls.lock().unwrap(), vec![(2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn test_debug_mode_appends_comments() {
        let mut tree = scenario_tree();
        tree.set_debug(true);
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_depth_limit(Some(1));

        let output = renderer.render(&root_of(&tree), &[]).unwrap();
        assert_eq!(
            output,
            "<ul><li><a href='/p1/'>P1</a></li><!-- [aligator] depth: 1 filter: '' -->\
             <li><a href='/p2/'>P2</a></li><!-- [aligator] depth: 1 filter: '' --></ul>"
        );
    }

    #[test]
    fn test_renders_through_trait_object() {
        let tree = scenario_tree();
        let host: &dyn ContentHost = &tree;
        let mut renderer = TreeRenderer::new(host);
        renderer.config_mut().set_depth_limit(Some(1));

        assert_eq!(
            renderer.render(&root_of(&tree), &[]),
            Some(ul(&[li("/p1/", "P1", ""), li("/p2/", "P2", "")]))
        );
    }

    #[test]
    fn test_concurrent_renders_share_config() {
        let tree = site_tree(Some(4));
        let mut renderer = TreeRenderer::new(&tree);
        renderer.config_mut().set_collapsed(true);
        let root = root_of(&tree);
        let expected = renderer.render(&root, &[]);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| renderer.render(&root, &[]))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
