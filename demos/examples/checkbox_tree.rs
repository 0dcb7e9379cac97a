// Copyright 2025 the Bracken Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end drive of the checkable tree: build, select, filter, sort.
//!
//! The engine never sees display text; it works on [`DisplaySymbol`] handles
//! while this host keeps the symbol-to-text table.
//!
//! Run:
//! - `cargo run -p bracken_examples --example checkbox_tree`

use std::collections::HashMap;

use bracken_tree::{CheckState, CheckUpdate, DisplaySymbol, Node, Tree, TreeConfig};

/// Host-side label table mapping engine symbols to text.
struct Labels {
    next: u64,
    names: HashMap<DisplaySymbol, String>,
}

impl Labels {
    fn new() -> Self {
        Self {
            next: 0,
            names: HashMap::new(),
        }
    }

    fn intern(&mut self, name: &str) -> DisplaySymbol {
        self.next += 1;
        let sym = DisplaySymbol(self.next);
        self.names.insert(sym, name.to_owned());
        sym
    }

    fn name(&self, sym: DisplaySymbol) -> &str {
        self.names.get(&sym).map_or("?", String::as_str)
    }
}

fn render(heading: &str, tree: &Tree<&'static str>, labels: &Labels) {
    println!("--- {heading}");
    if tree.config().show_select_all {
        let header = if tree.all_selected() { "[x]" } else { "[ ]" };
        println!("{header} (all)");
    }
    for row in tree.visible_rows() {
        let indent = "  ".repeat(row.depth as usize);
        let arrow = match (row.has_children, row.expanded) {
            (true, true) => "v",
            (true, false) => ">",
            (false, _) => " ",
        };
        let marker = match tree.check_state(row.id).unwrap() {
            CheckState::Unchecked => "[ ]",
            CheckState::Checked => "[x]",
            CheckState::PartiallyChecked => "[~]",
        };
        println!(
            "{indent}{arrow} {marker} {}",
            labels.name(tree.label(row.id).unwrap())
        );
    }
    println!();
}

fn main() {
    let mut labels = Labels::new();

    let file = |labels: &mut Labels, name: &str, path: &'static str| Node {
        label: labels.intern(name),
        value: Some(path),
        ..Node::default()
    };

    let roots = vec![
        Node {
            label: labels.intern("src"),
            children: vec![
                file(&mut labels, "main.rs", "src/main.rs"),
                file(&mut labels, "lib.rs", "src/lib.rs"),
            ],
            ..Node::default()
        },
        Node {
            label: labels.intern("docs"),
            children: vec![
                file(&mut labels, "guide.md", "docs/guide.md"),
                file(&mut labels, "api.md", "docs/api.md"),
            ],
            ..Node::default()
        },
        file(&mut labels, "README.md", "README.md"),
    ];

    let mut tree = Tree::new(
        roots,
        TreeConfig {
            initial_expanded_levels: Some(0),
            show_select_all: true,
            show_expand_collapse_button: true,
        },
    );
    tree.set_selection_listener(|values: &[&&'static str]| {
        let paths: Vec<&str> = values.iter().map(|v| **v).collect();
        println!("selection changed: {paths:?}");
    });

    render("initial", &tree, &labels);

    // Tap the docs branch: the whole subtree selects.
    let docs = tree.roots()[1];
    tree.update_check(docs, CheckUpdate::Toggle);

    // Tap one source file: src becomes partially checked.
    let main_rs = tree.children_of(tree.roots()[0])[0];
    tree.update_check(main_rs, CheckUpdate::Set(true));
    render("after two taps", &tree, &labels);

    // Narrow the view to Rust sources. Ancestors of matches stay visible.
    tree.filter(|n| labels.name(n.label()).ends_with(".rs"));
    render("filtered to *.rs", &tree, &labels);

    tree.clear_filter();

    // Sort every sibling group by display name, then restore input order.
    tree.sort_by(|a, b| labels.name(a.label()).cmp(labels.name(b.label())));
    render("sorted by name", &tree, &labels);
    tree.restore_order();

    // The header affordance alternates on the recorded bulk direction.
    tree.toggle_all_expanded();
    render("all collapsed", &tree, &labels);

    tree.set_select_all(true);
    println!("all selected: {}", tree.all_selected());
}
