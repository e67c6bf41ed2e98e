//! Find/replace workflows over multi-level documents

use note_tree::{DocumentTree, NodeId};
use services_search::{Match, SearchEngine, SearchOptions, SearchScope, Selection};

/// Journal
///   Monday    "met Ann at noon"
///     Notes   "Ann said noon is fine"
///   Tuesday   "lunch at noon"
/// Archive     "noon noon"
fn journal() -> (DocumentTree, [NodeId; 5]) {
    let mut tree = DocumentTree::empty();
    let journal = tree.append_root("Journal", "");
    let monday = tree.append_child(journal, "Monday", "met Ann at noon").unwrap();
    let notes = tree.append_child(monday, "Notes", "Ann said noon is fine").unwrap();
    let tuesday = tree.append_child(journal, "Tuesday", "lunch at noon").unwrap();
    let archive = tree.append_root("Archive", "noon noon");
    tree.set_modified(false);
    (tree, [journal, monday, notes, tuesday, archive])
}

fn collect_cycle(
    engine: &mut SearchEngine,
    tree: &DocumentTree,
    query: &str,
    scope: SearchScope,
    selection: Selection,
) -> Vec<Match> {
    let mut seen = Vec::new();
    while let Some(hit) = engine
        .find_next(tree, query, scope, SearchOptions::new(), selection)
        .unwrap()
    {
        if seen.first() == Some(&hit) {
            break;
        }
        seen.push(hit);
    }
    seen
}

#[test]
fn test_all_nodes_cycle_visits_pre_order() {
    let (tree, [journal, monday, notes, tuesday, archive]) = journal();
    let mut engine = SearchEngine::new();

    let hits = collect_cycle(
        &mut engine,
        &tree,
        "noon",
        SearchScope::AllNodes,
        Selection::at(journal, 0),
    );
    assert_eq!(
        hits,
        vec![
            Match::new(monday, 11, 4),
            Match::new(notes, 9, 4),
            Match::new(tuesday, 9, 4),
            Match::new(archive, 0, 4),
            Match::new(archive, 5, 4),
        ]
    );
}

#[test]
fn test_subtree_scope_stays_inside_subtree() {
    let (tree, [_, monday, notes, _, _]) = journal();
    let mut engine = SearchEngine::new();

    let hits = collect_cycle(
        &mut engine,
        &tree,
        "noon",
        SearchScope::CurrentNodeAndSubtree,
        Selection::at(monday, 0),
    );
    let nodes: Vec<_> = hits.iter().map(|m| m.node).collect();
    assert_eq!(nodes, vec![monday, notes]);
}

#[test]
fn test_cycle_starting_mid_scope_wraps() {
    let (tree, [_, monday, notes, tuesday, archive]) = journal();
    let mut engine = SearchEngine::new();

    let hits = collect_cycle(
        &mut engine,
        &tree,
        "noon",
        SearchScope::AllNodes,
        Selection::at(tuesday, 0),
    );
    let nodes: Vec<_> = hits.iter().map(|m| m.node).collect();
    assert_eq!(nodes, vec![tuesday, archive, archive, monday, notes]);
}

#[test]
fn test_switching_scope_restarts() {
    let (tree, [_, monday, notes, _, _]) = journal();
    let mut engine = SearchEngine::new();
    let options = SearchOptions::new();

    let first = engine
        .find_next(&tree, "Ann", SearchScope::AllNodes, options, Selection::at(monday, 0))
        .unwrap();
    assert_eq!(first, Some(Match::new(monday, 4, 3)));

    let second = engine
        .find_next(&tree, "Ann", SearchScope::AllNodes, options, Selection::at(monday, 0))
        .unwrap();
    assert_eq!(second, Some(Match::new(notes, 0, 3)));

    let restarted = engine
        .find_next(&tree, "Ann", SearchScope::CurrentNode, options, Selection::at(monday, 0))
        .unwrap();
    assert_eq!(restarted, Some(Match::new(monday, 4, 3)));
}

#[test]
fn test_replace_next_walks_through_scope() {
    let (mut tree, [journal, monday, notes, tuesday, archive]) = journal();
    let mut engine = SearchEngine::new();
    let options = SearchOptions::new().whole_word(true);
    let selection = Selection::at(journal, 0);

    let mut replaced = 0;
    while engine
        .replace_next(&mut tree, "noon", "midday", SearchScope::AllNodes, options, selection)
        .unwrap()
    {
        replaced += 1;
        assert!(replaced <= 5, "replacement text was matched again");
    }

    assert_eq!(replaced, 5);
    assert_eq!(tree.content(monday).unwrap(), "met Ann at midday");
    assert_eq!(tree.content(notes).unwrap(), "Ann said midday is fine");
    assert_eq!(tree.content(tuesday).unwrap(), "lunch at midday");
    assert_eq!(tree.content(archive).unwrap(), "midday midday");
    assert!(tree.is_modified());
}

#[test]
fn test_replace_all_in_subtree_only() {
    let (mut tree, [_, monday, notes, tuesday, archive]) = journal();
    let mut engine = SearchEngine::new();

    let count = engine
        .replace_all(
            &mut tree,
            "NOON",
            "12:00",
            SearchScope::CurrentNodeAndSubtree,
            SearchOptions::new(),
            Selection::at(monday, 0),
        )
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(tree.content(monday).unwrap(), "met Ann at 12:00");
    assert_eq!(tree.content(notes).unwrap(), "Ann said 12:00 is fine");
    assert_eq!(tree.content(tuesday).unwrap(), "lunch at noon");
    assert_eq!(tree.content(archive).unwrap(), "noon noon");
}

#[test]
fn test_regex_replace_all_with_groups() {
    let mut tree = DocumentTree::empty();
    let node = tree.append_root("people", "Ann Lee, Bo Chan");
    let mut engine = SearchEngine::new();

    let count = engine
        .replace_all(
            &mut tree,
            r"(\w+) (\w+)",
            "$2 $1",
            SearchScope::AllNodes,
            SearchOptions::new().use_regex(true),
            Selection::none(),
        )
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(tree.content(node).unwrap(), "Lee Ann, Chan Bo");
}

#[test]
fn test_find_after_edit_resumes_from_recorded_offset() {
    let (mut tree, [_, monday, notes, _, _]) = journal();
    let mut engine = SearchEngine::new();
    let options = SearchOptions::new();
    let selection = Selection::at(monday, 0);

    engine
        .find_next(&tree, "noon", SearchScope::AllNodes, options, selection)
        .unwrap();
    tree.set_content(monday, "noon at noon, noon again").unwrap();

    // the scan resumes at offset 15, inside the last "noon" of the edited node
    let hit = engine
        .find_next(&tree, "noon", SearchScope::AllNodes, options, selection)
        .unwrap();
    assert_eq!(hit, Some(Match::new(notes, 9, 4)));
}
