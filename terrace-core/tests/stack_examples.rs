//! Worked stacking examples over the sample corpus and hand-built graphs.

use terrace_core::corpus::{Fact, FactContext, FactId, FactRef};
use terrace_core::testing::{sample_store, FactGraph};
use terrace_core::{
    compute_stacks, FactStack, RelationSource, StackBuilder, StackConfig, StackSummary,
    StackView,
};

fn summaries(stacks: &[FactStack]) -> Vec<StackSummary> {
    stacks.iter().map(FactStack::summary).collect()
}

#[test]
fn test_supported_by_merge() {
    let b = Fact::new("b", FactContext::Knowledge);
    let a = Fact::new("a", FactContext::Knowledge).with_supported_by(&b);

    let stacks = compute_stacks(&[a, b]);
    assert_eq!(summaries(&stacks), vec![StackSummary::of(&["a", "b"])]);
    assert_eq!(stacks[0].related_count(), 1);
}

#[test]
fn test_ghost_link() {
    let mut a = Fact::new("a", FactContext::Knowledge);
    a.linked_facts.push(FactRef::new("ghost", FactContext::Knowledge));

    assert_eq!(
        summaries(&compute_stacks(&[a])),
        vec![StackSummary::of(&["a"])]
    );
}

#[test]
fn test_knowledge_and_builder_never_merge() {
    let b = Fact::new("b", FactContext::Builder);
    let a = Fact::new("a", FactContext::Knowledge).with_link(&b);

    let stacks = compute_stacks(&[a, b]);
    assert_eq!(stacks.len(), 2);
    assert!(stacks.iter().all(|s| s.related_count() == 0));
}

#[test]
fn test_builder_fact_skipped_by_knowledge_primary() {
    let facts = FactGraph::new()
        .fact("a", FactContext::Knowledge)
        .fact("c", FactContext::Builder)
        .fact("b", FactContext::Builder)
        .link("a", "b")
        .link("c", "b")
        .build();

    assert_eq!(
        summaries(&compute_stacks(&facts)),
        vec![StackSummary::of(&["a"]), StackSummary::of(&["c", "b"])]
    );
}

#[test]
fn test_sample_corpus_by_region() {
    let store = sample_store();
    let builder =
        StackBuilder::new(StackConfig::new().with_relation_source(RelationSource::Combined));
    let regions = builder.compute_regions(store.facts());

    let by_context: Vec<(FactContext, Vec<StackSummary>)> = regions
        .iter()
        .map(|r| (r.context, summaries(&r.stacks)))
        .collect();

    assert_eq!(
        by_context,
        vec![
            (FactContext::Global, vec![StackSummary::of(&["g-units"])]),
            (
                FactContext::Builder,
                vec![StackSummary::of(&["b-draft", "b-source"])]
            ),
            (
                FactContext::Knowledge,
                vec![
                    StackSummary::of(&["k-water", "k-pressure", "k-salt"]),
                    StackSummary::of(&["k-altitude"]),
                    StackSummary::of(&["k-ice"]),
                ]
            ),
        ]
    );
}

#[test]
fn test_mixed_input_keeps_stray_reference_out() {
    let store = sample_store();
    let stacks = compute_stacks(store.facts());

    let units = stacks
        .iter()
        .find(|s| s.primary().id == FactId::from("g-units"))
        .unwrap();
    assert!(units.is_single());
}

#[test]
fn test_chain_splits_into_pairs() {
    let facts = FactGraph::new()
        .fact("a", FactContext::Global)
        .fact("b", FactContext::Global)
        .fact("c", FactContext::Global)
        .fact("d", FactContext::Global)
        .link("a", "b")
        .link("b", "c")
        .link("c", "d")
        .build();

    assert_eq!(
        summaries(&compute_stacks(&facts)),
        vec![StackSummary::of(&["a", "b"]), StackSummary::of(&["c", "d"])]
    );
}

#[test]
fn test_view_over_recomputed_stacks() {
    let facts = FactGraph::new()
        .fact("a", FactContext::Knowledge)
        .fact("b", FactContext::Knowledge)
        .fact("c", FactContext::Knowledge)
        .link("a", "b")
        .build();
    let stacks = compute_stacks(&facts);

    let mut view = StackView::new();
    view.toggle(&FactId::from("a"));
    assert_eq!(view.layout(&stacks).iter().map(|d| d.rows()).sum::<usize>(), 3);

    // Reordering makes b the primary; a's expansion no longer applies.
    let reordered = vec![facts[1].clone(), facts[0].clone(), facts[2].clone()];
    let stacks = compute_stacks(&reordered);
    view.retain(&stacks);
    assert_eq!(view.expanded_count(), 0);
    assert_eq!(view.layout(&stacks).iter().map(|d| d.rows()).sum::<usize>(), 2);
}
