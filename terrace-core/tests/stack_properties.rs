//! Invariant tests for stack computation over generated fact graphs.
//!
//! Run with: `cargo test -p terrace-core --test stack_properties`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrace_core::corpus::{Fact, FactContext, FactRef};
use terrace_core::testing::{assert_context_pure, assert_counts_consistent, assert_partition};
use terrace_core::{compute_stacks, FactStack, RelationSource, StackBuilder};

/// Generate a fact list with random relations, dangling references and stray
/// cross-context links.
fn random_facts(rng: &mut StdRng, count: usize) -> Vec<Fact> {
    let mut facts: Vec<Fact> = (0..count)
        .map(|i| {
            let context = FactContext::ALL[rng.gen_range(0..3)];
            Fact::new(format!("f{i}"), context)
        })
        .collect();

    let relations = rng.gen_range(0..count * 2 + 1);
    for _ in 0..relations {
        let a = rng.gen_range(0..count);
        let b = rng.gen_range(0..count);
        let target = facts[b].to_ref();
        match rng.gen_range(0..4) {
            0 => facts[a].linked_facts.push(target),
            1 => facts[a].supports.push(target),
            2 => facts[a].supported_by.push(target),
            _ => facts[a]
                .linked_facts
                .push(FactRef::new(format!("ghost{b}"), FactContext::Knowledge)),
        }
    }

    facts
}

fn summaries(stacks: &[FactStack]) -> Vec<terrace_core::StackSummary> {
    stacks.iter().map(FactStack::summary).collect()
}

#[test]
fn test_invariants_hold_for_generated_graphs() {
    let mut rng = StdRng::seed_from_u64(0x7e55ace);

    for round in 0..200 {
        let count = rng.gen_range(0..40);
        let facts = random_facts(&mut rng, count);

        for source in RelationSource::ALL {
            let stacks = StackBuilder::with_source(source).compute_stacks(&facts);

            assert_partition(&facts, &stacks);
            assert_context_pure(&stacks);
            assert_counts_consistent(&stacks);
            assert!(stacks.len() <= facts.len(), "round {round}");
        }
    }
}

#[test]
fn test_idempotent_on_same_input() {
    let mut rng = StdRng::seed_from_u64(42);
    let facts = random_facts(&mut rng, 30);
    let builder = StackBuilder::with_source(RelationSource::Combined);

    assert_eq!(
        builder.compute_stacks(&facts),
        builder.compute_stacks(&facts)
    );
}

#[test]
fn test_primaries_follow_input_order() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let facts = random_facts(&mut rng, 25);
        let stacks = StackBuilder::with_source(RelationSource::Combined).compute_stacks(&facts);

        let position = |id: &terrace_core::FactId| facts.iter().position(|f| &f.id == id);
        let primaries: Vec<usize> = stacks
            .iter()
            .filter_map(|s| position(&s.primary().id))
            .collect();
        assert!(primaries.windows(2).all(|w| w[0] < w[1]));

        // An earlier unclaimed fact would have seeded its own stack.
        for stack in &stacks {
            for member in stack.related() {
                assert!(position(&member.id) > position(&stack.primary().id));
            }
        }
    }
}

#[test]
fn test_related_count_bounded_by_references() {
    let mut rng = StdRng::seed_from_u64(99);
    let facts = random_facts(&mut rng, 40);

    for stack in compute_stacks(&facts) {
        let primary = stack.primary();
        let raw = primary.linked_facts.len() + primary.supports.len() + primary.supported_by.len();
        assert!(stack.related_count() <= raw);
    }
}

#[test]
fn test_missing_relationship_arrays_are_empty() {
    let json = r#"[
        {"id": "a", "context": "knowledge"},
        {"id": "b", "context": "knowledge", "supports": [{"id": "a"}]}
    ]"#;
    let facts: Vec<Fact> = serde_json::from_str(json).unwrap();

    let linked = StackBuilder::with_source(RelationSource::Linked).compute_stacks(&facts);
    assert_eq!(linked.len(), 2);

    let pair = StackBuilder::with_source(RelationSource::SupportPair).compute_stacks(&facts);
    assert_eq!(
        summaries(&pair),
        vec![
            terrace_core::StackSummary::of(&["a"]),
            terrace_core::StackSummary::of(&["b"]),
        ]
    );
}
