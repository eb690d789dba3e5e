use super::*;
use crate::node::ContentType;
use proptest::prelude::*;

const VOCAB: &[&str] = &[
    "spitfire",
    "prestwick",
    "clyde",
    "lancaster",
    "museum",
    "squadron",
    "highland",
    "ferry",
];

fn arb_node(id: &'static str) -> impl Strategy<Value = ContentNode> {
    (
        proptest::sample::subsequence(VOCAB.to_vec(), 0..VOCAB.len()),
        proptest::sample::subsequence(VOCAB.to_vec(), 0..4),
        proptest::sample::select(vec!["", "Aviation", "Scottish Aviation", "Maritime"]),
        proptest::bool::ANY,
    )
        .prop_map(move |(keywords, tags, category, is_book)| {
            let content_type = if is_book {
                ContentType::Book
            } else {
                ContentType::Article
            };
            ContentNode::new(id, content_type, format!("{id} title"))
                .with_keywords(keywords)
                .with_tags(tags)
                .with_category(category)
        })
}

proptest! {
    /// Scoring must be symmetric for every input pair.
    #[test]
    fn prop_relevance_symmetric(a in arb_node("a"), b in arb_node("b")) {
        let terms = vec!["spitfire".to_string(), "clyde".to_string()];
        let ab = relevance(&a, &b, &ScoreWeights::default(), &terms);
        let ba = relevance(&b, &a, &ScoreWeights::default(), &terms);
        prop_assert_eq!(ab.strength.to_bits(), ba.strength.to_bits());
        prop_assert_eq!(ab.matched_keywords, ba.matched_keywords);
        prop_assert_eq!(ab.relationship_type, ba.relationship_type);
    }

    /// Strength always lands in [0, 1].
    #[test]
    fn prop_strength_clamped(a in arb_node("a"), b in arb_node("b")) {
        let score = relevance(&a, &b, &ScoreWeights::default(), &[]);
        prop_assert!(score.strength >= 0.0);
        prop_assert!(score.strength <= 1.0);
    }

    /// Adding a keyword that matches the other node never lowers strength.
    #[test]
    fn prop_overlapping_evidence_monotone(a in arb_node("a"), b in arb_node("b")) {
        let before = relevance(&a, &b, &ScoreWeights::default(), &[]);

        // Evidence shared by both sides: present in b's keywords and matched
        // from a's candidate list.
        let mut a2 = a.clone();
        let mut b2 = b.clone();
        a2.keywords.insert(0, "beaufighter".to_string());
        b2.keywords.insert(0, "beaufighter".to_string());

        let after = relevance(&a2, &b2, &ScoreWeights::default(), &[]);
        prop_assert!(after.strength >= before.strength - 1e-6);
    }

    /// Matched-keyword list respects the display cap.
    #[test]
    fn prop_matched_keywords_capped(a in arb_node("a"), b in arb_node("b")) {
        let score = relevance(&a, &b, &ScoreWeights::default(), &[]);
        prop_assert!(score.matched_keywords.len() <= MAX_EDGE_KEYWORDS);
    }
}
