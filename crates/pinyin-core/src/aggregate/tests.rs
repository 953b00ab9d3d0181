use proptest::prelude::*;

use super::*;

fn kp(key: &str, phrase: &str, weight: u64) -> KeyedPhrase {
    KeyedPhrase::new(key, phrase, weight)
}

#[test]
fn absorb_keeps_max_weight_per_phrase() {
    let agg: Aggregate = vec![
        kp("nihao", "你好", 100),
        kp("nihao", "你好", 50),
        kp("ninhao", "您好", 10),
    ]
    .into_iter()
    .collect();

    let nihao = agg.get("nihao").unwrap();
    assert_eq!(nihao.phrase_weight("你好"), Some(100));
    assert_eq!(nihao.best_weight(), 100);
    assert_eq!(nihao.phrase_count(), 1);

    let ninhao = agg.get("ninhao").unwrap();
    assert_eq!(ninhao.phrase_weight("您好"), Some(10));
    assert_eq!(ninhao.best_weight(), 10);
    assert_eq!(agg.len(), 2);
    assert_eq!(agg.pair_count(), 2);
}

#[test]
fn later_higher_weight_overwrites() {
    let mut agg = Aggregate::new();
    agg.absorb(kp("shi", "是的", 3));
    agg.absorb(kp("shi", "是的", 8));
    assert_eq!(agg.get("shi").unwrap().phrase_weight("是的"), Some(8));
}

#[test]
fn best_weight_spans_phrases() {
    let mut agg = Aggregate::new();
    agg.absorb(kp("shishi", "事实", 40));
    agg.absorb(kp("shishi", "实施", 90));
    agg.absorb(kp("shishi", "事实", 60));
    let key = agg.get("shishi").unwrap();
    assert_eq!(key.best_weight(), 90);
    assert_eq!(key.phrase_weight("事实"), Some(60));
    assert_eq!(key.phrase_weight("实施"), Some(90));
}

#[test]
fn best_weight_covers_every_phrase() {
    let agg: Aggregate = vec![
        kp("a", "阿姨", 5),
        kp("a", "啊呀", 7),
        kp("b", "爸爸", 1),
        kp("a", "阿姨", 9),
    ]
    .into_iter()
    .collect();
    for (_, key) in agg.iter() {
        assert!(key.phrases().all(|(_, w)| w <= key.best_weight()));
    }
}

#[test]
fn merge_matches_sequential_absorb() {
    let first = vec![kp("nihao", "你好", 100), kp("ninhao", "您好", 10)];
    let second = vec![kp("nihao", "你好", 50), kp("nihao", "拟好", 70)];

    let sequential: Aggregate = first.iter().chain(second.iter()).cloned().collect();
    let merged = first
        .into_iter()
        .collect::<Aggregate>()
        .merge(second.into_iter().collect());
    assert_eq!(merged, sequential);
}

#[test]
fn empty_aggregate() {
    let agg = Aggregate::new();
    assert!(agg.is_empty());
    assert_eq!(agg.len(), 0);
    assert!(agg.get("nihao").is_none());
    assert_eq!(agg.clone().merge(Aggregate::new()), agg);
}

fn arb_record() -> impl Strategy<Value = KeyedPhrase> {
    (
        prop::sample::select(vec!["nihao", "ninhao", "shi", "xian"]),
        prop::sample::select(vec!["你好", "您好", "是的", "西安", "先"]),
        1u64..200,
    )
        .prop_map(|(k, p, w)| kp(k, p, w))
}

proptest! {
    #[test]
    fn absorb_order_does_not_matter(
        records in prop::collection::vec(arb_record(), 0..40),
        seed in any::<u64>(),
    ) {
        let forward: Aggregate = records.iter().cloned().collect();
        let reversed: Aggregate = records.iter().rev().cloned().collect();
        prop_assert_eq!(&forward, &reversed);

        // Deterministic rotation as a second permutation.
        let mut rotated = records.clone();
        if !rotated.is_empty() {
            let mid = (seed as usize) % rotated.len();
            rotated.rotate_left(mid);
        }
        prop_assert_eq!(&forward, &rotated.into_iter().collect::<Aggregate>());
    }

    #[test]
    fn duplicates_are_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
        let once: Aggregate = records.iter().cloned().collect();
        let twice: Aggregate = records.iter().chain(records.iter()).cloned().collect();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.clone().merge(once.clone()), once);
    }

    #[test]
    fn merge_is_commutative(
        a in prop::collection::vec(arb_record(), 0..20),
        b in prop::collection::vec(arb_record(), 0..20),
    ) {
        let a: Aggregate = a.into_iter().collect();
        let b: Aggregate = b.into_iter().collect();
        prop_assert_eq!(a.clone().merge(b.clone()), b.merge(a));
    }
}
