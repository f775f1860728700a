use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ssi_storage::{MemoryStorage, Record, RecordStore, ServiceStorage, SledStorage};
use std::sync::Arc;

// Property-based tests for single-record round trips. Whatever a record
// holds (unicode text, finite floats, nested JSON) must come back equal.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Presentation {
    id: String,
    holder: String,
    score: f64,
    tags: Vec<String>,
    submission: Value,
}

impl Record for Presentation {
    const KIND: &'static str = "presentation";

    fn id(&self) -> &str {
        &self.id
    }
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
}

fn arbitrary_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        finite_f64().prop_map(Value::from),
        "\\PC{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("\\PC{0,8}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arbitrary_presentation() -> impl Strategy<Value = Presentation> {
    (
        "\\PC{1,24}",
        "\\PC{0,32}",
        finite_f64(),
        prop::collection::vec("\\PC{0,12}", 0..4),
        arbitrary_json(),
    )
        .prop_map(|(id, holder, score, tags, submission)| Presentation {
            id,
            holder,
            score,
            tags,
            submission,
        })
}

fn assert_round_trip(db: Arc<dyn ServiceStorage>, record: &Presentation) -> Result<(), TestCaseError> {
    let store: RecordStore<Presentation> = RecordStore::new(db, "presentation");
    store.store(record).unwrap();
    let fetched = store.get(record.id()).unwrap();
    prop_assert_eq!(&fetched, record);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stored_records_read_back_equal(record in arbitrary_presentation()) {
        assert_round_trip(Arc::new(MemoryStorage::new()), &record)?;
        assert_round_trip(Arc::new(SledStorage::temporary().unwrap()), &record)?;
    }
}
