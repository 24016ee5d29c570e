// Property-based tests for the save/load round trip.
// CI: 64 cases (default). Soak: PROPTEST_CASES=1000 cargo test --release

use proptest::prelude::*;
use divspace_config::{SlotStore, Variant};
use divspace_engine::{FieldUpdate, Operation, SpaceState};

fn config_64() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn arb_edit() -> impl Strategy<Value = Operation> {
    let update = prop_oneof![
        ".{0,12}".prop_map(FieldUpdate::Details),
        "#[0-9a-f]{6}".prop_map(FieldUpdate::Color),
        "[a-z ,]{0,16}".prop_map(FieldUpdate::Tags),
        any::<u32>().prop_map(FieldUpdate::Capacity),
    ];
    prop_oneof![
        (0usize..9, update).prop_map(|(id, update)| Operation::SetField { id, update }),
        (0usize..9).prop_map(|id| Operation::ToggleReservation { id }),
    ]
}

proptest! {
    #![proptest_config(config_64())]

    #[test]
    fn save_then_load_is_identity(
        name in "[A-Za-z ]{0,10}",
        edits in prop::collection::vec(arb_edit(), 0..20),
        minimal in any::<bool>(),
    ) {
        let mut state = SpaceState::new(3, 3)
            .apply(Operation::SetSessionName(name))
            .unwrap();
        for op in edits {
            if let Ok(next) = state.apply(op) {
                state = next;
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let store = SlotStore::new(dir.path());
        let variant = if minimal { Variant::Minimal } else { Variant::Enhanced };
        let config = state.to_persisted();

        store.save(variant, &config).unwrap();
        prop_assert_eq!(store.load(variant), Some(config));
        prop_assert_eq!(store.load_state(variant), state);
    }
}
