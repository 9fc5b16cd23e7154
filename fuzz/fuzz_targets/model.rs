#![no_main]
use std::collections::HashMap;

use hashtable::{HashTable, TableError};
use libfuzzer_sys::{arbitrary::Unstructured, fuzz_target};

fuzz_target!(|bytes| {
    const MAX_CAPACITY: usize = 64;

    let mut u = Unstructured::new(bytes);
    if let Ok(capacity) = u.int_in_range(1..=MAX_CAPACITY) {
        let mut table = HashTable::new(capacity).unwrap();
        let mut model = HashMap::new();
        while let (Ok(key), Ok(value)) = (u.arbitrary::<String>(), u.arbitrary::<u32>()) {
            match table.set(key.clone(), value) {
                Ok(old) => assert_eq!(old, model.insert(key, value)),
                Err(TableError::Full { capacity: c }) => {
                    assert_eq!(c, capacity);
                    assert_eq!(model.len(), capacity);
                    assert!(!model.contains_key(&key));
                }
                Err(e) => panic!("unexpected {:?}", e),
            }
            if u.is_empty() {
                break;
            }
        }
        assert!(table.invariants());
        assert_eq!(table.len(), capacity);
        assert_eq!(table.occupied(), model.len());
        for (key, value) in &model {
            assert_eq!(table.get(key.as_str()), Ok(value));
        }
    }
});
